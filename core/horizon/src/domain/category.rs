//! 分析カテゴリ（どの結果フィールドが埋まるか・入力の意味が何かを決める）

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AnalysisCategory {
    /// 語形成（A1-C2 の派生語一覧）
    WordFormation,
    /// 慣用句・句動詞
    IdiomsPhrasal,
    /// 文法トピック
    Grammar,
    /// 文のアップグレード（C2 書き換え）
    Challenge,
}

impl AnalysisCategory {
    /// メニュー順
    pub const ALL: [AnalysisCategory; 4] = [
        AnalysisCategory::WordFormation,
        AnalysisCategory::IdiomsPhrasal,
        AnalysisCategory::Grammar,
        AnalysisCategory::Challenge,
    ];

    /// ワイヤ表現（"WORD_FORMATION" など）
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::WordFormation => "WORD_FORMATION",
            Self::IdiomsPhrasal => "IDIOMS_PHRASAL",
            Self::Grammar => "GRAMMAR",
            Self::Challenge => "CHALLENGE",
        }
    }

    /// CLI 用の短いコード
    pub fn code(&self) -> &'static str {
        match self {
            Self::WordFormation => "word",
            Self::IdiomsPhrasal => "idioms",
            Self::Grammar => "grammar",
            Self::Challenge => "challenge",
        }
    }

    /// CLI コードまたはワイヤ表現から解釈する（大文字小文字は区別しない）
    pub fn from_code(s: &str) -> Option<Self> {
        let lower = s.trim().to_lowercase();
        Self::ALL
            .iter()
            .copied()
            .find(|c| c.code() == lower || c.as_str().to_lowercase() == lower)
    }

    /// メニュー番号（1 始まり）から解釈する
    pub fn from_menu_number(n: usize) -> Option<Self> {
        n.checked_sub(1).and_then(|i| Self::ALL.get(i).copied())
    }

    /// 単語を音声で読み上げられるカテゴリか（文法トピックは読み上げない）
    pub fn is_speakable(&self) -> bool {
        !matches!(self, Self::Grammar)
    }
}

impl std::fmt::Display for AnalysisCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

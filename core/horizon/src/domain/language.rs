//! 学習者が選ぶ説明言語

/// 説明文に使う言語。一度選ぶとリセットまで変わらない。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Language {
    English,
    Vietnamese,
}

impl Language {
    pub const ALL: [Language; 2] = [Language::English, Language::Vietnamese];

    /// ログ・内部表現用の識別子
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::English => "ENGLISH",
            Self::Vietnamese => "VIETNAMESE",
        }
    }

    /// プロンプトや画面に出す表示名
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::English => "English",
            Self::Vietnamese => "Vietnamese",
        }
    }

    /// CLI / 端末入力のコード（en, vi, english, vietnamese）から解釈する
    pub fn from_code(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "en" | "english" => Some(Self::English),
            "vi" | "vietnamese" => Some(Self::Vietnamese),
            _ => None,
        }
    }
}

impl std::fmt::Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.display_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_code() {
        assert_eq!(Language::from_code("en"), Some(Language::English));
        assert_eq!(Language::from_code(" VI "), Some(Language::Vietnamese));
        assert_eq!(Language::from_code("Vietnamese"), Some(Language::Vietnamese));
        assert_eq!(Language::from_code("fr"), None);
    }
}

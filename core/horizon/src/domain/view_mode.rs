//! 画面の状態

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewMode {
    LangSelect,
    CatSelect,
    WordInput,
    Loading,
    Analysis,
    Error,
}

impl ViewMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::LangSelect => "LANG_SELECT",
            Self::CatSelect => "CAT_SELECT",
            Self::WordInput => "WORD_INPUT",
            Self::Loading => "LOADING",
            Self::Analysis => "ANALYSIS",
            Self::Error => "ERROR",
        }
    }

    /// 語の送信（とインバンドコマンド）を受け付ける状態か
    pub fn accepts_submit(&self) -> bool {
        matches!(self, Self::WordInput | Self::Analysis)
    }
}

impl Default for ViewMode {
    fn default() -> Self {
        Self::LangSelect
    }
}

impl std::fmt::Display for ViewMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

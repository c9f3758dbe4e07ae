//! 分析対象の語（Term）と、1 回の分析ラウンドで送る要求

use crate::domain::{AnalysisCategory, Language};

/// 前後の空白を除いた、空でない入力文字列
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Term(String);

impl Term {
    /// 前後の空白を除き、空なら None
    pub fn parse(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(Self(trimmed.to_string()))
        }
    }
}

impl std::ops::Deref for Term {
    type Target = str;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl AsRef<str> for Term {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Term {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// 分析要求。送信ごとに作り直し、保存しない。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalysisRequest {
    pub term: Term,
    pub language: Language,
    pub category: AnalysisCategory,
}

//! 分析履歴（セッション内のみ・追記のみ）

use crate::domain::AnalysisCategory;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryEntry {
    pub term: String,
    pub category: AnalysisCategory,
    /// UNIX エポックからのミリ秒
    pub timestamp_ms: u64,
}

/// 成功した分析の記録。重複も削除もしない。
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct History {
    entries: Vec<HistoryEntry>,
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, entry: HistoryEntry) {
        self.entries.push(entry);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// 追記順
    pub fn entries(&self) -> &[HistoryEntry] {
        &self.entries
    }

    /// 表示順（新しい順）。内部の並びは変えない。
    pub fn recent_first(&self) -> impl Iterator<Item = &HistoryEntry> {
        self.entries.iter().rev()
    }
}

//! セッションストア（1 回の起動の間だけ生きる状態）
//!
//! 画面状態・選択中の言語/カテゴリ・入力・表示中の結果・履歴・お気に入りを持つ。
//! 変更は状態機械からのみ行い、どの操作も失敗しない。
//! 分析ラウンドごとに世代トークンを発行し、現在のトークンと一致する完了だけを受け付ける。

use crate::domain::{
    AnalysisCategory, AnalysisResult, Favorites, History, HistoryEntry, Language, ViewMode,
};

/// 分析ラウンドの世代トークン
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoundToken(u64);

impl RoundToken {
    pub fn generation(&self) -> u64 {
        self.0
    }
}

#[derive(Debug, Default)]
pub struct SessionStore {
    mode: ViewMode,
    language: Option<Language>,
    category: Option<AnalysisCategory>,
    input: String,
    result: Option<AnalysisResult>,
    viewer_open: bool,
    history: History,
    favorites: Favorites,
    generation: u64,
    active_round: Option<RoundToken>,
}

impl SessionStore {
    /// 空の履歴・お気に入りで LANG_SELECT から始める
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mode(&self) -> ViewMode {
        self.mode
    }

    pub fn language(&self) -> Option<Language> {
        self.language
    }

    pub fn category(&self) -> Option<AnalysisCategory> {
        self.category
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn result(&self) -> Option<&AnalysisResult> {
        self.result.as_ref()
    }

    /// 分析の応答待ちか
    pub fn is_loading(&self) -> bool {
        self.active_round.is_some()
    }

    pub fn is_viewer_open(&self) -> bool {
        self.viewer_open
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn favorites(&self) -> &Favorites {
        &self.favorites
    }

    pub(crate) fn set_mode(&mut self, mode: ViewMode) {
        self.mode = mode;
    }

    pub(crate) fn set_language(&mut self, language: Option<Language>) {
        self.language = language;
    }

    pub(crate) fn set_category(&mut self, category: Option<AnalysisCategory>) {
        self.category = category;
    }

    pub(crate) fn set_input(&mut self, input: impl Into<String>) {
        self.input = input.into();
    }

    pub(crate) fn clear_input(&mut self) {
        self.input.clear();
    }

    pub(crate) fn set_viewer_open(&mut self, open: bool) {
        self.viewer_open = open;
    }

    /// 新しいラウンドを始め、そのトークンを返す。以前のトークンは無効になる。
    pub(crate) fn begin_round(&mut self) -> RoundToken {
        self.generation += 1;
        let token = RoundToken(self.generation);
        self.active_round = Some(token);
        token
    }

    /// token が現在のラウンドのものか
    pub fn is_current_round(&self, token: RoundToken) -> bool {
        self.active_round == Some(token)
    }

    pub(crate) fn finish_round(&mut self) {
        self.active_round = None;
    }

    /// 結果を丸ごと置き換える
    pub(crate) fn replace_result(&mut self, result: Option<AnalysisResult>) {
        self.result = result;
    }

    pub(crate) fn push_history(&mut self, entry: HistoryEntry) {
        self.history.push(entry);
    }

    /// 追加した場合に true
    pub(crate) fn toggle_favorite(&mut self, term: &str) -> bool {
        self.favorites.toggle(term)
    }

    /// 言語・カテゴリ・入力・結果を消して LANG_SELECT へ。
    /// 進行中のラウンドも無効にする。履歴・お気に入り・ビューワの開閉は残す。
    pub(crate) fn reset(&mut self) {
        self.language = None;
        self.category = None;
        self.input.clear();
        self.result = None;
        self.active_round = None;
        self.mode = ViewMode::LangSelect;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_store_is_empty_lang_select() {
        let s = SessionStore::new();
        assert_eq!(s.mode(), ViewMode::LangSelect);
        assert!(s.language().is_none());
        assert!(s.category().is_none());
        assert!(s.result().is_none());
        assert!(!s.is_loading());
        assert!(!s.is_viewer_open());
        assert!(s.history().is_empty());
        assert!(s.favorites().is_empty());
    }

    #[test]
    fn test_begin_round_invalidates_previous_token() {
        let mut s = SessionStore::new();
        let first = s.begin_round();
        let second = s.begin_round();
        assert_ne!(first, second);
        assert!(!s.is_current_round(first));
        assert!(s.is_current_round(second));
        assert!(s.is_loading());
        s.finish_round();
        assert!(!s.is_current_round(second));
        assert!(!s.is_loading());
    }

    #[test]
    fn test_reset_keeps_history_and_favorites() {
        let mut s = SessionStore::new();
        s.set_language(Some(Language::English));
        s.set_category(Some(AnalysisCategory::Grammar));
        s.set_input("Inversion");
        s.set_mode(ViewMode::WordInput);
        s.push_history(HistoryEntry {
            term: "Heart".to_string(),
            category: AnalysisCategory::WordFormation,
            timestamp_ms: 1,
        });
        s.toggle_favorite("Heart");
        let token = s.begin_round();
        s.set_viewer_open(true);

        s.reset();

        assert_eq!(s.mode(), ViewMode::LangSelect);
        assert!(s.language().is_none());
        assert!(s.category().is_none());
        assert_eq!(s.input(), "");
        assert!(!s.is_current_round(token));
        assert_eq!(s.history().len(), 1);
        assert!(s.favorites().contains("Heart"));
        assert!(s.is_viewer_open());
    }
}

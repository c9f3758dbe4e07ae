//! 一時キャプション（効果音の字幕）の種類
//!
//! 状態機械は何が起きたかだけを出し、文言と表示時間は表示層が決める。

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    LanguageChosen,
    CategoryChosen,
    AnalysisStarted,
    /// 結果の効果音テキスト（空ならデフォルト文言）
    AnalysisSucceeded { sound_effect: Option<String> },
    SavedToHistory,
    FavoriteAdded { term: String },
    AnalysisFailed,
}

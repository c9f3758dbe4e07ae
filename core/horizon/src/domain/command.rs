//! コマンドの enum
//!
//! `HorizonCommand` は CLI の実行モード、`SubmitIntent` は送信テキストの解釈結果。

use crate::domain::{AnalysisCategory, Language, Term};
use common::domain::{ModelName, ProviderName};

/// horizon の実行モード
#[derive(Debug, Clone, PartialEq)]
pub enum HorizonCommand {
    /// ヘルプ表示
    Help,
    /// プロファイル一覧
    ListProfiles,
    /// 対話アプリを起動する
    Academy(AcademyOptions),
}

/// 対話アプリの起動オプション
#[derive(Debug, Clone, PartialEq, Default)]
pub struct AcademyOptions {
    pub profile: Option<ProviderName>,
    pub model: Option<ModelName>,
    pub fallback_model: Option<ModelName>,
    /// 起動時に選んでおく言語
    pub language: Option<Language>,
    /// 起動時に選んでおくカテゴリ（language 指定時のみ有効）
    pub category: Option<AnalysisCategory>,
    pub speech: bool,
}

/// 送信テキストの解釈。分析要求を作る前にインバンドコマンドを取り出す。
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitIntent {
    /// "fav"
    ToggleFavorite,
    /// "history" / "favorites" / "my favorites"
    OpenViewer,
    /// "menu" / "home"
    Reset,
    Analyze(Term),
}

impl SubmitIntent {
    /// 大文字小文字を区別せずにコマンドを判定する
    pub fn classify(term: Term) -> Self {
        match term.to_lowercase().as_str() {
            "fav" => Self::ToggleFavorite,
            "history" | "favorites" | "my favorites" => Self::OpenViewer,
            "menu" | "home" => Self::Reset,
            _ => Self::Analyze(term),
        }
    }
}

//! 画面の状態機械
//!
//! ユーザー操作（Action）と分析の完了を受けて SessionStore を更新し、
//! 表示層が実行すべき副作用（Effect）を返す。I/O は持たない。
//!
//! 送信の判定順:
//! 1. WORD_INPUT / ANALYSIS 以外では何もしない（LOADING 中の多重送信を弾く）
//! 2. 言語とカテゴリが未選択なら何もしない
//! 3. 空白だけの語なら何もしない
//! 4. インバンドコマンド（fav / history 等 / menu 等）を先に取り出す
//! 5. それ以外は LOADING に入り、新しいラウンドのトークン付きで分析を要求する

use std::sync::Arc;

use crate::domain::{
    AnalysisCategory, AnalysisRequest, AnalysisResult, HistoryEntry, Language, Notice,
    SubmitIntent, Term, ViewMode,
};
use crate::usecase::session::{RoundToken, SessionStore};
use common::error::Error;
use common::ports::outbound::{Clock, Log, LogLevel, LogRecord};

/// 表示層から来るユーザー操作
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    SelectLanguage(Language),
    SelectCategory(AnalysisCategory),
    /// CAT_SELECT / WORD_INPUT の戻る
    Back,
    /// 入力欄の内容を置き換える
    EditInput(String),
    /// 入力欄の内容を送信する
    Submit,
    /// 結果画面のお気に入りボタン
    ToggleFavorite,
    OpenViewer,
    CloseViewer,
    /// ビューワで語を選ぶ（ビューワを閉じて、その語を送信する）
    SelectViewerEntry(String),
    /// メニューボタン / やり直し。どの状態からでも全リセット
    Reset,
    /// 結果の語を読み上げる
    Speak,
}

/// 状態機械が返す副作用
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// 分析を非同期に始め、完了したら token と一緒に complete へ渡す
    StartAnalysis {
        token: RoundToken,
        request: AnalysisRequest,
    },
    Notice(Notice),
    Speak(String),
}

pub struct ViewStateMachine {
    clock: Arc<dyn Clock>,
    log: Arc<dyn Log>,
}

impl ViewStateMachine {
    pub fn new(clock: Arc<dyn Clock>, log: Arc<dyn Log>) -> Self {
        Self { clock, log }
    }

    /// 操作を 1 つ適用する。受け付けない状態での操作は何もしない。
    pub fn dispatch(&self, store: &mut SessionStore, action: Action) -> Vec<Effect> {
        match action {
            Action::SelectLanguage(language) => {
                if store.mode() != ViewMode::LangSelect {
                    return self.ignored(store, "select_language");
                }
                store.set_language(Some(language));
                self.transition(store, ViewMode::CatSelect);
                vec![Effect::Notice(Notice::LanguageChosen)]
            }
            Action::SelectCategory(category) => {
                if store.mode() != ViewMode::CatSelect {
                    return self.ignored(store, "select_category");
                }
                store.set_category(Some(category));
                self.transition(store, ViewMode::WordInput);
                vec![Effect::Notice(Notice::CategoryChosen)]
            }
            Action::Back => {
                match store.mode() {
                    ViewMode::CatSelect => {
                        store.set_language(None);
                        self.transition(store, ViewMode::LangSelect);
                    }
                    ViewMode::WordInput => {
                        store.set_category(None);
                        self.transition(store, ViewMode::CatSelect);
                    }
                    _ => return self.ignored(store, "back"),
                }
                Vec::new()
            }
            Action::EditInput(text) => {
                if store.mode().accepts_submit() {
                    store.set_input(text);
                }
                Vec::new()
            }
            Action::Submit => {
                let raw = store.input().to_string();
                self.submit(store, &raw)
            }
            Action::ToggleFavorite => {
                if store.mode() != ViewMode::Analysis {
                    return self.ignored(store, "toggle_favorite");
                }
                self.toggle_current_favorite(store)
            }
            Action::OpenViewer => {
                store.set_viewer_open(true);
                Vec::new()
            }
            Action::CloseViewer => {
                store.set_viewer_open(false);
                Vec::new()
            }
            Action::SelectViewerEntry(term) => {
                store.set_viewer_open(false);
                self.submit(store, &term)
            }
            Action::Reset => {
                self.full_reset(store);
                Vec::new()
            }
            Action::Speak => match (store.mode(), store.result()) {
                (ViewMode::Analysis, Some(result)) if result.category().is_speakable() => {
                    vec![Effect::Speak(result.term().to_string())]
                }
                _ => self.ignored(store, "speak"),
            },
        }
    }

    /// 分析ラウンドの完了を適用する。現在のラウンドでなければ捨てる。
    pub fn complete(
        &self,
        store: &mut SessionStore,
        token: RoundToken,
        outcome: Result<AnalysisResult, Error>,
    ) -> Vec<Effect> {
        if !store.is_current_round(token) {
            let _ = self.log.log(
                &LogRecord::new(
                    LogLevel::Warn,
                    "usecase",
                    "analysis",
                    "stale completion discarded",
                )
                .field("generation", token.generation())
                .field("mode", store.mode().as_str()),
            );
            return Vec::new();
        }
        store.finish_round();

        match outcome {
            Ok(result) => {
                let entry = HistoryEntry {
                    term: result.term().to_string(),
                    category: result.category(),
                    timestamp_ms: self.clock.now_ms(),
                };
                let sound_effect = result.sound_effect().map(|s| s.to_string());
                let _ = self.log.log(
                    &LogRecord::new(LogLevel::Info, "usecase", "analysis", "analysis succeeded")
                        .field("generation", token.generation())
                        .field("term", entry.term.as_str())
                        .field("category", entry.category.as_str()),
                );
                store.replace_result(Some(result));
                store.push_history(entry);
                store.clear_input();
                self.transition(store, ViewMode::Analysis);
                vec![
                    Effect::Notice(Notice::SavedToHistory),
                    Effect::Notice(Notice::AnalysisSucceeded { sound_effect }),
                ]
            }
            Err(e) => {
                let _ = self.log.log(
                    &LogRecord::new(LogLevel::Error, "usecase", "analysis", e.to_string())
                        .field("generation", token.generation())
                        .field("exit_code", e.exit_code()),
                );
                store.replace_result(None);
                self.transition(store, ViewMode::Error);
                vec![Effect::Notice(Notice::AnalysisFailed)]
            }
        }
    }

    fn submit(&self, store: &mut SessionStore, raw: &str) -> Vec<Effect> {
        if !store.mode().accepts_submit() {
            return self.ignored(store, "submit");
        }
        let (language, category) = match (store.language(), store.category()) {
            (Some(l), Some(c)) => (l, c),
            _ => return self.ignored(store, "submit"),
        };
        let term = match Term::parse(raw) {
            Some(t) => t,
            None => return Vec::new(),
        };

        match SubmitIntent::classify(term) {
            SubmitIntent::ToggleFavorite => {
                if store.result().is_none() {
                    return self.ignored(store, "fav");
                }
                let effects = self.toggle_current_favorite(store);
                store.clear_input();
                effects
            }
            SubmitIntent::OpenViewer => {
                store.set_viewer_open(true);
                store.clear_input();
                Vec::new()
            }
            SubmitIntent::Reset => {
                self.full_reset(store);
                Vec::new()
            }
            SubmitIntent::Analyze(term) => {
                store.clear_input();
                let token = store.begin_round();
                self.transition(store, ViewMode::Loading);
                let _ = self.log.log(
                    &LogRecord::new(LogLevel::Info, "usecase", "analysis", "analysis started")
                        .field("generation", token.generation())
                        .field("term", term.to_string())
                        .field("language", language.as_str())
                        .field("category", category.as_str()),
                );
                vec![
                    Effect::Notice(Notice::AnalysisStarted),
                    Effect::StartAnalysis {
                        token,
                        request: AnalysisRequest {
                            term,
                            language,
                            category,
                        },
                    },
                ]
            }
        }
    }

    fn toggle_current_favorite(&self, store: &mut SessionStore) -> Vec<Effect> {
        let term = match store.result() {
            Some(r) => r.term().to_string(),
            None => return Vec::new(),
        };
        if store.toggle_favorite(&term) {
            vec![Effect::Notice(Notice::FavoriteAdded { term })]
        } else {
            Vec::new()
        }
    }

    fn full_reset(&self, store: &mut SessionStore) {
        let from = store.mode();
        store.reset();
        self.log_transition(from, ViewMode::LangSelect);
    }

    fn transition(&self, store: &mut SessionStore, to: ViewMode) {
        let from = store.mode();
        store.set_mode(to);
        self.log_transition(from, to);
    }

    fn log_transition(&self, from: ViewMode, to: ViewMode) {
        let _ = self.log.log(
            &LogRecord::new(LogLevel::Debug, "usecase", "transition", "transition")
                .field("from", from.as_str())
                .field("to", to.as_str()),
        );
    }

    fn ignored(&self, store: &SessionStore, action: &str) -> Vec<Effect> {
        let _ = self.log.log(
            &LogRecord::new(LogLevel::Debug, "usecase", "transition", "action ignored")
                .field("action", action)
                .field("mode", store.mode().as_str()),
        );
        Vec::new()
    }
}

//! 入力行の解釈（1 行 → UI コマンド列）

use super::ViewerTab;
use crate::domain::{AnalysisCategory, Language, ViewMode};
use crate::usecase::{Action, SessionStore};

#[derive(Debug, Clone, PartialEq)]
pub enum UiCommand {
    Action(Action),
    SwitchTab(ViewerTab),
    Quit,
}

/// 入力行を現在の画面に沿って解釈する。該当しなければ空。
pub fn interpret(line: &str, store: &SessionStore, tab: ViewerTab) -> Vec<UiCommand> {
    let trimmed = line.trim();
    let lower = trimmed.to_lowercase();

    if lower == ":quit" || lower == ":q" {
        return vec![UiCommand::Quit];
    }

    if store.is_viewer_open() {
        return interpret_viewer(trimmed, &lower, store, tab);
    }

    match lower.as_str() {
        ":phone" => return vec![UiCommand::Action(Action::OpenViewer)],
        ":menu" | ":start" => return vec![UiCommand::Action(Action::Reset)],
        ":back" => return vec![UiCommand::Action(Action::Back)],
        ":fav" => return vec![UiCommand::Action(Action::ToggleFavorite)],
        ":speak" => return vec![UiCommand::Action(Action::Speak)],
        _ => {}
    }

    // WORD_INPUT / ANALYSIS では送信経路のインバンドコマンドとして扱う
    if matches!(lower.as_str(), "menu" | "home")
        && matches!(store.mode(), ViewMode::CatSelect | ViewMode::Loading | ViewMode::Error)
    {
        return vec![UiCommand::Action(Action::Reset)];
    }

    match store.mode() {
        ViewMode::LangSelect => language_choice(&lower)
            .map(|l| vec![UiCommand::Action(Action::SelectLanguage(l))])
            .unwrap_or_default(),
        ViewMode::CatSelect => category_choice(&lower)
            .map(|c| vec![UiCommand::Action(Action::SelectCategory(c))])
            .unwrap_or_default(),
        ViewMode::WordInput | ViewMode::Analysis => vec![
            UiCommand::Action(Action::EditInput(line.to_string())),
            UiCommand::Action(Action::Submit),
        ],
        ViewMode::Loading | ViewMode::Error => Vec::new(),
    }
}

fn interpret_viewer(trimmed: &str, lower: &str, store: &SessionStore, tab: ViewerTab) -> Vec<UiCommand> {
    match lower {
        ":close" | ":phone" => return vec![UiCommand::Action(Action::CloseViewer)],
        "h" => return vec![UiCommand::SwitchTab(ViewerTab::History)],
        "f" => return vec![UiCommand::SwitchTab(ViewerTab::Favorites)],
        _ => {}
    }
    let Ok(n) = trimmed.parse::<usize>() else {
        return Vec::new();
    };
    let Some(index) = n.checked_sub(1) else {
        return Vec::new();
    };
    let term = match tab {
        ViewerTab::History => store
            .history()
            .recent_first()
            .nth(index)
            .map(|e| e.term.clone()),
        ViewerTab::Favorites => store.favorites().iter().nth(index).map(str::to_string),
    };
    term.map(|t| vec![UiCommand::Action(Action::SelectViewerEntry(t))])
        .unwrap_or_default()
}

fn language_choice(lower: &str) -> Option<Language> {
    match lower {
        "1" => Some(Language::English),
        "2" => Some(Language::Vietnamese),
        other => Language::from_code(other),
    }
}

fn category_choice(lower: &str) -> Option<AnalysisCategory> {
    match lower.parse::<usize>() {
        Ok(n) => AnalysisCategory::from_menu_number(n),
        Err(_) => AnalysisCategory::from_code(lower),
    }
}

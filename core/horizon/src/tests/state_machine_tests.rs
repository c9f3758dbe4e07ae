use super::support::{word_reply, Harness};
use crate::domain::{AnalysisCategory, Language, Notice, ViewMode};
use crate::usecase::{Action, Effect};

fn started(effects: &[Effect]) -> usize {
    effects
        .iter()
        .filter(|e| matches!(e, Effect::StartAnalysis { .. }))
        .count()
}

#[test]
fn test_select_language_moves_to_category_menu() {
    let mut h = Harness::new(vec![]);
    h.send(Action::SelectLanguage(Language::Vietnamese));
    assert_eq!(h.store.mode(), ViewMode::CatSelect);
    assert_eq!(h.store.language(), Some(Language::Vietnamese));
    assert_eq!(h.effects, vec![Effect::Notice(Notice::LanguageChosen)]);
}

#[test]
fn test_selection_outside_its_menu_is_ignored() {
    let mut h = Harness::new(vec![]);
    h.send(Action::SelectCategory(AnalysisCategory::Grammar));
    assert_eq!(h.store.mode(), ViewMode::LangSelect);
    assert_eq!(h.store.category(), None);

    h.send(Action::SelectLanguage(Language::English));
    h.send(Action::SelectLanguage(Language::Vietnamese));
    assert_eq!(h.store.language(), Some(Language::English));
}

#[test]
fn test_back_clears_the_latest_selection() {
    let mut h = Harness::new(vec![]);
    h.choose(Language::English, AnalysisCategory::IdiomsPhrasal);
    h.send(Action::Back);
    assert_eq!(h.store.mode(), ViewMode::CatSelect);
    assert_eq!(h.store.category(), None);
    assert_eq!(h.store.language(), Some(Language::English));
    h.send(Action::Back);
    assert_eq!(h.store.mode(), ViewMode::LangSelect);
    assert_eq!(h.store.language(), None);
}

#[test]
fn test_whitespace_submit_is_ignored() {
    let mut h = Harness::new(vec![]);
    h.choose(Language::English, AnalysisCategory::WordFormation);
    h.submit("   ");
    assert_eq!(h.store.mode(), ViewMode::WordInput);
    assert_eq!(started(&h.effects), 0);
    assert_eq!(h.generation.call_count(), 0);
}

#[test]
fn test_submit_trims_term_and_enters_loading() {
    let h_machine = Harness::new(vec![]);
    let mut store = crate::usecase::SessionStore::new();
    let machine = &h_machine.machine;
    machine.dispatch(&mut store, Action::SelectLanguage(Language::English));
    machine.dispatch(&mut store, Action::SelectCategory(AnalysisCategory::WordFormation));
    machine.dispatch(&mut store, Action::EditInput("  Heart  ".to_string()));
    let effects = machine.dispatch(&mut store, Action::Submit);

    assert_eq!(store.mode(), ViewMode::Loading);
    assert!(store.is_loading());
    assert_eq!(store.input(), "");
    assert_eq!(effects.len(), 2);
    assert_eq!(effects[0], Effect::Notice(Notice::AnalysisStarted));
    match &effects[1] {
        Effect::StartAnalysis { request, .. } => {
            assert_eq!(request.term.to_string(), "Heart");
            assert_eq!(request.language, Language::English);
            assert_eq!(request.category, AnalysisCategory::WordFormation);
        }
        other => panic!("expected StartAnalysis, got {:?}", other),
    }
}

#[test]
fn test_submit_while_loading_is_rejected() {
    let h = Harness::new(vec![]);
    let mut store = crate::usecase::SessionStore::new();
    let machine = &h.machine;
    machine.dispatch(&mut store, Action::SelectLanguage(Language::English));
    machine.dispatch(&mut store, Action::SelectCategory(AnalysisCategory::WordFormation));
    machine.dispatch(&mut store, Action::EditInput("Heart".to_string()));
    machine.dispatch(&mut store, Action::Submit);

    machine.dispatch(&mut store, Action::EditInput("Blue".to_string()));
    let effects = machine.dispatch(&mut store, Action::Submit);
    assert!(effects.is_empty());
    assert_eq!(store.mode(), ViewMode::Loading);
    assert_eq!(store.input(), "");
}

#[test]
fn test_success_records_history_with_clock_time() {
    let mut h = Harness::new(vec![Ok(word_reply("Heart"))]);
    h.choose(Language::English, AnalysisCategory::WordFormation);
    h.clock.advance(5_000);
    h.submit("Heart");

    assert_eq!(h.store.mode(), ViewMode::Analysis);
    assert!(!h.store.is_loading());
    let entries = h.store.history().entries();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].timestamp_ms, 1_700_000_005_000);
    assert!(h.effects.contains(&Effect::Notice(Notice::SavedToHistory)));
    assert!(h.effects.contains(&Effect::Notice(Notice::AnalysisSucceeded {
        sound_effect: Some("*Thump thump* 💓".to_string()),
    })));
}

#[test]
fn test_failure_moves_to_error_without_result() {
    let mut h = Harness::new(vec![Err(common::error::Error::http("HTTP 500: internal"))]);
    h.choose(Language::English, AnalysisCategory::WordFormation);
    h.submit("Heart");
    assert_eq!(h.store.mode(), ViewMode::Error);
    assert!(h.store.result().is_none());
    assert!(!h.store.is_loading());
    assert!(h.store.history().is_empty());
    assert_eq!(h.effects.last(), Some(&Effect::Notice(Notice::AnalysisFailed)));
}

#[test]
fn test_stale_completion_after_reset_is_discarded() {
    let h = Harness::new(vec![]);
    let mut store = crate::usecase::SessionStore::new();
    let machine = &h.machine;
    machine.dispatch(&mut store, Action::SelectLanguage(Language::English));
    machine.dispatch(&mut store, Action::SelectCategory(AnalysisCategory::WordFormation));
    machine.dispatch(&mut store, Action::EditInput("Heart".to_string()));
    let effects = machine.dispatch(&mut store, Action::Submit);
    let token = match &effects[1] {
        Effect::StartAnalysis { token, .. } => *token,
        other => panic!("expected StartAnalysis, got {:?}", other),
    };

    machine.dispatch(&mut store, Action::Reset);
    let result = crate::usecase::analysis_client::parse_analysis(
        &word_reply("Heart"),
        AnalysisCategory::WordFormation,
    )
    .unwrap();
    let effects = machine.complete(&mut store, token, Ok(result));

    assert!(effects.is_empty());
    assert_eq!(store.mode(), ViewMode::LangSelect);
    assert!(store.result().is_none());
    assert!(store.history().is_empty());
    assert!(h.log.messages().iter().any(|m| m == "stale completion discarded"));
}

#[test]
fn test_speak_is_offered_for_words_only() {
    let mut h = Harness::new(vec![Ok(word_reply("Heart"))]);
    h.choose(Language::English, AnalysisCategory::WordFormation);
    h.submit("Heart");
    h.effects.clear();
    h.send(Action::Speak);
    assert_eq!(h.effects, vec![Effect::Speak("Heart".to_string())]);

    let mut g = Harness::new(vec![Ok(super::support::grammar_reply("Inversion"))]);
    g.choose(Language::English, AnalysisCategory::Grammar);
    g.submit("Inversion");
    assert_eq!(g.store.mode(), ViewMode::Analysis);
    g.effects.clear();
    g.send(Action::Speak);
    assert!(g.effects.is_empty());
}

#[test]
fn test_viewer_entry_closes_viewer_and_reanalyzes() {
    let mut h = Harness::new(vec![Ok(word_reply("Heart")), Ok(word_reply("Heart"))]);
    h.choose(Language::English, AnalysisCategory::WordFormation);
    h.submit("Heart");
    h.submit("history");
    assert!(h.store.is_viewer_open());
    assert_eq!(h.store.input(), "");

    h.send(Action::SelectViewerEntry("Heart".to_string()));
    assert!(!h.store.is_viewer_open());
    assert_eq!(h.generation.call_count(), 2);
    assert_eq!(h.store.history().len(), 2);
}

#[test]
fn test_viewer_entry_from_error_only_closes_viewer() {
    let mut h = Harness::new(vec![Err(common::error::Error::json("No response"))]);
    h.choose(Language::English, AnalysisCategory::WordFormation);
    h.submit("Heart");
    assert_eq!(h.store.mode(), ViewMode::Error);

    h.send(Action::OpenViewer);
    h.send(Action::SelectViewerEntry("Heart".to_string()));
    assert!(!h.store.is_viewer_open());
    assert_eq!(h.store.mode(), ViewMode::Error);
    assert_eq!(h.generation.call_count(), 1);
}

#[test]
fn test_favorite_button_matches_fav_command() {
    let mut h = Harness::new(vec![Ok(word_reply("Heart"))]);
    h.choose(Language::Vietnamese, AnalysisCategory::WordFormation);
    h.submit("Heart");
    h.effects.clear();
    h.send(Action::ToggleFavorite);
    assert!(h.store.favorites().contains("Heart"));
    assert_eq!(
        h.effects,
        vec![Effect::Notice(Notice::FavoriteAdded {
            term: "Heart".to_string()
        })]
    );
    h.send(Action::ToggleFavorite);
    assert!(h.store.favorites().is_empty());
}

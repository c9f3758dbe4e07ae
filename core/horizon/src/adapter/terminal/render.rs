//! 画面の描画（SessionStore の状態をテキストのカードにする）
//!
//! 結果カードの構成はカテゴリ別の中身（CategoryDetail）で決まる。

use std::fmt::Write as _;

use chrono::TimeZone;

use super::texts::{category_label, chrome, placeholder, sound_line, Chrome};
use super::ViewerTab;
use crate::domain::{
    AnalysisCategory, AnalysisResult, CategoryDetail, ConfusablePair, GrammarBlock, Language,
    Quiz, ViewMode,
};
use crate::usecase::SessionStore;

const RULE: &str = "────────────────────────────────────────";

/// 現在の画面全体（キャプション・ビューワを含む）
pub fn render_screen(store: &SessionStore, tab: ViewerTab, caption: Option<&str>) -> String {
    let mut out = String::new();
    if let Some(text) = caption {
        let _ = writeln!(out, "🔊 {}", text);
    }
    let c = chrome(store.language());
    if store.is_viewer_open() {
        out.push_str(&render_viewer(store, tab, c));
        return out;
    }
    match store.mode() {
        ViewMode::LangSelect => {
            let _ = writeln!(out, "Word Horizon Academy 🏝️");
            let _ = writeln!(out, "\"{}\"", c.welcome);
            let _ = writeln!(out, "  1. 🇺🇸 {}", Language::English.display_name());
            let _ = writeln!(out, "  2. 🇻🇳 {}", Language::Vietnamese.display_name());
        }
        ViewMode::CatSelect => {
            let _ = writeln!(out, "{}", c.main_menu);
            for (i, category) in AnalysisCategory::ALL.iter().enumerate() {
                let _ = writeln!(
                    out,
                    "  {}. {} {}",
                    i + 1,
                    category_label(*category),
                    c.category_hints[i]
                );
            }
            let _ = writeln!(out, "  :back  ← {}", c.back);
        }
        ViewMode::WordInput => {
            let _ = writeln!(out, "{}", c.enter_request);
            let _ = writeln!(out, "{}", tags(store));
            let _ = writeln!(out, "  {} ({})", placeholder(store.language(), store.category()), c.send_hint);
            let _ = writeln!(out, "  :back  ← {}", c.back_to_menu);
        }
        ViewMode::Loading => {
            let _ = writeln!(out, "⏳ {}", c.preparing);
            let _ = writeln!(out, "{}", c.working);
        }
        ViewMode::Analysis => match store.result() {
            Some(result) => {
                let favorite = store.favorites().contains(result.term());
                let fav_button = if favorite {
                    format!("★ {}", c.saved)
                } else {
                    format!("☆ {}", c.fav)
                };
                let _ = writeln!(out, "[:menu Menu] [:fav {}] {}", fav_button, tags(store));
                let _ = writeln!(out, "{}", result.base.greeting);
                out.push_str(&render_result(result));
                let _ = writeln!(out, "  {}", c.result_hint);
            }
            None => {
                let _ = writeln!(out, "{}", tags(store));
            }
        },
        ViewMode::Error => {
            let _ = writeln!(out, "{}", c.error_title);
            let _ = writeln!(out, "{}", c.error_body);
            let _ = writeln!(out, "  :start  {}", c.start_over);
        }
    }
    out
}

fn tags(store: &SessionStore) -> String {
    let language = store
        .language()
        .map(|l| l.display_name())
        .unwrap_or("-");
    let category = store.category().map(|c| c.as_str()).unwrap_or("-");
    format!("[{}] [{}]", language, category)
}

/// 結果カード
pub fn render_result(result: &AnalysisResult) -> String {
    let mut out = String::new();
    let base = &result.base;
    let category = result.category();
    let _ = writeln!(out, "{}", RULE);
    let _ = writeln!(out, "🔊 {}", sound_line(result.sound_effect()));

    let mut header = base.term.to_uppercase();
    if !matches!(category, AnalysisCategory::Grammar | AnalysisCategory::Challenge)
        && !base.pronunciation.is_empty()
    {
        let _ = write!(header, "  {}", base.pronunciation);
    }
    if category.is_speakable() {
        header.push_str("  [:speak 🔈]");
    }
    let _ = writeln!(out, "{}", header);
    let _ = writeln!(out, "{}", base.definition);
    if category != AnalysisCategory::Grammar && !base.example.is_empty() {
        let _ = writeln!(out, "Scenario on Word Horizon: \"{}\"", base.example);
    }

    match &result.detail {
        CategoryDetail::Grammar(grammar) => render_grammar(&mut out, grammar),
        CategoryDetail::Challenge { upgrades } => {
            for upgrade in upgrades {
                let _ = writeln!(out, "[{}] ⚡ {}", upgrade.level, upgrade.text);
                let _ = writeln!(out, "    🚀 {}", upgrade.notes);
            }
        }
        CategoryDetail::WordFormation { word_family, quiz } => {
            render_confusables(&mut out, &base.confusables);
            if !word_family.is_empty() {
                let _ = writeln!(out, "🌳 Word Formation (Full Tree)  A1-C2");
                for member in word_family {
                    let mut line = format!("  {}", member.form);
                    if !member.level.is_empty() {
                        let _ = write!(line, " [{}]", member.level);
                    }
                    if let Some(register) = member.register.as_deref().filter(|s| !s.is_empty()) {
                        let _ = write!(line, " [{}]", register.to_uppercase());
                    }
                    let _ = writeln!(out, "{}", line);
                    let _ = writeln!(out, "    • {}", member.meaning);
                    if let Some(logic) = member.morphology.as_deref().filter(|s| !s.is_empty()) {
                        let _ = writeln!(out, "    💡 Logic: {}", logic);
                    }
                }
            }
            render_word_extras(&mut out, result, quiz.as_ref());
        }
        CategoryDetail::IdiomsPhrasal { phrases, quiz } => {
            render_confusables(&mut out, &base.confusables);
            if !phrases.is_empty() {
                let _ = writeln!(out, "📚 Idioms & Phrasal Verbs");
                for item in phrases {
                    let _ = writeln!(out, "  • {}", item.phrase);
                    let _ = writeln!(out, "      {}", item.meaning);
                }
            }
            render_word_extras(&mut out, result, quiz.as_ref());
        }
    }

    let _ = writeln!(out, "{}", RULE);
    let _ = writeln!(
        out,
        "\"Gõ 'Fav' để lưu ⭐, 'History' để xem lại 📝, 'Menu' để về trang chủ 🏠\""
    );
    out
}

fn render_confusables(out: &mut String, pairs: &[ConfusablePair]) {
    if pairs.is_empty() {
        return;
    }
    let _ = writeln!(out, "⛔ Tricky Forms Alert!");
    for pair in pairs {
        let _ = writeln!(out, "  {} vs {}", pair.word, pair.difference);
    }
}

/// 単語系カテゴリ共通: 類義語・反意語・クイズ・語源
fn render_word_extras(out: &mut String, result: &AnalysisResult, quiz: Option<&Quiz>) {
    let base = &result.base;
    if !base.synonyms.is_empty() {
        let _ = writeln!(out, "🌸 Twin Flowers");
        for s in &base.synonyms {
            let _ = writeln!(out, "  {}: {}", s.synonym, s.explanation);
        }
    }
    if !base.antonyms.is_empty() {
        let _ = writeln!(out, "🪨 Opposite Stones: {}", base.antonyms.join(", "));
    }
    if let Some(q) = quiz {
        let _ = writeln!(out, "📝 Mini Quiz");
        render_quiz(out, "", q);
    }
    if !base.etymology.is_empty() {
        let _ = writeln!(out, "📖 Blathers' Museum Notes: {}", base.etymology);
    }
}

fn render_grammar(out: &mut String, grammar: &GrammarBlock) {
    let _ = writeln!(out, "💡 Quick Map: {}", grammar.topic);
    for point in &grammar.quick_map {
        let _ = writeln!(out, "  • {}", point);
    }
    let _ = writeln!(out, "🍎 Memory Trick: \"{}\"", grammar.memory_trick);
    let _ = writeln!(out, "⚠️ Expert Trap: {}", grammar.expert_trap);
    let _ = writeln!(out, "📝 Practice Time");
    render_quiz(out, "1. Multiple Choice: ", &grammar.practice.mcq);
    render_quiz(out, "2. Rewrite: ", &grammar.practice.rewrite);
}

fn render_quiz(out: &mut String, label: &str, quiz: &Quiz) {
    let _ = writeln!(out, "  {}{}", label, quiz.question);
    for (i, option) in quiz.options.iter().enumerate() {
        let letter = (b'A' + (i % 26) as u8) as char;
        let _ = writeln!(out, "    {}) {}", letter, option);
    }
    let _ = writeln!(out, "    ✅ {}", quiz.correct_answer);
}

/// 履歴・お気に入りのビューワ
pub fn render_viewer(store: &SessionStore, tab: ViewerTab, c: &Chrome) -> String {
    let mut out = String::new();
    match tab {
        ViewerTab::History => {
            let _ = writeln!(out, "📱 {}", c.history);
            if store.history().is_empty() {
                let _ = writeln!(out, "  {}", c.no_history);
            }
            for (i, entry) in store.history().recent_first().enumerate() {
                let _ = writeln!(
                    out,
                    "  {}. {}  ({})",
                    i + 1,
                    entry.term,
                    clock_time(entry.timestamp_ms)
                );
            }
        }
        ViewerTab::Favorites => {
            let _ = writeln!(out, "⭐ {}", c.favorites);
            if store.favorites().is_empty() {
                let _ = writeln!(out, "  {}", c.no_favorites);
            }
            for (i, term) in store.favorites().iter().enumerate() {
                let _ = writeln!(out, "  {}. {}", i + 1, term);
            }
        }
    }
    let _ = writeln!(out, "  {}", c.viewer_hint);
    out
}

/// 履歴の時刻表示（ローカル時刻 HH:MM）
fn clock_time(timestamp_ms: u64) -> String {
    i64::try_from(timestamp_ms)
        .ok()
        .and_then(|ms| chrono::Local.timestamp_millis_opt(ms).single())
        .map(|t| t.format("%H:%M").to_string())
        .unwrap_or_else(|| "--:--".to_string())
}

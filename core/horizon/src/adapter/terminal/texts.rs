//! 画面の文言（英語 / ベトナム語。言語選択前は両方を併記）

use crate::domain::{AnalysisCategory, Language, Notice};

/// 1 言語分の画面文言
pub struct Chrome {
    pub welcome: &'static str,
    pub main_menu: &'static str,
    pub category_hints: [&'static str; 4],
    pub enter_request: &'static str,
    pub send_hint: &'static str,
    pub back: &'static str,
    pub back_to_menu: &'static str,
    pub preparing: &'static str,
    pub working: &'static str,
    pub result_hint: &'static str,
    pub error_title: &'static str,
    pub error_body: &'static str,
    pub start_over: &'static str,
    pub saved: &'static str,
    pub fav: &'static str,
    pub history: &'static str,
    pub favorites: &'static str,
    pub no_history: &'static str,
    pub no_favorites: &'static str,
    pub viewer_hint: &'static str,
}

const EN: Chrome = Chrome {
    welcome: "Welcome! Choose a language to begin! 🐾",
    main_menu: "Main Menu is here! 🐾",
    category_hints: ["(A1-C2 Full List)", "(All-in-one)", "(Specialized Grammar)", "(C2 Rewrite)"],
    enter_request: "Step 3: Enter request! 🍎",
    send_hint: "Press Enter to send",
    back: "Back",
    back_to_menu: "Back to Menu",
    preparing: "Preparing docs...",
    working: "\"Isabelle is working fast! 🐾\"",
    result_hint: "Type 'Fav', 'Menu', or continue...",
    error_title: "Oh bells! An error occurred!",
    error_body: "Isabelle had trouble connecting to the library. Please try again!",
    start_over: "Start over",
    saved: "Saved",
    fav: "Fav",
    history: "History",
    favorites: "Favorites",
    no_history: "No history yet! 🐾",
    no_favorites: "No favorites yet! ⭐",
    viewer_hint: "Number = open · h = history · f = favorites · :close",
};

const VI: Chrome = Chrome {
    welcome: "Chào mừng bồ! Chọn ngôn ngữ để bắt đầu nhé! 🐾",
    main_menu: "Menu Chính học viện đây! 🐾",
    category_hints: ["(A1-C2 Full List)", "(Thành ngữ & Cụm từ)", "(Ngữ pháp chuyên)", "(Viết lại câu C2)"],
    enter_request: "Bước 3: Nhập yêu cầu nhé! 🍎",
    send_hint: "Nhấn Enter để gửi",
    back: "Quay lại",
    back_to_menu: "Quay lại Menu",
    preparing: "Đang soạn tài liệu...",
    working: "\"Isabelle is working fast! 🐾\"",
    result_hint: "Gõ 'Fav', 'Menu', hoặc nhập tiếp...",
    error_title: "Ôi chuông vàng ơi! Có lỗi rồi!",
    error_body: "Isabelle gặp trục trặc khi kết nối thư viện. Bạn thử lại nhé!",
    start_over: "Thử lại từ đầu",
    saved: "Đã lưu",
    fav: "Yêu thích",
    history: "Lịch sử",
    favorites: "Yêu thích",
    no_history: "Chưa có lịch sử! 🐾",
    no_favorites: "Chưa có mục yêu thích! ⭐",
    viewer_hint: "Số = mở · h = lịch sử · f = yêu thích · :close",
};

const BILINGUAL: Chrome = Chrome {
    welcome: "Chào mừng bồ! Chọn ngôn ngữ để bắt đầu nhé! 🐾 / Welcome! Choose a language to begin!",
    main_menu: EN.main_menu,
    category_hints: EN.category_hints,
    enter_request: EN.enter_request,
    send_hint: EN.send_hint,
    back: "Back / Quay lại",
    back_to_menu: EN.back_to_menu,
    preparing: EN.preparing,
    working: EN.working,
    result_hint: EN.result_hint,
    error_title: EN.error_title,
    error_body: EN.error_body,
    start_over: "Start over / Thử lại từ đầu",
    saved: EN.saved,
    fav: EN.fav,
    history: "History / Lịch sử",
    favorites: "Favorites / Yêu thích",
    no_history: EN.no_history,
    no_favorites: EN.no_favorites,
    viewer_hint: EN.viewer_hint,
};

/// 選択中の言語に合う文言
pub fn chrome(language: Option<Language>) -> &'static Chrome {
    match language {
        Some(Language::English) => &EN,
        Some(Language::Vietnamese) => &VI,
        None => &BILINGUAL,
    }
}

/// メニューに出すカテゴリ名
pub fn category_label(category: AnalysisCategory) -> &'static str {
    match category {
        AnalysisCategory::WordFormation => "🌳 Word Formation",
        AnalysisCategory::IdiomsPhrasal => "📚 Idioms/Phrasal Verbs",
        AnalysisCategory::Grammar => "🏫 Grammar",
        AnalysisCategory::Challenge => "✍️ Challenge & Upgrade",
    }
}

/// 入力欄のプレースホルダ
pub fn placeholder(language: Option<Language>, category: Option<AnalysisCategory>) -> &'static str {
    match (language, category) {
        (Some(Language::Vietnamese), Some(AnalysisCategory::WordFormation)) => "Nhập từ (VD: Heart, Just)...",
        (Some(Language::Vietnamese), Some(AnalysisCategory::IdiomsPhrasal)) => "Nhập từ (VD: Get, Blue)...",
        (Some(Language::Vietnamese), Some(AnalysisCategory::Grammar)) => "Nhập chủ điểm (VD: Đảo ngữ)...",
        (Some(Language::Vietnamese), Some(AnalysisCategory::Challenge)) => "Nhập câu cần nâng cấp (C2)...",
        (Some(Language::Vietnamese), None) => "Nhập nội dung...",
        (_, Some(AnalysisCategory::WordFormation)) => "Enter word (e.g., Heart, Just)...",
        (_, Some(AnalysisCategory::IdiomsPhrasal)) => "Enter word (e.g., Get, Blue)...",
        (_, Some(AnalysisCategory::Grammar)) => "Enter topic (e.g., Inversion)...",
        (_, Some(AnalysisCategory::Challenge)) => "Enter sentence to upgrade...",
        (_, None) => "Enter content...",
    }
}

const DEFAULT_SUCCESS_SOUND: &str = "*Ta-da!* ✨";

/// キャプションの文言
pub fn notice_text(notice: &Notice, language: Option<Language>) -> String {
    match notice {
        Notice::LanguageChosen => "*Bell jingle* 🔔".to_string(),
        Notice::CategoryChosen => "*Sparkle!* ✨".to_string(),
        Notice::AnalysisStarted => "*Dodo Airlines chime* ✈️".to_string(),
        Notice::AnalysisSucceeded { sound_effect } => sound_effect
            .clone()
            .unwrap_or_else(|| DEFAULT_SUCCESS_SOUND.to_string()),
        Notice::SavedToHistory => "Đã lưu vào Nook Phone! 📱".to_string(),
        Notice::FavoriteAdded { term } => match language {
            Some(Language::Vietnamese) => format!("Đã thêm {} vào yêu thích! ⭐", term),
            _ => format!("Added {} to favorites! ⭐", term),
        },
        Notice::AnalysisFailed => "*Oops! Oh no!*".to_string(),
    }
}

/// 結果カードの効果音行（空なら既定）
pub fn sound_line(sound_effect: Option<&str>) -> &str {
    sound_effect.unwrap_or(DEFAULT_SUCCESS_SOUND)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_favorite_notice_is_localized() {
        let n = Notice::FavoriteAdded {
            term: "Heart".to_string(),
        };
        assert_eq!(notice_text(&n, Some(Language::English)), "Added Heart to favorites! ⭐");
        assert_eq!(
            notice_text(&n, Some(Language::Vietnamese)),
            "Đã thêm Heart vào yêu thích! ⭐"
        );
    }

    #[test]
    fn test_success_notice_defaults_when_blank() {
        let n = Notice::AnalysisSucceeded { sound_effect: None };
        assert_eq!(notice_text(&n, None), "*Ta-da!* ✨");
    }

    #[test]
    fn test_placeholder_per_category() {
        assert_eq!(
            placeholder(Some(Language::Vietnamese), Some(AnalysisCategory::Grammar)),
            "Nhập chủ điểm (VD: Đảo ngữ)..."
        );
        assert_eq!(
            placeholder(Some(Language::English), Some(AnalysisCategory::Challenge)),
            "Enter sentence to upgrade..."
        );
    }

    #[test]
    fn test_chrome_is_bilingual_before_language() {
        assert!(chrome(None).welcome.contains("Chào mừng"));
        assert!(chrome(None).welcome.contains("Welcome"));
        assert_eq!(chrome(Some(Language::English)).back, "Back");
    }
}

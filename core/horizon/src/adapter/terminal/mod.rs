//! 端末向けの表示層（描画・入力解釈・キャプション・イベント源）

pub mod caption;
pub mod input;
pub mod render;
pub mod source;
pub mod texts;

pub use caption::CaptionSlot;
pub use input::{interpret, UiCommand};
pub use render::render_screen;
pub use source::{install_interrupt_handler, spawn_line_reader};
pub use texts::notice_text;

/// ビューワのタブ
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ViewerTab {
    #[default]
    History,
    Favorites,
}

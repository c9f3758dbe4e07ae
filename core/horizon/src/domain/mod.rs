//! horizon 固有のドメイン型（型と不変条件）

pub mod analysis;
pub mod category;
pub mod command;
pub mod favorites;
pub mod history;
pub mod language;
pub mod notice;
pub mod request;
pub mod view_mode;
pub mod voice;

pub use analysis::{
    AnalysisResult, AnalysisWire, CategoryDetail, ConfusablePair, GrammarBlock, Quiz,
};
pub use category::AnalysisCategory;
pub use command::{AcademyOptions, HorizonCommand, SubmitIntent};
pub use favorites::Favorites;
pub use history::{History, HistoryEntry};
pub use language::Language;
pub use notice::Notice;
pub use request::{AnalysisRequest, Term};
pub use view_mode::ViewMode;
pub use voice::VoiceConfig;

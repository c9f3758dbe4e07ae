//! Outbound ポート（horizon 固有）
//!
//! 共通のもの（Log / Clock / Process 等）は common::ports::outbound を使う。

pub mod speech;
pub mod structured_generation;

pub use speech::SpeechPlayer;
pub use structured_generation::{GenerationRequest, ModelTier, StructuredGeneration};

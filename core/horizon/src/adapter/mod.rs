//! Adapter 層（ports の実装と端末表示）

pub mod provider_generation;
pub mod speech;
#[cfg(test)]
pub mod stub_generation;
pub mod terminal;

pub use provider_generation::ProviderGeneration;
pub use speech::{CommandSpeech, NoopSpeech, DEFAULT_SPEECH_PROGRAM};

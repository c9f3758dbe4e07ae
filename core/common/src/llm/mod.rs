//! LLM プロバイダの実装
//!
//! このモジュールは、異なる LLM プロバイダ（Gemini、OpenAI 互換）で共通する
//! 「プロンプト 1 つ + 出力スキーマ → 構造化 JSON テキスト」の単発生成を提供します。

pub mod config;
pub mod factory;
pub mod gemini;
pub mod openai_compat;
pub mod provider;
pub mod resolver;

pub use factory::{create_provider, AnyProvider, ProviderType};
pub use provider::{GenerationConfig, LlmProvider};
pub use resolver::{list_profile_names, load_profiles_config, resolve_provider, ResolvedProvider};

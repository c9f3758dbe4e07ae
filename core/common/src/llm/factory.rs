//! プロバイダファクトリー
//!
//! プロバイダタイプに基づいて適切なプロバイダを作成します。

use crate::error::Error;
use crate::llm::gemini::{self, GeminiProvider};
use crate::llm::openai_compat::{self, OpenAiCompatProvider};
use crate::llm::provider::{GenerationConfig, LlmProvider};
use crate::llm::resolver::ResolvedProvider;
use serde_json::Value;

/// プロバイダタイプ
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProviderType {
    /// Gemini (generateContent)
    Gemini,
    /// OpenAI Chat Completions 互換 (/chat/completions)
    OpenAiCompat,
}

impl ProviderType {
    /// 文字列からプロバイダタイプを解析
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "gemini" => Some(Self::Gemini),
            "gpt" | "openai" | "openai_compat" => Some(Self::OpenAiCompat),
            _ => None,
        }
    }

    /// プロバイダタイプを文字列に変換
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Gemini => "gemini",
            Self::OpenAiCompat => "openai_compat",
        }
    }

    /// 通常時のデフォルトモデル
    pub fn default_model(&self) -> &'static str {
        match self {
            Self::Gemini => gemini::DEFAULT_MODEL,
            Self::OpenAiCompat => openai_compat::DEFAULT_MODEL,
        }
    }

    /// 再試行時のデフォルト軽量モデル
    pub fn default_fallback_model(&self) -> &'static str {
        match self {
            Self::Gemini => gemini::DEFAULT_FALLBACK_MODEL,
            Self::OpenAiCompat => openai_compat::DEFAULT_FALLBACK_MODEL,
        }
    }

    /// thinking 予算のデフォルト（非対応プロバイダは None）
    pub fn default_thinking_budget(&self) -> Option<u32> {
        match self {
            Self::Gemini => Some(gemini::DEFAULT_THINKING_BUDGET),
            Self::OpenAiCompat => None,
        }
    }
}

/// プロバイダの enum ラッパー
///
/// 異なるプロバイダタイプを型安全に扱うために使用します。
pub enum AnyProvider {
    Gemini(GeminiProvider),
    OpenAiCompat(OpenAiCompatProvider),
}

impl LlmProvider for AnyProvider {
    fn name(&self) -> &str {
        match self {
            Self::Gemini(p) => p.name(),
            Self::OpenAiCompat(p) => p.name(),
        }
    }

    fn model(&self) -> &str {
        match self {
            Self::Gemini(p) => p.model(),
            Self::OpenAiCompat(p) => p.model(),
        }
    }

    fn make_request_payload(&self, prompt: &str, config: &GenerationConfig) -> Result<Value, Error> {
        match self {
            Self::Gemini(p) => p.make_request_payload(prompt, config),
            Self::OpenAiCompat(p) => p.make_request_payload(prompt, config),
        }
    }

    fn make_http_request(&self, request_json: &str) -> Result<String, Error> {
        match self {
            Self::Gemini(p) => p.make_http_request(request_json),
            Self::OpenAiCompat(p) => p.make_http_request(request_json),
        }
    }

    fn parse_response_text(&self, response_json: &str) -> Result<Option<String>, Error> {
        match self {
            Self::Gemini(p) => p.parse_response_text(response_json),
            Self::OpenAiCompat(p) => p.parse_response_text(response_json),
        }
    }
}

/// 解決済みプロバイダ設定と使用モデルからプロバイダを作成
///
/// # Arguments
/// * `resolved` - resolver が返した解決済みプロバイダ
/// * `model` - 使用するモデル名（通常 / 再試行で別インスタンスを作る）
pub fn create_provider(resolved: &ResolvedProvider, model: &str) -> Result<AnyProvider, Error> {
    match resolved.provider_type {
        ProviderType::Gemini => Ok(AnyProvider::Gemini(GeminiProvider::new(
            Some(model.to_string()),
            resolved.base_url.clone(),
            resolved.api_key_env.clone(),
        )?)),
        ProviderType::OpenAiCompat => Ok(AnyProvider::OpenAiCompat(OpenAiCompatProvider::new(
            Some(model.to_string()),
            resolved.base_url.clone(),
            resolved.api_key_env.clone(),
        )?)),
    }
}

//! Gemini プロバイダの実装（generateContent・構造化 JSON 出力）

use crate::error::Error;
use crate::llm::provider::{error_message_from_body, GenerationConfig, LlmProvider};
use serde_json::{json, Value};
use std::env;
use std::time::Duration;

pub const DEFAULT_MODEL: &str = "gemini-3-pro-preview";
pub const DEFAULT_FALLBACK_MODEL: &str = "gemini-3-flash-preview";
pub const DEFAULT_API_KEY_ENV: &str = "GEMINI_API_KEY";
pub const DEFAULT_THINKING_BUDGET: u32 = 2000;
const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(180);

/// Gemini プロバイダ
pub struct GeminiProvider {
    model: String,
    api_key: String,
    base_url: String,
    client: reqwest::blocking::Client,
}

impl GeminiProvider {
    /// 新しい Gemini プロバイダを作成
    ///
    /// # Arguments
    /// * `model` - モデル名（デフォルト: "gemini-3-pro-preview"）
    /// * `base_url` - ベース URL（デフォルト: v1beta エンドポイント）
    /// * `api_key_env` - API キーを読む環境変数名（デフォルト: GEMINI_API_KEY）
    ///
    /// # Returns
    /// * `Err(Error::Env)` - API キーの環境変数が未設定
    pub fn new(
        model: Option<String>,
        base_url: Option<String>,
        api_key_env: Option<String>,
    ) -> Result<Self, Error> {
        let key_env = api_key_env.unwrap_or_else(|| DEFAULT_API_KEY_ENV.to_string());
        let api_key = env::var(&key_env)
            .ok()
            .filter(|s| !s.is_empty())
            .ok_or_else(|| Error::env(format!("{} environment variable is not set", key_env)))?;
        Self::with_api_key(model, base_url, api_key)
    }

    /// API キーを直接渡して作成する
    pub fn with_api_key(
        model: Option<String>,
        base_url: Option<String>,
        api_key: String,
    ) -> Result<Self, Error> {
        let client = reqwest::blocking::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| Error::http(format!("Failed to build HTTP client: {}", e)))?;
        Ok(Self {
            model: model.unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            api_key,
            base_url: base_url
                .unwrap_or_else(|| DEFAULT_BASE_URL.to_string())
                .trim_end_matches('/')
                .to_string(),
            client,
        })
    }

    fn url(&self) -> String {
        format!(
            "{}/models/{}:generateContent?key={}",
            self.base_url, self.model, self.api_key
        )
    }
}

impl LlmProvider for GeminiProvider {
    fn name(&self) -> &str {
        "gemini"
    }

    fn model(&self) -> &str {
        &self.model
    }

    fn make_request_payload(&self, prompt: &str, config: &GenerationConfig) -> Result<Value, Error> {
        let mut generation = json!({});
        if let Some(ref schema) = config.response_schema {
            generation["responseMimeType"] = json!("application/json");
            generation["responseSchema"] = schema.clone();
        }
        if let Some(budget) = config.thinking_budget {
            generation["thinkingConfig"] = json!({ "thinkingBudget": budget });
        }
        if let Some(t) = config.temperature {
            generation["temperature"] = json!(t);
        }

        let mut payload = json!({
            "contents": [{
                "role": "user",
                "parts": [{"text": prompt}]
            }]
        });
        if generation.as_object().map(|o| !o.is_empty()).unwrap_or(false) {
            payload["generationConfig"] = generation;
        }
        Ok(payload)
    }

    fn make_http_request(&self, request_json: &str) -> Result<String, Error> {
        let response = self
            .client
            .post(self.url())
            .header("Content-Type", "application/json")
            .body(request_json.to_string())
            .send()
            .map_err(|e| Error::http(format!("HTTP request failed: {}", e)))?;

        let status = response.status();
        let response_text = response
            .text()
            .map_err(|e| Error::http(format!("Failed to read response: {}", e)))?;

        if !status.is_success() {
            let error_msg = error_message_from_body(status, &response_text);
            return Err(Error::http(format!("Gemini API error: {}", error_msg)));
        }

        Ok(response_text)
    }

    fn parse_response_text(&self, response_json: &str) -> Result<Option<String>, Error> {
        let v: Value = serde_json::from_str(response_json)
            .map_err(|e| Error::json(format!("Failed to parse response JSON: {}", e)))?;

        if let Some(error) = v.get("error") {
            let error_msg = error["message"].as_str().unwrap_or("Unknown error");
            return Err(Error::http(format!("Gemini API error: {}", error_msg)));
        }

        // thought パートは除外し、本文テキストを連結する
        let text: Option<String> = v["candidates"][0]["content"]["parts"]
            .as_array()
            .map(|parts| {
                parts
                    .iter()
                    .filter(|part| !part["thought"].as_bool().unwrap_or(false))
                    .filter_map(|part| part["text"].as_str())
                    .collect::<String>()
            })
            .filter(|s| !s.is_empty());

        Ok(text)
    }
}

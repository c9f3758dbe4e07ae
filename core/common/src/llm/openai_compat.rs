//! OpenAI Chat Completions 互換 (/chat/completions) プロバイダ
//!
//! base_url で任意のエンドポイント（OpenAI / Ollama 等）を指定可能。
//! 出力スキーマは Gemini 方言から標準 JSON Schema に変換して response_format に載せる。

use crate::error::Error;
use crate::llm::provider::{error_message_from_body, GenerationConfig, LlmProvider};
use serde_json::{json, Map, Value};
use std::env;
use std::time::Duration;

pub const DEFAULT_MODEL: &str = "gpt-4o";
pub const DEFAULT_FALLBACK_MODEL: &str = "gpt-4o-mini";
pub const DEFAULT_API_KEY_ENV: &str = "OPENAI_API_KEY";
const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(180);
const SCHEMA_NAME: &str = "structured_output";

/// OpenAI Chat Completions 互換プロバイダ
pub struct OpenAiCompatProvider {
    model: String,
    base_url: String,
    api_key_env: String,
    client: reqwest::blocking::Client,
}

impl OpenAiCompatProvider {
    /// 新しいプロバイダを作成
    ///
    /// * `model` - モデル名（None のとき "gpt-4o"）
    /// * `base_url` - ベース URL（None のとき DEFAULT_BASE_URL）
    /// * `api_key_env` - API キーを読む環境変数名（未設定の変数なら Authorization を付けない）
    pub fn new(
        model: Option<String>,
        base_url: Option<String>,
        api_key_env: Option<String>,
    ) -> Result<Self, Error> {
        let client = reqwest::blocking::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| Error::http(format!("Failed to build HTTP client: {}", e)))?;
        Ok(Self {
            model: model.unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            base_url: base_url
                .unwrap_or_else(|| DEFAULT_BASE_URL.to_string())
                .trim_end_matches('/')
                .to_string(),
            api_key_env: api_key_env.unwrap_or_else(|| DEFAULT_API_KEY_ENV.to_string()),
            client,
        })
    }

    fn url(&self) -> String {
        format!("{}/chat/completions", self.base_url)
    }

    fn auth_header(&self) -> Option<String> {
        env::var(&self.api_key_env)
            .ok()
            .filter(|k| !k.is_empty())
            .map(|key| format!("Bearer {}", key))
    }
}

/// Gemini 方言のスキーマ（type 大文字・propertyOrdering）を標準 JSON Schema に変換する
pub fn to_json_schema(schema: &Value) -> Value {
    match schema {
        Value::Object(obj) => {
            let mut out = Map::new();
            for (k, v) in obj {
                match k.as_str() {
                    "propertyOrdering" => {}
                    "type" => {
                        let t = v.as_str().map(|s| s.to_lowercase()).unwrap_or_default();
                        out.insert(k.clone(), json!(t));
                    }
                    "properties" => {
                        let props: Map<String, Value> = v
                            .as_object()
                            .map(|m| m.iter().map(|(pk, pv)| (pk.clone(), to_json_schema(pv))).collect())
                            .unwrap_or_default();
                        out.insert(k.clone(), Value::Object(props));
                    }
                    _ => {
                        out.insert(k.clone(), to_json_schema(v));
                    }
                }
            }
            Value::Object(out)
        }
        Value::Array(items) => Value::Array(items.iter().map(to_json_schema).collect()),
        other => other.clone(),
    }
}

impl LlmProvider for OpenAiCompatProvider {
    fn name(&self) -> &str {
        "openai_compat"
    }

    fn model(&self) -> &str {
        &self.model
    }

    fn make_request_payload(&self, prompt: &str, config: &GenerationConfig) -> Result<Value, Error> {
        let mut payload = json!({
            "model": self.model,
            "messages": [{ "role": "user", "content": prompt }],
        });
        if let Some(ref schema) = config.response_schema {
            payload["response_format"] = json!({
                "type": "json_schema",
                "json_schema": {
                    "name": SCHEMA_NAME,
                    "schema": to_json_schema(schema),
                    "strict": false
                }
            });
        }
        if let Some(t) = config.temperature {
            payload["temperature"] = json!(t);
        }
        Ok(payload)
    }

    fn make_http_request(&self, request_json: &str) -> Result<String, Error> {
        let mut builder = self
            .client
            .post(self.url())
            .header("Content-Type", "application/json")
            .body(request_json.to_string());

        if let Some(auth) = self.auth_header() {
            builder = builder.header("Authorization", auth);
        }

        let response = builder
            .send()
            .map_err(|e| Error::http(format!("HTTP request failed: {}", e)))?;

        let status = response.status();
        let response_text = response
            .text()
            .map_err(|e| Error::http(format!("Failed to read response: {}", e)))?;

        if !status.is_success() {
            let error_msg = error_message_from_body(status, &response_text);
            return Err(Error::http(format!("Chat completions error: {}", error_msg)));
        }

        Ok(response_text)
    }

    fn parse_response_text(&self, response_json: &str) -> Result<Option<String>, Error> {
        let v: Value = serde_json::from_str(response_json)
            .map_err(|e| Error::json(format!("Failed to parse response JSON: {}", e)))?;

        if let Some(err) = v.get("error") {
            let msg = err["message"].as_str().unwrap_or("Unknown error");
            return Err(Error::http(format!("API error: {}", msg)));
        }

        let text = v["choices"][0]["message"]["content"]
            .as_str()
            .filter(|s| !s.is_empty())
            .map(|s| s.to_string());
        Ok(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn provider() -> OpenAiCompatProvider {
        OpenAiCompatProvider::new(
            Some("llama3.1".to_string()),
            Some("http://localhost:11434/v1/".to_string()),
            Some("HORIZON_TEST_UNSET_KEY".to_string()),
        )
        .unwrap()
    }

    #[test]
    fn test_openai_compat_url_trims_slash() {
        assert_eq!(provider().url(), "http://localhost:11434/v1/chat/completions");
    }

    #[test]
    fn test_openai_compat_no_auth_when_env_unset() {
        assert!(provider().auth_header().is_none());
    }

    #[test]
    fn test_openai_compat_make_request_payload_with_schema() {
        let schema = json!({
            "type": "OBJECT",
            "properties": {
                "word": { "type": "STRING" },
                "tags": { "type": "ARRAY", "items": { "type": "STRING" } }
            },
            "required": ["word"],
            "propertyOrdering": ["word", "tags"]
        });
        let config = GenerationConfig {
            response_schema: Some(schema),
            thinking_budget: Some(2000),
            temperature: Some(0.4),
        };
        let payload = provider().make_request_payload("Analyze", &config).unwrap();
        assert_eq!(payload["model"], "llama3.1");
        assert_eq!(payload["messages"][0]["content"], "Analyze");
        let converted = &payload["response_format"]["json_schema"]["schema"];
        assert_eq!(converted["type"], "object");
        assert_eq!(converted["properties"]["tags"]["items"]["type"], "string");
        assert!(converted.get("propertyOrdering").is_none());
        assert_eq!(converted["required"][0], "word");
        // thinking は互換 API に無いので送らない
        assert!(payload.get("thinkingConfig").is_none());
    }

    #[test]
    fn test_openai_compat_parse_response_text() {
        let body = r#"{"choices":[{"message":{"content":"{\"word\":\"Heart\"}"}}]}"#;
        let text = provider().parse_response_text(body).unwrap();
        assert_eq!(text.as_deref(), Some(r#"{"word":"Heart"}"#));
    }

    #[test]
    fn test_openai_compat_parse_response_text_empty_content() {
        let body = r#"{"choices":[{"message":{"content":""}}]}"#;
        assert_eq!(provider().parse_response_text(body).unwrap(), None);
    }

    #[test]
    fn test_to_json_schema_keeps_required_property_named_type() {
        // プロパティ名が "type" でもスキーマキーワードと混同しない
        let schema = json!({
            "type": "OBJECT",
            "properties": { "type": { "type": "STRING" } }
        });
        let out = to_json_schema(&schema);
        assert_eq!(out["properties"]["type"]["type"], "string");
    }
}

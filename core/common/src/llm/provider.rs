//! LLM プロバイダのトレイト定義

use crate::error::Error;
use serde_json::Value;

/// 1 回の生成に付ける設定
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GenerationConfig {
    /// 出力スキーマ（Gemini の OpenAPI サブセット方言）。Some なら JSON 出力を強制する
    pub response_schema: Option<Value>,
    /// 思考トークン予算（対応プロバイダのみ。None なら thinking 設定を送らない）
    pub thinking_budget: Option<u32>,
    /// 温度（None ならプロバイダのデフォルト）
    pub temperature: Option<f32>,
}

/// LLM プロバイダのトレイト
///
/// 各プロバイダ（Gemini、OpenAI 互換など）はこのトレイトを実装する必要があります。
pub trait LlmProvider: Send + Sync {
    /// プロバイダ名を返す
    fn name(&self) -> &str;

    /// 使用するモデル名を返す
    fn model(&self) -> &str;

    /// リクエストペイロードを生成
    ///
    /// # Arguments
    /// * `prompt` - ユーザープロンプト（単発）
    /// * `config` - スキーマ・thinking 等の生成設定
    fn make_request_payload(&self, prompt: &str, config: &GenerationConfig) -> Result<Value, Error>;

    /// HTTP リクエストを実行してレスポンスを取得
    ///
    /// # Returns
    /// * `Ok(String)` - レスポンス JSON 文字列
    /// * `Err(Error)` - 通信失敗は Error::Http（トランスポートのエラー文言を含む）
    fn make_http_request(&self, request_json: &str) -> Result<String, Error>;

    /// レスポンスからテキストを抽出
    ///
    /// # Returns
    /// * `Ok(Option<String>)` - 抽出したテキスト（存在しない場合は None）
    fn parse_response_text(&self, response_json: &str) -> Result<Option<String>, Error>;

    /// ペイロード生成 → HTTP → テキスト抽出を 1 回行う
    fn generate(&self, prompt: &str, config: &GenerationConfig) -> Result<Option<String>, Error> {
        let payload = self.make_request_payload(prompt, config)?;
        let request_json = serde_json::to_string(&payload)
            .map_err(|e| Error::json(format!("Failed to serialize request: {}", e)))?;
        let response_json = self.make_http_request(&request_json)?;
        self.parse_response_text(&response_json)
    }
}

/// エラーレスポンス本文から `error.message` を取り出す（無ければ本文そのまま）
pub(crate) fn error_message_from_body(status: impl std::fmt::Display, body: &str) -> String {
    serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|v| v["error"]["message"].as_str().map(|s| s.to_string()))
        .unwrap_or_else(|| format!("HTTP {}: {}", status, body))
}

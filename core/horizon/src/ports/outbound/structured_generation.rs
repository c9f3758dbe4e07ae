//! スキーマ付きで外部生成サービスを呼ぶ Outbound ポート

use common::error::Error;
use serde_json::Value;

/// どのモデル構成で呼ぶか
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModelTier {
    /// 通常モデル（thinking 予算あり）
    Primary,
    /// 一時的な通信失敗後の再試行用。軽量モデルで thinking 設定なし
    Fallback,
}

impl ModelTier {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Primary => "primary",
            Self::Fallback => "fallback",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct GenerationRequest {
    /// 自然言語の指示文
    pub prompt: String,
    /// 出力 JSON のスキーマ（Gemini 方言）
    pub schema: Value,
    pub tier: ModelTier,
}

/// 指示文とスキーマを送り、応答本文（JSON テキスト）を返す。
/// 応答テキストが無い場合も Err とする。
pub trait StructuredGeneration: Send + Sync {
    fn generate(&self, request: &GenerationRequest) -> Result<String, Error>;
}

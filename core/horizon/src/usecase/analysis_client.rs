//! 分析リクエストクライアント
//!
//! 指示文とスキーマを組み立てて StructuredGeneration に送り、応答を AnalysisResult に変換する。
//! 一時的な通信失敗に一致するエラーのときだけ、軽量モデル（thinking なし）で 1 回だけ再試行する。
//! それ以外の失敗・再試行の失敗はそのまま返す。

use std::sync::Arc;

use regex::Regex;

use crate::domain::{AnalysisCategory, AnalysisRequest, AnalysisResult, AnalysisWire};
use crate::ports::outbound::{GenerationRequest, ModelTier, StructuredGeneration};
use crate::usecase::prompt::build_prompt;
use crate::usecase::schema::analysis_schema;
use common::error::Error;
use common::ports::outbound::{Log, LogLevel, LogRecord};

const TRANSIENT_PATTERN: &str =
    r"(?i)xhr error|error sending request|connection (reset|refused|closed)|timed out|broken pipe";

/// 一時的な通信失敗のエラーメッセージに一致するパターン
pub struct TransientSignature {
    re: Regex,
}

impl TransientSignature {
    pub fn new() -> Result<Self, Error> {
        Self::with_pattern(TRANSIENT_PATTERN)
    }

    pub fn with_pattern(pattern: &str) -> Result<Self, Error> {
        let re = Regex::new(pattern)
            .map_err(|e| Error::system(format!("Invalid transient pattern '{}': {}", pattern, e)))?;
        Ok(Self { re })
    }

    pub fn matches(&self, error: &Error) -> bool {
        self.re.is_match(&error.to_string())
    }
}

pub struct AnalysisClient {
    generation: Arc<dyn StructuredGeneration>,
    transient: TransientSignature,
    log: Arc<dyn Log>,
}

impl AnalysisClient {
    pub fn new(
        generation: Arc<dyn StructuredGeneration>,
        transient: TransientSignature,
        log: Arc<dyn Log>,
    ) -> Self {
        Self {
            generation,
            transient,
            log,
        }
    }

    /// 分析を実行する（ブロッキング。呼び出し側でワーカースレッドに載せる）
    pub fn analyze(&self, request: &AnalysisRequest) -> Result<AnalysisResult, Error> {
        let prompt = build_prompt(request);
        let schema = analysis_schema();
        let mut generation_request = GenerationRequest {
            prompt,
            schema,
            tier: ModelTier::Primary,
        };

        match self.attempt(&generation_request, request.category) {
            Ok(result) => Ok(result),
            Err(e) if self.transient.matches(&e) => {
                let _ = self.log.log(
                    &LogRecord::new(
                        LogLevel::Warn,
                        "usecase",
                        "analysis",
                        "transient failure, retrying with fallback model",
                    )
                    .field("error", e.to_string()),
                );
                generation_request.tier = ModelTier::Fallback;
                self.attempt(&generation_request, request.category)
            }
            Err(e) => Err(e),
        }
    }

    fn attempt(
        &self,
        request: &GenerationRequest,
        category: AnalysisCategory,
    ) -> Result<AnalysisResult, Error> {
        let _ = self.log.log(
            &LogRecord::new(LogLevel::Debug, "usecase", "analysis", "generation request")
                .field("tier", request.tier.as_str())
                .field("category", category.as_str()),
        );
        let text = self.generation.generate(request)?;
        parse_analysis(&text, category)
    }
}

/// 応答テキストを解釈する。前後の Markdown コードフェンスは取り除く。
pub fn parse_analysis(text: &str, category: AnalysisCategory) -> Result<AnalysisResult, Error> {
    let body = strip_code_fence(text);
    if body.is_empty() {
        return Err(Error::json("No response"));
    }
    let wire: AnalysisWire = serde_json::from_str(body)
        .map_err(|e| Error::json(format!("Failed to parse analysis JSON: {}", e)))?;
    AnalysisResult::from_wire(wire, category)
}

fn strip_code_fence(text: &str) -> &str {
    let trimmed = text.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    // ```json のような言語指定行を飛ばす
    let rest = match rest.find('\n') {
        Some(pos) => &rest[pos + 1..],
        None => rest,
    };
    rest.strip_suffix("```").unwrap_or(rest).trim()
}

//! common::llm のプロバイダで StructuredGeneration を実装するアダプタ
//!
//! Primary は通常モデル + thinking 予算、Fallback は軽量モデルで thinking 設定を送らない。

use std::sync::Arc;

use crate::ports::outbound::{GenerationRequest, ModelTier, StructuredGeneration};
use common::error::Error;
use common::llm::{GenerationConfig, LlmProvider};
use common::ports::outbound::{Log, LogLevel, LogRecord};

pub struct ProviderGeneration {
    primary: Arc<dyn LlmProvider>,
    fallback: Arc<dyn LlmProvider>,
    thinking_budget: Option<u32>,
    temperature: Option<f32>,
    log: Arc<dyn Log>,
}

impl ProviderGeneration {
    pub fn new(
        primary: Arc<dyn LlmProvider>,
        fallback: Arc<dyn LlmProvider>,
        thinking_budget: Option<u32>,
        temperature: Option<f32>,
        log: Arc<dyn Log>,
    ) -> Self {
        Self {
            primary,
            fallback,
            thinking_budget,
            temperature,
            log,
        }
    }

    fn provider_for(&self, tier: ModelTier) -> &dyn LlmProvider {
        match tier {
            ModelTier::Primary => self.primary.as_ref(),
            ModelTier::Fallback => self.fallback.as_ref(),
        }
    }

    fn config_for(&self, request: &GenerationRequest) -> GenerationConfig {
        GenerationConfig {
            response_schema: Some(request.schema.clone()),
            thinking_budget: match request.tier {
                ModelTier::Primary => self.thinking_budget,
                ModelTier::Fallback => None,
            },
            temperature: self.temperature,
        }
    }
}

impl StructuredGeneration for ProviderGeneration {
    fn generate(&self, request: &GenerationRequest) -> Result<String, Error> {
        let provider = self.provider_for(request.tier);
        let config = self.config_for(request);
        let result = provider
            .generate(&request.prompt, &config)
            .and_then(|text| text.ok_or_else(|| Error::json("No response")));
        if let Err(ref e) = result {
            let _ = self.log.log(
                &LogRecord::new(LogLevel::Warn, "adapter", "provider", e.to_string())
                    .field("provider", provider.name())
                    .field("model", provider.model())
                    .field("tier", request.tier.as_str()),
            );
        }
        result
    }
}

//! profiles.json の読み込みとプロバイダ解決

use crate::domain::{ModelName, ProviderName};
use crate::error::Error;
use crate::llm::config::{ProfilesConfig, ProviderTypeKind};
use crate::llm::factory::ProviderType;
use crate::ports::outbound::{EnvResolver, FileSystem};

/// 解決済みプロバイダ（ProviderType + オプション）
#[derive(Debug, Clone)]
pub struct ResolvedProvider {
    /// 解決に使ったプロファイル名（例: "local", "gemini"）。エラー表示用
    pub profile_name: String,
    pub provider_type: ProviderType,
    pub base_url: Option<String>,
    pub model: Option<String>,
    pub fallback_model: Option<String>,
    pub api_key_env: Option<String>,
    pub temperature: Option<f32>,
    pub thinking_budget: Option<u32>,
}

impl ResolvedProvider {
    /// 通常時のモデル（CLI 指定 > プロファイル > プロバイダのデフォルト）
    pub fn primary_model(&self, requested: Option<&ModelName>) -> String {
        requested
            .map(|m| m.to_string())
            .or_else(|| self.model.clone())
            .unwrap_or_else(|| self.provider_type.default_model().to_string())
    }

    /// 再試行時の軽量モデル（CLI 指定 > プロファイル > プロバイダのデフォルト）
    pub fn fallback_model(&self, requested: Option<&ModelName>) -> String {
        requested
            .map(|m| m.to_string())
            .or_else(|| self.fallback_model.clone())
            .unwrap_or_else(|| self.provider_type.default_fallback_model().to_string())
    }

    /// 通常時の thinking 予算（プロファイル > プロバイダのデフォルト）
    pub fn thinking_budget(&self) -> Option<u32> {
        match self.provider_type {
            ProviderType::Gemini => self
                .thinking_budget
                .or_else(|| self.provider_type.default_thinking_budget()),
            ProviderType::OpenAiCompat => None,
        }
    }
}

/// profiles.json を読み込む。ファイルが無ければ Ok(None)、JSON が壊れていれば Err（メッセージにパス含める）
pub fn load_profiles_config(
    fs: &dyn FileSystem,
    env: &dyn EnvResolver,
) -> Result<Option<ProfilesConfig>, Error> {
    let path = env.resolve_profiles_config_path()?;
    if !fs.exists(path.as_path()) {
        return Ok(None);
    }
    let contents = fs
        .read_to_string(path.as_path())
        .map_err(|e| Error::io_msg(format!("{}: {}", path.display(), e)))?;
    ProfilesConfig::parse(&contents)
        .map_err(|e| Error::json(format!("{}: {}", path.display(), e)))
        .map(Some)
}

fn provider_type_kind_to_provider_type(k: ProviderTypeKind) -> ProviderType {
    match k {
        ProviderTypeKind::Gemini => ProviderType::Gemini,
        ProviderTypeKind::OpenaiCompat => ProviderType::OpenAiCompat,
    }
}

/// 利用可能なビルトインプロバイダ名
pub fn builtin_provider_names() -> &'static [&'static str] {
    &["gemini", "gpt", "openai", "openai_compat"]
}

/// 要求されたプロバイダ名（None の場合は default）と ProfilesConfig から ResolvedProvider を解決する。
/// 不明なプロバイダの場合は Error::invalid_argument（is_usage == true）で利用可能一覧を返す。
pub fn resolve_provider(
    requested: Option<&ProviderName>,
    cfg: Option<&ProfilesConfig>,
) -> Result<ResolvedProvider, Error> {
    let effective_name: &str = requested
        .map(|r| r.as_ref())
        .unwrap_or_else(|| {
            cfg.and_then(|c| c.default_provider.as_deref())
                .unwrap_or("gemini")
        });

    // 1) cfg.providers に名前があればそれを優先
    if let Some(cfg) = cfg {
        if let Some(profile) = cfg.providers.get(effective_name) {
            return Ok(ResolvedProvider {
                profile_name: effective_name.to_string(),
                provider_type: provider_type_kind_to_provider_type(profile.type_),
                base_url: profile.base_url.clone(),
                model: profile.model.clone(),
                fallback_model: profile.fallback_model.clone(),
                api_key_env: profile.api_key_env.clone(),
                temperature: profile.temperature,
                thinking_budget: profile.thinking_budget,
            });
        }
    }

    // 2) ビルトイン (ProviderType::from_str) を試す
    if let Some(provider_type) = ProviderType::from_str(effective_name) {
        return Ok(ResolvedProvider {
            profile_name: effective_name.to_string(),
            provider_type,
            base_url: None,
            model: None,
            fallback_model: None,
            api_key_env: None,
            temperature: None,
            thinking_budget: None,
        });
    }

    // 3) どれも無ければ usage エラー
    let mut available: Vec<String> = builtin_provider_names()
        .iter()
        .map(|s| (*s).to_string())
        .collect();
    if let Some(cfg) = cfg {
        for k in cfg.providers.keys() {
            if !available.contains(k) {
                available.push(k.clone());
            }
        }
    }
    available.sort();
    Err(Error::invalid_argument(format!(
        "Unknown provider: '{}'. Available: {}",
        effective_name,
        available.join(", ")
    )))
}

/// 一覧表示用: ビルトイン + profiles.json のプロファイル名（ソート済み）とデフォルト名
pub fn list_profile_names(cfg: Option<&ProfilesConfig>) -> (Vec<String>, String) {
    let mut names: Vec<String> = builtin_provider_names()
        .iter()
        .map(|s| (*s).to_string())
        .collect();
    if let Some(cfg) = cfg {
        for k in cfg.providers.keys() {
            if !names.contains(k) {
                names.push(k.clone());
            }
        }
    }
    names.sort();
    let default = cfg
        .and_then(|c| c.default_provider.clone())
        .unwrap_or_else(|| "gemini".to_string());
    (names, default)
}

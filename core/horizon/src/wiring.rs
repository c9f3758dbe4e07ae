//! 配線: 標準アダプタで App と対話アプリを組み立てる

use std::sync::Arc;

use common::adapter::{
    FanoutLog, FileJsonLog, NoopLog, StderrLog, StdClock, StdEnvResolver, StdFileSystem,
    StdProcess,
};
use common::error::Error;
use common::llm::{create_provider, load_profiles_config, resolve_provider, LlmProvider};
use common::ports::outbound::{Clock, EnvResolver, FileSystem, Log, LogLevel, LogRecord, Process};

use crate::adapter::{CommandSpeech, NoopSpeech, ProviderGeneration, DEFAULT_SPEECH_PROGRAM};
use crate::app::HorizonApp;
use crate::domain::AcademyOptions;
use crate::ports::outbound::{SpeechPlayer, StructuredGeneration};
use crate::usecase::{AnalysisClient, ProfilesUseCase, TransientSignature, ViewStateMachine};

/// 読み上げコマンドを指定する環境変数（"off" で無効）
pub const SPEECH_ENV: &str = "HORIZON_SPEECH";

/// 配線で組み立てたポート群（main の Command ディスパッチで利用）
pub struct App {
    pub fs: Arc<dyn FileSystem>,
    pub env_resolver: Arc<dyn EnvResolver>,
    pub clock: Arc<dyn Clock>,
    pub process: Arc<dyn Process>,
    /// 構造化ログ（ファイルへ JSONL。verbose 時は stderr にも）
    pub logger: Arc<dyn Log>,
    pub profiles_use_case: ProfilesUseCase,
}

/// 配線: 標準アダプタで App を組み立てる
pub fn wire_horizon(verbose: bool) -> App {
    let fs: Arc<dyn FileSystem> = Arc::new(StdFileSystem);
    let env_resolver: Arc<dyn EnvResolver> = Arc::new(StdEnvResolver);
    let file_log: Arc<dyn Log> = env_resolver
        .resolve_home_dir()
        .map(|home| Arc::new(FileJsonLog::new(Arc::clone(&fs), home.log_file())) as Arc<dyn Log>)
        .unwrap_or_else(|_| Arc::new(NoopLog));
    let logger: Arc<dyn Log> = if verbose {
        Arc::new(FanoutLog::new(vec![file_log, Arc::new(StderrLog)]))
    } else {
        file_log
    };
    let profiles_use_case = ProfilesUseCase::new(Arc::clone(&fs), Arc::clone(&env_resolver));
    App {
        fs,
        env_resolver,
        clock: Arc::new(StdClock),
        process: Arc::new(StdProcess),
        logger,
        profiles_use_case,
    }
}

/// 対話アプリを組み立てる。プロバイダは通常用と再試行用の 2 つをここで作る
/// （API キーが無ければ起動時に Env エラー）。
pub fn wire_academy(app: &App, options: &AcademyOptions) -> Result<HorizonApp, Error> {
    let cfg = load_profiles_config(app.fs.as_ref(), app.env_resolver.as_ref())?;
    let resolved = resolve_provider(options.profile.as_ref(), cfg.as_ref())?;
    let primary_model = resolved.primary_model(options.model.as_ref());
    let fallback_model = resolved.fallback_model(options.fallback_model.as_ref());
    let primary: Arc<dyn LlmProvider> = Arc::new(create_provider(&resolved, &primary_model)?);
    let fallback: Arc<dyn LlmProvider> = Arc::new(create_provider(&resolved, &fallback_model)?);

    let _ = app.logger.log(
        &LogRecord::new(LogLevel::Info, "wiring", "provider", "provider resolved")
            .field("profile", resolved.profile_name.clone())
            .field("provider", resolved.provider_type.as_str())
            .field("model", primary_model)
            .field("fallback_model", fallback_model),
    );

    let generation: Arc<dyn StructuredGeneration> = Arc::new(ProviderGeneration::new(
        primary,
        fallback,
        resolved.thinking_budget(),
        resolved.temperature,
        Arc::clone(&app.logger),
    ));
    let client = Arc::new(AnalysisClient::new(
        generation,
        TransientSignature::new()?,
        Arc::clone(&app.logger),
    ));
    let machine = ViewStateMachine::new(Arc::clone(&app.clock), Arc::clone(&app.logger));
    let speech = wire_speech(app, options.speech);
    Ok(HorizonApp::new(machine, client, speech, Arc::clone(&app.logger)))
}

fn wire_speech(app: &App, enabled: bool) -> Arc<dyn SpeechPlayer> {
    if !enabled {
        return Arc::new(NoopSpeech);
    }
    match app.env_resolver.var(SPEECH_ENV) {
        Some(value) if value.eq_ignore_ascii_case("off") => Arc::new(NoopSpeech),
        Some(program) => Arc::new(CommandSpeech::new(
            Arc::clone(&app.process),
            program,
            Arc::clone(&app.logger),
        )),
        None => Arc::new(CommandSpeech::new(
            Arc::clone(&app.process),
            DEFAULT_SPEECH_PROGRAM,
            Arc::clone(&app.logger),
        )),
    }
}

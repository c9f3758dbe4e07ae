use crate::domain::{AcademyOptions, AnalysisCategory, HorizonCommand, Language};
use clap::builder::{ArgAction, PossibleValuesParser};
use clap::value_parser;
use clap_complete::Shell;
use common::domain::{ModelName, ProviderName};
use common::error::Error;

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub help: bool,
    /// -L / --list-profiles: 現在有効なプロファイル一覧を表示
    pub list_profiles: bool,
    /// -v / --verbose: 冗長ログを stderr にも出力する
    pub verbose: bool,
    /// --no-speech: 読み上げを無効にする
    pub no_speech: bool,
    pub profile: Option<ProviderName>,
    pub model: Option<ModelName>,
    pub fallback_model: Option<ModelName>,
    /// -l / --lang: 起動時に選ぶ言語
    pub language: Option<Language>,
    /// -k / --category: 起動時に選ぶカテゴリ（-l が必要）
    pub category: Option<AnalysisCategory>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            help: false,
            list_profiles: false,
            verbose: false,
            no_speech: false,
            profile: None,
            model: None,
            fallback_model: None,
            language: None,
            category: None,
        }
    }
}

/// 解析結果: 通常の Config または補完スクリプト生成
#[derive(Debug, Clone)]
pub enum ParseOutcome {
    Config(Config),
    GenerateCompletion(Shell),
}

pub(crate) fn build_clap_command() -> clap::Command {
    let category_codes: Vec<&'static str> =
        AnalysisCategory::ALL.iter().map(|c| c.code()).collect();
    clap::Command::new("horizon")
        .about("Word Horizon Academy: vocabulary and grammar study cards from an LLM")
        .disable_help_flag(true)
        .arg(
            clap::Arg::new("help")
                .short('h')
                .long("help")
                .help("Show this help message")
                .action(ArgAction::SetTrue),
        )
        .arg(
            clap::Arg::new("list-profiles")
                .short('L')
                .long("list-profiles")
                .help("List currently available provider profiles")
                .action(ArgAction::SetTrue),
        )
        .arg(
            clap::Arg::new("verbose")
                .short('v')
                .long("verbose")
                .help("Emit verbose debug logs to stderr (for troubleshooting)")
                .action(ArgAction::SetTrue),
        )
        .arg(
            clap::Arg::new("no-speech")
                .long("no-speech")
                .help("Disable text-to-speech playback")
                .action(ArgAction::SetTrue),
        )
        .arg(
            clap::Arg::new("profile")
                .short('p')
                .long("profile")
                .value_name("profile")
                .help("Specify LLM profile (gemini, openai, etc.)")
                .num_args(1),
        )
        .arg(
            clap::Arg::new("model")
                .short('m')
                .long("model")
                .value_name("model")
                .help("Specify primary model name")
                .num_args(1),
        )
        .arg(
            clap::Arg::new("fallback-model")
                .long("fallback-model")
                .value_name("model")
                .help("Specify the model used for the retry after a connection failure")
                .num_args(1),
        )
        .arg(
            clap::Arg::new("lang")
                .short('l')
                .long("lang")
                .value_name("lang")
                .help("Pre-select the language")
                .value_parser(PossibleValuesParser::new(["en", "vi"]))
                .num_args(1),
        )
        .arg(
            clap::Arg::new("category")
                .short('k')
                .long("category")
                .value_name("category")
                .help("Pre-select the category (requires --lang)")
                .value_parser(PossibleValuesParser::new(category_codes))
                .requires("lang")
                .num_args(1),
        )
        .arg(
            clap::Arg::new("generate")
                .long("generate")
                .value_name("shell")
                .help("Generate shell completion script")
                .value_parser(value_parser!(Shell))
                .num_args(1),
        )
}

fn matches_to_config(matches: &clap::ArgMatches) -> Config {
    Config {
        help: matches.get_flag("help"),
        list_profiles: matches.get_flag("list-profiles"),
        verbose: matches.get_flag("verbose"),
        no_speech: matches.get_flag("no-speech"),
        profile: matches
            .get_one::<String>("profile")
            .map(|s| ProviderName::new(s.clone())),
        model: matches
            .get_one::<String>("model")
            .map(|s| ModelName::new(s.clone())),
        fallback_model: matches
            .get_one::<String>("fallback-model")
            .map(|s| ModelName::new(s.clone())),
        language: matches
            .get_one::<String>("lang")
            .and_then(|s| Language::from_code(s)),
        category: matches
            .get_one::<String>("category")
            .and_then(|s| AnalysisCategory::from_code(s)),
    }
}

/// コマンドラインを解析する。補完生成が要求された場合は ParseOutcome::GenerateCompletion を返す。
pub fn parse_args() -> Result<ParseOutcome, Error> {
    let matches = build_clap_command()
        .try_get_matches()
        .map_err(|e| Error::invalid_argument(e.to_string()))?;

    if let Some(&shell) = matches.get_one::<Shell>("generate") {
        return Ok(ParseOutcome::GenerateCompletion(shell));
    }
    Ok(ParseOutcome::Config(matches_to_config(&matches)))
}

/// テスト用: 引数スライスから解析する
#[allow(dead_code)]
pub fn parse_args_from(args: &[&str]) -> Result<Config, Error> {
    let matches = build_clap_command()
        .try_get_matches_from(args)
        .map_err(|e| Error::invalid_argument(e.to_string()))?;
    Ok(matches_to_config(&matches))
}

/// 補完スクリプトを標準出力に出力する
pub fn print_completion(shell: Shell) {
    let mut cmd = build_clap_command();
    clap_complete::generate(shell, &mut cmd, "horizon", &mut std::io::stdout());
}

/// Config を HorizonCommand に変換する
pub fn config_to_command(config: Config) -> HorizonCommand {
    if config.help {
        return HorizonCommand::Help;
    }
    if config.list_profiles {
        return HorizonCommand::ListProfiles;
    }
    HorizonCommand::Academy(AcademyOptions {
        profile: config.profile,
        model: config.model,
        fallback_model: config.fallback_model,
        language: config.language,
        category: config.category,
        speech: !config.no_speech,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clap_command_is_consistent() {
        build_clap_command().debug_assert();
    }

    #[test]
    fn test_config_default_starts_academy_with_speech() {
        let command = config_to_command(Config::default());
        assert_eq!(
            command,
            HorizonCommand::Academy(AcademyOptions {
                speech: true,
                ..Default::default()
            })
        );
    }

    #[test]
    fn test_help_wins_over_list_profiles() {
        let config = Config {
            help: true,
            list_profiles: true,
            ..Default::default()
        };
        assert_eq!(config_to_command(config), HorizonCommand::Help);
    }

    #[test]
    fn test_parse_preselect_and_models() {
        let config = parse_args_from(&[
            "horizon", "-l", "vi", "-k", "grammar", "-p", "openai", "-m", "gpt-4o",
            "--fallback-model", "gpt-4o-mini", "--no-speech",
        ])
        .unwrap();
        assert_eq!(config.language, Some(Language::Vietnamese));
        assert_eq!(config.category, Some(AnalysisCategory::Grammar));
        assert_eq!(config.profile.as_deref(), Some("openai"));
        assert_eq!(config.model.as_deref(), Some("gpt-4o"));
        assert_eq!(config.fallback_model.as_deref(), Some("gpt-4o-mini"));
        assert!(config.no_speech);
    }

    #[test]
    fn test_category_requires_lang() {
        let err = parse_args_from(&["horizon", "-k", "word"]).unwrap_err();
        assert_eq!(err.exit_code(), 64);
    }

    #[test]
    fn test_unknown_option_is_usage_error() {
        let err = parse_args_from(&["horizon", "--bogus"]).unwrap_err();
        assert!(err.is_usage());
        assert_eq!(err.exit_code(), 64);
    }

    #[test]
    fn test_invalid_lang_is_usage_error() {
        let err = parse_args_from(&["horizon", "-l", "fr"]).unwrap_err();
        assert_eq!(err.exit_code(), 64);
    }
}

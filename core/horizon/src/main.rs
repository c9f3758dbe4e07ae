mod adapter;
mod app;
mod cli;
mod domain;
mod ports;
mod usecase;
mod wiring;

#[cfg(test)]
mod tests;

use std::process;
use std::sync::mpsc;

use adapter::terminal::{install_interrupt_handler, spawn_line_reader};
use cli::{config_to_command, parse_args, print_completion, Config, ParseOutcome};
use common::error::Error;
use common::ports::outbound::{LogLevel, LogRecord};
use domain::{AcademyOptions, HorizonCommand};
use ports::inbound::UseCaseRunner;
use usecase::Action;
use wiring::{wire_academy, wire_horizon, App};

/// Command をディスパッチする Runner（match は main レイヤーに集約）
struct Runner {
    app: App,
}

impl UseCaseRunner for Runner {
    fn run(&self, config: Config) -> Result<i32, Error> {
        let cmd = config_to_command(config);
        let command_name = cmd_name_for_log(&cmd);
        let _ = self.app.logger.log(
            &LogRecord::new(LogLevel::Info, "cli", "lifecycle", "command started")
                .field("command", command_name),
        );

        let result = match cmd {
            HorizonCommand::Help => {
                print_help();
                Ok(0)
            }
            HorizonCommand::ListProfiles => {
                let (names, default) = self.app.profiles_use_case.list()?;
                for name in &names {
                    if *name == default {
                        println!("{} (default)", name);
                    } else {
                        println!("{}", name);
                    }
                }
                Ok(0)
            }
            HorizonCommand::Academy(options) => self.run_academy(&options),
        };

        let code = result.as_ref().copied().unwrap_or(0);
        let _ = self.app.logger.log(
            &LogRecord::new(LogLevel::Info, "cli", "lifecycle", "command finished")
                .field("command", command_name)
                .field("exit_code", code),
        );
        if let Err(ref e) = result {
            let _ = self
                .app
                .logger
                .log(&LogRecord::new(LogLevel::Error, "cli", "error", e.to_string()));
        }
        result
    }
}

impl Runner {
    fn run_academy(&self, options: &AcademyOptions) -> Result<i32, Error> {
        let academy = wire_academy(&self.app, options)?;
        let (tx, rx) = mpsc::channel();
        install_interrupt_handler(tx.clone())?;
        spawn_line_reader(tx.clone());
        let stdout = std::io::stdout();
        let mut out = stdout.lock();
        academy.run(initial_actions(options), tx, rx, &mut out)
    }
}

/// -l / -k の事前選択を通常の操作として並べる
fn initial_actions(options: &AcademyOptions) -> Vec<Action> {
    let mut actions = Vec::new();
    if let Some(language) = options.language {
        actions.push(Action::SelectLanguage(language));
        if let Some(category) = options.category {
            actions.push(Action::SelectCategory(category));
        }
    }
    actions
}

fn cmd_name_for_log(cmd: &HorizonCommand) -> &'static str {
    match cmd {
        HorizonCommand::Help => "help",
        HorizonCommand::ListProfiles => "list-profiles",
        HorizonCommand::Academy(_) => "academy",
    }
}

fn main() {
    let exit_code = match run() {
        Ok(code) => code,
        Err(e) => {
            if e.is_usage() {
                print_usage();
            }
            eprintln!("horizon: {}", e);
            e.exit_code()
        }
    };
    process::exit(exit_code);
}

pub fn run() -> Result<i32, Error> {
    let config = match parse_args()? {
        ParseOutcome::Config(c) => c,
        ParseOutcome::GenerateCompletion(shell) => {
            print_completion(shell);
            return Ok(0);
        }
    };
    let app = wire_horizon(config.verbose);
    let runner = Runner { app };
    runner.run(config)
}

fn print_usage() {
    eprintln!("Usage: horizon [options]");
}

fn print_help() {
    println!("Usage: horizon [options]");
    println!("Options:");
    println!("  -h, --help                     Show this help message");
    println!("  -L, --list-profiles            List currently available provider profiles (from profiles.json + built-ins)");
    println!("  -p, --profile <profile>        Specify LLM profile (gemini, openai, etc.). Default: profiles.json default, or gemini if not set.");
    println!("  -m, --model <model>            Specify the primary model. Default: profile model or provider default");
    println!("  --fallback-model <model>       Specify the model used for the single retry after a connection failure");
    println!("  -l, --lang <en|vi>             Pre-select the language");
    println!("  -k, --category <category>      Pre-select the category: word, idioms, grammar, challenge (requires --lang)");
    println!("  --no-speech                    Disable text-to-speech playback");
    println!("  -v, --verbose                  Emit verbose debug logs to stderr (for troubleshooting)");
    println!("  --generate <shell>             Generate shell completion script (bash, zsh, fish).");
    println!();
    println!("Environment:");
    println!("  HORIZON_HOME     Home directory. Profiles: $HORIZON_HOME/config/profiles.json; log: $HORIZON_HOME/log/horizon.jsonl");
    println!("                   If unset, $XDG_CONFIG_HOME/horizon (e.g. ~/.config/horizon) is used.");
    println!("  HORIZON_SPEECH   Text-to-speech program (default: espeak-ng). 'off' disables playback.");
    println!("  GEMINI_API_KEY   API key for the gemini provider");
    println!("  OPENAI_API_KEY   API key for OpenAI-compatible providers");
    println!();
    println!("In the academy:");
    println!("  Type a number to choose from a menu, then a word, idiom, grammar topic or sentence.");
    println!("  fav             Toggle the current result in favorites");
    println!("  history         Open the Nook Phone viewer (history / favorites)");
    println!("  menu, home      Start over from the language menu");
    println!("  :back :fav :speak :phone :menu :quit   Buttons");
}

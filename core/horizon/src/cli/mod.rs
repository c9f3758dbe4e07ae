//! CLI 境界（引数解析と補完スクリプト）

mod args;

pub use args::{config_to_command, parse_args, print_completion, Config, ParseOutcome};
#[allow(unused_imports)]
pub use args::parse_args_from;

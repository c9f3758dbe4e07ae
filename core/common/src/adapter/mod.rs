//! アダプター（外界の I/O を trait で抽象化した標準実装）
//!
//! usecase は ports::outbound の trait 経由でのみファイル・時刻・環境変数・プロセスに触れる。
//! 実装は標準実装（Std*）やテスト用のモックを注入する。

pub mod file_json_log;
pub mod std_clock;
pub mod std_env_resolver;
pub mod std_fs;
pub mod std_process;

pub use file_json_log::{FanoutLog, FileJsonLog, NoopLog, StderrLog};
pub use std_clock::StdClock;
pub use std_env_resolver::StdEnvResolver;
pub use std_fs::StdFileSystem;
pub use std_process::StdProcess;

//! 標準サブプロセス起動（std::process::Command を委譲）

use crate::error::Error;
use crate::ports::outbound::Process;
use std::path::Path;
use std::process::{Command, Stdio};

/// 標準ライブラリの Command を使う Process 実装
#[derive(Debug, Clone, Default)]
pub struct StdProcess;

impl Process for StdProcess {
    fn spawn_detached(&self, program: &Path, args: &[String]) -> Result<(), Error> {
        let mut child = Command::new(program)
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|e| {
                Error::io_msg(format!(
                    "Failed to execute '{}': {}",
                    program.display(),
                    e
                ))
            })?;
        // 終了を待つのは別スレッド（ゾンビを残さない）
        std::thread::spawn(move || {
            let _ = child.wait();
        });
        Ok(())
    }
}

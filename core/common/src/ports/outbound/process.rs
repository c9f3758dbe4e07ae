//! サブプロセス起動 Outbound ポート

use crate::error::Error;
use std::path::Path;

/// サブプロセス起動の抽象
pub trait Process: Send + Sync {
    /// 終了を待たずに起動する（fire-and-forget）。起動できなかった場合のみ Err。
    fn spawn_detached(&self, program: &Path, args: &[String]) -> Result<(), Error>;
}

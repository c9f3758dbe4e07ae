//! 環境変数解決 Outbound ポート
//!
//! ホームディレクトリ・設定ファイル・API キー・読み上げコマンドを環境変数から解決する。
//! usecase はこの trait 経由でのみ環境変数にアクセスする。

use crate::domain::HomeDir;
use crate::error::Error;
use std::path::PathBuf;

/// 環境変数解決抽象（Outbound ポート）
///
/// 実装は `common::adapter::StdEnvResolver` やテスト用のモックなど。
pub trait EnvResolver: Send + Sync {
    /// ホームディレクトリを環境変数から解決する
    ///
    /// 優先順位:
    /// 1. HORIZON_HOME（設定されていれば）
    /// 2. $XDG_CONFIG_HOME/horizon（XDG_CONFIG_HOME が設定されていれば）
    /// 3. $HOME/.config/horizon
    fn resolve_home_dir(&self) -> Result<HomeDir, Error>;

    /// プロバイダプロファイル設定ファイルのパス
    /// HORIZON_HOME があれば $HORIZON_HOME/config/profiles.json、なければ resolve_home_dir() 直下の profiles.json
    fn resolve_profiles_config_path(&self) -> Result<PathBuf, Error>;

    /// 任意の環境変数（空文字は未設定扱い）
    fn var(&self, name: &str) -> Option<String>;
}

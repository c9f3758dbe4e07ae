//! プロファイル一覧のユースケース（-L / --list-profiles）

use std::sync::Arc;

use common::error::Error;
use common::llm::{list_profile_names, load_profiles_config};
use common::ports::outbound::{EnvResolver, FileSystem};

pub struct ProfilesUseCase {
    fs: Arc<dyn FileSystem>,
    env_resolver: Arc<dyn EnvResolver>,
}

impl ProfilesUseCase {
    pub fn new(fs: Arc<dyn FileSystem>, env_resolver: Arc<dyn EnvResolver>) -> Self {
        Self { fs, env_resolver }
    }

    /// (ソート済みのプロファイル名, デフォルト名) を返す。表示は CLI の責務。
    pub fn list(&self) -> Result<(Vec<String>, String), Error> {
        let cfg = load_profiles_config(self.fs.as_ref(), self.env_resolver.as_ref())?;
        Ok(list_profile_names(cfg.as_ref()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use common::adapter::StdFileSystem;
    use common::domain::HomeDir;
    use std::path::PathBuf;

    struct HomeEnv(PathBuf);

    impl EnvResolver for HomeEnv {
        fn resolve_home_dir(&self) -> Result<HomeDir, Error> {
            Ok(HomeDir::new(self.0.clone()))
        }
        fn resolve_profiles_config_path(&self) -> Result<PathBuf, Error> {
            Ok(self.0.join("profiles.json"))
        }
        fn var(&self, _name: &str) -> Option<String> {
            None
        }
    }

    #[test]
    fn test_list_builtins_without_profiles_file() {
        let dir = tempfile::tempdir().unwrap();
        let use_case = ProfilesUseCase::new(
            Arc::new(StdFileSystem),
            Arc::new(HomeEnv(dir.path().to_path_buf())),
        );
        let (names, default) = use_case.list().unwrap();
        assert_eq!(names, vec!["gemini", "gpt", "openai", "openai_compat"]);
        assert_eq!(default, "gemini");
    }

    #[test]
    fn test_list_includes_profiles_and_their_default() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("profiles.json"),
            r#"{ "default_provider": "academy",
                 "providers": { "academy": { "type": "gemini", "thinking_budget": 1024 } } }"#,
        )
        .unwrap();
        let use_case = ProfilesUseCase::new(
            Arc::new(StdFileSystem),
            Arc::new(HomeEnv(dir.path().to_path_buf())),
        );
        let (names, default) = use_case.list().unwrap();
        assert_eq!(names[0], "academy");
        assert_eq!(default, "academy");
    }
}

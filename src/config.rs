use serde::Deserialize;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::engine::EngineProfile;
use crate::error::{ResolverError, Result};

#[derive(Debug, Deserialize)]
pub struct Config {
    pub resolver: ResolverConfig,
    #[serde(default)]
    pub engine: EngineConfig,
}

#[derive(Debug, Deserialize)]
pub struct ResolverConfig {
    /// File the current compilation was started for; anchors imports that
    /// originate from the synthetic entry buffer.
    pub entry: PathBuf,
    /// Extra directories searched for imports, in configured order.
    #[serde(default)]
    pub include_paths: Vec<PathBuf>,
    /// Directories holding installed packages for `~`-prefixed and bare
    /// package requests.
    #[serde(default)]
    pub module_roots: Vec<PathBuf>,
    /// Specifier-prefix aliases, e.g. `"@styles" = "/project/src/styles"`.
    #[serde(default)]
    pub aliases: BTreeMap<String, PathBuf>,
}

#[derive(Debug, Default, Deserialize)]
pub struct EngineConfig {
    #[serde(default)]
    pub implementation: EngineKind,
}

impl EngineConfig {
    pub fn profile(&self) -> EngineProfile {
        self.implementation.profile()
    }
}

/// Which underlying compiler engine output is prepared for.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EngineKind {
    #[default]
    Legacy,
    Modern,
}

impl EngineKind {
    pub fn profile(self) -> EngineProfile {
        match self {
            EngineKind::Legacy => EngineProfile::legacy(),
            EngineKind::Modern => EngineProfile::modern(),
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        Self::load_from(Path::new("config.toml"))
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            ResolverError::Config(format!(
                "Failed to read config file '{}': {}",
                path.display(),
                e
            ))
        })?;

        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_a_full_config() {
        let config: Config = toml::from_str(
            r#"
            [resolver]
            entry = "/project/src/main.scss"
            include_paths = ["/project/styles", "/project/vendor"]
            module_roots = ["/project/node_modules"]

            [resolver.aliases]
            "@styles" = "/project/src/styles"

            [engine]
            implementation = "modern"
            "#,
        )
        .unwrap();

        assert_eq!(config.resolver.entry, PathBuf::from("/project/src/main.scss"));
        assert_eq!(config.resolver.include_paths.len(), 2);
        assert_eq!(
            config.resolver.aliases.get("@styles"),
            Some(&PathBuf::from("/project/src/styles"))
        );
        assert!(!config.engine.profile().inlines_plain_css);
    }

    #[test]
    fn engine_defaults_to_legacy() {
        let config: Config = toml::from_str(
            r#"
            [resolver]
            entry = "/project/main.scss"
            "#,
        )
        .unwrap();

        assert!(config.engine.profile().inlines_plain_css);
        assert!(config.resolver.include_paths.is_empty());
        assert!(config.resolver.aliases.is_empty());
    }

    #[test]
    fn missing_file_is_a_config_error() {
        let err = Config::load_from(Path::new("/nonexistent/config.toml")).unwrap_err();
        assert!(matches!(err, ResolverError::Config(_)));
    }
}

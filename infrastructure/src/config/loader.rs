//! Configuration loader with multi-source merging

use super::file_config::FileConfig;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use std::path::{Path, PathBuf};

/// Configuration loader that handles file discovery and merging
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from all sources with proper priority
    ///
    /// Priority (highest to lowest):
    /// 1. Environment: `SWITCHBOARD_` variables with `__` as the section
    ///    separator (e.g. `SWITCHBOARD_SERVER__PORT`), plus
    ///    `OPENROUTER_API_KEY` / `MODEL_NAME` for the `[llm]` section
    /// 2. Explicit config path (if provided)
    /// 3. Working directory: `./switchboard.toml`
    /// 4. Default values
    pub fn load(config_path: Option<&PathBuf>) -> Result<FileConfig, Box<figment::Error>> {
        let mut figment = Figment::new().merge(Serialized::defaults(FileConfig::default()));

        let project_path = Path::new("switchboard.toml");
        if project_path.exists() {
            figment = figment.merge(Toml::file(project_path));
        }

        if let Some(path) = config_path {
            figment = figment.merge(Toml::file(path));
        }

        figment = figment
            .merge(Env::prefixed("SWITCHBOARD_").split("__"))
            .merge(
                Env::raw()
                    .only(&["OPENROUTER_API_KEY"])
                    .map(|_| "llm.api_key".into())
                    .split("."),
            )
            .merge(
                Env::raw()
                    .only(&["MODEL_NAME"])
                    .map(|_| "llm.model".into())
                    .split("."),
            );

        figment.extract().map_err(Box::new)
    }

    /// Load only default configuration
    pub fn load_defaults() -> FileConfig {
        FileConfig::default()
    }
}

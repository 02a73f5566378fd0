use std::path::{Path, PathBuf};

use config::Environment;
use serde::Deserialize;

/// Base name of the optional config file in the working directory
/// (`shoe-who.toml`).
pub const CONFIG_FILE: &str = "shoe-who";
pub const ENV_PREFIX: &str = "SHOEWHO";

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub assets_dir: PathBuf,
    pub rng_seed: Option<u64>,
    pub log_filter: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            assets_dir: PathBuf::from("assets"),
            rng_seed: None,
            log_filter: "warn,shoe_who=info".to_string(),
        }
    }
}

impl AppConfig {
    pub fn load() -> Result<Self, config::ConfigError> {
        let mut config = Self::load_from(CONFIG_FILE, environment())?;
        let cwd = std::env::current_dir().ok();
        let exe_dir = std::env::current_exe()
            .ok()
            .and_then(|exe| exe.parent().map(Path::to_path_buf));
        config.assets_dir =
            resolve_assets_dir(&config.assets_dir, cwd.as_deref(), exe_dir.as_deref());
        Ok(config)
    }

    fn load_from(file: &str, env: Environment) -> Result<Self, config::ConfigError> {
        config::Config::builder()
            .add_source(config::File::with_name(file).required(false))
            .add_source(env)
            .build()?
            .try_deserialize()
    }
}

fn environment() -> Environment {
    Environment::with_prefix(ENV_PREFIX).try_parsing(true)
}

/// A relative assets directory is looked up in the working directory first,
/// then next to the executable. Absolute or unresolvable paths are kept.
fn resolve_assets_dir(configured: &Path, cwd: Option<&Path>, exe_dir: Option<&Path>) -> PathBuf {
    if configured.is_absolute() {
        return configured.to_path_buf();
    }

    [cwd, exe_dir]
        .into_iter()
        .flatten()
        .map(|base| base.join(configured))
        .find(|candidate| candidate.is_dir())
        .unwrap_or_else(|| configured.to_path_buf())
}

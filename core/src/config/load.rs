use std::path::{Path, PathBuf};

use anyhow::Context;

use super::types::AppConfig;
use crate::properties::PEGASUS_HOME_KEY;

/// Get the default gridstart data directory: ~/.gridstart
pub fn get_gridstart_data_dir() -> anyhow::Result<PathBuf> {
    let home = dirs::home_dir().ok_or_else(|| anyhow::anyhow!("Cannot determine home directory"))?;
    Ok(home.join(".gridstart"))
}

pub fn load_from_path(path: &Path) -> anyhow::Result<AppConfig> {
    let s = std::fs::read_to_string(path)
        .with_context(|| format!("read config {}", path.display()))?;
    let cfg = toml::from_str::<AppConfig>(&s)
        .with_context(|| format!("parse config {}", path.display()))?;
    Ok(cfg)
}

/// Loads the configuration and applies environment overrides.
///
/// `explicit` wins; otherwise ~/.gridstart/config.toml, then ./config.toml,
/// then built-in defaults.
pub fn load_default(explicit: Option<&Path>) -> anyhow::Result<AppConfig> {
    let mut cfg = match explicit {
        Some(path) => load_from_path(path)?,
        None => {
            let user_config = get_gridstart_data_dir()?.join("config.toml");
            let local_config = Path::new("config.toml");
            if user_config.exists() {
                load_from_path(&user_config)?
            } else if local_config.exists() {
                load_from_path(local_config)?
            } else {
                AppConfig::default()
            }
        }
    };

    apply_env_overrides(&mut cfg, |k| std::env::var(k).ok());
    Ok(cfg)
}

/// Applies `PEGASUS_HOME` (only when the property is unset) and
/// `GRIDSTART_POSTSCRIPT_PATH`.
pub fn apply_env_overrides(cfg: &mut AppConfig, lookup: impl Fn(&str) -> Option<String>) {
    let non_empty = |k: &str| lookup(k).filter(|v| !v.trim().is_empty());

    if !cfg.properties.contains_key(PEGASUS_HOME_KEY) {
        if let Some(v) = non_empty("PEGASUS_HOME") {
            cfg.properties.set(PEGASUS_HOME_KEY, v);
        }
    }
    if let Some(v) = non_empty("GRIDSTART_POSTSCRIPT_PATH") {
        cfg.postscript.path = Some(v);
    }
}

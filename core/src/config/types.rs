use serde::{Deserialize, Serialize};

use crate::properties::Properties;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub logging: LoggingConfig,

    #[serde(default)]
    pub postscript: PostScriptConfig,

    /// Planner properties, e.g. `"pegasus.home" = "/opt/pegasus"`.
    #[serde(default)]
    pub properties: Properties,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_logging_enabled")]
    pub enabled: bool,

    /// If true, log to stderr.
    #[serde(default = "default_logging_console")]
    pub console: bool,

    /// If true, log to a file under `directory` (or OS temp dir if unset).
    #[serde(default)]
    pub file: bool,

    /// EnvFilter string, e.g. "info" or "gridstart_core=debug".
    #[serde(default = "default_logging_level")]
    pub level: String,

    /// Optional directory for log files. If empty or unset, uses OS temp dir.
    #[serde(default)]
    pub directory: Option<String>,
}

fn default_logging_enabled() -> bool {
    true
}

fn default_logging_console() -> bool {
    true
}

fn default_logging_level() -> String {
    "warn".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            enabled: default_logging_enabled(),
            console: default_logging_console(),
            file: false,
            level: default_logging_level(),
            directory: None,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PostScriptConfig {
    /// Kind used for jobs that do not name one; falls back to the
    /// `pegasus.exitcode.impl` property, then to `exitcode`.
    #[serde(default)]
    pub kind: Option<String>,

    /// Tool path override for every job that has no `POST.PATH.<kind>` profile.
    #[serde(default)]
    pub path: Option<String>,

    /// Directory the submit files are generated into.
    #[serde(default)]
    pub submit_dir: Option<String>,
}

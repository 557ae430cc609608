use route_policy::DefaultPolicy;
use serde::Deserialize;
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize)]
pub struct Config {
    #[serde(default = "default_policy_file")]
    pub policy_file: PathBuf,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub evaluation: EvaluationConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            policy_file: default_policy_file(),
            logging: LoggingConfig::default(),
            evaluation: EvaluationConfig::default(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default)]
    pub format: LogFormat,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: LogFormat::default(),
        }
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

#[derive(Debug, Default, Deserialize)]
pub struct EvaluationConfig {
    /// Policy names applied in order; the first one with a verdict wins.
    #[serde(default)]
    pub policies: Vec<String>,
    /// Verdict for routes no policy decides on.
    #[serde(default)]
    pub default_action: DefaultPolicy,
}

// ---------------------------------------------------------------------------
// Default-value functions used by serde
// ---------------------------------------------------------------------------

fn default_policy_file() -> PathBuf {
    PathBuf::from("policy.yaml")
}

fn default_log_level() -> String {
    "warn".to_string()
}

// ---------------------------------------------------------------------------
// Loader
// ---------------------------------------------------------------------------

/// Where the effective configuration came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigSource {
    File,
    /// The file did not exist; built-in defaults apply.
    Defaults,
}

/// Load configuration from a YAML file.
///
/// If the file does not exist a default configuration is returned with
/// [`ConfigSource::Defaults`]. Logging is not up yet at this point, so the
/// caller reports it.
pub fn load(path: &Path) -> anyhow::Result<(Config, ConfigSource)> {
    if !path.exists() {
        return Ok((Config::default(), ConfigSource::Defaults));
    }

    let contents = std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("failed to read config file {}: {e}", path.display()))?;

    let cfg = parse(&contents)
        .map_err(|e| anyhow::anyhow!("failed to parse config file {}: {e}", path.display()))?;
    Ok((cfg, ConfigSource::File))
}

fn parse(yaml: &str) -> Result<Config, serde_yml::Error> {
    serde_yml::from_str(yaml)
}

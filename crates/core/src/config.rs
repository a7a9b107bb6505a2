use std::env;
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{Result, SheetError};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Config {
    pub query_url: String,
    pub service: String,
    pub lookback: Duration,
    pub limit: usize,
    pub output: PathBuf,
    pub request_timeout: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            query_url: "http://localhost:16686".to_string(),
            service: "consumer".to_string(),
            lookback: Duration::from_secs(5 * 3600),
            limit: 90_000,
            output: PathBuf::from("data/consumer.csv"),
            request_timeout: Duration::from_secs(30),
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        let mut cfg = Self::default();
        let config_path = config_file_path();
        if let Some(file_overrides) = load_file_overrides(&config_path)? {
            apply_overrides(&mut cfg, file_overrides, "config file")?;
        }
        let env_overrides = load_env_overrides()?;
        apply_overrides(&mut cfg, env_overrides, "environment")?;
        Ok(cfg)
    }

    pub fn from_env() -> Result<Self> {
        let mut cfg = Self::default();
        let env_overrides = load_env_overrides()?;
        apply_overrides(&mut cfg, env_overrides, "environment")?;
        Ok(cfg)
    }
}

#[derive(Debug, Default, Deserialize)]
struct ConfigOverrides {
    query_url: Option<String>,
    service: Option<String>,
    lookback: Option<String>,
    limit: Option<usize>,
    output: Option<PathBuf>,
    request_timeout: Option<String>,
}

fn config_file_path() -> PathBuf {
    if let Ok(path) = env::var("TRACESHEET_CONFIG") {
        return PathBuf::from(path);
    }

    let home = env::var("HOME").unwrap_or_else(|_| ".".to_string());
    let config_home = env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from(home).join(".config"));
    config_home.join("tracesheet/config.toml")
}

fn load_file_overrides(path: &PathBuf) -> Result<Option<ConfigOverrides>> {
    if !path.exists() {
        return Ok(None);
    }

    let raw = fs::read_to_string(path)
        .map_err(|e| SheetError::Config(format!("failed reading {}: {e}", path.display())))?;
    let parsed: ConfigOverrides = toml::from_str(&raw)
        .map_err(|e| SheetError::Config(format!("failed parsing {}: {e}", path.display())))?;
    Ok(Some(parsed))
}

fn load_env_overrides() -> Result<ConfigOverrides> {
    let limit = match env::var("TRACESHEET_LIMIT") {
        Ok(v) => Some(v.parse::<usize>().map_err(|e| {
            SheetError::Config(format!("bad TRACESHEET_LIMIT in environment: {e}"))
        })?),
        Err(_) => None,
    };

    Ok(ConfigOverrides {
        query_url: env::var("TRACESHEET_QUERY_URL").ok(),
        service: env::var("TRACESHEET_SERVICE").ok(),
        lookback: env::var("TRACESHEET_LOOKBACK").ok(),
        limit,
        output: env::var("TRACESHEET_OUTPUT").ok().map(PathBuf::from),
        request_timeout: env::var("TRACESHEET_REQUEST_TIMEOUT").ok(),
    })
}

fn apply_overrides(cfg: &mut Config, overrides: ConfigOverrides, source: &str) -> Result<()> {
    if let Some(v) = overrides.query_url {
        cfg.query_url = v;
    }
    if let Some(v) = overrides.service {
        cfg.service = v;
    }
    if let Some(v) = overrides.lookback {
        cfg.lookback = humantime::parse_duration(&v).map_err(|e| {
            SheetError::Config(format!("bad lookback in {source}: {e} (value={v})"))
        })?;
    }
    if let Some(v) = overrides.limit {
        cfg.limit = v;
    }
    if let Some(v) = overrides.output {
        cfg.output = v;
    }
    if let Some(v) = overrides.request_timeout {
        cfg.request_timeout = humantime::parse_duration(&v).map_err(|e| {
            SheetError::Config(format!("bad request_timeout in {source}: {e} (value={v})"))
        })?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_targets_local_backend() {
        let cfg = Config::default();
        assert_eq!(cfg.query_url, "http://localhost:16686");
        assert_eq!(cfg.service, "consumer");
        assert_eq!(cfg.lookback, Duration::from_secs(18_000));
        assert_eq!(cfg.limit, 90_000);
        assert_eq!(cfg.output, PathBuf::from("data/consumer.csv"));
    }

    #[test]
    fn apply_overrides_updates_fields() {
        let mut cfg = Config::default();
        let overrides = ConfigOverrides {
            service: Some("producer".to_string()),
            lookback: Some("90m".to_string()),
            limit: Some(500),
            request_timeout: Some("5s".to_string()),
            ..ConfigOverrides::default()
        };

        apply_overrides(&mut cfg, overrides, "config file").unwrap();

        assert_eq!(cfg.service, "producer");
        assert_eq!(cfg.lookback, Duration::from_secs(5_400));
        assert_eq!(cfg.limit, 500);
        assert_eq!(cfg.request_timeout, Duration::from_secs(5));
    }

    #[test]
    fn apply_overrides_rejects_bad_duration() {
        let mut cfg = Config::default();
        let overrides = ConfigOverrides {
            lookback: Some("sideways".to_string()),
            ..ConfigOverrides::default()
        };
        assert!(apply_overrides(&mut cfg, overrides, "environment").is_err());
    }

    #[test]
    fn parses_toml_overrides() {
        let parsed: ConfigOverrides =
            toml::from_str("service = \"gateway\"\nlookback = \"2h\"\nlimit = 100\n").unwrap();
        assert_eq!(parsed.service.as_deref(), Some("gateway"));
        assert_eq!(parsed.lookback.as_deref(), Some("2h"));
        assert_eq!(parsed.limit, Some(100));
    }
}

use eyre::{Context, Result};
use membank::capture::{DEFAULT_APP_NAME, DEFAULT_INTERPRETER, DEFAULT_SCRIPT_FLAG, DEFAULT_SCRIPT_TIMEOUT, ScriptRunner};
use membank::protocol::DEFAULT_MAX_FRAME_BYTES;
use membank::server::{ServerInfo, ServerOptions};
use membank::tools::{DEFAULT_MAX_RESPONSE_CHARS, DEFAULT_TOOL_TIMEOUT};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

fn data_dir() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(env!("CARGO_PKG_NAME"))
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub log_level: Option<String>,
    pub server: ServerConfig,
    pub capture: CaptureConfig,
    pub database: DatabaseConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub name: String,
    pub timeout_ms: u64,
    pub max_response_chars: usize,
    pub max_frame_bytes: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            name: env!("CARGO_PKG_NAME").to_string(),
            timeout_ms: DEFAULT_TOOL_TIMEOUT.as_millis() as u64,
            max_response_chars: DEFAULT_MAX_RESPONSE_CHARS,
            max_frame_bytes: DEFAULT_MAX_FRAME_BYTES,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CaptureConfig {
    pub interpreter: String,
    pub script_flag: String,
    pub app_name: String,
    pub timeout_ms: u64,
}

impl Default for CaptureConfig {
    fn default() -> Self {
        Self {
            interpreter: DEFAULT_INTERPRETER.to_string(),
            script_flag: DEFAULT_SCRIPT_FLAG.to_string(),
            app_name: DEFAULT_APP_NAME.to_string(),
            timeout_ms: DEFAULT_SCRIPT_TIMEOUT.as_millis() as u64,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    pub path: PathBuf,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: data_dir().join("context.db"),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub dir: PathBuf,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            dir: data_dir().join("logs"),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_level: Some("info".to_string()),
            server: ServerConfig::default(),
            capture: CaptureConfig::default(),
            database: DatabaseConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

/// Result of walking the config fallback chain.
///
/// Loading happens before the logger exists, so what it found is returned
/// and logged by the caller once logging is up.
#[derive(Debug)]
pub struct LoadedConfig {
    pub config: Config,
    /// File the config came from, `None` for defaults
    pub source: Option<PathBuf>,
    /// Candidate files that existed but could not be loaded
    pub warnings: Vec<String>,
}

impl Config {
    /// Load configuration with fallback chain
    pub fn load(config_path: Option<&PathBuf>) -> Result<LoadedConfig> {
        // If explicit config path provided, it must load
        if let Some(path) = config_path {
            let config =
                Self::load_from_file(path).context(format!("Failed to load config from {}", path.display()))?;
            return Ok(LoadedConfig {
                config,
                source: Some(path.clone()),
                warnings: Vec::new(),
            });
        }

        let project_name = env!("CARGO_PKG_NAME");
        let mut candidates = Vec::new();

        // Primary location: ~/.config/<project>/<project>.yml
        if let Some(config_dir) = dirs::config_dir() {
            candidates.push(config_dir.join(project_name).join(format!("{}.yml", project_name)));
        }

        // Fallback location: ./<project>.yml
        candidates.push(PathBuf::from(format!("{}.yml", project_name)));

        Ok(Self::load_first(&candidates))
    }

    /// Load the first candidate that exists and parses, else defaults
    fn load_first(candidates: &[PathBuf]) -> LoadedConfig {
        let mut warnings = Vec::new();

        for candidate in candidates.iter().filter(|c| c.exists()) {
            match Self::load_from_file(candidate) {
                Ok(config) => {
                    return LoadedConfig {
                        config,
                        source: Some(candidate.clone()),
                        warnings,
                    };
                }
                Err(e) => warnings.push(format!("Failed to load config from {}: {:#}", candidate.display(), e)),
            }
        }

        LoadedConfig {
            config: Self::default(),
            source: None,
            warnings,
        }
    }

    fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(&path).context("Failed to read config file")?;

        let config: Self = serde_yaml::from_str(&content).context("Failed to parse config file")?;

        Ok(config)
    }

    pub fn server_options(&self) -> ServerOptions {
        ServerOptions {
            timeout: Duration::from_millis(self.server.timeout_ms),
            max_response_chars: self.server.max_response_chars,
            max_frame_bytes: self.server.max_frame_bytes,
        }
    }

    pub fn server_info(&self) -> ServerInfo {
        ServerInfo {
            name: self.server.name.clone(),
            ..ServerInfo::default()
        }
    }

    pub fn script_runner(&self) -> ScriptRunner {
        ScriptRunner::new(
            &self.capture.interpreter,
            &self.capture.script_flag,
            Duration::from_millis(self.capture.timeout_ms),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.log_level.as_deref(), Some("info"));
        assert_eq!(config.server.name, "membank");
        assert_eq!(config.server.timeout_ms, 30000);
        assert_eq!(config.server.max_response_chars, 10000);
        assert_eq!(config.capture.interpreter, "osascript");
        assert!(config.database.path.ends_with("membank/context.db"));
        assert!(config.logging.dir.ends_with("membank/logs"));
    }

    #[test]
    fn test_load_partial_file_keeps_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("membank.yml");
        fs::write(
            &path,
            r#"
log_level: debug
server:
  timeout_ms: 5000
database:
  path: /tmp/membank-test/context.db
"#,
        )
        .unwrap();

        let loaded = Config::load(Some(&path)).unwrap();
        assert_eq!(loaded.source.as_ref(), Some(&path));
        let config = loaded.config;
        assert_eq!(config.log_level.as_deref(), Some("debug"));
        assert_eq!(config.server.timeout_ms, 5000);
        assert_eq!(config.server.max_response_chars, 10000);
        assert_eq!(config.database.path, PathBuf::from("/tmp/membank-test/context.db"));
        assert_eq!(config.capture.app_name, DEFAULT_APP_NAME);
    }

    #[test]
    fn test_load_missing_explicit_file_fails() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("absent.yml");
        assert!(Config::load(Some(&path)).is_err());
    }

    #[test]
    fn test_broken_fallback_is_reported() {
        let dir = TempDir::new().unwrap();
        let broken = dir.path().join("primary.yml");
        let good = dir.path().join("fallback.yml");
        fs::write(&broken, "server: [not, a, map").unwrap();
        fs::write(&good, "log_level: warn\n").unwrap();

        let loaded = Config::load_first(&[broken.clone(), good.clone()]);
        assert_eq!(loaded.source, Some(good));
        assert_eq!(loaded.config.log_level.as_deref(), Some("warn"));
        assert_eq!(loaded.warnings.len(), 1);
        assert!(loaded.warnings[0].contains("primary.yml"));
        assert!(loaded.warnings[0].contains("Failed to parse config file"));
    }

    #[test]
    fn test_only_broken_candidates_fall_back_to_defaults() {
        let dir = TempDir::new().unwrap();
        let broken = dir.path().join("membank.yml");
        fs::write(&broken, "server:\n  timeout_ms: soon\n").unwrap();

        let loaded = Config::load_first(&[dir.path().join("absent.yml"), broken]);
        assert!(loaded.source.is_none());
        assert_eq!(loaded.config.server.timeout_ms, 30000);
        assert_eq!(loaded.warnings.len(), 1);
    }

    #[test]
    fn test_missing_candidates_are_silent() {
        let dir = TempDir::new().unwrap();
        let loaded = Config::load_first(&[dir.path().join("absent.yml")]);
        assert!(loaded.source.is_none());
        assert!(loaded.warnings.is_empty());
    }

    #[test]
    fn test_load_invalid_yaml_fails() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("membank.yml");
        fs::write(&path, "server: [not, a, map").unwrap();
        assert!(Config::load(Some(&path)).is_err());
    }

    #[test]
    fn test_conversions() {
        let mut config = Config::default();
        config.server.name = "bank".to_string();
        config.server.timeout_ms = 1500;
        config.capture.interpreter = "sh".to_string();
        config.capture.timeout_ms = 200;

        let options = config.server_options();
        assert_eq!(options.timeout, Duration::from_millis(1500));
        assert_eq!(options.max_frame_bytes, DEFAULT_MAX_FRAME_BYTES);

        assert_eq!(config.server_info().name, "bank");

        let runner = config.script_runner();
        assert_eq!(runner.interpreter(), "sh");
        assert_eq!(runner.timeout(), Duration::from_millis(200));
    }
}

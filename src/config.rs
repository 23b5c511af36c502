use eyre::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use toolprobe::report::{DEFAULT_FORMATS, DEFAULT_OUTPUT_DIR};
use toolprobe::validation::ValidationLevel;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub log_level: Option<String>,
    pub validation: ValidationConfig,
    pub reports: ReportsConfig,
    pub continuous: ContinuousConfig,
    pub benchmark: BenchmarkConfig,
    pub target: TargetConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidationConfig {
    pub level: ValidationLevel,
    pub invocation_timeout_ms: u64,
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            level: ValidationLevel::Standard,
            invocation_timeout_ms: 30000,
        }
    }
}

impl ValidationConfig {
    pub fn invocation_timeout(&self) -> Duration {
        Duration::from_millis(self.invocation_timeout_ms)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportsConfig {
    pub output_dir: PathBuf,
    pub formats: Vec<String>,
}

impl Default for ReportsConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            formats: DEFAULT_FORMATS.iter().map(|f| f.to_string()).collect(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ContinuousConfig {
    pub interval_secs: u64,
    pub max_iterations: Option<u32>,
}

impl Default for ContinuousConfig {
    fn default() -> Self {
        Self {
            interval_secs: 300,
            max_iterations: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BenchmarkConfig {
    pub iterations: usize,
}

impl Default for BenchmarkConfig {
    fn default() -> Self {
        Self { iterations: 10 }
    }
}

/// Service under audit; the built-in tools when no endpoint is set
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TargetConfig {
    pub endpoint: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_level: Some("info".to_string()),
            validation: ValidationConfig::default(),
            reports: ReportsConfig::default(),
            continuous: ContinuousConfig::default(),
            benchmark: BenchmarkConfig::default(),
            target: TargetConfig::default(),
        }
    }
}

impl Config {
    /// Load configuration with fallback chain
    pub fn load(config_path: Option<&PathBuf>) -> Result<Self> {
        // If explicit config path provided, try to load it
        if let Some(path) = config_path {
            return Self::load_from_file(path).context(format!("Failed to load config from {}", path.display()));
        }

        // Try primary location: ~/.config/<project>/<project>.yml
        if let Some(config_dir) = dirs::config_dir() {
            let project_name = env!("CARGO_PKG_NAME");
            let primary_config = config_dir.join(project_name).join(format!("{}.yml", project_name));
            if primary_config.exists() {
                match Self::load_from_file(&primary_config) {
                    Ok(config) => return Ok(config),
                    Err(e) => {
                        log::warn!("Failed to load config from {}: {}", primary_config.display(), e);
                    }
                }
            }
        }

        // Try fallback location: ./<project>.yml
        let project_name = env!("CARGO_PKG_NAME");
        let fallback_config = PathBuf::from(format!("{}.yml", project_name));
        if fallback_config.exists() {
            match Self::load_from_file(&fallback_config) {
                Ok(config) => return Ok(config),
                Err(e) => {
                    log::warn!("Failed to load config from {}: {}", fallback_config.display(), e);
                }
            }
        }

        log::info!("No config file found, using defaults");
        Ok(Self::default())
    }

    fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(&path).context("Failed to read config file")?;

        let config: Self = serde_yaml::from_str(&content).context("Failed to parse config file")?;
        config.validate()?;

        log::info!("Loaded config from: {}", path.as_ref().display());
        Ok(config)
    }

    /// Default log filter when RUST_LOG is unset
    pub fn log_filter(&self) -> &str {
        self.log_level.as_deref().unwrap_or("info")
    }

    /// Reject values that would make a run meaningless
    pub fn validate(&self) -> Result<()> {
        if let Some(level) = &self.log_level {
            if level.parse::<log::LevelFilter>().is_err() {
                eyre::bail!("log_level '{}' is not a valid log level", level);
            }
        }
        if self.validation.invocation_timeout_ms == 0 {
            eyre::bail!("validation.invocation_timeout_ms must be > 0");
        }
        if self.continuous.interval_secs == 0 {
            eyre::bail!("continuous.interval_secs must be > 0");
        }
        if self.benchmark.iterations == 0 {
            eyre::bail!("benchmark.iterations must be > 0");
        }
        Ok(())
    }
}

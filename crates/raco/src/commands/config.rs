//! Config command implementation.
//!
//! View configuration settings.
//! Config file is located at ~/.config/raco/config.toml.

use std::env;
use std::fs;
use std::path::PathBuf;

use directories::BaseDirs;
use serde::{Deserialize, Serialize};

use super::{CommandContext, CommandError, Result};

/// Fallback area when neither the flag nor the config names one (13 = Berlin).
const DEFAULT_AREA: u64 = 13;

/// Configuration file structure.
#[derive(Debug, Serialize, Deserialize)]
pub struct Config {
    /// Area ID used when `--area` is not given.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_area: Option<u64>,

    /// Events requested per page (the upstream caps this at 20).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_size: Option<u32>,

    /// Pause between page requests in milliseconds.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_delay_ms: Option<u64>,

    /// Output settings.
    #[serde(default)]
    pub output: OutputConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_area: None,
            page_size: None,
            page_delay_ms: None,
            output: OutputConfig::default(),
        }
    }
}

impl Config {
    /// The area to query: the config's default, or Berlin.
    pub fn area(&self) -> u64 {
        self.default_area.unwrap_or(DEFAULT_AREA)
    }
}

/// Output configuration.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Enable colors.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<bool>,
}

/// Gets the config directory path.
/// Uses XDG-style paths: ~/.config/raco/ on all platforms.
fn get_config_dir() -> Result<PathBuf> {
    // Check for override env var first
    if let Ok(path) = env::var("RACO_CONFIG") {
        let path = PathBuf::from(path);
        if let Some(parent) = path.parent() {
            return Ok(parent.to_path_buf());
        }
    }

    if let Ok(xdg_config) = env::var("XDG_CONFIG_HOME") {
        return Ok(PathBuf::from(xdg_config).join("raco"));
    }

    BaseDirs::new()
        .map(|dirs| dirs.home_dir().join(".config").join("raco"))
        .ok_or_else(|| CommandError::Config("Could not determine config directory".to_string()))
}

/// Gets the config file path.
pub fn get_config_path() -> Result<PathBuf> {
    // Check for override env var first
    if let Ok(path) = env::var("RACO_CONFIG") {
        return Ok(PathBuf::from(path));
    }

    let config_dir = get_config_dir()?;
    Ok(config_dir.join("config.toml"))
}

/// Loads the configuration from disk.
pub fn load_config() -> Result<Config> {
    let path = get_config_path()?;

    if !path.exists() {
        return Ok(Config::default());
    }

    let content = fs::read_to_string(&path)
        .map_err(|e| CommandError::Config(format!("Failed to read config: {}", e)))?;

    let config: Config = toml::from_str(&content)
        .map_err(|e| CommandError::Config(format!("Failed to parse config: {}", e)))?;

    Ok(config)
}

/// Executes the config command.
pub fn execute(ctx: &CommandContext) -> Result<()> {
    let config = load_config()?;
    let path = get_config_path()?;

    if ctx.json_output {
        let output = serde_json::json!({
            "path": path.display().to_string(),
            "exists": path.exists(),
            "config": config,
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else if !ctx.quiet {
        use owo_colors::OwoColorize;

        let header = "Configuration";
        if ctx.use_colors {
            println!("{}\n", header.green().bold());
        } else {
            println!("{}\n", header);
        }

        println!("File: {}", path.display());
        println!("Exists: {}\n", path.exists());

        if path.exists() {
            println!("Settings:");
            if let Some(area) = config.default_area {
                println!("  default_area: {}", area);
            }
            if let Some(size) = config.page_size {
                println!("  page_size: {}", size);
            }
            if let Some(delay) = config.page_delay_ms {
                println!("  page_delay_ms: {}", delay);
            }
            println!("\n[output]");
            if let Some(color) = config.output.color {
                println!("  color: {}", color);
            }
        } else {
            println!("(No config file exists. Effective default area: {DEFAULT_AREA}.)");
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::sync::Mutex;
    use tempfile::TempDir;

    // RACO_CONFIG is process-global; serialize the tests that touch it.
    static ENV_LOCK: Mutex<()> = Mutex::new(());

    #[test]
    fn test_load_config_from_override_path() {
        let _guard = ENV_LOCK.lock().unwrap();
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("config.toml");

        let mut file = fs::File::create(&config_path).unwrap();
        writeln!(file, "default_area = 34\npage_size = 10\npage_delay_ms = 500").unwrap();

        let original = env::var("RACO_CONFIG").ok();
        env::set_var("RACO_CONFIG", config_path.to_str().unwrap());

        let result = load_config();

        if let Some(val) = original {
            env::set_var("RACO_CONFIG", val);
        } else {
            env::remove_var("RACO_CONFIG");
        }

        let config = result.unwrap();
        assert_eq!(config.default_area, Some(34));
        assert_eq!(config.page_size, Some(10));
        assert_eq!(config.page_delay_ms, Some(500));
        assert_eq!(config.area(), 34);
    }

    #[test]
    fn test_missing_config_falls_back_to_defaults() {
        let _guard = ENV_LOCK.lock().unwrap();
        let original = env::var("RACO_CONFIG").ok();
        env::set_var("RACO_CONFIG", "/tmp/raco-test-nonexistent/config.toml");

        let result = load_config();

        if let Some(val) = original {
            env::set_var("RACO_CONFIG", val);
        } else {
            env::remove_var("RACO_CONFIG");
        }

        let config = result.unwrap();
        assert_eq!(config.default_area, None);
        assert_eq!(config.area(), DEFAULT_AREA);
    }

    #[test]
    fn test_malformed_config_is_an_error() {
        let _guard = ENV_LOCK.lock().unwrap();
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("config.toml");
        fs::write(&config_path, "default_area = \"not a number\"").unwrap();

        let original = env::var("RACO_CONFIG").ok();
        env::set_var("RACO_CONFIG", config_path.to_str().unwrap());

        let result = load_config();

        if let Some(val) = original {
            env::set_var("RACO_CONFIG", val);
        } else {
            env::remove_var("RACO_CONFIG");
        }

        assert!(matches!(result, Err(CommandError::Config(_))));
    }
}

use anyhow::{Context, Result};
use directories::ProjectDirs;
use std::fs;
use std::path::{Path, PathBuf};

use super::schema::OffcloudConfig;

/// Platform config location, falling back to `./offcloud.toml`
pub fn default_config_path() -> Result<PathBuf> {
    if let Some(proj_dirs) = ProjectDirs::from("com", "offcloud", "offcloud") {
        Ok(proj_dirs.config_dir().join("config.toml"))
    } else {
        Ok(std::env::current_dir()?.join("offcloud.toml"))
    }
}

/// Load configuration from a TOML file
pub fn load_config(path: &Path) -> Result<OffcloudConfig> {
    if !path.exists() {
        // If config doesn't exist, create a default one
        let config = OffcloudConfig::default();
        save_config(path, &config)?;
        return Ok(config);
    }

    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    let config: OffcloudConfig = toml::from_str(&content)
        .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

    Ok(config)
}

/// Save configuration to a TOML file
pub fn save_config(path: &Path, config: &OffcloudConfig) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create config directory: {}", parent.display()))?;
    }

    let content = toml::to_string_pretty(config).context("Failed to serialize config to TOML")?;

    fs::write(path, content)
        .with_context(|| format!("Failed to write config file: {}", path.display()))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_load_nonexistent_creates_default() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("nested").join("offcloud.toml");

        let config = load_config(&config_path).unwrap();
        assert_eq!(config, OffcloudConfig::default());
        assert_eq!(config.base_url, "https://offcloud.com/api");
        assert!(config.api_key.is_none());
        assert!(config_path.exists());
    }

    #[test]
    fn test_save_and_load() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("test.toml");

        let mut config = OffcloudConfig::new().with_api_key("abc");
        config.timeout_secs = 5;

        save_config(&config_path, &config).unwrap();
        let loaded = load_config(&config_path).unwrap();

        assert_eq!(loaded, config);
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("partial.toml");
        fs::write(&config_path, "api_key = \"xyz\"\n").unwrap();

        let loaded = load_config(&config_path).unwrap();
        assert_eq!(loaded.api_key.as_deref(), Some("xyz"));
        assert_eq!(loaded.base_url, "https://offcloud.com/api");
        assert_eq!(loaded.timeout_secs, 30);
    }

    #[test]
    fn test_invalid_toml_reports_path() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("broken.toml");
        fs::write(&config_path, "timeout_secs = \"soon\"").unwrap();

        let err = load_config(&config_path).unwrap_err();
        assert!(err.to_string().contains("Failed to parse config file"));
    }
}

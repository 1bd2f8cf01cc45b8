use serde::Deserialize;
use std::fs;
use std::path::PathBuf;
use xdg::BaseDirectories;

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct Config {
    pub log_level: String,
    pub log_file: String,
    /// Seconds between periodic resume refreshes in the TUI.
    pub refresh_interval: u32,
    /// Account type subject to the single-account policy.
    pub primary_account_type: String,
    /// Description shown on accessories with a live connection.
    pub connected_marker: String,
    /// Restricted profiles never see account sections.
    pub restricted_profile: bool,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            log_level: "info".to_string(),
            log_file: "/dev/null".to_string(),
            refresh_interval: 60,
            primary_account_type: "google".to_string(),
            connected_marker: "Connected".to_string(),
            restricted_profile: false,
        }
    }
}

pub fn get_config_path() -> Option<PathBuf> {
    let pgm = env!("CARGO_PKG_NAME");
    let xdg_dirs = BaseDirectories::with_prefix(pgm);
    let config_home = xdg_dirs.get_config_home()?;
    Some(config_home.join("config.toml"))
}

pub fn read() -> Config {
    let config_path = match get_config_path() {
        Some(path) => path,
        None => return Config::default(),
    };

    if !config_path.exists() {
        return Config::default();
    }

    let content = match fs::read_to_string(&config_path) {
        Ok(content) => content,
        Err(_) => return Config::default(),
    };

    toml::from_str(&content).unwrap_or_else(|_| Config::default())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.log_level, "info");
        assert_eq!(config.log_file, "/dev/null");
        assert_eq!(config.refresh_interval, 60);
        assert_eq!(config.primary_account_type, "google");
        assert_eq!(config.connected_marker, "Connected");
        assert!(!config.restricted_profile);
    }

    #[test]
    fn test_partial_toml_fills_defaults() {
        let config: Config = toml::from_str("primary_account_type = \"corp\"").unwrap();
        assert_eq!(config.primary_account_type, "corp");
        assert_eq!(config.refresh_interval, 60);
    }

    #[test]
    fn test_full_toml() {
        let toml_str = r#"
log_level = "debug"
log_file = "/tmp/tvhome.log"
refresh_interval = 15
primary_account_type = "google"
connected_marker = "Online"
restricted_profile = true
"#;
        let config: Config = toml::from_str(toml_str).unwrap();
        assert_eq!(config.log_level, "debug");
        assert_eq!(config.refresh_interval, 15);
        assert_eq!(config.connected_marker, "Online");
        assert!(config.restricted_profile);
    }
}

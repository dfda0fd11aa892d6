use crate::domain::timezone::{self, TimezoneRule};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogSettings {
    #[serde(default = "default_level")]
    pub level: String, // "trace", "debug", "info", "warn", "error"
    #[serde(default = "default_true")]
    pub file_logging_enabled: bool,
    #[serde(default = "default_true")]
    pub console_logging_enabled: bool,
    #[serde(default = "default_log_dir")]
    pub log_dir: String,
    #[serde(default = "default_prefix")]
    pub file_name_prefix: String,
    #[serde(default = "default_false")]
    pub show_file_line: bool,
    #[serde(default = "default_true")]
    pub show_target: bool,
    #[serde(default = "default_true")]
    pub ansi_colors: bool,
    #[serde(default = "default_rotation")]
    pub rotation: String, // "daily", "hourly", "minutely", "never"
}

impl Default for LogSettings {
    fn default() -> Self {
        Self {
            level: default_level(),
            file_logging_enabled: default_true(),
            console_logging_enabled: default_true(),
            log_dir: default_log_dir(),
            file_name_prefix: default_prefix(),
            show_file_line: default_false(),
            show_target: default_true(),
            ansi_colors: default_true(),
            rotation: default_rotation(),
        }
    }
}

fn default_level() -> String {
    "info".to_string()
}
fn default_true() -> bool {
    true
}
fn default_false() -> bool {
    false
}
fn default_log_dir() -> String {
    "logs".to_string()
}
fn default_prefix() -> String {
    "ble_time_sync".to_string()
}
fn default_rotation() -> String {
    "daily".to_string()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Label of the last selected timezone
    #[serde(default = "default_timezone")]
    pub timezone: String,

    #[serde(default)]
    pub log_settings: LogSettings,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            timezone: default_timezone(),
            log_settings: LogSettings::default(),
        }
    }
}

impl Settings {
    /// The configured timezone, falling back to UTC for unknown labels
    pub fn timezone_rule(&self) -> &'static TimezoneRule {
        timezone::lookup(&self.timezone).unwrap_or_else(timezone::default_rule)
    }
}

fn default_timezone() -> String {
    timezone::default_rule().label.to_string()
}

pub struct SettingsService {
    settings: Settings,
    settings_path: PathBuf,
}

impl SettingsService {
    pub fn new() -> anyhow::Result<Self> {
        let settings_path = Self::get_settings_path()?;
        Ok(Self::load_from(settings_path))
    }

    /// Load settings from `path`; a missing or unreadable file yields defaults
    pub fn load_from(settings_path: PathBuf) -> Self {
        let settings = Self::load_from_file(&settings_path).unwrap_or_default();
        Self {
            settings,
            settings_path,
        }
    }

    fn get_settings_path() -> anyhow::Result<PathBuf> {
        let mut path = dirs::config_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?;
        path.push("BleTimeSync");
        fs::create_dir_all(&path)?;
        path.push("settings.json");
        Ok(path)
    }

    fn load_from_file(path: &Path) -> anyhow::Result<Settings> {
        let contents = fs::read_to_string(path)?;
        let settings = serde_json::from_str(&contents)?;
        Ok(settings)
    }

    pub fn save(&self) -> anyhow::Result<()> {
        let json = serde_json::to_string_pretty(&self.settings)?;
        fs::write(&self.settings_path, json)?;
        Ok(())
    }

    pub fn get(&self) -> &Settings {
        &self.settings
    }

    pub fn set_timezone(&mut self, rule: &TimezoneRule) -> anyhow::Result<()> {
        if self.settings.timezone != rule.label {
            self.settings.timezone = rule.label.to_string();
            self.save()?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_path(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("ble_time_sync_{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        dir.join(name)
    }

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.timezone_rule().posix, "UTC0");
    }

    #[test]
    fn test_missing_file_yields_defaults() {
        let service = SettingsService::load_from(temp_path("does_not_exist.json"));
        assert_eq!(service.get().timezone, "UTC");
    }

    #[test]
    fn test_corrupt_file_yields_defaults() {
        let path = temp_path("corrupt.json");
        fs::write(&path, "{ not json").unwrap();
        let service = SettingsService::load_from(path);
        assert_eq!(service.get().timezone_rule().label, "UTC");
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let path = temp_path("partial.json");
        fs::write(&path, r#"{ "timezone": "EST (Eastern US)" }"#).unwrap();
        let service = SettingsService::load_from(path);
        assert_eq!(service.get().timezone_rule().posix, "EST5EDT,M3.2.0,M11.1.0");
        assert_eq!(service.get().log_settings.level, "info");
    }

    #[test]
    fn test_target_and_scan_window_are_not_configurable() {
        let path = temp_path("overrides.json");
        fs::write(
            &path,
            r#"{ "device_name": "Impostor", "scan_window_secs": 0,
                 "timezone": "PST (Pacific US)" }"#,
        )
        .unwrap();
        let service = SettingsService::load_from(path);
        assert_eq!(service.get().timezone_rule().posix, "PST8PDT,M3.2.0,M11.1.0");

        let json = serde_json::to_value(service.get()).unwrap();
        assert!(json.get("device_name").is_none());
        assert!(json.get("scan_window_secs").is_none());
    }

    #[test]
    fn test_unknown_timezone_falls_back() {
        let settings = Settings {
            timezone: "Mars/Olympus".to_string(),
            ..Default::default()
        };
        assert_eq!(settings.timezone_rule().label, "UTC");
    }

    #[test]
    fn test_set_timezone_persists() {
        let path = temp_path("persist.json");
        let _ = fs::remove_file(&path);

        let mut service = SettingsService::load_from(path.clone());
        let cet = timezone::lookup("CET (Central Europe)").unwrap();
        service.set_timezone(cet).unwrap();

        let reloaded = SettingsService::load_from(path);
        assert_eq!(reloaded.get().timezone_rule(), cet);
    }
}

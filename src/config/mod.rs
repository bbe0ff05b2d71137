use crate::errors::AppResult;
use crate::export::DEFAULT_TITLE;
use crate::models::RecordParser;
use crate::models::parser::{DEFAULT_DATE_FORMAT, DEFAULT_TIME_FORMAT};
use crate::session::DEFAULT_DURATION_SECS;
use crate::session::capture::CaptureConfig;
use crate::ui::messages::{success, warning};
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_database")]
    pub database: String,
    #[serde(default = "default_scan_duration")]
    pub scan_duration_secs: u32,
    #[serde(default = "default_scan_rate")]
    pub scan_rate_hint: u32,
    /// Width of the scanner viewport; 0 means unknown.
    #[serde(default)]
    pub viewport_width: u32,
    #[serde(default = "default_allow_flip")]
    pub allow_flip: bool,
    #[serde(default = "default_export_dir")]
    pub export_dir: String,
    #[serde(default = "default_date_format")]
    pub date_format: String,
    #[serde(default = "default_time_format")]
    pub time_format: String,
    #[serde(default = "default_pdf_title")]
    pub pdf_title: String,
}

fn default_database() -> String {
    Config::database_file().to_string_lossy().to_string()
}
fn default_scan_duration() -> u32 {
    DEFAULT_DURATION_SECS
}
fn default_scan_rate() -> u32 {
    120
}
fn default_allow_flip() -> bool {
    true
}
fn default_export_dir() -> String {
    ".".to_string()
}
fn default_date_format() -> String {
    DEFAULT_DATE_FORMAT.to_string()
}
fn default_time_format() -> String {
    DEFAULT_TIME_FORMAT.to_string()
}
fn default_pdf_title() -> String {
    DEFAULT_TITLE.to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database: default_database(),
            scan_duration_secs: default_scan_duration(),
            scan_rate_hint: default_scan_rate(),
            viewport_width: 0,
            allow_flip: default_allow_flip(),
            export_dir: default_export_dir(),
            date_format: default_date_format(),
            time_format: default_time_format(),
            pdf_title: default_pdf_title(),
        }
    }
}

impl Config {
    /// Return the standard configuration directory depending on the platform
    pub fn config_dir() -> PathBuf {
        if cfg!(target_os = "windows") {
            let appdata = env::var("APPDATA").unwrap_or_else(|_| ".".to_string());
            PathBuf::from(appdata).join("rattendance")
        } else {
            dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".rattendance")
        }
    }

    /// Return the full path of the config file
    pub fn config_file() -> PathBuf {
        Self::config_dir().join("rattendance.conf")
    }

    /// Return the full path of the SQLite database
    pub fn database_file() -> PathBuf {
        Self::config_dir().join("rattendance.sqlite")
    }

    /// Load configuration from file, or return defaults if not found.
    /// An unreadable or invalid file also falls back to defaults.
    pub fn load() -> Self {
        Self::load_from(&Self::config_file())
    }

    pub fn load_from(path: &Path) -> Self {
        if !path.exists() {
            return Self::default();
        }

        let parsed = fs::read_to_string(path)
            .map_err(|e| e.to_string())
            .and_then(|content| serde_yaml::from_str(&content).map_err(|e| e.to_string()));

        match parsed {
            Ok(cfg) => cfg,
            Err(e) => {
                warning(format!(
                    "Invalid configuration file {}: {e}. Using defaults.",
                    path.display()
                ));
                Self::default()
            }
        }
    }

    /// Capture hints derived from the configuration.
    pub fn capture_config(&self) -> CaptureConfig {
        CaptureConfig {
            scan_rate_hint: self.scan_rate_hint,
            allow_flip: self.allow_flip,
            ..CaptureConfig::for_viewport(self.viewport_width)
        }
    }

    pub fn record_parser(&self) -> RecordParser {
        RecordParser::new(&self.date_format, &self.time_format)
    }

    /// Create the configuration directory, the config file and an empty
    /// database file. Returns the database path.
    pub fn init_all(custom_db: Option<String>, is_test: bool) -> AppResult<PathBuf> {
        let dir = Self::config_dir();
        fs::create_dir_all(&dir)?;

        let db_path = match custom_db {
            Some(name) => {
                let p = Path::new(&name);
                if p.is_absolute() {
                    p.to_path_buf()
                } else {
                    dir.join(p)
                }
            }
            None => Self::database_file(),
        };

        let config = Config {
            database: db_path.to_string_lossy().to_string(),
            ..Config::default()
        };

        if !is_test {
            let yaml = serde_yaml::to_string(&config)?;
            fs::write(Self::config_file(), yaml)?;
            success(format!("Config file: {}", Self::config_file().display()));
        }

        if let Some(parent) = db_path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }

        Ok(db_path)
    }
}

use crate::errors::{AppError, AppResult};
use crate::utils::path::expand_tilde;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SheetBackend {
    Csv,
    Google,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SheetConfig {
    #[serde(default = "default_backend")]
    pub backend: SheetBackend,
    /// Spreadsheet name (Google backend).
    #[serde(default = "default_sheet_name")]
    pub name: String,
    /// Local CSV copy of the worksheet (CSV backend).
    #[serde(default = "default_csv_path")]
    pub csv_path: String,
    /// Environment variable holding the OAuth bearer token.
    #[serde(default = "default_token_env")]
    pub token_env: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub database: String,
    #[serde(default)]
    pub sheet: SheetConfig,
}

fn default_backend() -> SheetBackend {
    SheetBackend::Csv
}
fn default_sheet_name() -> String {
    "Daily Tasks".to_string()
}
fn default_csv_path() -> String {
    Config::config_dir()
        .join("sheet.csv")
        .to_string_lossy()
        .to_string()
}
fn default_token_env() -> String {
    "RTASKLEDGER_GOOGLE_TOKEN".to_string()
}
fn default_timeout_secs() -> u64 {
    30
}

impl Default for SheetConfig {
    fn default() -> Self {
        Self {
            backend: default_backend(),
            name: default_sheet_name(),
            csv_path: default_csv_path(),
            token_env: default_token_env(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database: Self::database_file().to_string_lossy().to_string(),
            sheet: SheetConfig::default(),
        }
    }
}

const TOP_LEVEL_FIELDS: [&str; 2] = ["database", "sheet"];
const SHEET_FIELDS: [&str; 5] = ["backend", "name", "csv_path", "token_env", "timeout_secs"];

impl Config {
    /// Return the standard configuration directory depending on the platform
    pub fn config_dir() -> PathBuf {
        if cfg!(target_os = "windows") {
            let appdata = env::var("APPDATA").unwrap_or_else(|_| ".".to_string());
            PathBuf::from(appdata).join("rtaskledger")
        } else {
            let home = env::var("HOME").unwrap_or_else(|_| ".".to_string());
            PathBuf::from(home).join(".rtaskledger")
        }
    }

    /// Return the full path of the config file
    pub fn config_file() -> PathBuf {
        Self::config_dir().join("rtaskledger.conf")
    }

    /// Return the full path of the SQLite database
    pub fn database_file() -> PathBuf {
        Self::config_dir().join("rtaskledger.sqlite")
    }

    /// Load configuration from file, or return defaults if not found
    pub fn load() -> AppResult<Self> {
        Self::load_from(&Self::config_file())
    }

    pub fn load_from(path: &Path) -> AppResult<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path)?;
        let mut cfg: Config = serde_yaml::from_str(&content)?;
        cfg.database = expand_tilde(&cfg.database).to_string_lossy().to_string();
        Ok(cfg)
    }

    pub fn csv_path(&self) -> PathBuf {
        expand_tilde(&self.sheet.csv_path)
    }

    /// Names of known fields absent from a YAML config document.
    pub fn missing_fields(content: &str) -> AppResult<Vec<String>> {
        let value: serde_yaml::Value = serde_yaml::from_str(content)?;
        let map = value
            .as_mapping()
            .ok_or_else(|| AppError::Config("configuration root must be a mapping".into()))?;

        let mut missing: Vec<String> = TOP_LEVEL_FIELDS
            .iter()
            .filter(|f| !map.contains_key(**f))
            .map(|f| f.to_string())
            .collect();

        if let Some(sheet) = map.get("sheet").and_then(|s| s.as_mapping()) {
            missing.extend(
                SHEET_FIELDS
                    .iter()
                    .filter(|f| !sheet.contains_key(**f))
                    .map(|f| format!("sheet.{f}")),
            );
        }
        Ok(missing)
    }

    /// Initialize configuration and database files.
    /// With `is_test` the config file is left untouched.
    pub fn init_all(custom_db: Option<String>, is_test: bool) -> AppResult<Self> {
        let dir = Self::config_dir();
        fs::create_dir_all(&dir)?;

        let db_path = match custom_db {
            Some(name) => {
                let p = expand_tilde(&name);
                if p.is_absolute() { p } else { dir.join(p) }
            }
            None => Self::database_file(),
        };

        let config = Config {
            database: db_path.to_string_lossy().to_string(),
            ..Self::load()?
        };

        if !is_test {
            let yaml = serde_yaml::to_string(&config)?;
            let mut file = fs::File::create(Self::config_file())?;
            file.write_all(yaml.as_bytes())?;
        }

        Ok(config)
    }
}

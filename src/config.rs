use std::ffi::OsString;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::data::financial::FinancialMarkers;

/// Env var pointing at a JSON config file.
pub const CONFIG_ENV: &str = "DEUDA_CONFIG";
/// Env var overriding the dataset path.
pub const DATA_PATH_ENV: &str = "DEUDA_DATA_PATH";
/// Config file picked up from the working directory when present.
pub const DEFAULT_CONFIG_FILE: &str = "deuda.json";
/// Dataset read when nothing else is configured.
pub const DEFAULT_DATA_FILE: &str = "Base Plana 20-25.xlsx";

/// Application settings. Every field is optional in the JSON file.
///
/// ```json
/// {
///   "title": "Deuda Externa Pública (2020-2025)",
///   "data_path": "Base Plana 20-25.xlsx",
///   "financial_markers": ["SALDO INICIAL", "DESEMBOLSOS"],
///   "logo_path": "assets/escudo.png"
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub title: String,
    pub data_path: PathBuf,
    pub financial_markers: FinancialMarkers,
    pub logo_path: Option<PathBuf>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            title: "Deuda Externa Pública (2020-2025)".to_string(),
            data_path: PathBuf::from(DEFAULT_DATA_FILE),
            financial_markers: FinancialMarkers::default(),
            logo_path: None,
        }
    }
}

impl AppConfig {
    /// Resolve the configuration from the environment.
    ///
    /// `$DEUDA_CONFIG` if set, else `./deuda.json` if it exists, else the
    /// defaults; then `$DEUDA_DATA_PATH` overrides the dataset path.
    pub fn load() -> Result<Self> {
        let config = match std::env::var_os(CONFIG_ENV) {
            Some(path) => Self::from_file(Path::new(&path))?,
            None if Path::new(DEFAULT_CONFIG_FILE).exists() => {
                Self::from_file(Path::new(DEFAULT_CONFIG_FILE))?
            }
            None => Self::default(),
        };
        Ok(config.with_data_path_override(std::env::var_os(DATA_PATH_ENV)))
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading config file {}", path.display()))?;
        let config: AppConfig = serde_json::from_str(&text)
            .with_context(|| format!("parsing config file {}", path.display()))?;
        log::info!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    pub fn with_data_path_override(mut self, data_path: Option<OsString>) -> Self {
        if let Some(path) = data_path.filter(|p| !p.is_empty()) {
            self.data_path = PathBuf::from(path);
        }
        self
    }
}

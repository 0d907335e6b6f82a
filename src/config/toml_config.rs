use crate::adapters::http_fetcher::{DEFAULT_TIMEOUT_SECONDS, DEFAULT_ZONE_PARAM};
use crate::app::ServiceOptions;
use crate::core::zones::{ZoneCatalog, DEFAULT_ZONES, DEFAULT_ZONE_SUFFIX};
use crate::utils::error::{Result, SightError};
use crate::utils::validation::{self, Validate};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const DEFAULT_STORE_PATH: &str = "./data/sights.json";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SightsConfig {
    pub source: SourceConfig,
    pub store: StoreConfig,
    pub sync: SyncConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SourceConfig {
    pub endpoint: Option<String>,
    pub zone_param: String,
    pub timeout_seconds: u64,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            endpoint: None,
            zone_param: DEFAULT_ZONE_PARAM.to_string(),
            timeout_seconds: DEFAULT_TIMEOUT_SECONDS,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    pub path: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            path: DEFAULT_STORE_PATH.to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SyncConfig {
    pub zones: Vec<String>,
    pub zone_suffix: String,
    /// Apply zone normalization to live lookups too.
    pub normalize_live_zone: bool,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            zones: DEFAULT_ZONES.iter().map(|z| z.to_string()).collect(),
            zone_suffix: DEFAULT_ZONE_SUFFIX.to_string(),
            normalize_live_zone: false,
        }
    }
}

impl SightsConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(SightError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| SightError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${SIGHTS_ENDPOINT})，未設定的變數保持原樣
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| SightError::ConfigError {
            message: format!("invalid placeholder pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn endpoint(&self) -> Result<&str> {
        validation::validate_required_field("source.endpoint", &self.source.endpoint)
            .map(String::as_str)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.source.timeout_seconds)
    }

    pub fn zone_catalog(&self) -> ZoneCatalog {
        ZoneCatalog::new(self.sync.zones.clone(), self.sync.zone_suffix.clone())
    }

    pub fn service_options(&self) -> ServiceOptions {
        ServiceOptions {
            zones: self.zone_catalog(),
            normalize_live_zone: self.sync.normalize_live_zone,
        }
    }

    /// Splits the store path into the storage root and the document name.
    pub fn store_location(&self) -> (PathBuf, String) {
        let path = Path::new(&self.store.path);
        let dir = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };
        let document = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| "sights.json".to_string());
        (dir, document)
    }
}

impl Validate for SightsConfig {
    fn validate(&self) -> Result<()> {
        if let Some(endpoint) = &self.source.endpoint {
            validation::validate_url("source.endpoint", endpoint)?;
        }
        validation::validate_non_empty_string("source.zone_param", &self.source.zone_param)?;
        validation::validate_range("source.timeout_seconds", self.source.timeout_seconds, 1, 300)?;
        validation::validate_path("store.path", &self.store.path)?;
        validation::validate_zone_list("sync.zones", &self.sync.zones)?;
        validation::validate_single_char("sync.zone_suffix", &self.sync.zone_suffix)?;

        tracing::debug!("✅ Configuration validation passed");
        Ok(())
    }
}

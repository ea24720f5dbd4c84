use crate::config::DEFAULT_LOG_PATH;
use crate::core::store::DEFAULT_CAPACITY;
use crate::domain::model::RateCard;
use crate::domain::ports::ConfigProvider;
use crate::utils::error::{DojoError, Result};
use crate::utils::validation::{validate_path, validate_positive_number, validate_rate, Validate};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DojoConfig {
    pub billing: RateCard,
    pub storage: StorageConfig,
    pub roster: RosterConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    pub log_path: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            log_path: DEFAULT_LOG_PATH.to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RosterConfig {
    pub initial_capacity: usize,
}

impl Default for RosterConfig {
    fn default() -> Self {
        Self {
            initial_capacity: DEFAULT_CAPACITY,
        }
    }
}

impl DojoConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(DojoError::IoError)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| DojoError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Expands `${VAR}` from the environment; unknown variables are left as written.
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| DojoError::ConfigValidationError {
            field: "env_substitution".to_string(),
            message: e.to_string(),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures<'_>| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.into_owned())
    }

    /// Command-line values win over the file.
    pub fn with_overrides(mut self, log_path: Option<String>, initial_capacity: Option<usize>) -> Self {
        if let Some(path) = log_path {
            self.storage.log_path = path;
        }
        if let Some(capacity) = initial_capacity {
            self.roster.initial_capacity = capacity;
        }
        self
    }

    pub fn validate_config(&self) -> Result<()> {
        validate_path("storage.log_path", &self.storage.log_path)?;
        validate_positive_number("roster.initial_capacity", self.roster.initial_capacity, 1)?;
        validate_rate("billing.junior_base_rate", self.billing.junior_base_rate)?;
        validate_rate("billing.senior_base_rate", self.billing.senior_base_rate)?;
        validate_rate("billing.gear_cost", self.billing.gear_cost)?;
        Ok(())
    }
}

impl ConfigProvider for DojoConfig {
    fn log_path(&self) -> &str {
        &self.storage.log_path
    }

    fn initial_capacity(&self) -> usize {
        self.roster.initial_capacity
    }

    fn rates(&self) -> RateCard {
        self.billing
    }
}

impl Validate for DojoConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}

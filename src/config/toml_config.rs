use crate::core::ConfigProvider;
use crate::utils::error::{KioskError, Result};
use crate::utils::validation::{self, Validate};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// On-device configuration file, e.g. `kiosk.toml`:
///
/// ```toml
/// [backend]
/// base_url = "http://192.168.1.50:3001"
/// timeout_seconds = 10
///
/// [kiosk]
/// location_id = "${KIOSK_LOCATION}"
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TomlConfig {
    #[serde(default)]
    pub backend: BackendConfig,
    #[serde(default)]
    pub kiosk: KioskConfig,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BackendConfig {
    pub base_url: Option<String>,
    pub timeout_seconds: Option<u64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct KioskConfig {
    pub location_id: Option<String>,
    pub welcome_message: Option<String>,
}

impl TomlConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(KioskError::IoError)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| KioskError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Replaces `${VAR}` with the environment value; unset variables are left as written.
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| KioskError::ConfigError {
            message: format!("Invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }
}

impl ConfigProvider for TomlConfig {
    fn base_url(&self) -> &str {
        self.backend
            .base_url
            .as_deref()
            .unwrap_or(crate::adapters::http::DEFAULT_BASE_URL)
    }

    fn location_id(&self) -> &str {
        self.kiosk
            .location_id
            .as_deref()
            .unwrap_or(crate::core::kiosk::DEFAULT_LOCATION_ID)
    }

    fn timeout_seconds(&self) -> u64 {
        self.backend
            .timeout_seconds
            .unwrap_or(crate::adapters::http::DEFAULT_TIMEOUT_SECONDS)
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_url("backend.base_url", self.base_url())?;
        validation::validate_positive_number("backend.timeout_seconds", self.timeout_seconds(), 1)?;
        validation::validate_non_empty_string("kiosk.location_id", self.location_id())?;
        Ok(())
    }
}

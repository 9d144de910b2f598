
use crate::config::toml_config::TomlConfig;
use crate::core::ConfigProvider;
use crate::utils::error::Result;
use crate::utils::validation::{self, Validate};
use clap::{Parser, Subcommand};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize, Parser)]
#[command(name = "turno-kiosk")]
#[command(about = "Queue-ticket kiosk: validate a DPI, pick a service, get a ticket")]
pub struct CliConfig {
    /// Path to a TOML configuration file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Ticket backend base URL (the API lives under /api)
    #[arg(long, global = true)]
    pub base_url: Option<String>,

    /// Branch identifier sent with every registration
    #[arg(long, global = true)]
    pub location_id: Option<String>,

    /// Request timeout in seconds
    #[arg(long, global = true)]
    pub timeout_seconds: Option<u64>,

    #[arg(short, long, global = true, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, global = true, help = "Emit logs as JSON")]
    pub log_json: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Serialize, Deserialize, Subcommand)]
pub enum Command {
    /// Check one or more DPI numbers without contacting the backend
    Validate {
        #[arg(required = true)]
        dpi: Vec<String>,

        /// Print each verdict as a JSON line
        #[arg(long)]
        json: bool,
    },

    /// List the services tickets can be issued for
    Services,

    /// Register a single ticket and print it
    Register {
        #[arg(long)]
        service: i64,

        #[arg(long)]
        first_name: String,

        #[arg(long)]
        last_name: String,

        #[arg(long)]
        dpi: Option<String>,
    },

    /// Run the interactive kiosk
    Kiosk {
        /// Stop after a single session
        #[arg(long)]
        once: bool,
    },
}

/// Effective settings: command-line flags over the TOML file over defaults.
#[derive(Debug, Clone)]
pub struct Settings {
    pub base_url: String,
    pub location_id: String,
    pub timeout_seconds: u64,
    pub welcome_message: Option<String>,
}

impl Settings {
    pub fn resolve(cli: &CliConfig) -> Result<Self> {
        let file = match &cli.config {
            Some(path) => {
                tracing::debug!("Loading configuration from: {}", path.display());
                TomlConfig::from_file(path)?
            }
            None => TomlConfig::default(),
        };
        Ok(Self::merge(cli, &file))
    }

    pub fn merge(cli: &CliConfig, file: &TomlConfig) -> Self {
        Self {
            base_url: cli
                .base_url
                .clone()
                .unwrap_or_else(|| file.base_url().to_string()),
            location_id: cli
                .location_id
                .clone()
                .unwrap_or_else(|| file.location_id().to_string()),
            timeout_seconds: cli.timeout_seconds.unwrap_or_else(|| file.timeout_seconds()),
            welcome_message: file.kiosk.welcome_message.clone(),
        }
    }
}

impl ConfigProvider for Settings {
    fn base_url(&self) -> &str {
        &self.base_url
    }

    fn location_id(&self) -> &str {
        &self.location_id
    }

    fn timeout_seconds(&self) -> u64 {
        self.timeout_seconds
    }
}

impl Validate for Settings {
    fn validate(&self) -> Result<()> {
        validation::validate_url("base_url", &self.base_url)?;
        validation::validate_positive_number("timeout_seconds", self.timeout_seconds, 1)?;
        validation::validate_non_empty_string("location_id", &self.location_id)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_validate_command() {
        let cli = CliConfig::parse_from(["turno-kiosk", "validate", "1234567890101", "--json"]);
        match cli.command {
            Command::Validate { dpi, json } => {
                assert_eq!(dpi, vec!["1234567890101".to_string()]);
                assert!(json);
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_cli_flags_override_file() {
        let cli = CliConfig::parse_from([
            "turno-kiosk",
            "--base-url",
            "http://10.0.0.2:3001",
            "kiosk",
            "--once",
        ]);
        let file = TomlConfig::from_toml_str(
            "[backend]\nbase_url = \"http://ignored:1\"\ntimeout_seconds = 3\n\n[kiosk]\nlocation_id = \"norte\"\n",
        )
        .unwrap();

        let settings = Settings::merge(&cli, &file);
        assert_eq!(settings.base_url, "http://10.0.0.2:3001");
        assert_eq!(settings.timeout_seconds, 3);
        assert_eq!(settings.location_id, "norte");
        assert!(settings.validate().is_ok());
        assert!(matches!(cli.command, Command::Kiosk { once: true }));
    }

    #[test]
    fn test_defaults_without_file() {
        let cli = CliConfig::parse_from(["turno-kiosk", "services"]);
        let settings = Settings::resolve(&cli).unwrap();
        assert_eq!(settings.base_url, "http://localhost:3001");
        assert_eq!(settings.location_id, "sucursal-central-01");
        assert_eq!(settings.timeout_seconds, 10);
    }

    #[test]
    fn test_register_command_requires_service() {
        let result = CliConfig::try_parse_from([
            "turno-kiosk",
            "register",
            "--first-name",
            "Ana",
            "--last-name",
            "López",
        ]);
        assert!(result.is_err());
    }
}

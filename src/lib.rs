pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use adapters::terminal::TerminalPrompter;
#[cfg(feature = "cli")]
pub use config::{CliConfig, Command, Settings};

pub use adapters::http::HttpTicketBackend;
pub use config::TomlConfig;
pub use core::kiosk::{KioskEngine, SessionOutcome};
pub use domain::dpi::{validate as validate_dpi, Dpi, DpiRejection, Verdict};
pub use utils::error::{KioskError, Result};

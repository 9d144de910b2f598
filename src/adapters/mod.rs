// Adapters layer: concrete implementations of the domain ports.

pub mod http;
#[cfg(feature = "cli")]
pub mod terminal;

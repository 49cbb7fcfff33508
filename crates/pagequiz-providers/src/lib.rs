//! pagequiz-providers: Generation provider integrations.
//!
//! Implements the `GenerationProvider` trait for Gemini, plus a mock for
//! tests, and loads the configuration the provider is built from.

pub mod config;
pub mod error;
pub mod gemini;
pub mod mock;

pub use config::{create_provider, load_config, load_config_from, PagequizConfig};
pub use error::ProviderError;

//! Configuration management
//!
//! Runtime settings for the ledger binary: genesis payload, log level and
//! report layout. Read from an optional TOML file, then environment variables.

pub mod settings;

pub use settings::Config;

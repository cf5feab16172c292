//! Command-line interface
//!
//! This module contains the CLI commands, argument parsing, the
//! report printed for a chain and the tampering step of the demo.

pub mod commands;
pub mod demo;
pub mod report;

pub use commands::{Command, Opt};
pub use demo::overwrite_data;
pub use report::{render_json, render_text, validity_line};

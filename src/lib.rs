//! # Hashlink Ledger
//!
//! A small hash-linked, append-only ledger kept entirely in memory.
//!
//! ## What It Does
//! - **Blocks**: each block records an index, a timestamp, a JSON payload and
//!   the digest of the block before it, sealed with its own SHA-256 digest
//! - **Chain**: seeded with a genesis block, grows only at the tail, and is
//!   validated by recomputing digests and comparing links
//!
//! ## Layout
//! - `core/`: blocks and the chain
//! - `utils/`: hashing, timestamps, canonical payload encoding
//! - `config/`: runtime settings for the binary
//! - `cli/`: command-line interface and chain reports
//!
//! There is no persistence, networking or consensus. Validation failures are
//! reported, never repaired.

pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod utils;

// Re-export commonly used types for convenience
pub use cli::{Command, Opt};
pub use config::Config;
pub use core::{
    Block, Chain, ChainFault, DIGEST_VERSION, GENESIS_DATA, GENESIS_PREVIOUS_DIGEST,
};
pub use error::{LedgerError, Result};
pub use utils::{canonical_json, current_timestamp, sha256_digest, to_canonical_value};

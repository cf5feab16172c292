//! Utility functions and helpers
//!
//! Hashing, timestamps and the canonical payload encoding used by blocks.

pub mod crypto;
pub mod serialization;

pub use crypto::{current_timestamp, sha256_digest, sha256_fields_hex};

pub use serialization::{canonical_json, to_canonical_value};

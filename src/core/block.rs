use crate::error::{LedgerError, Result};
use crate::utils::{canonical_json, sha256_fields_hex, to_canonical_value};
use log::debug;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// Version of the field encoding fed to SHA-256. Bump on any layout change.
pub const DIGEST_VERSION: u32 = 1;

const DIGEST_DOMAIN: &str = "hashlink-ledger";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Block {
    pub(crate) index: u64,
    pub(crate) timestamp: f64,
    pub(crate) data: Value,
    pub(crate) previous_digest: String,
    pub(crate) digest: String,
}

impl Block {
    /// Build a block and seal it with the digest of its fields.
    ///
    /// `index` is trusted as given; the chain is responsible for passing the
    /// block's real position. The timestamp must be finite since JSON exports
    /// cannot carry NaN or infinity.
    pub fn new_block<T: Serialize + ?Sized>(
        index: u64,
        timestamp: f64,
        data: &T,
        previous_digest: &str,
    ) -> Result<Block> {
        if !timestamp.is_finite() {
            return Err(LedgerError::InvalidBlock(format!(
                "Block {index} has non-finite timestamp {timestamp}"
            )));
        }
        let data = to_canonical_value(data)?;

        let mut block = Block {
            index,
            timestamp,
            data,
            previous_digest: previous_digest.to_string(),
            digest: String::new(),
        };
        block.digest = block.compute_digest();
        debug!("Sealed block {index} with digest {}", block.digest);

        Ok(block)
    }

    /// Recompute the digest from index, timestamp, data and previous digest.
    ///
    /// Fields are hashed in that order, each length-prefixed, after the
    /// domain tag. The stored `digest` never takes part.
    pub fn compute_digest(&self) -> String {
        let index = self.index.to_string();
        let timestamp = self.timestamp.to_string();
        let data = canonical_json(&self.data);
        let tag = format!("{DIGEST_DOMAIN}/v{DIGEST_VERSION}");

        sha256_fields_hex(
            tag.as_bytes(),
            &[
                index.as_bytes(),
                timestamp.as_bytes(),
                data.as_bytes(),
                self.previous_digest.as_bytes(),
            ],
        )
    }

    /// True when the stored digest still matches the block's fields
    pub fn has_valid_digest(&self) -> bool {
        self.digest == self.compute_digest()
    }

    pub fn get_index(&self) -> u64 {
        self.index
    }

    pub fn get_timestamp(&self) -> f64 {
        self.timestamp
    }

    pub fn get_data(&self) -> &Value {
        &self.data
    }

    pub fn get_previous_digest(&self) -> &str {
        self.previous_digest.as_str()
    }

    pub fn get_digest(&self) -> &str {
        self.digest.as_str()
    }
}

impl fmt::Display for Block {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Plain strings print without JSON quotes
        let data = match &self.data {
            Value::String(s) => s.clone(),
            other => canonical_json(other),
        };
        writeln!(f, "Index: {}", self.index)?;
        writeln!(f, "Timestamp: {}", self.timestamp)?;
        writeln!(f, "Data: {data}")?;
        writeln!(f, "Previous Hash: {}", self.previous_digest)?;
        write!(f, "Hash: {}", self.digest)
    }
}

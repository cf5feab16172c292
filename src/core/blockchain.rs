// The chain is a plain in-memory vector of blocks. Each block commits to the
// digest of the one before it, so any edit to an earlier block shows up as a
// digest mismatch or a broken link when the chain is validated.

use crate::core::Block;
use crate::error::{LedgerError, Result};
use crate::utils::current_timestamp;
use log::{info, warn};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Previous digest stored in the genesis block. A real digest is 64 hex chars.
pub const GENESIS_PREVIOUS_DIGEST: &str = "1";

/// Payload of the genesis block when the caller does not choose one
pub const GENESIS_DATA: &str = "Genesis Block";

/// First problem found while validating a chain
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChainFault {
    /// Block's previous digest differs from its predecessor's digest
    BrokenLink { index: u64 },
    /// Block's stored digest differs from a fresh recomputation
    DigestMismatch { index: u64 },
}

impl fmt::Display for ChainFault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChainFault::BrokenLink { index } => {
                write!(f, "block {index} does not link to its predecessor")
            }
            ChainFault::DigestMismatch { index } => {
                write!(f, "block {index} digest does not match its contents")
            }
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Chain {
    blocks: Vec<Block>,
}

impl Chain {
    /// New chain seeded with the default genesis block, stamped now
    pub fn new() -> Result<Chain> {
        Self::with_genesis(GENESIS_DATA, current_timestamp()?)
    }

    /// New chain whose genesis block carries `data` and `timestamp`
    pub fn with_genesis<T: Serialize + ?Sized>(data: &T, timestamp: f64) -> Result<Chain> {
        let genesis = Block::new_block(1, timestamp, data, GENESIS_PREVIOUS_DIGEST)?;
        info!("Created genesis block: {}", genesis.get_digest());
        Ok(Chain {
            blocks: vec![genesis],
        })
    }

    /// Wrap an existing block sequence, e.g. one read back from an export.
    /// Nothing is checked here; call `is_valid` before trusting it.
    pub fn from_blocks(blocks: Vec<Block>) -> Chain {
        Chain { blocks }
    }

    /// Append a block for `data` stamped with the current time
    pub fn append_block<T: Serialize + ?Sized>(&mut self, data: &T) -> Result<&Block> {
        let timestamp = current_timestamp()?;
        self.append_block_at(data, timestamp)
    }

    /// Append a block for `data` with an explicit timestamp
    pub fn append_block_at<T: Serialize + ?Sized>(
        &mut self,
        data: &T,
        timestamp: f64,
    ) -> Result<&Block> {
        let previous_digest = self.last_block()?.get_digest().to_string();
        let index = self.blocks.len() as u64 + 1;

        let block = Block::new_block(index, timestamp, data, &previous_digest)?;
        info!("Appended block {index}: {}", block.get_digest());
        self.blocks.push(block);

        self.last_block()
    }

    pub fn last_block(&self) -> Result<&Block> {
        self.blocks.last().ok_or(LedgerError::EmptyChain)
    }

    /// Block at 1-based `index`
    pub fn get_block(&self, index: u64) -> Option<&Block> {
        let position = usize::try_from(index).ok()?.checked_sub(1)?;
        self.blocks.get(position)
    }

    pub fn blocks(&self) -> &[Block] {
        self.blocks.as_slice()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Block> {
        self.blocks.iter()
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// Walk the chain once and report the first fault.
    ///
    /// Genesis has no predecessor to link to, but its own digest is still
    /// rechecked. An empty chain has nothing to contradict and passes.
    pub fn verify(&self) -> std::result::Result<(), ChainFault> {
        let result = self.find_fault();
        if let Err(fault) = &result {
            warn!("Chain validation failed: {fault}");
        }
        result
    }

    fn find_fault(&self) -> std::result::Result<(), ChainFault> {
        if let Some(genesis) = self.blocks.first() {
            if !genesis.has_valid_digest() {
                return Err(ChainFault::DigestMismatch {
                    index: genesis.get_index(),
                });
            }
        }

        for pair in self.blocks.windows(2) {
            let (previous, current) = (&pair[0], &pair[1]);

            if current.get_previous_digest() != previous.get_digest() {
                return Err(ChainFault::BrokenLink {
                    index: current.get_index(),
                });
            }

            if !current.has_valid_digest() {
                return Err(ChainFault::DigestMismatch {
                    index: current.get_index(),
                });
            }
        }

        Ok(())
    }

    pub fn is_valid(&self) -> bool {
        self.verify().is_ok()
    }
}

impl<'a> IntoIterator for &'a Chain {
    type Item = &'a Block;
    type IntoIter = std::slice::Iter<'a, Block>;

    fn into_iter(self) -> Self::IntoIter {
        self.blocks.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const TS: f64 = 1_700_000_000.0;

    fn sample_chain(payloads: &[&str]) -> Chain {
        let mut chain = Chain::with_genesis(GENESIS_DATA, TS).unwrap();
        for (i, payload) in payloads.iter().enumerate() {
            chain.append_block_at(*payload, TS + i as f64 + 1.0).unwrap();
        }
        chain
    }

    #[test]
    fn test_genesis_invariant() {
        let chain = Chain::new().unwrap();
        assert_eq!(chain.len(), 1);

        let genesis = chain.last_block().unwrap();
        assert_eq!(genesis.get_index(), 1);
        assert_eq!(genesis.get_previous_digest(), GENESIS_PREVIOUS_DIGEST);
        assert_eq!(genesis.get_data(), &json!(GENESIS_DATA));
        assert!(chain.is_valid());
    }

    #[test]
    fn test_append_links_to_previous_tail() {
        let mut chain = sample_chain(&["a", "b"]);
        let tail_digest = chain.last_block().unwrap().get_digest().to_string();

        let block = chain.append_block("c").unwrap();
        assert_eq!(block.get_index(), 4);
        assert_eq!(block.get_previous_digest(), tail_digest);
        assert_eq!(chain.len(), 4);
    }

    #[test]
    fn test_append_leaves_prior_blocks_untouched() {
        let mut chain = sample_chain(&["a"]);
        let before = chain.blocks().to_vec();
        chain.append_block_at("b", TS + 10.0).unwrap();
        assert_eq!(&chain.blocks()[..2], before.as_slice());
    }

    #[test]
    fn test_untouched_chain_is_valid() {
        let chain = sample_chain(&["a", "b", "c", "d"]);
        assert!(chain.is_valid());
        assert_eq!(chain.verify(), Ok(()));
    }

    #[test]
    fn test_tampered_payload_is_detected() {
        let mut chain = sample_chain(&["First block data", "Second block data"]);
        chain.blocks[1].data = json!("Tampered");

        assert!(!chain.is_valid());
        assert_eq!(chain.verify(), Err(ChainFault::DigestMismatch { index: 2 }));
    }

    #[test]
    fn test_tampered_payload_with_recomputed_digest_breaks_link() {
        let mut chain = sample_chain(&["a", "b"]);
        chain.blocks[1].data = json!("forged");
        chain.blocks[1].digest = chain.blocks[1].compute_digest();

        assert_eq!(chain.verify(), Err(ChainFault::BrokenLink { index: 3 }));
    }

    #[test]
    fn test_swapped_blocks_are_detected() {
        let mut chain = sample_chain(&["a", "b", "c"]);
        chain.blocks.swap(1, 2);

        assert!(!chain.is_valid());
        assert!(matches!(chain.verify(), Err(ChainFault::BrokenLink { .. })));
    }

    #[test]
    fn test_tampered_genesis_is_detected() {
        let mut chain = sample_chain(&["a"]);
        chain.blocks[0].timestamp += 1.0;

        assert_eq!(chain.verify(), Err(ChainFault::DigestMismatch { index: 1 }));
    }

    #[test]
    fn test_empty_chain() {
        let mut chain = Chain::from_blocks(Vec::new());
        assert!(chain.is_empty());
        assert_eq!(chain.last_block().unwrap_err(), LedgerError::EmptyChain);
        assert_eq!(chain.append_block("x").unwrap_err(), LedgerError::EmptyChain);
        assert!(chain.is_valid());
    }

    #[test]
    fn test_non_finite_timestamps_are_rejected() {
        let genesis = Chain::with_genesis(GENESIS_DATA, f64::INFINITY);
        assert!(matches!(genesis, Err(LedgerError::InvalidBlock(_))));

        let mut chain = sample_chain(&["a"]);
        let result = chain.append_block_at("x", f64::INFINITY);
        assert!(matches!(result, Err(LedgerError::InvalidBlock(_))));
        let result = chain.append_block_at("x", f64::NAN);
        assert!(matches!(result, Err(LedgerError::InvalidBlock(_))));
        assert_eq!(chain.len(), 2);
    }

    #[test]
    fn test_non_finite_payload_is_not_appended() {
        let mut chain = sample_chain(&[]);
        let result = chain.append_block_at(&f64::NAN, TS + 1.0);
        assert!(matches!(result, Err(LedgerError::Serialization(_))));
        assert_eq!(chain.len(), 1);
        assert!(chain.is_valid());
    }

    #[test]
    fn test_get_block_is_one_based() {
        let chain = sample_chain(&["a", "b"]);
        assert!(chain.get_block(0).is_none());
        assert_eq!(chain.get_block(1).unwrap().get_index(), 1);
        assert_eq!(chain.get_block(3).unwrap().get_data(), &json!("b"));
        assert!(chain.get_block(4).is_none());
    }

    #[test]
    fn test_structured_payloads() {
        let mut chain = Chain::with_genesis(&json!({}), TS).unwrap();
        chain
            .append_block_at(&json!({"amount": 5, "to": "bob"}), TS + 1.0)
            .unwrap();
        chain.append_block_at(&vec![1, 2, 3], TS + 2.0).unwrap();
        assert!(chain.is_valid());
    }

    #[test]
    fn test_serializes_as_block_array() {
        let chain = sample_chain(&["a"]);
        let value = serde_json::to_value(&chain).unwrap();
        assert_eq!(value.as_array().map(Vec::len), Some(2));
    }
}

//! Core ledger functionality
//!
//! Blocks and the hash-linked chain that holds them.

pub mod block;
pub mod blockchain;

pub use block::{Block, DIGEST_VERSION};
pub use blockchain::{Chain, ChainFault, GENESIS_DATA, GENESIS_PREVIOUS_DIGEST};

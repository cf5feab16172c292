//! Error handling for the ledger
//!
//! Validation failures are not errors: `Chain::is_valid` reports them as a
//! plain boolean. Everything here is a failed operation.

use std::fmt;

/// Result type alias for ledger operations
pub type Result<T> = std::result::Result<T, LedgerError>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LedgerError {
    /// Payload could not be encoded for hashing
    Serialization(String),
    /// Tail access on a chain that has no genesis block
    EmptyChain,
    /// Block fields that cannot be sealed or exported faithfully
    InvalidBlock(String),
    /// System clock reports a time before the Unix epoch
    Clock(String),
    /// Malformed configuration file or environment value
    Config(String),
    /// File I/O errors
    Io(String),
}

impl fmt::Display for LedgerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LedgerError::Serialization(msg) => write!(f, "Serialization error: {msg}"),
            LedgerError::EmptyChain => write!(f, "Chain has no genesis block"),
            LedgerError::InvalidBlock(msg) => write!(f, "Invalid block: {msg}"),
            LedgerError::Clock(msg) => write!(f, "Clock error: {msg}"),
            LedgerError::Config(msg) => write!(f, "Configuration error: {msg}"),
            LedgerError::Io(msg) => write!(f, "I/O error: {msg}"),
        }
    }
}

impl std::error::Error for LedgerError {}

impl From<std::io::Error> for LedgerError {
    fn from(err: std::io::Error) -> Self {
        LedgerError::Io(err.to_string())
    }
}

impl From<serde_json::Error> for LedgerError {
    fn from(err: serde_json::Error) -> Self {
        LedgerError::Serialization(err.to_string())
    }
}

impl From<toml::de::Error> for LedgerError {
    fn from(err: toml::de::Error) -> Self {
        LedgerError::Config(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_messages() {
        assert_eq!(
            LedgerError::EmptyChain.to_string(),
            "Chain has no genesis block"
        );
        assert_eq!(
            LedgerError::Config("bad width".to_string()).to_string(),
            "Configuration error: bad width"
        );
    }

    #[test]
    fn test_from_serde_json_error() {
        let err = serde_json::from_str::<u64>("not a number").unwrap_err();
        let ledger_err: LedgerError = err.into();
        assert!(matches!(ledger_err, LedgerError::Serialization(_)));
    }
}

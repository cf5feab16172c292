use crate::core::Chain;
use crate::error::{LedgerError, Result};
use serde_json::Value;

/// Copy of `chain` with block `index`'s payload replaced and its digest left
/// stale, produced the way an edited export would be read back.
pub fn overwrite_data(chain: &Chain, index: u64, data: Value) -> Result<Chain> {
    let missing = || {
        LedgerError::InvalidBlock(format!(
            "No block {index} in a chain of {} blocks",
            chain.len()
        ))
    };
    let position = usize::try_from(index)
        .ok()
        .and_then(|index| index.checked_sub(1))
        .ok_or_else(missing)?;

    let mut exported = serde_json::to_value(chain)?;
    let block = exported
        .get_mut(position)
        .and_then(Value::as_object_mut)
        .ok_or_else(missing)?;
    block.insert("data".to_string(), data);

    Ok(serde_json::from_value(exported)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::ChainFault;
    use serde_json::json;

    fn chain() -> Chain {
        let mut chain = Chain::with_genesis("Genesis Block", 10.0).unwrap();
        chain.append_block_at("First block data", 11.0).unwrap();
        chain.append_block_at("Second block data", 12.0).unwrap();
        chain
    }

    #[test]
    fn test_overwrite_leaves_digest_stale() {
        let original = chain();
        let tampered = overwrite_data(&original, 2, json!("Tampered")).unwrap();

        assert_eq!(tampered.get_block(2).unwrap().get_data(), &json!("Tampered"));
        assert_eq!(
            tampered.get_block(2).unwrap().get_digest(),
            original.get_block(2).unwrap().get_digest()
        );
        assert_eq!(tampered.verify(), Err(ChainFault::DigestMismatch { index: 2 }));
        assert!(original.is_valid());
    }

    #[test]
    fn test_out_of_range_index_is_an_error() {
        for index in [0, 4, u64::MAX] {
            let result = overwrite_data(&chain(), index, json!("Tampered"));
            assert!(matches!(result, Err(LedgerError::InvalidBlock(_))));
        }
    }
}

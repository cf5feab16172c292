use ring::digest::{Context, SHA256};

use crate::error::{LedgerError, Result};
use data_encoding::HEXLOWER;
use std::time::{SystemTime, UNIX_EPOCH};

/// Wall-clock time as fractional seconds since the Unix epoch
pub fn current_timestamp() -> Result<f64> {
    let duration = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_err(|e| LedgerError::Clock(format!("System time error: {e}")))?;

    Ok(duration.as_secs_f64())
}

pub fn sha256_digest(data: &[u8]) -> Vec<u8> {
    let mut context = Context::new(&SHA256);
    context.update(data);
    let digest = context.finish();
    digest.as_ref().to_vec()
}

/// Hash a domain tag followed by length-prefixed fields, hex encoded.
///
/// Every field is preceded by its length as a big-endian `u64`, so moving
/// bytes from one field into its neighbour always changes the digest.
pub fn sha256_fields_hex(tag: &[u8], fields: &[&[u8]]) -> String {
    let mut encoded = tag.to_vec();
    for field in fields {
        encoded.extend((field.len() as u64).to_be_bytes());
        encoded.extend_from_slice(field);
    }
    HEXLOWER.encode(&sha256_digest(&encoded))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sha256_known_vector() {
        let digest = sha256_digest(b"abc");
        assert_eq!(
            HEXLOWER.encode(&digest),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }

    #[test]
    fn test_fields_hex_hashes_length_prefixed_encoding() {
        let mut expected = b"tag".to_vec();
        expected.extend(3u64.to_be_bytes());
        expected.extend(b"abc");
        assert_eq!(
            sha256_fields_hex(b"tag", &[b"abc"]),
            HEXLOWER.encode(&sha256_digest(&expected))
        );
        assert_eq!(
            sha256_fields_hex(b"", &[]),
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
    }

    #[test]
    fn test_field_boundaries_matter() {
        let a = sha256_fields_hex(b"tag", &[b"ab", b"c"]);
        let b = sha256_fields_hex(b"tag", &[b"a", b"bc"]);
        assert_ne!(a, b);
        assert_eq!(a.len(), 64);
    }

    #[test]
    fn test_current_timestamp_is_recent() {
        // 2020-01-01T00:00:00Z
        assert!(current_timestamp().unwrap() > 1_577_836_800.0);
    }
}

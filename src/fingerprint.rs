//! Size and SHA-256 fingerprint of downloaded image content.

use sha2::{Digest, Sha256};

pub fn size_of(bytes: &[u8]) -> u64 {
    bytes.len() as u64
}

/// Uppercase hex SHA-256 of `bytes`, 64 characters long.
pub fn digest_of(bytes: &[u8]) -> String {
    hex::encode_upper(Sha256::digest(bytes))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_input_vector() {
        assert_eq!(
            digest_of(b""),
            "E3B0C44298FC1C149AFBF4C8996FB92427AE41E4649B934CA495991B7852B855"
        );
    }

    #[test]
    fn abc_vector() {
        assert_eq!(
            digest_of(b"abc"),
            "BA7816BF8F01CFEA414140DE5DAE2223B00361A396177A9CB410FF61F20015AD"
        );
    }

    #[test]
    fn digest_format() {
        let digest = digest_of(&[0xff, 0x00, 0x10]);
        assert_eq!(digest.len(), 64);
        assert!(digest.chars().all(|c| c.is_ascii_digit() || c.is_ascii_uppercase()));
        assert_eq!(digest, digest_of(&[0xff, 0x00, 0x10]));
    }

    #[test]
    fn size_is_byte_length() {
        assert_eq!(size_of(b""), 0);
        assert_eq!(size_of(&[0u8; 1024]), 1024);
    }
}

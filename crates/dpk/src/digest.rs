//! SHA3-512 fallback keys.

use crate::config::DIGEST_HEX_LEN;
use sha3::{Digest, Sha3_512};

/// SHA3-512 of the UTF-8 bytes of `input`, as 128 lowercase hex characters.
pub fn sha3_512_hex(input: &str) -> String {
    hex::encode(Sha3_512::digest(input.as_bytes()))
}

/// True if `key` has the shape of a hashed key.
pub fn is_digest(key: &str) -> bool {
    key.len() == DIGEST_HEX_LEN && key.bytes().all(|b| matches!(b, b'0'..=b'9' | b'a'..=b'f'))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_answers() {
        assert_eq!(
            sha3_512_hex(""),
            "a69f73cca23a9ac5c8b567dc185a756e97c982164fe25859e0d1dcc1475c80a6\
             15b2123af1f5f94c11e3e9402c3ac558f500199d95b6d3e301758586281dcd26"
        );
        assert_eq!(
            sha3_512_hex("abc"),
            "b751850b1a57168a5693cd924b6b096e08f621827444f70d884f5d0240d2712e\
             10e116e9192af3c91a7ec57647e3934057340b4cf408d5a56592f8274eec53f0"
        );
    }

    #[test]
    fn test_is_digest() {
        assert!(is_digest(&sha3_512_hex("anything")));
        assert!(!is_digest("0"));
        assert!(!is_digest(&"A".repeat(DIGEST_HEX_LEN)));
        assert!(!is_digest(&"a".repeat(DIGEST_HEX_LEN + 1)));
    }
}

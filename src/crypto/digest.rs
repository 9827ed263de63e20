//! SHA-256 digests used by script assembly.

use sha2::{Digest, Sha256};

/// SHA-256 digest length in bytes.
pub const SHA256_LEN: usize = 32;

/// Length of a compressed interop service identifier.
pub const INTEROP_ID_LEN: usize = 4;

/// Computes the SHA-256 digest of `data`.
pub fn sha256(data: &[u8]) -> [u8; SHA256_LEN] {
    Sha256::digest(data).into()
}

/// Derives the compressed identifier of an interop service name.
///
/// The identifier is the first four bytes of the name's SHA-256 digest.
pub fn interop_id(name: &str) -> [u8; INTEROP_ID_LEN] {
    let digest = sha256(name.as_bytes());
    let mut id = [0u8; INTEROP_ID_LEN];
    id.copy_from_slice(&digest[..INTEROP_ID_LEN]);
    id
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sha256_known_vector() {
        assert_eq!(
            hex::encode(sha256(b"abc")),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }

    #[test]
    fn interop_id_is_digest_prefix() {
        let name = "Neo.Storage.GetContext";
        assert_eq!(interop_id(name), sha256(name.as_bytes())[..4]);
    }
}

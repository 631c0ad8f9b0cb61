//! `sha256:<hex>` digests guarding settings snapshots against corruption.

use sha2::{Digest, Sha256};

const PREFIX: &str = "sha256:";

pub fn compute_checksum(content: &[u8]) -> String {
    format!("{PREFIX}{:x}", Sha256::digest(content))
}

/// Whether `content` still hashes to `expected`.
pub fn verify_checksum(content: &[u8], expected: &str) -> bool {
    expected
        .strip_prefix(PREFIX)
        .is_some_and(|_| compute_checksum(content) == expected)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn digest_of_known_input() {
        assert_eq!(
            compute_checksum(b"hello world"),
            "sha256:b94d27b9934d3e08a52e52d7da7dabfac484efe37a5380ee9088f7ace2efcde9"
        );
    }

    #[test]
    fn verify_detects_tampering() {
        let checksum = compute_checksum(b"settings");
        assert!(verify_checksum(b"settings", &checksum));
        assert!(!verify_checksum(b"settingz", &checksum));
    }

    #[test]
    fn verify_rejects_foreign_algorithms() {
        assert!(!verify_checksum(b"settings", "md5:abc"));
        assert!(!verify_checksum(b"settings", ""));
    }
}

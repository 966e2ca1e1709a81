//! Password storage and verification.
//!
//! The original service compared cleartext passwords; stored credentials here
//! are a salted SHA-256 digest in the form `v1$<salt>$<hex digest>` and every
//! check (login, catalog delete, profile update) goes through [`verify_password`].

use sha2::{Digest, Sha256};
use uuid::Uuid;

const SCHEME: &str = "v1";

/// Hash a password with a fresh random salt.
pub fn hash_password(password: &str) -> String {
    let salt = Uuid::new_v4().simple().to_string();
    format!("{}${}${}", SCHEME, salt, digest_hex(&salt, password))
}

/// Verify a password against a stored `v1$salt$hex` credential.
///
/// Returns false on any malformed stored value rather than erroring; a bad
/// row reads as a failed login, not a 500.
pub fn verify_password(password: &str, stored: &str) -> bool {
    let mut parts = stored.splitn(3, '$');
    let (scheme, salt, expected) = match (parts.next(), parts.next(), parts.next()) {
        (Some(scheme), Some(salt), Some(hex)) => (scheme, salt, hex),
        _ => return false,
    };
    if scheme != SCHEME {
        return false;
    }
    constant_time_eq(digest_hex(salt, password).as_bytes(), expected.as_bytes())
}

fn digest_hex(salt: &str, password: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(salt.as_bytes());
    hasher.update(b"$");
    hasher.update(password.as_bytes());
    let digest = hasher.finalize();
    digest.iter().map(|b| format!("{:02x}", b)).collect()
}

/// Length-checked, branchless byte comparison.
fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.iter().zip(b.iter()).fold(0u8, |acc, (x, y)| acc | (x ^ y)) == 0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_a_password() {
        let stored = hash_password("hunter2");
        assert!(verify_password("hunter2", &stored));
        assert!(!verify_password("hunter3", &stored));
    }

    #[test]
    fn salts_differ_between_hashes() {
        let a = hash_password("same");
        let b = hash_password("same");
        assert_ne!(a, b);
        assert!(verify_password("same", &a));
        assert!(verify_password("same", &b));
    }

    #[test]
    fn rejects_malformed_stored_values() {
        assert!(!verify_password("x", ""));
        assert!(!verify_password("x", "not-a-credential"));
        assert!(!verify_password("x", "v2$salt$deadbeef"));
    }

    #[test]
    fn constant_time_eq_basics() {
        assert!(constant_time_eq(b"abc", b"abc"));
        assert!(!constant_time_eq(b"abc", b"abd"));
        assert!(!constant_time_eq(b"abc", b"abcd"));
    }
}

use sha1::{Digest, Sha1};

/// Hash a password in the legacy format of the old member site:
/// SHA1 over the raw bytes of SHA1(password), rendered as a `*`-prefixed
/// uppercase hex digest. Stored credentials from the old system only
/// verify against this exact two-round construction, so hashing the
/// first-round hex text instead of its raw bytes would break every
/// existing account.
pub fn hash_password(password: &str) -> String {
    let first = Sha1::digest(password.as_bytes());
    let second = Sha1::digest(first);
    format!("*{}", hex::encode_upper(second))
}

/// Verify a password against a stored hash. The `*` prefix is optional
/// on both sides and hex case is ignored. Any mismatch, including an
/// empty or malformed stored hash, is a plain `false`.
pub fn verify_password(password: &str, stored_hash: &str) -> bool {
    let stored = stored_hash.strip_prefix('*').unwrap_or(stored_hash);
    let hashed = hash_password(password);
    let hashed = hashed.strip_prefix('*').unwrap_or(&hashed);
    hashed.eq_ignore_ascii_case(stored)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_round_digest() {
        // Reference vector for the inner digest
        let first = Sha1::digest("password".as_bytes());
        assert_eq!(
            hex::encode(first),
            "5baa61e4c9b93f3f0682250b6cf8331b7ee68fd8"
        );
    }

    #[test]
    fn test_hash_password_golden() {
        // Known output of the old system for "password"
        assert_eq!(
            hash_password("password"),
            "*2470C0C06DEE42FD1618BB99005ADCA2EC9D1E19"
        );
    }

    #[test]
    fn test_hash_password_deterministic() {
        assert_eq!(hash_password("halyard"), hash_password("halyard"));
        assert_eq!(hash_password(""), hash_password(""));
    }

    #[test]
    fn test_verify_roundtrip() {
        for password in ["password", "hunter2", "", "päßword"] {
            assert!(verify_password(password, &hash_password(password)));
        }
    }

    #[test]
    fn test_verify_case_insensitive() {
        let hash = hash_password("password").to_lowercase();
        assert!(verify_password("password", &hash));
    }

    #[test]
    fn test_verify_without_prefix() {
        let hash = hash_password("password");
        assert!(verify_password("password", hash.trim_start_matches('*')));
    }

    #[test]
    fn test_verify_wrong_hash() {
        assert!(!verify_password(
            "password",
            "*0000000000000000000000000000000000000000"
        ));
        assert!(!verify_password("password", &hash_password("passw0rd")));
    }

    #[test]
    fn test_verify_malformed_stored_hash() {
        assert!(!verify_password("password", ""));
        assert!(!verify_password("password", "*"));
        assert!(!verify_password("password", "not a hash"));
    }
}

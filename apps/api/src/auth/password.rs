//! Argon2id password hashing, verification, and the password policy.
//!
//! Hashes use the Argon2id variant with a random salt via [`OsRng`] and are
//! stored in PHC string format, so parameters and salt travel with the hash.

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::Argon2;

use crate::errors::FieldErrors;

/// A well-formed Argon2id hash that matches no password. Login verifies
/// against it when the email is unknown, so both miss paths cost the same
/// and response timing does not reveal which emails have accounts.
pub const DUMMY_HASH: &str = "$argon2id$v=19$m=19456,t=2,p=1$AAAAAAAAAAAAAAAAAAAAAA$AAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAA";

/// Hashes a plaintext password, returning the PHC-formatted string.
pub fn hash_password(password: &str) -> Result<String, argon2::password_hash::Error> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default(); // Argon2id with default params
    let hash = argon2.hash_password(password.as_bytes(), &salt)?;
    Ok(hash.to_string())
}

/// Verifies a plaintext password against a stored PHC hash.
/// Returns `Ok(false)` on mismatch; only malformed hashes error.
pub fn verify_password(password: &str, hash: &str) -> Result<bool, argon2::password_hash::Error> {
    let parsed_hash = PasswordHash::new(hash)?;
    match Argon2::default().verify_password(password.as_bytes(), &parsed_hash) {
        Ok(()) => Ok(true),
        Err(argon2::password_hash::Error::Password) => Ok(false),
        Err(e) => Err(e),
    }
}

/// Password policy: at least 8 characters, one uppercase, one lowercase, one
/// digit. Each unmet requirement gets its own key in the returned map.
pub fn validate_password(password: &str) -> FieldErrors {
    let mut errors = FieldErrors::new();

    if password.chars().count() < 8 {
        errors.insert(
            "length".into(),
            "Password must be at least 8 characters".into(),
        );
    }
    if !password.chars().any(|c| c.is_ascii_uppercase()) {
        errors.insert(
            "uppercase".into(),
            "Password must contain at least one uppercase letter".into(),
        );
    }
    if !password.chars().any(|c| c.is_ascii_lowercase()) {
        errors.insert(
            "lowercase".into(),
            "Password must contain at least one lowercase letter".into(),
        );
    }
    if !password.chars().any(|c| c.is_ascii_digit()) {
        errors.insert(
            "number".into(),
            "Password must contain at least one number".into(),
        );
    }

    errors
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_and_verify_roundtrip() {
        let password = "Correct-horse-7";
        let hash = hash_password(password).expect("hashing succeeds");
        assert!(hash.starts_with("$argon2id$"), "expected argon2id PHC prefix");

        assert!(verify_password(password, &hash).expect("verify succeeds"));
        assert!(!verify_password("Wrong-horse-7", &hash).expect("verify succeeds"));
    }

    #[test]
    fn dummy_hash_parses_and_never_matches() {
        assert!(!verify_password("Sup3rSecret", DUMMY_HASH).expect("dummy hash parses"));
        assert!(!verify_password("", DUMMY_HASH).expect("dummy hash parses"));
    }

    #[test]
    fn short_password_is_rejected() {
        let errors = validate_password("Ab1");
        assert_eq!(
            errors.get("length").map(String::as_str),
            Some("Password must be at least 8 characters")
        );
    }

    #[test]
    fn each_missing_class_gets_its_own_key() {
        let errors = validate_password("alllowercase");
        assert!(errors.contains_key("uppercase"));
        assert!(errors.contains_key("number"));
        assert!(!errors.contains_key("lowercase"));
        assert!(!errors.contains_key("length"));
    }

    #[test]
    fn conforming_password_passes() {
        assert!(validate_password("Sup3rSecret").is_empty());
    }
}

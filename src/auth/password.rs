use argon2::password_hash::{
    rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString,
};
use argon2::Argon2;

use crate::error::{hash_error, Error};

pub fn hash(password: &str) -> Result<String, Error> {
    let salt = SaltString::generate(&mut OsRng);

    let hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(hash_error)?;

    Ok(hash.to_string())
}

pub fn verify(password: &str, hash: &str) -> bool {
    let Ok(parsed) = PasswordHash::new(hash) else {
        return false;
    };

    Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok()
}

#[test]
fn hash_round_trip() {
    let hashed = hash("correct horse").unwrap();

    assert!(verify("correct horse", &hashed));
    assert!(!verify("wrong horse", &hashed));
}

#[test]
fn malformed_hash_never_verifies() {
    assert!(!verify("anything", "not-a-phc-string"));
}

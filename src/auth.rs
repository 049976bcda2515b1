//! Credential verification.
//!
//! Passwords are stored as argon2id PHC strings with a random salt; the hash
//! embeds its own parameters, so verification needs no extra configuration.
//! Lookup is by exact, case-sensitive username.

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::Argon2;
use tracing::debug;

use crate::account::Account;
use crate::error::{Error, Result};
use crate::store::Repository;

/// Hash a plaintext password with argon2id and a fresh random salt.
pub fn hash_password(password: &str) -> Result<String> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|err| Error::OperationFailed(format!("password hashing failed: {err}")))?;
    Ok(hash.to_string())
}

/// Verify a plaintext password against a stored PHC string.
pub fn verify_password(password: &str, hash: &str) -> Result<bool> {
    let parsed = PasswordHash::new(hash)
        .map_err(|err| Error::OperationFailed(format!("stored password hash is invalid: {err}")))?;
    match Argon2::default().verify_password(password.as_bytes(), &parsed) {
        Ok(()) => Ok(true),
        Err(argon2::password_hash::Error::Password) => Ok(false),
        Err(err) => Err(Error::OperationFailed(format!(
            "password verification failed: {err}"
        ))),
    }
}

/// Minimum-length check for new passwords.
pub fn validate_password(password: &str, min_len: usize) -> Result<()> {
    if password.len() < min_len {
        return Err(Error::InvalidArgument(format!(
            "password must be at least {min_len} characters"
        )));
    }
    Ok(())
}

/// Verify a username/password pair against the accounts collection.
///
/// A missing account and a wrong password both yield `InvalidCredentials`;
/// the caller cannot distinguish them. Store failures propagate as-is so a
/// broken accounts collection is never mistaken for bad credentials.
pub fn authenticate<R: Repository>(repo: &R, username: &str, password: &str) -> Result<Account> {
    let accounts = repo.load_accounts()?;
    let account = accounts
        .into_iter()
        .find(|account| account.username == username)
        .ok_or(Error::InvalidCredentials)?;
    if !verify_password(password, &account.password)? {
        debug!(username, "password mismatch");
        return Err(Error::InvalidCredentials);
    }
    Ok(account)
}

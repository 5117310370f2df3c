use crate::modules::security::keys::{derive_key_from_passphrase, generate_random_salt};
use crate::PASSWORD_HASH_ITERATIONS;

/// Scheme tag at the front of every encoded password hash
pub const HASH_SCHEME: &str = "pbkdf2-sha256";

/// Outcome of checking a password against a stored value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PasswordMatch {
    /// Matched an encoded hash
    Hashed,
    /// Matched a plaintext value written by an older version
    Legacy,
    Mismatch,
}

/// A parsed `pbkdf2-sha256$<iterations>$<salt>$<hash>` value
struct EncodedHash {
    iterations: u32,
    salt: Vec<u8>,
    hash: Vec<u8>,
}

impl EncodedHash {
    fn parse(stored: &str) -> Option<Self> {
        let mut parts = stored.split('$');
        if parts.next()? != HASH_SCHEME {
            return None;
        }
        let iterations = parts.next()?.parse::<u32>().ok()?;
        let salt = hex::decode(parts.next()?).ok()?;
        let hash = hex::decode(parts.next()?).ok()?;
        if parts.next().is_some() || iterations == 0 || hash.is_empty() {
            return None;
        }
        Some(Self {
            iterations,
            salt,
            hash,
        })
    }
}

/// Hash a password with a fresh random salt
pub fn hash_password(password: &str) -> String {
    hash_password_with(password, &generate_random_salt(), PASSWORD_HASH_ITERATIONS)
}

/// Hash a password with an explicit salt and iteration count
pub fn hash_password_with(password: &str, salt: &[u8], iterations: u32) -> String {
    let key = derive_key_from_passphrase(password, salt, iterations);
    format!(
        "{}${}${}${}",
        HASH_SCHEME,
        iterations,
        hex::encode(salt),
        hex::encode(key)
    )
}

/// Values that do not parse as an encoded hash are plaintext from before hashing was introduced
pub fn is_legacy_plaintext(stored: &str) -> bool {
    EncodedHash::parse(stored).is_none()
}

/// Check a candidate password against the stored value
pub fn verify_password(password: &str, stored: &str) -> PasswordMatch {
    match EncodedHash::parse(stored) {
        Some(encoded) => {
            let candidate = derive_key_from_passphrase(password, &encoded.salt, encoded.iterations);
            if constant_time_eq(&candidate, &encoded.hash) {
                PasswordMatch::Hashed
            } else {
                PasswordMatch::Mismatch
            }
        }
        None if constant_time_eq(password.as_bytes(), stored.as_bytes()) => PasswordMatch::Legacy,
        None => PasswordMatch::Mismatch,
    }
}

fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    a.len() == b.len() && a.iter().zip(b).fold(0u8, |acc, (x, y)| acc | (x ^ y)) == 0
}

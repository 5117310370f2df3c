use crate::HmacSha256;
use pbkdf2::pbkdf2;
use rand::Rng;

/// Length in bytes of a freshly generated salt
pub const SALT_LEN: usize = 16;

/// Length in bytes of a derived key
pub const KEY_LEN: usize = 32;

/// Function to generate a random salt for PBKDF2
pub fn generate_random_salt() -> Vec<u8> {
    let mut rng = rand::thread_rng();
    (0..SALT_LEN).map(|_| rng.gen()).collect()
}

/// Function to derive a 32-byte key from the passphrase using PBKDF2
pub fn derive_key_from_passphrase(passphrase: &str, salt: &[u8], iterations: u32) -> Vec<u8> {
    let mut key = vec![0u8; KEY_LEN];

    pbkdf2::<HmacSha256>(passphrase.as_bytes(), salt, iterations.max(1), &mut key);

    key
}

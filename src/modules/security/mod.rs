pub mod keys;

pub use keys::{derive_key_from_passphrase, generate_random_salt, SALT_LEN};

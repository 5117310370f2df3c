pub mod password;
pub mod store;
pub mod user_interface;

// Re-export the main types and functions
pub use password::{hash_password, verify_password, PasswordMatch};
pub use store::{load_user_store, save_user_store, CredentialCheck, StoreError, UserRecord, UserStore};
pub use user_interface::{create_account, login};

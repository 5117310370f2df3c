use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::io::{self, Write};
use std::path::Path;
use tempfile::NamedTempFile;
use thiserror::Error;

use super::password::{hash_password, verify_password, PasswordMatch};

/// Errors raised while reading or writing the user store
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Serialization error: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("Username '{0}' already exists")]
    UserExists(String),

    #[error("User '{0}' not found")]
    UnknownUser(String),
}

/// Stored password and image list for one username
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct UserRecord {
    pub password: String, // Encoded PBKDF2 hash, or plaintext for legacy records
    #[serde(default)]
    pub images: Vec<String>,
}

/// Result of checking a username/password pair against the store
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CredentialCheck {
    Valid,
    /// Valid, and a legacy plaintext password was replaced by a hash in memory
    Upgraded,
    UnknownUser,
    WrongPassword,
}

impl CredentialCheck {
    pub fn is_valid(&self) -> bool {
        matches!(self, CredentialCheck::Valid | CredentialCheck::Upgraded)
    }
}

/// The full username -> record mapping, serialized as a bare JSON object
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(transparent)]
pub struct UserStore {
    pub users: BTreeMap<String, UserRecord>,
}

impl UserStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, username: &str) -> bool {
        self.users.contains_key(username)
    }

    pub fn get(&self, username: &str) -> Option<&UserRecord> {
        self.users.get(username)
    }

    /// Function to add a new user with an empty image list
    ///
    /// Usernames are case-sensitive. An existing record is never overwritten.
    pub fn add_user(&mut self, username: &str, password: &str) -> Result<(), StoreError> {
        if self.users.contains_key(username) {
            return Err(StoreError::UserExists(username.to_string()));
        }

        let user = UserRecord {
            password: hash_password(password),
            images: Vec::new(),
        };
        self.users.insert(username.to_string(), user);

        Ok(())
    }

    /// Check credentials, upgrading a matching legacy plaintext password to a hash
    ///
    /// The upgrade only touches memory; the caller decides when to save.
    pub fn verify_credentials(&mut self, username: &str, password: &str) -> CredentialCheck {
        let user = match self.users.get_mut(username) {
            Some(user) => user,
            None => return CredentialCheck::UnknownUser,
        };

        match verify_password(password, &user.password) {
            PasswordMatch::Hashed => CredentialCheck::Valid,
            PasswordMatch::Legacy => {
                user.password = hash_password(password);
                CredentialCheck::Upgraded
            }
            PasswordMatch::Mismatch => CredentialCheck::WrongPassword,
        }
    }

    pub fn images(&self, username: &str) -> Option<&[String]> {
        self.users.get(username).map(|user| user.images.as_slice())
    }

    /// Replace a user's image list
    pub fn set_images(&mut self, username: &str, images: Vec<String>) -> Result<(), StoreError> {
        match self.users.get_mut(username) {
            Some(user) => {
                user.images = images;
                Ok(())
            }
            None => Err(StoreError::UnknownUser(username.to_string())),
        }
    }

    /// Serialize with 4-space indentation
    pub fn to_pretty_json(&self) -> Result<Vec<u8>, serde_json::Error> {
        let mut buffer = Vec::new();
        let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
        let mut serializer = serde_json::Serializer::with_formatter(&mut buffer, formatter);
        self.serialize(&mut serializer)?;
        Ok(buffer)
    }
}

/// Load the user store, treating a missing or malformed file as empty
pub fn load_user_store(path: &Path) -> UserStore {
    let data = match fs::read_to_string(path) {
        Ok(data) => data,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            log::debug!("No user data at {}, starting empty", path.display());
            return UserStore::new();
        }
        Err(e) => {
            log::warn!("Could not read {}: {}", path.display(), e);
            return UserStore::new();
        }
    };

    match serde_json::from_str(&data) {
        Ok(store) => store,
        Err(e) => {
            log::warn!("Ignoring malformed user data in {}: {}", path.display(), e);
            UserStore::new()
        }
    }
}

/// Save the whole store, replacing the file atomically
pub fn save_user_store(store: &UserStore, path: &Path) -> Result<(), StoreError> {
    let data = store.to_pretty_json()?;

    // The temp file must share a filesystem with the target for the rename
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut file = NamedTempFile::new_in(dir)?;
    file.write_all(&data)?;
    file.as_file().sync_all()?;
    file.persist(path).map_err(|e| e.error)?;

    log::debug!("Saved {} user(s) to {}", store.users.len(), path.display());
    Ok(())
}

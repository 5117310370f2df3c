use std::path::Path;
use thiserror::Error;

use crate::modules::auth::store::{save_user_store, StoreError, UserStore};
use crate::IMAGE_EXTENSIONS;

/// Reasons an upload is refused; the messages are shown to the user as-is
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum UploadError {
    #[error("File does not exist. Try again.")]
    NotFound(String),

    #[error("Only image files (.jpg, .jpeg, .png, .gif) are allowed.")]
    UnsupportedExtension(String),
}

/// Function to check whether a path names an accepted image type
pub fn has_image_extension(path: &str) -> bool {
    let lowered = path.to_lowercase();
    IMAGE_EXTENSIONS.iter().any(|ext| lowered.ends_with(ext))
}

/// Existence is checked before the extension
pub fn validate_upload(path: &str) -> Result<(), UploadError> {
    if !Path::new(path).is_file() {
        return Err(UploadError::NotFound(path.to_string()));
    }
    if !has_image_extension(path) {
        return Err(UploadError::UnsupportedExtension(path.to_string()));
    }
    Ok(())
}

/// The logged-in user's ordered image list for one session
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageRegistry {
    username: String,
    images: Vec<String>,
}

impl ImageRegistry {
    /// Start a session from the user's stored list (empty if the user is unknown)
    pub fn for_user(store: &UserStore, username: &str) -> Self {
        Self {
            username: username.to_string(),
            images: store.images(username).map(<[String]>::to_vec).unwrap_or_default(),
        }
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn images(&self) -> &[String] {
        &self.images
    }

    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }

    pub fn len(&self) -> usize {
        self.images.len()
    }

    /// 1-based lookup, matching the numbered listing
    pub fn get(&self, number: usize) -> Option<&String> {
        number.checked_sub(1).and_then(|index| self.images.get(index))
    }

    /// Validate and append a path; duplicates are allowed
    pub fn add(&mut self, path: &str) -> Result<(), UploadError> {
        validate_upload(path)?;
        self.images.push(path.to_string());
        Ok(())
    }

    /// Remove by 1-based number, returning the removed path
    pub fn remove(&mut self, number: usize) -> Option<String> {
        if number == 0 || number > self.images.len() {
            return None;
        }
        Some(self.images.remove(number - 1))
    }

    /// Drop the most recent addition, used when it could not be saved
    pub fn pop(&mut self) -> Option<String> {
        self.images.pop()
    }

    /// Put a path back at a 1-based position, clamped to the end of the list
    pub fn restore(&mut self, number: usize, path: String) {
        let index = number.saturating_sub(1).min(self.images.len());
        self.images.insert(index, path);
    }

    /// Numbered lines for display, starting at 1
    pub fn numbered(&self) -> impl Iterator<Item = String> + '_ {
        self.images
            .iter()
            .enumerate()
            .map(|(idx, img)| format!("{}. {}", idx + 1, img))
    }

    /// Write this session's list into the store and save it
    ///
    /// On a failed save the store keeps its previous list.
    pub fn persist(&self, store: &mut UserStore, data_file: &Path) -> Result<(), StoreError> {
        let previous = match store.images(&self.username) {
            Some(images) => images.to_vec(),
            None => return Err(StoreError::UnknownUser(self.username.clone())),
        };

        store.set_images(&self.username, self.images.clone())?;
        if let Err(e) = save_user_store(store, data_file) {
            store.set_images(&self.username, previous)?;
            return Err(e);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::auth::store::{load_user_store, UserRecord};
    use std::fs;
    use tempfile::{tempdir, TempDir};

    fn touch(dir: &TempDir, name: &str) -> String {
        let path = dir.path().join(name);
        fs::write(&path, b"data").unwrap();
        path.to_str().unwrap().to_string()
    }

    fn store_with(username: &str, images: &[&str]) -> UserStore {
        let mut store = UserStore::new();
        store.users.insert(
            username.to_string(),
            UserRecord {
                password: "pw".to_string(),
                images: images.iter().map(|s| s.to_string()).collect(),
            },
        );
        store
    }

    #[test]
    fn test_extension_check() {
        assert!(has_image_extension("a.jpg"));
        assert!(has_image_extension("dir/B.JPEG"));
        assert!(has_image_extension("c.Png"));
        assert!(has_image_extension("d.gif"));
        assert!(!has_image_extension("a.txt"));
        assert!(!has_image_extension("jpg"));
        assert!(!has_image_extension("photo.jpg.bak"));
    }

    #[test]
    fn test_disallowed_extension_not_added() {
        let dir = tempdir().unwrap();
        let text = touch(&dir, "a.txt");
        let mut registry = ImageRegistry::for_user(&store_with("alice", &[]), "alice");

        assert_eq!(
            registry.add(&text),
            Err(UploadError::UnsupportedExtension(text.clone()))
        );
        assert!(registry.is_empty());
    }

    #[test]
    fn test_missing_file_not_added() {
        let dir = tempdir().unwrap();
        let missing = dir.path().join("ghost.png").to_str().unwrap().to_string();
        let mut registry = ImageRegistry::for_user(&store_with("alice", &[]), "alice");

        assert_eq!(registry.add(&missing), Err(UploadError::NotFound(missing.clone())));
        // A directory is not an image file, whatever its name
        let folder = dir.path().join("album.png");
        fs::create_dir(&folder).unwrap();
        assert!(registry.add(folder.to_str().unwrap()).is_err());
        assert!(registry.is_empty());
    }

    #[test]
    fn test_add_keeps_order() {
        let dir = tempdir().unwrap();
        let first = touch(&dir, "1.png");
        let second = touch(&dir, "2.GIF");
        let mut registry = ImageRegistry::for_user(&store_with("alice", &[]), "alice");

        registry.add(&first).unwrap();
        registry.add(&second).unwrap();
        registry.add(&first).unwrap();

        assert_eq!(registry.images(), &[first.clone(), second.clone(), first.clone()]);
        let lines: Vec<String> = registry.numbered().collect();
        assert_eq!(lines[0], format!("1. {}", first));
        assert_eq!(lines[2], format!("3. {}", first));
    }

    #[test]
    fn test_remove_first_of_two() {
        let store = store_with("alice", &["one.png", "two.png"]);
        let mut registry = ImageRegistry::for_user(&store, "alice");

        assert_eq!(registry.get(1), Some(&"one.png".to_string()));
        assert_eq!(registry.remove(1), Some("one.png".to_string()));
        assert_eq!(registry.images(), &["two.png".to_string()]);
    }

    #[test]
    fn test_remove_out_of_range() {
        let store = store_with("alice", &["one.png"]);
        let mut registry = ImageRegistry::for_user(&store, "alice");

        assert_eq!(registry.remove(0), None);
        assert_eq!(registry.remove(2), None);
        assert_eq!(registry.get(0), None);
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_pop_and_restore_undo_changes() {
        let store = store_with("alice", &["one.png", "two.png", "three.png"]);
        let mut registry = ImageRegistry::for_user(&store, "alice");

        let removed = registry.remove(2).unwrap();
        registry.restore(2, removed);
        assert_eq!(registry.get(2), Some(&"two.png".to_string()));

        registry.restore(10, "four.png".to_string());
        assert_eq!(registry.pop(), Some("four.png".to_string()));
        assert_eq!(registry.len(), 3);
    }

    #[test]
    fn test_persist_writes_through_store() {
        let dir = tempdir().unwrap();
        let data_file = dir.path().join("user_data.json");
        let image = touch(&dir, "cat.jpeg");

        let mut store = store_with("alice", &[]);
        store.users.insert(
            "bob".to_string(),
            UserRecord {
                password: "pw".to_string(),
                images: vec!["b.png".to_string()],
            },
        );

        let mut registry = ImageRegistry::for_user(&store, "alice");
        registry.add(&image).unwrap();
        registry.persist(&mut store, &data_file).unwrap();

        let reloaded = load_user_store(&data_file);
        assert_eq!(reloaded.images("alice"), Some(&[image][..]));
        assert_eq!(reloaded.images("bob"), Some(&["b.png".to_string()][..]));
    }

    #[test]
    fn test_failed_persist_leaves_store_unchanged() {
        let dir = tempdir().unwrap();
        let data_file = dir.path().join("missing-dir/user_data.json");
        let image = touch(&dir, "dog.png");

        let mut store = store_with("alice", &["old.gif"]);
        let mut registry = ImageRegistry::for_user(&store, "alice");
        registry.add(&image).unwrap();

        assert!(matches!(
            registry.persist(&mut store, &data_file),
            Err(StoreError::Io(_))
        ));
        assert_eq!(store.images("alice"), Some(&["old.gif".to_string()][..]));
    }

    #[test]
    fn test_persist_unknown_user_fails() {
        let dir = tempdir().unwrap();
        let data_file = dir.path().join("user_data.json");
        let mut store = UserStore::new();

        let registry = ImageRegistry::for_user(&store, "nobody");
        assert!(registry.is_empty());
        assert!(matches!(
            registry.persist(&mut store, &data_file),
            Err(StoreError::UnknownUser(_))
        ));
        assert!(!data_file.exists());
    }
}

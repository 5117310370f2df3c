use env_logger::{Builder, WriteStyle};
use log::{error, info, warn, LevelFilter};
use std::fs::OpenOptions;
use std::path::Path;

/// Initialize the logging system, writing to a file so prompts stay clean
pub fn initialize_logging(
    log_file: &Path,
    level: LevelFilter,
) -> Result<(), Box<dyn std::error::Error>> {
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_file)?;

    Builder::new()
        .filter_level(level)
        .format_timestamp_secs()
        .format_module_path(true)
        .write_style(WriteStyle::Never)
        .target(env_logger::Target::Pipe(Box::new(file)))
        .try_init()?;

    info!("Logging system initialized");
    Ok(())
}

/// Mask all but the first and last two characters of a username
fn mask_username(username: &str) -> String {
    let chars: Vec<char> = username.chars().collect();
    if chars.len() <= 4 {
        return "*".repeat(chars.len());
    }
    let head: String = chars[..2].iter().collect();
    let tail: String = chars[chars.len() - 2..].iter().collect();
    format!("{}***{}", head, tail)
}

fn local_time() -> String {
    chrono::Local::now().format("%Y-%m-%d %H:%M:%S").to_string()
}

/// Kinds of change made to a user's image list
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageChange {
    Upload,
    Delete,
}

impl ImageChange {
    pub fn as_str(&self) -> &'static str {
        match self {
            ImageChange::Upload => "upload",
            ImageChange::Delete => "delete",
        }
    }
}

/// Login, logout, registration and password-upgrade events
pub fn log_auth_event(action: &str, username: &str, success: bool, note: Option<&str>) {
    let user = mask_username(username);
    if success {
        info!("account {}: user={} at {}", action, user, local_time());
    } else {
        warn!(
            "account {} refused: user={} at {} ({})",
            action,
            user,
            local_time(),
            note.unwrap_or("no reason given")
        );
    }
}

/// A change to a user's image list; `image_count` is the list length after the change
///
/// `failure` carries the save error when the change could not be written.
pub fn log_image_change(
    change: ImageChange,
    username: &str,
    image: &str,
    image_count: usize,
    failure: Option<&str>,
) {
    let user = mask_username(username);
    match failure {
        None => info!(
            "image {}: user={} image={} images={} at {}",
            change.as_str(),
            user,
            image,
            image_count,
            local_time()
        ),
        Some(reason) => error!(
            "image {} not saved: user={} image={} images={} at {}: {}",
            change.as_str(),
            user,
            image,
            image_count,
            local_time(),
            reason
        ),
    }
}

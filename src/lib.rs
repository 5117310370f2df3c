// First, declare the modules folder itself
mod modules;

// Re-export everything from modules for easier access
pub use modules::{
    auth,
    config,
    images,
    security,
    shell,
    utils,
};

// Re-export commonly used types
pub use modules::auth::store::{UserRecord, UserStore};
pub use modules::config::AppConfig;
pub use modules::images::registry::ImageRegistry;
pub use modules::utils::errors::AppError;

// Constants
pub const USER_DATA_FILE: &str = "user_data.json";
pub const LOG_FILE: &str = "image_manager.log";
pub const IMAGE_EXTENSIONS: [&str; 4] = [".jpg", ".jpeg", ".png", ".gif"];
pub const PASSWORD_HASH_ITERATIONS: u32 = 100_000;

// Type aliases
pub type HmacSha256 = hmac::Hmac<sha2::Sha256>;

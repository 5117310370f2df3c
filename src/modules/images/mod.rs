pub mod registry;
pub mod user_interface;

pub use registry::{has_image_extension, validate_upload, ImageRegistry, UploadError};

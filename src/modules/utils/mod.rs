pub mod errors;
pub mod io;
pub mod logging;

pub use errors::AppError;
pub use io::Console;

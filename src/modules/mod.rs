// Declare all modules
pub mod auth;
pub mod config;
pub mod images;
pub mod security;
pub mod shell;
pub mod utils;

// No re-exports here as they're handled in lib.rs

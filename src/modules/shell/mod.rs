pub mod menu;

use std::io::{BufRead, Write};
use std::path::Path;

use crate::modules::auth::store::UserStore;
use crate::modules::auth::user_interface::login;
use crate::modules::images::registry::ImageRegistry;
use crate::modules::images::user_interface::{handle_delete, handle_upload, handle_view};
use crate::modules::utils::errors::AppError;
use crate::modules::utils::io::Console;
use crate::modules::utils::logging::log_auth_event;
use menu::{display_help, display_main_menu, MenuChoice};

/// How a logged-in session ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEnd {
    Logout,
    Exit,
}

/// Run the program: login, session, and back to login until Exit or end of input
pub fn run<R: BufRead, W: Write>(
    console: &mut Console<R, W>,
    data_file: &Path,
) -> Result<(), AppError> {
    match run_until_exit(console, data_file) {
        Err(e) if e.is_input_closed() => {
            log::info!("Input closed, shutting down");
            console.say("\nInput closed. Exiting...")?;
            Ok(())
        }
        other => other,
    }
}

fn run_until_exit<R: BufRead, W: Write>(
    console: &mut Console<R, W>,
    data_file: &Path,
) -> Result<(), AppError> {
    loop {
        let (username, mut store) = login(console, data_file)?;
        match run_session(console, &mut store, data_file, &username)? {
            SessionEnd::Logout => continue,
            SessionEnd::Exit => return Ok(()),
        }
    }
}

/// Main menu loop for one logged-in user
pub fn run_session<R: BufRead, W: Write>(
    console: &mut Console<R, W>,
    store: &mut UserStore,
    data_file: &Path,
    username: &str,
) -> Result<SessionEnd, AppError> {
    let mut registry = ImageRegistry::for_user(store, username);

    loop {
        display_main_menu(console)?;
        let choice = console.prompt("Enter choice (1-6): ")?;

        match MenuChoice::parse(&choice) {
            Some(MenuChoice::Upload) => handle_upload(console, &mut registry, store, data_file)?,
            Some(MenuChoice::View) => handle_view(console, &mut registry, store, data_file)?,
            Some(MenuChoice::Delete) => handle_delete(console, &mut registry, store, data_file)?,
            Some(MenuChoice::Help) => display_help(console)?,
            Some(MenuChoice::Logout) => {
                log_auth_event("logout", username, true, None);
                console.say("Logging out...")?;
                return Ok(SessionEnd::Logout);
            }
            Some(MenuChoice::Exit) => {
                console.say("Exiting...")?;
                if let Err(e) = registry.persist(store, data_file) {
                    log::error!("Failed to save images on exit: {}", e);
                    console.say(format_args!("Error saving images: {}", e))?;
                }
                return Ok(SessionEnd::Exit);
            }
            None => console.say("Invalid choice.")?,
        }
    }
}

// src/modules/auth/user_interface.rs
use std::io::{self, BufRead, Write};
use std::path::Path;

use super::store::{load_user_store, save_user_store, CredentialCheck, UserStore};
use crate::modules::utils::io::Console;
use crate::modules::utils::logging::log_auth_event;

/// Interactive account registration
///
/// Returns `true` when an account was created and saved, `false` when the user
/// typed 'back' or the save failed. Either way the caller goes back to login.
pub fn create_account<R: BufRead, W: Write>(
    console: &mut Console<R, W>,
    store: &mut UserStore,
    data_file: &Path,
) -> io::Result<bool> {
    console.say("Creating new account. Enter 'back' anytime to cancel.")?;

    loop {
        let username = console.prompt("Choose username: ")?;
        if username.eq_ignore_ascii_case("back") {
            return Ok(false);
        }
        if username.is_empty() {
            console.say("Username cannot be empty.")?;
            continue;
        }
        if store.contains(&username) {
            log_auth_event("register", &username, false, Some("username exists"));
            console.say("Username exists. Choose another.")?;
            continue;
        }

        let password = console.prompt_password("Choose password: ")?;
        let confirm = console.prompt_password("Confirm password: ")?;
        if password != confirm {
            console.say("Passwords do not match.")?;
            continue;
        }

        if let Err(e) = store.add_user(&username, &password) {
            console.say(e)?;
            continue;
        }

        return match save_user_store(store, data_file) {
            Ok(()) => {
                log_auth_event("register", &username, true, None);
                console.say("Account created!")?;
                Ok(true)
            }
            Err(e) => {
                // Keep memory in line with what is on disk
                store.users.remove(&username);
                log_auth_event("register", &username, false, Some(&e.to_string()));
                console.say(format_args!("Could not save account: {}", e))?;
                Ok(false)
            }
        };
    }
}

/// Interactive login loop
///
/// Loops until valid credentials are entered, detouring through registration
/// when the user types 'new'. Returns the username and the store it was
/// checked against.
pub fn login<R: BufRead, W: Write>(
    console: &mut Console<R, W>,
    data_file: &Path,
) -> io::Result<(String, UserStore)> {
    loop {
        let mut store = load_user_store(data_file);

        console.say("Welcome! Type your username to login or type 'new' to create an account.")?;
        let username = console.prompt("Username: ")?;

        if username.eq_ignore_ascii_case("new") {
            create_account(console, &mut store, data_file)?;
            continue;
        }

        if !store.contains(&username) {
            log_auth_event("login", &username, false, Some("unknown username"));
            console.say("Username not found. Try again.")?;
            continue;
        }

        let password = console.prompt_password("Password: ")?;
        let check = store.verify_credentials(&username, &password);
        if !check.is_valid() {
            // The store was just loaded and holds the name, so this is a bad password
            log_auth_event("login", &username, false, Some("incorrect password"));
            console.say("Incorrect password.")?;
            continue;
        }

        if check == CredentialCheck::Upgraded {
            if let Err(e) = save_user_store(&store, data_file) {
                log::warn!("Could not save upgraded password hash: {}", e);
            } else {
                log_auth_event("password_upgrade", &username, true, None);
            }
        }

        log_auth_event("login", &username, true, None);
        console.say(format_args!("Welcome, {}!", username))?;
        return Ok((username, store));
    }
}

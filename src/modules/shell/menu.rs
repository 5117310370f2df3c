use std::io::{self, BufRead, Write};

use crate::modules::utils::io::Console;

/// Entries of the logged-in main menu
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    Upload,
    View,
    Delete,
    Help,
    Logout,
    Exit,
}

impl MenuChoice {
    /// Accepts the entry number or its name
    pub fn parse(input: &str) -> Option<Self> {
        match input.trim().to_lowercase().as_str() {
            "1" | "upload" => Some(MenuChoice::Upload),
            "2" | "view" => Some(MenuChoice::View),
            "3" | "delete" => Some(MenuChoice::Delete),
            "4" | "help" => Some(MenuChoice::Help),
            "5" | "logout" => Some(MenuChoice::Logout),
            "6" | "exit" => Some(MenuChoice::Exit),
            _ => None,
        }
    }
}

const MAIN_MENU: &str = r"
--------------------------------
|         Image Manager        |
|------------------------------|
| 1. Upload Image              |
| 2. View Images               |
| 3. Delete Image              |
| 4. Help                      |
| 5. Logout                    |
| 6. Exit                      |
--------------------------------";

const HELP: &str = "
Help:
1. Upload Image: Upload image file path (JPEG, PNG, GIF).
2. View Images: View and optionally delete uploaded images.
3. Delete Image: Delete a previously uploaded image.
4. Help: Show this message.
5. Logout: Log out current user.
6. Exit: Close the program.
";

pub fn display_main_menu<R: BufRead, W: Write>(console: &mut Console<R, W>) -> io::Result<()> {
    console.say(MAIN_MENU)
}

pub fn display_help<R: BufRead, W: Write>(console: &mut Console<R, W>) -> io::Result<()> {
    console.say(HELP)
}

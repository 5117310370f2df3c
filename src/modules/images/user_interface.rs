// src/modules/images/user_interface.rs
use std::io::{self, BufRead, Write};
use std::path::Path;

use super::registry::ImageRegistry;
use crate::modules::auth::store::UserStore;
use crate::modules::utils::io::Console;
use crate::modules::utils::logging::{log_image_change, ImageChange};

/// Save the session's list after one change, reporting and logging the outcome
///
/// Returns `false` when the save failed; the caller then undoes the change.
fn persist_change<R: BufRead, W: Write>(
    console: &mut Console<R, W>,
    registry: &ImageRegistry,
    store: &mut UserStore,
    data_file: &Path,
    change: ImageChange,
    image: &str,
) -> io::Result<bool> {
    match registry.persist(store, data_file) {
        Ok(()) => {
            log_image_change(change, registry.username(), image, registry.len(), None);
            Ok(true)
        }
        Err(e) => {
            log_image_change(
                change,
                registry.username(),
                image,
                registry.len(),
                Some(&e.to_string()),
            );
            console.say(format_args!("Error saving images: {}", e))?;
            Ok(false)
        }
    }
}

fn list_images<R: BufRead, W: Write>(
    console: &mut Console<R, W>,
    registry: &ImageRegistry,
) -> io::Result<()> {
    for line in registry.numbered() {
        console.say(line)?;
    }
    Ok(())
}

/// Handle the upload loop until the user types 'back'
pub fn handle_upload<R: BufRead, W: Write>(
    console: &mut Console<R, W>,
    registry: &mut ImageRegistry,
    store: &mut UserStore,
    data_file: &Path,
) -> io::Result<()> {
    loop {
        let image_path = console.prompt("Enter image file location (or 'back' to return): ")?;
        if image_path.eq_ignore_ascii_case("back") {
            return Ok(());
        }

        if let Err(e) = registry.add(&image_path) {
            log::debug!("Rejected upload {}: {:?}", image_path, e);
            console.say(e)?;
            continue;
        }

        if persist_change(console, registry, store, data_file, ImageChange::Upload, &image_path)? {
            console.say(format_args!("Image '{}' uploaded successfully!", image_path))?;
        } else {
            registry.pop();
        }
    }
}

/// Handle deletion of one image chosen by its number
pub fn handle_delete<R: BufRead, W: Write>(
    console: &mut Console<R, W>,
    registry: &mut ImageRegistry,
    store: &mut UserStore,
    data_file: &Path,
) -> io::Result<()> {
    if registry.is_empty() {
        return console.say("No images to delete.");
    }

    list_images(console, registry)?;

    loop {
        let choice = console.prompt("Enter image number to delete (or 'back'): ")?;
        if choice.eq_ignore_ascii_case("back") {
            return Ok(());
        }

        // Digits only, so "+1" and "-1" are rejected like any other text
        let number = if !choice.is_empty() && choice.chars().all(|c| c.is_ascii_digit()) {
            choice.parse::<usize>().ok()
        } else {
            None
        };

        let target = match number.and_then(|n| registry.get(n).cloned().map(|img| (n, img))) {
            Some(target) => target,
            None => {
                console.say("Invalid input. Try again.")?;
                continue;
            }
        };

        let (number, image) = target;
        if console.confirm(&format!("Confirm deletion of '{}'?", image))? {
            if let Some(removed) = registry.remove(number) {
                if persist_change(console, registry, store, data_file, ImageChange::Delete, &removed)? {
                    console.say(format_args!("Deleted: {}", removed))?;
                } else {
                    registry.restore(number, removed);
                }
            }
        } else {
            console.say("Cancelled.")?;
        }
        return Ok(());
    }
}

/// Handle viewing the list, with deletion offered from the sub-menu
pub fn handle_view<R: BufRead, W: Write>(
    console: &mut Console<R, W>,
    registry: &mut ImageRegistry,
    store: &mut UserStore,
    data_file: &Path,
) -> io::Result<()> {
    if registry.is_empty() {
        return console.say("No images uploaded.");
    }

    list_images(console, registry)?;

    loop {
        let action = console.prompt("Options: [delete], [back]: ")?.to_lowercase();
        match action.as_str() {
            "delete" => handle_delete(console, registry, store, data_file)?,
            "back" => return Ok(()),
            _ => console.say("Invalid choice.")?,
        }
    }
}

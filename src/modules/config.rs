use clap::{value_parser, Arg, ArgAction, Command};
use log::LevelFilter;
use std::ffi::OsString;
use std::path::PathBuf;

use crate::{LOG_FILE, USER_DATA_FILE};

/// Runtime settings taken from the command line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub data_file: PathBuf,
    pub log_file: PathBuf,
    pub verbose: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data_file: PathBuf::from(USER_DATA_FILE),
            log_file: PathBuf::from(LOG_FILE),
            verbose: false,
        }
    }
}

impl AppConfig {
    /// Define the command-line interface using clap
    pub fn command() -> Command {
        Command::new("image-manager")
            .version(env!("CARGO_PKG_VERSION"))
            .about("Keep a personal list of image files behind a username and password")
            .arg(
                Arg::new("data-file")
                    .long("data-file")
                    .value_name("PATH")
                    .help("JSON file holding accounts and image lists")
                    .default_value(USER_DATA_FILE)
                    .value_parser(value_parser!(PathBuf)),
            )
            .arg(
                Arg::new("log-file")
                    .long("log-file")
                    .value_name("PATH")
                    .help("File that receives the application log")
                    .default_value(LOG_FILE)
                    .value_parser(value_parser!(PathBuf)),
            )
            .arg(
                Arg::new("verbose")
                    .short('v')
                    .long("verbose")
                    .help("Log debug messages")
                    .action(ArgAction::SetTrue),
            )
    }

    /// Parse arguments; the first item is the binary name
    pub fn from_args<I, T>(args: I) -> Result<Self, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        let matches = Self::command().try_get_matches_from(args)?;
        let defaults = Self::default();

        Ok(Self {
            data_file: matches
                .get_one::<PathBuf>("data-file")
                .cloned()
                .unwrap_or(defaults.data_file),
            log_file: matches
                .get_one::<PathBuf>("log-file")
                .cloned()
                .unwrap_or(defaults.log_file),
            verbose: matches.get_flag("verbose"),
        })
    }

    pub fn log_level(&self) -> LevelFilter {
        if self.verbose {
            LevelFilter::Debug
        } else {
            LevelFilter::Info
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AppConfig::from_args(["image-manager"]).unwrap();
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.data_file, PathBuf::from("user_data.json"));
        assert_eq!(config.log_level(), LevelFilter::Info);
    }

    #[test]
    fn test_overrides() {
        let config = AppConfig::from_args([
            "image-manager",
            "--data-file",
            "/tmp/users.json",
            "--log-file",
            "run.log",
            "-v",
        ])
        .unwrap();

        assert_eq!(config.data_file, PathBuf::from("/tmp/users.json"));
        assert_eq!(config.log_file, PathBuf::from("run.log"));
        assert!(config.verbose);
        assert_eq!(config.log_level(), LevelFilter::Debug);
    }

    #[test]
    fn test_unknown_flag_rejected() {
        assert!(AppConfig::from_args(["image-manager", "--bogus"]).is_err());
    }

    #[test]
    fn test_command_definition() {
        AppConfig::command().debug_assert();
    }
}

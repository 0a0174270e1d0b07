//! Command line configuration.
//!
//! The server address is read once at startup and stays fixed for the life
//! of the process.

use std::str::FromStr;
use std::time::Duration;

use fileclient_core::{SlotPolicy, DEFAULT_BASE_URL};
use thiserror::Error;
use tracing::Level;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("server address must start with http:// or https://, got `{0}`")]
    InvalidServer(String),

    #[error("{0}")]
    InvalidPolicy(String),

    #[error("unknown log level `{0}`")]
    InvalidLogLevel(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub server: String,
    pub policy: SlotPolicy,
    pub timeout: Option<Duration>,
    pub log_level: Level,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: DEFAULT_BASE_URL.to_string(),
            policy: SlotPolicy::default(),
            timeout: None,
            log_level: Level::WARN,
        }
    }
}

impl Config {
    pub fn from_matches(matches: &clap::ArgMatches) -> Result<Self, ConfigError> {
        let server = matches
            .get_one::<String>("server")
            .cloned()
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        if !(server.starts_with("http://") || server.starts_with("https://")) {
            return Err(ConfigError::InvalidServer(server));
        }

        let policy = match matches.get_one::<String>("policy") {
            Some(value) => SlotPolicy::from_str(value).map_err(ConfigError::InvalidPolicy)?,
            None => SlotPolicy::default(),
        };

        let timeout = matches
            .get_one::<u64>("timeout_secs")
            .map(|secs| Duration::from_secs(*secs));

        let log_level = match matches.get_one::<String>("log_level") {
            Some(value) => Level::from_str(value).map_err(|_| ConfigError::InvalidLogLevel(value.clone()))?,
            None => Level::WARN,
        };

        Ok(Self {
            server,
            policy,
            timeout,
            log_level,
        })
    }
}

/// Full command definition: global options plus the one-shot subcommands.
/// Without a subcommand the interactive session starts.
pub fn command() -> clap::Command {
    clap::Command::new("fileclient")
        .about("HTTP test client for the course file server")
        .arg(
            clap::Arg::new("server")
                .long("server")
                .env("FILECLIENT_SERVER")
                .global(true)
                .action(clap::ArgAction::Set)
                .value_parser(clap::value_parser!(String))
                .default_value(DEFAULT_BASE_URL),
        )
        .arg(
            clap::Arg::new("policy")
                .long("policy")
                .help(
                    "How responses arriving out of send order update the result. \
                     drop-stale (default) ignores a response older than the one shown; \
                     last-resolved-wins lets whichever response arrives last overwrite it, \
                     like the browser form did",
                )
                .global(true)
                .action(clap::ArgAction::Set)
                .value_parser(["drop-stale", "last-resolved-wins"])
                .default_value("drop-stale"),
        )
        .arg(
            clap::Arg::new("timeout_secs")
                .long("timeout-secs")
                .global(true)
                .action(clap::ArgAction::Set)
                .value_parser(clap::value_parser!(u64)),
        )
        .arg(
            clap::Arg::new("log_level")
                .long("log-level")
                .global(true)
                .action(clap::ArgAction::Set)
                .value_parser(clap::value_parser!(String))
                .default_value("warn"),
        )
        .subcommand(
            clap::Command::new("get")
                .about("GET <server><path> and print the result")
                .arg(path_arg()),
        )
        .subcommand(
            clap::Command::new("put")
                .about("PUT the body to <server><path> and print the result")
                .arg(path_arg())
                .arg(body_arg()),
        )
        .subcommand(
            clap::Command::new("post")
                .about("POST the body as text/plain to <server> and print the result")
                .arg(body_arg()),
        )
        .subcommand(
            clap::Command::new("delete")
                .about("DELETE <server><path> and print the result")
                .arg(path_arg()),
        )
}

fn path_arg() -> clap::Arg {
    clap::Arg::new("path")
        .required(true)
        .action(clap::ArgAction::Set)
        .value_parser(clap::value_parser!(String))
}

fn body_arg() -> clap::Arg {
    clap::Arg::new("body")
        .action(clap::ArgAction::Set)
        .value_parser(clap::value_parser!(String))
        .default_value("")
}

//! Terminal front end for the course file server.
//!
//! # Overview
//! Wraps `fileclient-core` with real I/O: a `ureq` transport, background
//! dispatch on tokio, an interactive form session and one-shot subcommands.

pub mod config;
pub mod dispatch;
pub mod oneshot;
pub mod session;
pub mod transport;

pub use config::{Config, ConfigError};
pub use dispatch::{Action, Client, Resolution};
pub use oneshot::{run_once, RunError};
pub use session::{Command, Session};
pub use transport::{Transport, TransportError, UreqTransport};

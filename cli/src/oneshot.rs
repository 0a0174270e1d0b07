//! Single request from the command line, no session.

use std::io::{self, Write};

use fileclient_core::{DispatchError, Outcome};
use thiserror::Error;
use tokio::task::JoinSet;

use crate::dispatch::{Action, Client};
use crate::transport::Transport;

#[derive(Debug, Error)]
pub enum RunError {
    #[error(transparent)]
    Dispatch(#[from] DispatchError),

    #[error("{0}")]
    Transport(String),

    #[error("request task did not finish: {0}")]
    Join(#[from] tokio::task::JoinError),

    #[error(transparent)]
    Io(#[from] io::Error),
}

impl RunError {
    /// The line printed for the user, matching what the session shows: a
    /// rejected path is an alert, anything else an error.
    pub fn user_message(&self) -> String {
        match self {
            RunError::Dispatch(err) => format!("alert: {err}"),
            other => format!("error: {other}"),
        }
    }
}

/// Send one request, wait for it, and print the rendered result to `out`.
///
/// A readable or unreadable body both count as success; only a missing
/// response is an error.
pub async fn run_once<T, W>(client: &Client<T>, action: Action, path: &str, body: &str, out: &mut W) -> Result<(), RunError>
where
    T: Transport,
    W: Write,
{
    let request = client.request_for(action, path, body)?;
    let mut tasks = JoinSet::new();
    client.send(request, &mut tasks);

    let Some(joined) = tasks.join_next().await else {
        return Ok(());
    };
    match joined?.outcome {
        Outcome::WithBody(text) | Outcome::WithoutBody(text) => {
            writeln!(out, "{text}")?;
            Ok(())
        }
        Outcome::Failed(message) => Err(RunError::Transport(message)),
    }
}

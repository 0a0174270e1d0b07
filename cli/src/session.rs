//! Interactive terminal form.
//!
//! # Design
//! The session holds the two form fields (`path`, `body`) and reads one
//! command per line. Request actions are handed to the `Client` and run in
//! the background; the loop keeps reading input while they are in flight and
//! prints each resolution as it arrives. Only the result slot decides what
//! `show` prints.

use std::io::{self, Write};

use fileclient_core::Outcome;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tokio::task::JoinSet;

use crate::dispatch::{Action, Client, Resolution};
use crate::transport::Transport;

const HELP: &str = "\
commands:
  path <text>     set the file path (used by get, put, delete, open)
  body <text>     set the body on one line (used by put, post)
  body            enter a multi-line body, finish with a line containing only .
  get | put | post | delete
                  send the request; the result replaces the one shown
  open            fetch the path for viewing on its own, leaving the result alone
  show            print the current result
  wait            wait for every request still in flight
  help            this text
  quit            leave (waits for requests in flight)";

/// One parsed input line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    SetPath(String),
    SetBody(String),
    BeginBody,
    Send(Action),
    Show,
    Wait,
    Help,
    Quit,
    Unknown(String),
}

impl Command {
    pub fn parse(line: &str) -> Option<Command> {
        let line = line.trim_end_matches(['\r', '\n']);
        let trimmed = line.trim_start();
        if trimmed.is_empty() {
            return None;
        }
        let (word, rest) = match trimmed.split_once(' ') {
            Some((word, rest)) => (word, Some(rest)),
            None => (trimmed, None),
        };
        let command = match (word.to_ascii_lowercase().as_str(), rest) {
            ("path", rest) => Command::SetPath(rest.unwrap_or_default().trim().to_string()),
            ("body", Some(rest)) => Command::SetBody(rest.to_string()),
            ("body", None) => Command::BeginBody,
            ("get", None) => Command::Send(Action::Get),
            ("put", None) => Command::Send(Action::Put),
            ("post", None) => Command::Send(Action::Post),
            ("delete", None) => Command::Send(Action::Delete),
            ("open", None) => Command::Send(Action::Open),
            ("show", None) => Command::Show,
            ("wait", None) => Command::Wait,
            ("help", None) => Command::Help,
            ("quit", None) | ("exit", None) => Command::Quit,
            _ => Command::Unknown(trimmed.to_string()),
        };
        Some(command)
    }
}

/// Form state and the requests it has in flight.
pub struct Session<T> {
    client: Client<T>,
    path: String,
    body: String,
    collecting: Option<Vec<String>>,
    tasks: JoinSet<Resolution>,
    prompt: bool,
}

impl<T: Transport> Session<T> {
    pub fn new(client: Client<T>) -> Self {
        Self {
            client,
            path: String::new(),
            body: String::new(),
            collecting: None,
            tasks: JoinSet::new(),
            prompt: false,
        }
    }

    /// Print `> ` before each command.
    pub fn with_prompt(mut self, prompt: bool) -> Self {
        self.prompt = prompt;
        self
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn body(&self) -> &str {
        &self.body
    }

    pub fn in_flight(&self) -> usize {
        self.tasks.len()
    }

    /// Read commands from `input` until `quit` or end of input, writing
    /// everything the user sees to `out`. Requests still in flight at the
    /// end are awaited before returning.
    pub async fn run<R, W>(&mut self, input: R, out: &mut W) -> io::Result<()>
    where
        R: AsyncBufRead + Unpin,
        W: Write,
    {
        let mut lines = input.lines();
        writeln!(
            out,
            "fileclient: sending to {} with {} results (type `help`)",
            self.client.dispatcher().base_url(),
            self.client.policy()
        )?;
        self.prompt(out)?;
        loop {
            tokio::select! {
                line = lines.next_line() => {
                    let Some(line) = line? else { break };
                    if !self.handle_line(&line, out).await? {
                        break;
                    }
                    self.prompt(out)?;
                }
                Some(joined) = self.tasks.join_next(), if !self.tasks.is_empty() => {
                    report(joined, out)?;
                }
            }
        }
        self.wait(out).await
    }

    /// Apply one input line. Returns `false` once the user asked to quit.
    pub async fn handle_line<W: Write>(&mut self, line: &str, out: &mut W) -> io::Result<bool> {
        if let Some(lines) = self.collecting.as_mut() {
            if line.trim_end_matches(['\r', '\n']) == "." {
                self.body = lines.join("\n");
                self.collecting = None;
                writeln!(out, "body set ({} bytes)", self.body.len())?;
            } else {
                lines.push(line.to_string());
            }
            return Ok(true);
        }

        let Some(command) = Command::parse(line) else {
            return Ok(true);
        };
        match command {
            Command::SetPath(path) => self.path = path,
            Command::SetBody(body) => self.body = body,
            Command::BeginBody => {
                self.collecting = Some(Vec::new());
                writeln!(out, "enter body, end with a line containing only .")?;
            }
            Command::Send(action) => self.send(action, out)?,
            Command::Show => match self.client.current() {
                Some(text) => writeln!(out, "{text}")?,
                None => writeln!(out, "(no result yet)")?,
            },
            Command::Wait => self.wait(out).await?,
            Command::Help => writeln!(out, "{HELP}")?,
            Command::Quit => return Ok(false),
            Command::Unknown(text) => writeln!(out, "unknown command `{text}` (type `help`)")?,
        }
        Ok(true)
    }

    /// Dispatch `action` with the current form values. An empty path on a
    /// path action raises an alert and sends nothing.
    pub fn send<W: Write>(&mut self, action: Action, out: &mut W) -> io::Result<()> {
        let request = match self.client.request_for(action, &self.path, &self.body) {
            Ok(request) => request,
            Err(err) => {
                tracing::debug!(action = action.name(), "rejected locally: {err}");
                return writeln!(out, "alert: {err}");
            }
        };
        match action {
            Action::Open => {
                writeln!(out, "opening {}", request.url)?;
                self.client.open(request, &mut self.tasks);
            }
            _ => {
                let method = request.method;
                let url = request.url.clone();
                let ticket = self.client.send(request, &mut self.tasks);
                writeln!(out, "{ticket} {method} {url} sent")?;
            }
        }
        Ok(())
    }

    /// Await every request still in flight, reporting each.
    pub async fn wait<W: Write>(&mut self, out: &mut W) -> io::Result<()> {
        while let Some(joined) = self.tasks.join_next().await {
            report(joined, out)?;
        }
        Ok(())
    }

    fn prompt<W: Write>(&self, out: &mut W) -> io::Result<()> {
        if self.prompt {
            write!(out, "> ")?;
            out.flush()?;
        }
        Ok(())
    }
}

fn report<W: Write>(joined: Result<Resolution, tokio::task::JoinError>, out: &mut W) -> io::Result<()> {
    let resolution = match joined {
        Ok(resolution) => resolution,
        Err(err) => {
            tracing::error!(error = %err, "request task did not finish");
            return writeln!(out, "error: request task did not finish: {err}");
        }
    };
    write_resolution(&resolution, out)
}

/// Print what the user should see for one resolved request.
pub fn write_resolution<W: Write>(resolution: &Resolution, out: &mut W) -> io::Result<()> {
    let label = match resolution.ticket {
        Some(ticket) => format!("{ticket} {} {}", resolution.method, resolution.url),
        None => format!("open {}", resolution.url),
    };
    match &resolution.outcome {
        Outcome::Failed(message) => writeln!(out, "error: {label}: {message}"),
        Outcome::WithBody(text) | Outcome::WithoutBody(text) => {
            if resolution.ticket.is_none() || resolution.applied {
                writeln!(out, "--- {label}\n{text}\n---")
            } else {
                writeln!(out, "{label}: newer result already shown, response dropped")
            }
        }
    }
}

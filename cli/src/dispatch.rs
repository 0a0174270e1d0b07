//! Asynchronous dispatch of form actions.
//!
//! # Design
//! `Client` owns the `Dispatcher`, the transport and the shared
//! `ResultSlot`. Sending a request takes a ticket from the slot right away,
//! then runs the blocking round trip on a `JoinSet` task so the caller keeps
//! accepting input. When the response resolves the task offers the rendered
//! text to the slot and returns a `Resolution` describing what happened.

use std::sync::{Arc, Mutex, PoisonError};

use fileclient_core::{
    format, DispatchError, Dispatcher, HttpMethod, HttpRequest, Outcome, ResponseBody, ResultSlot,
    SlotPolicy, Ticket,
};
use tokio::task::JoinSet;

use crate::transport::Transport;

/// The user actions available on the form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Get,
    Put,
    Post,
    Delete,
    /// View the raw file on its own. Never touches the result slot.
    Open,
}

impl Action {
    pub fn name(&self) -> &'static str {
        match self {
            Action::Get => "get",
            Action::Put => "put",
            Action::Post => "post",
            Action::Delete => "delete",
            Action::Open => "open",
        }
    }
}

/// What a finished request did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    /// `None` for `Action::Open`, which runs outside the slot.
    pub ticket: Option<Ticket>,
    pub method: HttpMethod,
    pub url: String,
    pub outcome: Outcome,
    /// Whether the slot now shows this request's rendering.
    pub applied: bool,
}

pub struct Client<T> {
    dispatcher: Dispatcher,
    transport: Arc<T>,
    slot: Arc<Mutex<ResultSlot>>,
}

impl<T> Clone for Client<T> {
    fn clone(&self) -> Self {
        Self {
            dispatcher: self.dispatcher.clone(),
            transport: Arc::clone(&self.transport),
            slot: Arc::clone(&self.slot),
        }
    }
}

impl<T: Transport> Client<T> {
    pub fn new(dispatcher: Dispatcher, transport: T, policy: SlotPolicy) -> Self {
        Self {
            dispatcher,
            transport: Arc::new(transport),
            slot: Arc::new(Mutex::new(ResultSlot::new(policy))),
        }
    }

    pub fn dispatcher(&self) -> &Dispatcher {
        &self.dispatcher
    }

    /// Build the request for `action` from the current form values.
    pub fn request_for(&self, action: Action, path: &str, body: &str) -> Result<HttpRequest, DispatchError> {
        match action {
            Action::Get => self.dispatcher.build_get(path),
            Action::Put => self.dispatcher.build_put(path, body),
            Action::Post => Ok(self.dispatcher.build_post(body)),
            Action::Delete => self.dispatcher.build_delete(path),
            Action::Open => self.dispatcher.build_open(path),
        }
    }

    /// Send `request` in the background; its rendering is offered to the
    /// slot when it resolves.
    pub fn send(&self, request: HttpRequest, tasks: &mut JoinSet<Resolution>) -> Ticket {
        let ticket = lock(&self.slot).issue();
        tracing::debug!(%ticket, method = %request.method, url = %request.url, "sending request");

        let transport = Arc::clone(&self.transport);
        let slot = Arc::clone(&self.slot);
        tasks.spawn_blocking(move || {
            let outcome = execute(transport.as_ref(), &request);
            let applied = match outcome.rendered() {
                Some(text) => lock(&slot).offer(ticket, text.to_string()),
                None => false,
            };
            if !applied && outcome.rendered().is_some() {
                tracing::debug!(%ticket, url = %request.url, "dropped stale response");
            }
            Resolution {
                ticket: Some(ticket),
                method: request.method,
                url: request.url,
                outcome,
                applied,
            }
        });
        ticket
    }

    /// Send `request` in the background without involving the slot.
    pub fn open(&self, request: HttpRequest, tasks: &mut JoinSet<Resolution>) {
        tracing::debug!(url = %request.url, "opening in separate view");

        let transport = Arc::clone(&self.transport);
        tasks.spawn_blocking(move || {
            let outcome = execute(transport.as_ref(), &request);
            Resolution {
                ticket: None,
                method: request.method,
                url: request.url,
                outcome,
                applied: false,
            }
        });
    }

    /// Text currently shown in the result slot.
    pub fn current(&self) -> Option<String> {
        lock(&self.slot).current().map(str::to_string)
    }

    pub fn policy(&self) -> SlotPolicy {
        lock(&self.slot).policy()
    }
}

fn execute<T: Transport + ?Sized>(transport: &T, request: &HttpRequest) -> Outcome {
    match transport.execute(request) {
        Ok(response) => {
            tracing::info!(method = %request.method, url = %request.url, status = response.status, "response received");
            let outcome = format::outcome(&response);
            if let ResponseBody::Unreadable { reason } = &response.body {
                tracing::warn!(url = %request.url, %reason, "response body unreadable, showing status and headers only");
            }
            outcome
        }
        Err(err) => {
            tracing::error!(method = %request.method, url = %request.url, error = %err, "request failed");
            Outcome::Failed(err.to_string())
        }
    }
}

fn lock(slot: &Mutex<ResultSlot>) -> std::sync::MutexGuard<'_, ResultSlot> {
    slot.lock().unwrap_or_else(PoisonError::into_inner)
}

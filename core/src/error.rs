//! Error types for the request dispatcher.
//!
//! # Design
//! Only local validation can fail inside the core. Transport failures belong
//! to the host that performs the I/O, and non-2xx statuses are ordinary
//! responses that go through the formatter like any other.

use thiserror::Error;

/// Errors returned by `Dispatcher` build methods.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DispatchError {
    /// A path-requiring action was triggered with an empty path. No request
    /// is built, so nothing reaches the network. `action` is the upper-case
    /// name of the form action (`GET`, `OPEN`, ...).
    #[error("{action} needs a file path (e.g. /archivo.txt)")]
    EmptyPath { action: &'static str },
}

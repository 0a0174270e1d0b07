//! Request dispatcher and response formatter for the course file server.
//!
//! # Overview
//! Builds `HttpRequest` values for GET/PUT/POST/DELETE against a fixed base
//! address and renders `HttpResponse` values as plain text, without touching
//! the network (host-does-IO pattern).
//!
//! # Design
//! - `Dispatcher` is stateless; it holds only `base_url`.
//! - Path validation happens before any request exists, so an empty path
//!   can never reach the network.
//! - `ResultSlot` tags requests with tickets at send time so responses that
//!   resolve out of order can be dropped instead of racing.

pub mod client;
pub mod error;
pub mod format;
pub mod http;
pub mod slot;

pub use client::{Dispatcher, DEFAULT_BASE_URL};
pub use error::DispatchError;
pub use format::{outcome, render, Outcome};
pub use http::{HttpMethod, HttpRequest, HttpResponse, ResponseBody};
pub use slot::{ResultSlot, SlotPolicy, Ticket};

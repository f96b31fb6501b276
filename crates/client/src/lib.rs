//! Terminal client for the work-log API.
//!
//! `api` is the typed HTTP data layer; `ui` holds the page state, its
//! `update` function and the ratatui rendering; `app` wires both together
//! in an async event loop.

pub mod api;
pub mod app;
pub mod error;
pub mod ui;

pub use api::EmployeeApi;
pub use error::{ClientError, ClientResult};

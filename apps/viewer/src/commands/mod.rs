//! # Viewer Commands
//!
//! One module per command group. Each command returns `Ok(false)` when it
//! printed a user-facing failure (exit status 1) and `Err` only for
//! unexpected errors.
//!
//! - [`catalog`] - `list` and `show`
//! - [`server`] - print or change the server endpoint

pub mod catalog;
pub mod server;

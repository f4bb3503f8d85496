#![deny(clippy::unwrap_used)]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![allow(clippy::missing_errors_doc, clippy::missing_panics_doc)]

pub mod api_state;
mod routes;
mod server;

#[cfg(test)]
mod test_utils;

pub use routes::*;
pub use server::*;

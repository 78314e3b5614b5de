//! # tankwatch-api
//!
//! HTTP API server for Tankwatch.
//!
//! This crate provides:
//! - The `/api/encroachments` list and create endpoints
//! - A `/api/health` probe
//! - Static serving of the browser pages
//! - Layered server configuration

#![warn(missing_docs)]
#![warn(clippy::all)]
#![forbid(unsafe_code)]

pub mod config;
pub mod error;
pub mod routes;
pub mod server;
pub mod state;

pub use config::ServiceConfig;
pub use error::{ApiError, Error, Result};
pub use server::Server;
pub use state::AppState;

//! # digitalocean-core
//!
//! Core types and utilities for working with the DigitalOcean v1 API.
//!
//! This crate provides the shared error type, client configuration, typed
//! resource identifiers and the pluggable HTTP transport used by
//! `digitalocean-client`.
//!
//! ## Modules
//!
//! - [`error`] - Error type and error codes
//! - [`config`] - Configuration and credentials for DigitalOcean clients
//! - [`ids`] - Strongly-typed identifiers for DigitalOcean resources
//! - [`query`] - Query string assembly
//! - [`transport`] - The `Transport` trait and its reqwest implementation

#![deny(missing_docs)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod config;
pub mod error;
pub mod ids;
pub mod query;
pub mod transport;

// Re-export commonly used types
pub use config::{Credentials, DigitalOceanConfig};
pub use error::{Error, Result};
pub use transport::{HttpTransport, Transport};

//! # papernet
//!
//! Library half of the papernet binary: the HTTP API, the CLI and the
//! layered server configuration. Exposed as a library so integration tests
//! can drive the router directly.

pub mod api;
pub mod cli;
pub mod config;

//! Middleware: authentication extractors and session configuration.

pub mod auth;
pub mod session;

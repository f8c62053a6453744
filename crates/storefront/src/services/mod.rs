//! Storefront services: catalog repository, auth client, assistant bridge.

pub mod assistant;
pub mod auth;
pub mod catalog;

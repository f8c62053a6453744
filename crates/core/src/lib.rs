//! Loop Core - Shared types and state logic.
//!
//! This crate provides the domain model used across all Loop Commerce
//! components:
//! - `storefront` - Public-facing e-commerce service
//! - `cli` - Command-line tools for seeding and account management
//!
//! # Architecture
//!
//! The core crate contains only types and pure state logic - no I/O, no
//! HTTP clients, no storage access. This keeps it lightweight and allows
//! the cart, catalog, and identity logic to be tested without a running
//! server.
//!
//! # Modules
//!
//! - [`product`] - Product records, variant axes, and categories
//! - [`cart`] - Cart lines and the quantity/variant merging engine
//! - [`catalog`] - Filter/sort predicates and carousel bookkeeping
//! - [`identity`] - Profiles, roles, and the session state machine
//! - [`order`] - Submitted orders and their line records
//! - [`seed`] - The built-in product catalog used as a local fallback

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod catalog;
pub mod identity;
pub mod order;
pub mod product;
pub mod seed;

pub use cart::{Cart, CartLine};
pub use catalog::{FilterState, SortOrder};
pub use identity::{AuthState, IdentityGate, Profile, Role};
pub use order::{Order, OrderLine, OrderStatus, ShippingAddress};
pub use product::{Category, ColorOption, Dimensions, Product};

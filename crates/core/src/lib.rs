//! Orderdesk Core - Shared types library.
//!
//! This crate provides common types used across all Orderdesk components:
//! - `backoffice` - Order projection and lifecycle engine
//! - `cli` - Operator command-line tool
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no HTTP clients. This keeps
//! it lightweight and allows it to be used anywhere, including in view code
//! that must never block.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for ids and versions, money, and the order
//!   status machine with its transition table

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;

//! Core domain types and utilities for the opsdeck platform.
//!
//! This crate provides the foundational types and error handling shared
//! by the opsdeck admin console crates.

pub mod error;
pub mod id;

pub use error::Result;
pub use id::UserId;

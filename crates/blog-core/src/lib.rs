//! # Blog Core
//!
//! The domain layer of the blog service.
//! This crate holds the post visibility and authorship rules with zero
//! infrastructure dependencies: no database, no HTTP, no wall clock.

pub mod domain;
pub mod error;
pub mod ports;

pub use error::DomainError;

//! # Blog Shared
//!
//! Wire types shared between the API server and its clients.
//! Kept free of domain and server crates so it can be compiled for any target.

pub mod dto;
pub mod response;

pub use dto::Validate;
pub use response::ErrorResponse;

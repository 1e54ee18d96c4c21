//! Core domain types and utilities for the campus-gallery platform.
//!
//! This crate provides the foundational identifier types and error handling
//! shared by the access and community crates.

pub mod error;
pub mod id;

pub use error::Result;
pub use id::{EventId, ImageId, NotificationId, ParseIdError};

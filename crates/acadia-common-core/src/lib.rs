//! Acadia common core types and utilities.

pub mod error;
pub mod id;

pub use error::{Error, Result};
pub use id::{RecordId, UserId};

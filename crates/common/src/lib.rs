//! Shared error definitions used across the village crates.

pub mod error;

pub use error::{Error, FromMessage, Result};

//! Core types and errors for parameter validation and command assembly

pub mod error;
pub mod types;

pub use self::error::*;
pub use self::types::*;

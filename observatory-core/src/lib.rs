//! Observatory Core - Fundamental types
//!
//! This crate provides the pieces shared by every Observatory crate:
//! - `ConversionError`: the four user-presentable ways a conversion can fail
//! - `format_value`: the display policy for converted numbers

mod error;
mod format;

pub use error::{ConversionError, codes};
pub use format::{format_value, FIXED_DECIMALS, FIXED_MAX, FIXED_MIN, SCIENTIFIC_SIGFIGS};

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::{ConversionError, format_value};
    pub use crate::error::codes;
}

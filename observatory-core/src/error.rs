//! Structured conversion errors
//!
//! Errors never crash the caller. Every rejected request comes back as one
//! of four values that carry the offending input, a stable code, and a hint
//! the presentation layer can show next to the message.

use serde::Serialize;
use thiserror::Error;

/// Standard error codes (machine-readable)
pub mod codes {
    pub const UNKNOWN_CATEGORY: &str = "UNKNOWN_CATEGORY";
    pub const UNKNOWN_UNIT: &str = "UNKNOWN_UNIT";
    pub const UNKNOWN_SUBSTANCE: &str = "UNKNOWN_SUBSTANCE";
    pub const INVALID_AMOUNT: &str = "INVALID_AMOUNT";
}

/// Why a conversion request was rejected
#[derive(Debug, Clone, PartialEq, Error, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ConversionError {
    /// The category key does not resolve in the registry
    #[error("unknown category '{key}'")]
    UnknownCategory { key: String },

    /// A unit symbol is not part of the selected category
    #[error("unknown unit '{unit}' for category '{category}'")]
    UnknownUnit { category: String, unit: String },

    /// A density conversion named a substance that is not in the table,
    /// or named none at all
    #[error("{}", describe_substance(.category, .substance))]
    UnknownSubstance {
        category: String,
        substance: Option<String>,
    },

    /// The amount is NaN or infinite, or the result overflowed
    #[error("invalid amount: {reason}")]
    InvalidAmount { reason: String },
}

fn describe_substance(category: &str, substance: &Option<String>) -> String {
    match substance {
        Some(name) => format!("unknown substance '{}' for category '{}'", name, category),
        None => format!("category '{}' needs a substance", category),
    }
}

impl ConversionError {
    pub fn unknown_category(key: impl Into<String>) -> Self {
        Self::UnknownCategory { key: key.into() }
    }

    pub fn unknown_unit(category: impl Into<String>, unit: impl Into<String>) -> Self {
        Self::UnknownUnit {
            category: category.into(),
            unit: unit.into(),
        }
    }

    pub fn unknown_substance(category: impl Into<String>, substance: Option<&str>) -> Self {
        Self::UnknownSubstance {
            category: category.into(),
            substance: substance.map(str::to_string),
        }
    }

    pub fn invalid_amount(reason: impl Into<String>) -> Self {
        Self::InvalidAmount {
            reason: reason.into(),
        }
    }

    /// Machine-readable code for this error
    pub fn code(&self) -> &'static str {
        match self {
            Self::UnknownCategory { .. } => codes::UNKNOWN_CATEGORY,
            Self::UnknownUnit { .. } => codes::UNKNOWN_UNIT,
            Self::UnknownSubstance { .. } => codes::UNKNOWN_SUBSTANCE,
            Self::InvalidAmount { .. } => codes::INVALID_AMOUNT,
        }
    }

    /// Hint for fixing the request
    pub fn suggestion(&self) -> String {
        match self {
            Self::UnknownCategory { .. } => {
                "Use list_categories() to see available categories".to_string()
            }
            Self::UnknownUnit { category, .. } => {
                format!("Use list_units('{}') to see valid units", category)
            }
            Self::UnknownSubstance { category, .. } => {
                format!("Pick a substance from list_units('{}')", category)
            }
            Self::InvalidAmount { .. } => "Enter a finite number".to_string(),
        }
    }
}

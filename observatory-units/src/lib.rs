//! Observatory Units - Category Registry and Conversion Engine
//!
//! Converts amounts between units of the same physical quantity. Every
//! category is one of three kinds:
//! - Linear: a factor to a base unit (length, mass, digital, ...)
//! - Affine: scale and offset through a reference scale (temperature)
//! - Density: volume and mass through a per-substance density (cooking)
//!
//! The built-in categories live in [`REGISTRY`]; the free functions below
//! query it. Custom tables can be built with
//! [`CategoryRegistry::from_categories`].

mod affine;
mod builtin;
mod category;
mod convert;
mod defaults;
mod density;
mod explain;
mod registry;

pub use affine::{AffineUnit, TEMPERATURE_REFERENCE};
pub use category::{CategoryDefinition, CategoryKind, DensityTable, LinearUnit, UnitInfo, UnitTable};
pub use convert::{ConversionRequest, ConversionResult, Route};
pub use defaults::DefaultUnits;
pub use density::{normalize_substance, DensityUnit, Measure, Substance, ML_PER_CUP};
pub use explain::ConversionExplanation;
pub use registry::{CategoryRegistry, CategorySummary, RegistryError, REGISTRY};

pub use observatory_core::ConversionError;

pub use convert::convert;

/// Lookup a built-in category by key
pub fn get_category(key: &str) -> Result<&'static CategoryDefinition, ConversionError> {
    REGISTRY.get_category(key)
}

/// Built-in categories in menu order
pub fn list_categories() -> &'static [CategoryDefinition] {
    REGISTRY.list_categories()
}

/// Unit symbols of a built-in category
pub fn list_units(key: &str) -> Result<Vec<&'static str>, ConversionError> {
    REGISTRY.list_units(key)
}

/// Substance names of a built-in density category
pub fn list_substances(key: &str) -> Result<Vec<&'static str>, ConversionError> {
    REGISTRY.list_substances(key)
}

/// Default selection after switching to a built-in category
pub fn default_units_for(key: &str) -> Result<DefaultUnits, ConversionError> {
    REGISTRY.default_units_for(key)
}

/// Ordered unit pairs a built-in category covers
pub fn pair_count(key: &str) -> Result<usize, ConversionError> {
    REGISTRY.pair_count(key)
}

/// Convert with the built-in registry and describe the route
pub fn explain(request: &ConversionRequest) -> Result<ConversionExplanation, ConversionError> {
    REGISTRY.explain(request)
}

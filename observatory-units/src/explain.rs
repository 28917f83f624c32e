//! Step-by-step explanation of a conversion

use observatory_core::{format_value, ConversionError};
use serde::Serialize;

use crate::convert::{ConversionRequest, ConversionResult, Route};
use crate::registry::CategoryRegistry;

/// A conversion together with the path it took
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConversionExplanation {
    pub result: ConversionResult,
    /// Canonical source unit
    pub from: String,
    /// Canonical target unit
    pub to: String,
    pub route: Route,
    /// Direct formulas the category would need without a shared base
    pub pair_count: usize,
    pub summary: String,
}

impl CategoryRegistry {
    /// Convert and describe the route, e.g. `1 km → [Base: 1000 m] → 0.6214 mi`
    pub fn explain(&self, request: &ConversionRequest) -> Result<ConversionExplanation, ConversionError> {
        let outcome = self.run(request)?;
        let resolved = &outcome.resolved;
        let amount = format_value(resolved.amount);
        let value = format_value(outcome.value);

        let summary = match &outcome.route {
            Route::Identity => format!("{} {} = {} {}", amount, resolved.from, value, resolved.to),
            Route::ViaBase { base_unit, base_value } => format!(
                "{} {} → [Base: {} {}] → {} {}",
                amount, resolved.from, format_value(*base_value), base_unit, value, resolved.to
            ),
            Route::ViaReference { reference, reference_value } => format!(
                "{} {} → [Reference: {} {}] → {} {}",
                amount, resolved.from, format_value(*reference_value), reference, value, resolved.to
            ),
            Route::ViaGrams { substance, grams } => format!(
                "{} {} → [{} g of {}] → {} {}",
                amount, resolved.from, format_value(*grams), substance, value, resolved.to
            ),
        };

        Ok(ConversionExplanation {
            result: ConversionResult::new(outcome.value),
            from: resolved.from.to_string(),
            to: resolved.to.to_string(),
            pair_count: resolved.category.pair_count(),
            route: outcome.route,
            summary,
        })
    }
}

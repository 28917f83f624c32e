//! Conversion engine
//!
//! `convert` validates a request against the registry (category, units,
//! substance, amount - first failure wins) and then dispatches on the
//! category's unit table. It is a pure function of its arguments and the
//! immutable registry.

use observatory_core::{format_value, ConversionError};
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::affine::{convert_affine, AffineUnit, TEMPERATURE_REFERENCE};
use crate::category::{CategoryDefinition, LinearUnit, UnitTable};
use crate::density::{DensityUnit, Substance};
use crate::registry::{CategoryRegistry, REGISTRY};

/// Input to a single conversion
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConversionRequest {
    #[serde(alias = "category")]
    pub category_key: String,
    #[serde(alias = "from")]
    pub from_unit: String,
    #[serde(alias = "to")]
    pub to_unit: String,
    pub amount: f64,
    /// Only read by density categories
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub substance: Option<String>,
}

impl ConversionRequest {
    pub fn new(category_key: &str, from_unit: &str, to_unit: &str, amount: f64) -> Self {
        ConversionRequest {
            category_key: category_key.to_string(),
            from_unit: from_unit.to_string(),
            to_unit: to_unit.to_string(),
            amount,
            substance: None,
        }
    }

    /// Builder: select the substance for a density conversion
    pub fn with_substance(mut self, substance: &str) -> Self {
        self.substance = Some(substance.to_string());
        self
    }
}

/// Output of a successful conversion
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConversionResult {
    pub value: f64,
    pub formatted: String,
}

impl ConversionResult {
    pub fn new(value: f64) -> Self {
        ConversionResult {
            value,
            formatted: format_value(value),
        }
    }
}

/// How a conversion reached its result
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "via", rename_all = "snake_case")]
pub enum Route {
    /// Source and target are the same unit; the amount is returned as is
    Identity,
    /// Linear: through the category's base unit
    ViaBase { base_unit: String, base_value: f64 },
    /// Affine: through the reference scale
    ViaReference { reference: String, reference_value: f64 },
    /// Density: through grams of the selected substance
    ViaGrams { substance: String, grams: f64 },
}

/// A validated request bound to the registry entries it refers to
pub(crate) struct Resolved<'r> {
    pub category: &'r CategoryDefinition,
    /// Canonical source symbol
    pub from: &'r str,
    /// Canonical target symbol
    pub to: &'r str,
    pub units: BoundUnits<'r>,
    pub amount: f64,
}

/// Unit records of a request, by conversion kind
pub(crate) enum BoundUnits<'r> {
    Linear {
        from: &'r LinearUnit,
        to: &'r LinearUnit,
    },
    Affine {
        from: &'r AffineUnit,
        to: &'r AffineUnit,
    },
    Density {
        from: &'r DensityUnit,
        to: &'r DensityUnit,
        substance: &'r Substance,
    },
}

/// Full outcome of a conversion, before it is reduced to a result
pub(crate) struct Outcome<'r> {
    pub resolved: Resolved<'r>,
    pub value: f64,
    pub route: Route,
}

impl CategoryRegistry {
    /// Convert a request against this registry
    pub fn convert(&self, request: &ConversionRequest) -> Result<ConversionResult, ConversionError> {
        self.run(request).map(|outcome| ConversionResult::new(outcome.value))
    }

    pub(crate) fn run(&self, request: &ConversionRequest) -> Result<Outcome<'_>, ConversionError> {
        let resolved = self.resolve(request).inspect_err(|e| {
            debug!(code = e.code(), category = %request.category_key, "conversion rejected");
        })?;
        let (value, route) = evaluate(&resolved);

        if !value.is_finite() {
            debug!(amount = resolved.amount, "conversion overflowed");
            return Err(ConversionError::invalid_amount(format!(
                "{} {} is out of range in {}",
                format_value(resolved.amount),
                resolved.from,
                resolved.to
            )));
        }

        trace!(category = %resolved.category.key, from = resolved.from, to = resolved.to, ?route, "converted");
        Ok(Outcome { resolved, value, route })
    }

    /// Validate a request in order: category, units, substance, amount
    fn resolve(&self, request: &ConversionRequest) -> Result<Resolved<'_>, ConversionError> {
        let category = self.get_category(&request.category_key)?;
        let unknown_from = || ConversionError::unknown_unit(&category.key, &request.from_unit);
        let unknown_to = || ConversionError::unknown_unit(&category.key, &request.to_unit);

        let from = category.resolve_unit(&request.from_unit).ok_or_else(unknown_from)?;
        let to = category.resolve_unit(&request.to_unit).ok_or_else(unknown_to)?;

        let units = match &category.table {
            UnitTable::Linear { units } => BoundUnits::Linear {
                from: units.iter().find(|u| u.symbol == from).ok_or_else(unknown_from)?,
                to: units.iter().find(|u| u.symbol == to).ok_or_else(unknown_to)?,
            },
            UnitTable::Affine { units } => BoundUnits::Affine {
                from: units.iter().find(|u| u.symbol == from).ok_or_else(unknown_from)?,
                to: units.iter().find(|u| u.symbol == to).ok_or_else(unknown_to)?,
            },
            UnitTable::Density(table) => {
                let from = table.unit(from).ok_or_else(unknown_from)?;
                let to = table.unit(to).ok_or_else(unknown_to)?;
                let name = request.substance.as_deref();
                let substance = name
                    .and_then(|n| table.substance(n))
                    .ok_or_else(|| ConversionError::unknown_substance(&category.key, name))?;
                BoundUnits::Density { from, to, substance }
            }
        };

        if category.density_table().is_none() {
            if let Some(name) = &request.substance {
                debug!(category = %category.key, substance = %name, "substance ignored");
            }
        }

        if request.amount.is_nan() {
            return Err(ConversionError::invalid_amount("amount is not a number"));
        }
        if request.amount.is_infinite() {
            return Err(ConversionError::invalid_amount("amount is infinite"));
        }

        Ok(Resolved {
            category,
            from,
            to,
            units,
            amount: request.amount,
        })
    }
}

fn evaluate(resolved: &Resolved<'_>) -> (f64, Route) {
    let amount = resolved.amount;
    if resolved.from == resolved.to {
        return (amount, Route::Identity);
    }

    match resolved.units {
        BoundUnits::Linear { from, to } => {
            let base_value = amount * from.factor;
            // the base value can overflow even when the answer fits
            let value = if base_value.is_finite() {
                base_value / to.factor
            } else {
                amount * (from.factor / to.factor)
            };
            let route = Route::ViaBase {
                base_unit: resolved.category.base_unit.clone().unwrap_or_default(),
                base_value,
            };
            (value, route)
        }
        BoundUnits::Affine { from, to } => {
            let (reference_value, value) = convert_affine(amount, from, to);
            let route = Route::ViaReference {
                reference: TEMPERATURE_REFERENCE.to_string(),
                reference_value,
            };
            (value, route)
        }
        BoundUnits::Density { from, to, substance } => {
            let grams = from.to_grams(amount, substance);
            let value = if grams.is_finite() {
                to.from_grams(grams, substance)
            } else {
                amount * (from.to_grams(1.0, substance) / to.to_grams(1.0, substance))
            };
            let route = Route::ViaGrams {
                substance: substance.name.clone(),
                grams,
            };
            (value, route)
        }
    }
}

/// Convert an amount using the built-in registry
pub fn convert(
    category_key: &str,
    from_unit: &str,
    to_unit: &str,
    amount: f64,
    substance: Option<&str>,
) -> Result<ConversionResult, ConversionError> {
    let mut request = ConversionRequest::new(category_key, from_unit, to_unit, amount);
    request.substance = substance.map(str::to_string);
    REGISTRY.convert(&request)
}

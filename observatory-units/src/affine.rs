//! Scale-and-offset conversions (temperature)
//!
//! Each unit is related to a fixed reference scale by
//! `reference = (value - offset) * numerator / denominator`.
//! Conversion goes unit -> reference -> unit. Keeping the ratio as two
//! exact integers-as-floats means 5/9 and 9/5 are applied as a multiply and
//! a divide rather than through a rounded decimal constant.

use serde::Serialize;

/// Name of the reference scale used by the temperature category
pub const TEMPERATURE_REFERENCE: &str = "Celsius";

/// Offset between Kelvin and Celsius
pub const KELVIN_OFFSET: f64 = 273.15;

/// Fahrenheit reading at the freezing point of water
pub const FAHRENHEIT_FREEZING: f64 = 32.0;

/// Rankine reading at the freezing point of water (491.67 °R = 0 °C)
pub const RANKINE_FREEZING: f64 = 491.67;

/// A formula-based unit: reference = (value - offset) * numerator / denominator
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AffineUnit {
    pub symbol: String,
    pub label: String,
    /// Reading of this unit at the reference zero
    pub offset: f64,
    pub numerator: f64,
    pub denominator: f64,
}

impl AffineUnit {
    pub fn new(symbol: &str, label: &str, offset: f64, numerator: f64, denominator: f64) -> Self {
        AffineUnit {
            symbol: symbol.to_string(),
            label: label.to_string(),
            offset,
            numerator,
            denominator,
        }
    }

    /// The reference scale itself
    pub fn reference(symbol: &str, label: &str) -> Self {
        Self::new(symbol, label, 0.0, 1.0, 1.0)
    }

    /// True when the unit is identical to the reference scale
    pub fn is_reference(&self) -> bool {
        self.offset == 0.0 && self.numerator == self.denominator
    }

    /// Convert a reading in this unit to the reference scale
    pub fn to_reference(&self, value: f64) -> f64 {
        if self.is_reference() {
            return value;
        }
        (value - self.offset) * self.numerator / self.denominator
    }

    /// Convert a reference reading to this unit
    pub fn from_reference(&self, value: f64) -> f64 {
        if self.is_reference() {
            return value;
        }
        value * self.denominator / self.numerator + self.offset
    }
}

/// Convert between two affine units through the reference scale
pub fn convert_affine(amount: f64, from: &AffineUnit, to: &AffineUnit) -> (f64, f64) {
    let reference = from.to_reference(amount);
    (reference, to.from_reference(reference))
}

/// Celsius, Fahrenheit, Kelvin and Rankine relative to Celsius
pub fn temperature_units() -> Vec<AffineUnit> {
    vec![
        AffineUnit::reference("Celsius", "°C"),
        AffineUnit::new("Fahrenheit", "°F", FAHRENHEIT_FREEZING, 5.0, 9.0),
        AffineUnit::new("Kelvin", "K", KELVIN_OFFSET, 1.0, 1.0),
        AffineUnit::new("Rankine", "°R", RANKINE_FREEZING, 5.0, 9.0),
    ]
}

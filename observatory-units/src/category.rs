//! Category definitions
//!
//! A category is one physical quantity domain. Its unit table decides which
//! conversion algorithm applies, so the kind is carried by the table itself
//! and every dispatch over it is an exhaustive `match`.

use serde::Serialize;

use crate::affine::AffineUnit;
use crate::density::{DensityUnit, Substance};

/// Which conversion algorithm a category uses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CategoryKind {
    /// amount * factor(from) / factor(to)
    Linear,
    /// Scale-and-offset formulas through a reference scale
    Affine,
    /// Volume and mass through a substance-specific density
    Density,
}

/// A unit with a multiplicative factor to the category's base unit
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LinearUnit {
    pub symbol: String,
    pub label: String,
    /// Multiplier to the base unit; the base unit itself is 1
    pub factor: f64,
}

impl LinearUnit {
    pub fn new(symbol: &str, label: &str, factor: f64) -> Self {
        LinearUnit {
            symbol: symbol.to_string(),
            label: label.to_string(),
            factor,
        }
    }
}

/// Substance table for a density category
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DensityTable {
    pub units: Vec<DensityUnit>,
    pub substances: Vec<Substance>,
    /// Substance preselected when the category is opened
    pub default_substance: String,
}

/// The unit set of a category, tagged by conversion kind
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum UnitTable {
    Linear { units: Vec<LinearUnit> },
    Affine { units: Vec<AffineUnit> },
    Density(DensityTable),
}

/// A unit symbol with its display label
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct UnitInfo<'a> {
    pub symbol: &'a str,
    pub label: &'a str,
}

/// Static descriptor for one physical quantity domain
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryDefinition {
    /// Unique short identifier (e.g. "length")
    pub key: String,
    /// Human label (e.g. "Length")
    pub display_name: String,
    /// Canonical unit symbol for linear and density categories
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_unit: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    pub table: UnitTable,
    /// alias -> canonical unit symbol, scoped to this category
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub aliases: Vec<(String, String)>,
}

impl CategoryDefinition {
    pub fn linear(key: &str, display_name: &str, base_unit: &str, units: Vec<LinearUnit>) -> Self {
        CategoryDefinition {
            key: key.to_string(),
            display_name: display_name.to_string(),
            base_unit: Some(base_unit.to_string()),
            note: None,
            table: UnitTable::Linear { units },
            aliases: Vec::new(),
        }
    }

    pub fn affine(key: &str, display_name: &str, units: Vec<AffineUnit>) -> Self {
        CategoryDefinition {
            key: key.to_string(),
            display_name: display_name.to_string(),
            base_unit: None,
            note: None,
            table: UnitTable::Affine { units },
            aliases: Vec::new(),
        }
    }

    pub fn density(key: &str, display_name: &str, base_unit: &str, table: DensityTable) -> Self {
        CategoryDefinition {
            key: key.to_string(),
            display_name: display_name.to_string(),
            base_unit: Some(base_unit.to_string()),
            note: None,
            table: UnitTable::Density(table),
            aliases: Vec::new(),
        }
    }

    /// Builder: attach a note shown next to the category
    pub fn with_note(mut self, note: &str) -> Self {
        self.note = Some(note.to_string());
        self
    }

    /// Builder: register an alias for a unit symbol
    pub fn alias(mut self, alias: &str, symbol: &str) -> Self {
        self.aliases.push((alias.to_string(), symbol.to_string()));
        self
    }

    /// Builder: register several aliases for one unit symbol
    pub fn aliases(mut self, aliases: &[&str], symbol: &str) -> Self {
        for alias in aliases {
            self.aliases.push((alias.to_string(), symbol.to_string()));
        }
        self
    }

    pub fn kind(&self) -> CategoryKind {
        match self.table {
            UnitTable::Linear { .. } => CategoryKind::Linear,
            UnitTable::Affine { .. } => CategoryKind::Affine,
            UnitTable::Density(_) => CategoryKind::Density,
        }
    }

    /// Unit symbols in display order
    pub fn unit_symbols(&self) -> Vec<&str> {
        self.units().into_iter().map(|u| u.symbol).collect()
    }

    /// Units with labels in display order
    pub fn units(&self) -> Vec<UnitInfo<'_>> {
        match &self.table {
            UnitTable::Linear { units } => units
                .iter()
                .map(|u| UnitInfo { symbol: &u.symbol, label: &u.label })
                .collect(),
            UnitTable::Affine { units } => units
                .iter()
                .map(|u| UnitInfo { symbol: &u.symbol, label: &u.label })
                .collect(),
            UnitTable::Density(table) => table
                .units
                .iter()
                .map(|u| UnitInfo { symbol: &u.symbol, label: &u.label })
                .collect(),
        }
    }

    pub fn unit_count(&self) -> usize {
        match &self.table {
            UnitTable::Linear { units } => units.len(),
            UnitTable::Affine { units } => units.len(),
            UnitTable::Density(table) => table.units.len(),
        }
    }

    /// Resolve a symbol or alias to the canonical unit symbol
    pub fn resolve_unit(&self, symbol: &str) -> Option<&str> {
        // Try direct lookup first
        if let Some(found) = self.unit_symbols().into_iter().find(|s| *s == symbol) {
            return Some(found);
        }
        // Try alias lookup
        let canonical = self
            .aliases
            .iter()
            .find(|(alias, _)| alias == symbol)
            .map(|(_, canonical)| canonical.as_str())?;
        self.unit_symbols().into_iter().find(|s| *s == canonical)
    }

    /// Substance table, for density categories
    pub fn density_table(&self) -> Option<&DensityTable> {
        match &self.table {
            UnitTable::Density(table) => Some(table),
            _ => None,
        }
    }

    /// Number of direct unit-to-unit formulas the base-unit method replaces
    pub fn pair_count(&self) -> usize {
        let n = self.unit_count();
        n * n.saturating_sub(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn length() -> CategoryDefinition {
        CategoryDefinition::linear("length", "Length", "m", vec![
            LinearUnit::new("m", "Meters", 1.0),
            LinearUnit::new("km", "Kilometers", 1000.0),
            LinearUnit::new("ft", "Feet", 0.3048),
        ])
        .aliases(&["meter", "meters"], "m")
        .alias("feet", "ft")
    }

    #[test]
    fn test_kind() {
        assert_eq!(length().kind(), CategoryKind::Linear);
    }

    #[test]
    fn test_unit_symbols_keep_order() {
        assert_eq!(length().unit_symbols(), vec!["m", "km", "ft"]);
    }

    #[test]
    fn test_resolve_unit() {
        let cat = length();
        assert_eq!(cat.resolve_unit("km"), Some("km"));
        assert_eq!(cat.resolve_unit("meters"), Some("m"));
        assert_eq!(cat.resolve_unit("feet"), Some("ft"));
        assert_eq!(cat.resolve_unit("parsecs"), None);
    }

    #[test]
    fn test_alias_to_missing_unit_does_not_resolve() {
        let cat = length().alias("mile", "mi");
        assert_eq!(cat.resolve_unit("mile"), None);
    }

    #[test]
    fn test_pair_count() {
        assert_eq!(length().pair_count(), 6);
    }

    #[test]
    fn test_serialize_kind_tag() {
        let json = serde_json::to_value(length()).unwrap();
        assert_eq!(json["table"]["kind"], "linear");
        assert_eq!(json["base_unit"], "m");
    }
}

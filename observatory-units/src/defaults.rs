//! Default unit selection for a freshly selected category
//!
//! A caller that switches category must never be left holding units from
//! the previous one; these defaults are always valid in the new category.

use observatory_core::ConversionError;
use serde::Serialize;

use crate::category::{CategoryDefinition, UnitTable};
use crate::registry::CategoryRegistry;

/// Starting selection for a category
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DefaultUnits {
    pub from: String,
    pub to: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub substance: Option<String>,
}

impl DefaultUnits {
    /// Defaults for a category definition
    ///
    /// Linear and affine categories get their first two units, or the same
    /// unit twice when only one exists. Density categories pair the first
    /// volume unit with the first mass unit and carry the default substance.
    pub fn for_category(category: &CategoryDefinition) -> Self {
        if let UnitTable::Density(table) = &category.table {
            let first = table.units.first().map(|u| u.symbol.as_str()).unwrap_or_default();
            let from = table.volume_units().next().map(|u| u.symbol.as_str()).unwrap_or(first);
            let to = table
                .mass_units()
                .next()
                .map(|u| u.symbol.as_str())
                .filter(|s| *s != from)
                .or_else(|| table.units.iter().map(|u| u.symbol.as_str()).find(|s| *s != from))
                .unwrap_or(from);
            return DefaultUnits {
                from: from.to_string(),
                to: to.to_string(),
                substance: Some(table.default_substance.clone()),
            };
        }

        let symbols = category.unit_symbols();
        let from = symbols.first().copied().unwrap_or_default();
        let to = symbols.get(1).copied().unwrap_or(from);
        DefaultUnits {
            from: from.to_string(),
            to: to.to_string(),
            substance: None,
        }
    }
}

impl CategoryRegistry {
    pub fn default_units_for(&self, key: &str) -> Result<DefaultUnits, ConversionError> {
        self.get_category(key).map(DefaultUnits::for_category)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{CategoryKind, LinearUnit, REGISTRY};

    #[test]
    fn test_every_builtin_category_gets_distinct_units() {
        for category in REGISTRY.list_categories() {
            let defaults = REGISTRY.default_units_for(&category.key).unwrap();
            assert_ne!(defaults.from, defaults.to, "{}", category.key);
            assert!(category.resolve_unit(&defaults.from).is_some());
            assert!(category.resolve_unit(&defaults.to).is_some());
        }
    }

    #[test]
    fn test_defaults_convert_cleanly() {
        for category in REGISTRY.list_categories() {
            let d = REGISTRY.default_units_for(&category.key).unwrap();
            let result = crate::convert(&category.key, &d.from, &d.to, 1.0, d.substance.as_deref());
            assert!(result.is_ok(), "{} defaults do not convert", category.key);
        }
    }

    #[test]
    fn test_length_defaults() {
        let d = REGISTRY.default_units_for("length").unwrap();
        assert_eq!(d.from, "m");
        assert_eq!(d.substance, None);
    }

    #[test]
    fn test_cooking_defaults() {
        let d = REGISTRY.default_units_for("cooking").unwrap();
        assert_eq!(d.from, "cup");
        assert_eq!(d.to, "g");
        assert_eq!(d.substance.as_deref(), Some("Flour (All Purpose)"));
    }

    #[test]
    fn test_single_unit_category() {
        let registry = CategoryRegistry::from_categories(vec![CategoryDefinition::linear(
            "count",
            "Count",
            "each",
            vec![LinearUnit::new("each", "Each", 1.0)],
        )])
        .unwrap();
        assert_eq!(registry.get("count").unwrap().kind(), CategoryKind::Linear);

        let d = registry.default_units_for("count").unwrap();
        assert_eq!(d.from, "each");
        assert_eq!(d.to, "each");

        let request = crate::ConversionRequest::new("count", &d.from, &d.to, 7.0);
        assert_eq!(registry.convert(&request).unwrap().value, 7.0);
    }

    #[test]
    fn test_unknown_category() {
        assert_eq!(
            REGISTRY.default_units_for("nonexistent").unwrap_err(),
            ConversionError::unknown_category("nonexistent")
        );
    }
}

//! Category registry - the single source of truth for units
//!
//! Categories keep insertion order for menu rendering and are looked up by
//! key. A custom registry can be built from any list of definitions; it is
//! validated up front so the engine never meets a bad factor at call time.

use std::collections::{HashMap, HashSet};
use std::sync::LazyLock;

use observatory_core::ConversionError;
use serde::Serialize;
use thiserror::Error;

use crate::builtin::builtin_categories;
use crate::category::{CategoryDefinition, UnitTable};

/// Global registry of the built-in categories
pub static REGISTRY: LazyLock<CategoryRegistry> = LazyLock::new(CategoryRegistry::builtin);

/// Reasons a set of category definitions cannot form a registry
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RegistryError {
    #[error("duplicate category key '{0}'")]
    DuplicateCategory(String),
    #[error("category '{0}' has no units")]
    EmptyCategory(String),
    #[error("duplicate unit '{unit}' in category '{category}'")]
    DuplicateUnit { category: String, unit: String },
    #[error("unit '{unit}' in category '{category}' has invalid factor {factor}")]
    InvalidFactor { category: String, unit: String, factor: f64 },
    #[error("category '{category}' base unit '{unit}' must exist with factor 1")]
    InvalidBaseUnit { category: String, unit: String },
    #[error("alias '{alias}' in category '{category}' does not resolve to its unit")]
    InvalidAlias { category: String, alias: String },
    #[error("category '{0}' has no substances")]
    NoSubstances(String),
    #[error("substance '{substance}' in category '{category}' has invalid density {density}")]
    InvalidDensity { category: String, substance: String, density: f64 },
    #[error("default substance '{substance}' is not in category '{category}'")]
    InvalidDefaultSubstance { category: String, substance: String },
}

/// Registry of category definitions, in insertion order
#[derive(Debug, Clone)]
pub struct CategoryRegistry {
    categories: Vec<CategoryDefinition>,
    index: HashMap<String, usize>,
}

/// A category entry for menus: key, name, kind and base unit
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategorySummary<'a> {
    pub key: &'a str,
    pub display_name: &'a str,
    pub kind: crate::CategoryKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_unit: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<&'a str>,
    pub unit_count: usize,
}

impl CategoryRegistry {
    /// The built-in categories
    pub fn builtin() -> Self {
        let categories = builtin_categories();
        let index = categories
            .iter()
            .enumerate()
            .map(|(i, c)| (c.key.clone(), i))
            .collect();
        CategoryRegistry { categories, index }
    }

    /// Build a registry from custom definitions, validating each one
    pub fn from_categories(categories: Vec<CategoryDefinition>) -> Result<Self, RegistryError> {
        let mut index = HashMap::new();
        for (i, category) in categories.iter().enumerate() {
            validate_category(category)?;
            if index.insert(category.key.clone(), i).is_some() {
                return Err(RegistryError::DuplicateCategory(category.key.clone()));
            }
        }
        Ok(CategoryRegistry { categories, index })
    }

    /// Get a category by key
    pub fn get_category(&self, key: &str) -> Result<&CategoryDefinition, ConversionError> {
        self.get(key).ok_or_else(|| ConversionError::unknown_category(key))
    }

    pub fn get(&self, key: &str) -> Option<&CategoryDefinition> {
        self.index.get(key).map(|&i| &self.categories[i])
    }

    /// All categories in insertion order
    pub fn list_categories(&self) -> &[CategoryDefinition] {
        &self.categories
    }

    pub fn summaries(&self) -> Vec<CategorySummary<'_>> {
        self.categories
            .iter()
            .map(|c| CategorySummary {
                key: &c.key,
                display_name: &c.display_name,
                kind: c.kind(),
                base_unit: c.base_unit.as_deref(),
                note: c.note.as_deref(),
                unit_count: c.unit_count(),
            })
            .collect()
    }

    /// Unit symbols of a category; substance names for density categories
    /// are available from `list_substances`
    pub fn list_units(&self, key: &str) -> Result<Vec<&str>, ConversionError> {
        Ok(self.get_category(key)?.unit_symbols())
    }

    /// Substance names of a density category (empty for other kinds)
    pub fn list_substances(&self, key: &str) -> Result<Vec<&str>, ConversionError> {
        let category = self.get_category(key)?;
        Ok(category
            .density_table()
            .map(|t| t.substance_names())
            .unwrap_or_default())
    }

    /// Direct formulas the base-unit method replaces for a category
    pub fn pair_count(&self, key: &str) -> Result<usize, ConversionError> {
        Ok(self.get_category(key)?.pair_count())
    }

    pub fn len(&self) -> usize {
        self.categories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }
}

impl Default for CategoryRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}

fn validate_category(category: &CategoryDefinition) -> Result<(), RegistryError> {
    let key = &category.key;
    let symbols = category.unit_symbols();
    if symbols.is_empty() {
        return Err(RegistryError::EmptyCategory(key.clone()));
    }

    let mut seen = HashSet::new();
    for symbol in &symbols {
        if !seen.insert(*symbol) {
            return Err(RegistryError::DuplicateUnit {
                category: key.clone(),
                unit: symbol.to_string(),
            });
        }
    }

    // an alias that shadows another unit's symbol never reaches its target
    for (alias, target) in &category.aliases {
        if category.resolve_unit(alias) != Some(target.as_str()) {
            return Err(RegistryError::InvalidAlias {
                category: key.clone(),
                alias: alias.clone(),
            });
        }
    }

    match &category.table {
        UnitTable::Linear { units } => {
            for unit in units {
                if !unit.factor.is_finite() || unit.factor <= 0.0 {
                    return Err(RegistryError::InvalidFactor {
                        category: key.clone(),
                        unit: unit.symbol.clone(),
                        factor: unit.factor,
                    });
                }
            }
            let base = category.base_unit.clone().unwrap_or_default();
            let base_ok = units.iter().any(|u| u.symbol == base && u.factor == 1.0);
            if !base_ok {
                return Err(RegistryError::InvalidBaseUnit {
                    category: key.clone(),
                    unit: base,
                });
            }
        }
        UnitTable::Affine { units } => {
            for unit in units {
                let ratio = unit.numerator / unit.denominator;
                if !ratio.is_finite() || ratio == 0.0 || !unit.offset.is_finite() {
                    return Err(RegistryError::InvalidFactor {
                        category: key.clone(),
                        unit: unit.symbol.clone(),
                        factor: ratio,
                    });
                }
            }
        }
        UnitTable::Density(table) => {
            for unit in &table.units {
                let factor = match unit.measure {
                    crate::Measure::Volume { per_cup } => per_cup,
                    crate::Measure::Mass { grams } => grams,
                };
                if !factor.is_finite() || factor <= 0.0 {
                    return Err(RegistryError::InvalidFactor {
                        category: key.clone(),
                        unit: unit.symbol.clone(),
                        factor,
                    });
                }
            }
            if table.substances.is_empty() {
                return Err(RegistryError::NoSubstances(key.clone()));
            }
            for substance in &table.substances {
                if !substance.grams_per_cup.is_finite() || substance.grams_per_cup <= 0.0 {
                    return Err(RegistryError::InvalidDensity {
                        category: key.clone(),
                        substance: substance.name.clone(),
                        density: substance.grams_per_cup,
                    });
                }
            }
            if table.substance(&table.default_substance).is_none() {
                return Err(RegistryError::InvalidDefaultSubstance {
                    category: key.clone(),
                    substance: table.default_substance.clone(),
                });
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::category::LinearUnit;
    use crate::density::{cooking_table, Substance};

    fn single(key: &str) -> CategoryDefinition {
        CategoryDefinition::linear(key, "Single", "u", vec![LinearUnit::new("u", "Unit", 1.0)])
    }

    #[test]
    fn test_builtin_passes_validation() {
        let rebuilt = CategoryRegistry::from_categories(builtin_categories());
        assert!(rebuilt.is_ok(), "{:?}", rebuilt.err());
    }

    #[test]
    fn test_get_category() {
        assert_eq!(REGISTRY.get_category("length").unwrap().display_name, "Length");
        assert_eq!(
            REGISTRY.get_category("nonexistent").unwrap_err(),
            ConversionError::unknown_category("nonexistent")
        );
    }

    #[test]
    fn test_list_categories_keeps_insertion_order() {
        let keys: Vec<&str> = REGISTRY.list_categories().iter().map(|c| c.key.as_str()).collect();
        assert_eq!(&keys[..3], &["length", "mass", "temperature"]);
        assert_eq!(keys.len(), REGISTRY.len());
    }

    #[test]
    fn test_list_units() {
        assert_eq!(
            REGISTRY.list_units("temperature").unwrap(),
            vec!["Celsius", "Fahrenheit", "Kelvin", "Rankine"]
        );
        assert!(REGISTRY.list_units("nonexistent").is_err());
    }

    #[test]
    fn test_list_substances() {
        let substances = REGISTRY.list_substances("cooking").unwrap();
        assert!(substances.contains(&"Flour (All Purpose)"));
        assert!(REGISTRY.list_substances("length").unwrap().is_empty());
    }

    #[test]
    fn test_pair_count() {
        assert_eq!(REGISTRY.pair_count("temperature").unwrap(), 12);
    }

    #[test]
    fn test_summaries() {
        let summaries = REGISTRY.summaries();
        let temp = summaries.iter().find(|s| s.key == "temperature").unwrap();
        assert_eq!(temp.kind, crate::CategoryKind::Affine);
        assert_eq!(temp.base_unit, None);
    }

    #[test]
    fn test_rejects_duplicate_key() {
        let err = CategoryRegistry::from_categories(vec![single("a"), single("a")]).unwrap_err();
        assert_eq!(err, RegistryError::DuplicateCategory("a".to_string()));
    }

    #[test]
    fn test_rejects_duplicate_unit() {
        let cat = CategoryDefinition::linear("a", "A", "u", vec![
            LinearUnit::new("u", "Unit", 1.0),
            LinearUnit::new("u", "Again", 2.0),
        ]);
        assert!(matches!(
            CategoryRegistry::from_categories(vec![cat]),
            Err(RegistryError::DuplicateUnit { .. })
        ));
    }

    #[test]
    fn test_rejects_bad_factor() {
        for factor in [0.0, -1.0, f64::NAN, f64::INFINITY] {
            let cat = CategoryDefinition::linear("a", "A", "u", vec![
                LinearUnit::new("u", "Unit", 1.0),
                LinearUnit::new("v", "Bad", factor),
            ]);
            assert!(matches!(
                CategoryRegistry::from_categories(vec![cat]),
                Err(RegistryError::InvalidFactor { .. })
            ));
        }
    }

    #[test]
    fn test_rejects_missing_base_unit() {
        let cat = CategoryDefinition::linear("a", "A", "base", vec![LinearUnit::new("u", "Unit", 1.0)]);
        assert!(matches!(
            CategoryRegistry::from_categories(vec![cat]),
            Err(RegistryError::InvalidBaseUnit { .. })
        ));
    }

    #[test]
    fn test_rejects_dangling_alias() {
        let cat = single("a").alias("x", "missing");
        assert!(matches!(
            CategoryRegistry::from_categories(vec![cat]),
            Err(RegistryError::InvalidAlias { .. })
        ));
    }

    #[test]
    fn test_rejects_alias_shadowed_by_unit() {
        let cat = CategoryDefinition::linear("length", "Length", "m", vec![
            LinearUnit::new("m", "Meters", 1.0),
            LinearUnit::new("ft", "Feet", 0.3048),
        ])
        .alias("m", "ft");
        assert_eq!(
            CategoryRegistry::from_categories(vec![cat]).unwrap_err(),
            RegistryError::InvalidAlias {
                category: "length".to_string(),
                alias: "m".to_string(),
            }
        );
    }

    #[test]
    fn test_rejects_empty_category() {
        let cat = CategoryDefinition::linear("a", "A", "u", vec![]);
        assert_eq!(
            CategoryRegistry::from_categories(vec![cat]).unwrap_err(),
            RegistryError::EmptyCategory("a".to_string())
        );
    }

    #[test]
    fn test_rejects_bad_density_tables() {
        let mut table = cooking_table();
        table.substances.push(Substance::new("Vacuum", 0.0, &[]));
        let cat = CategoryDefinition::density("c", "C", "g", table);
        assert!(matches!(
            CategoryRegistry::from_categories(vec![cat]),
            Err(RegistryError::InvalidDensity { .. })
        ));

        let mut table = cooking_table();
        table.default_substance = "Unobtainium".to_string();
        let cat = CategoryDefinition::density("c", "C", "g", table);
        assert!(matches!(
            CategoryRegistry::from_categories(vec![cat]),
            Err(RegistryError::InvalidDefaultSubstance { .. })
        ));

        let mut table = cooking_table();
        table.substances.clear();
        let cat = CategoryDefinition::density("c", "C", "g", table);
        assert_eq!(
            CategoryRegistry::from_categories(vec![cat]).unwrap_err(),
            RegistryError::NoSubstances("c".to_string())
        );
    }
}

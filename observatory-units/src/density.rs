//! Ingredient densities for volume-to-weight conversions
//!
//! Every substance stores a single grams-per-US-cup constant. Volume units
//! are expressed as "how many of this unit make a cup", mass units as grams
//! per unit, so any pair converts through grams:
//! `grams = amount * grams_per_cup / per_cup` for volumes and
//! `grams = amount * grams` for masses.

use serde::Serialize;

use crate::category::DensityTable;

/// Millilitres in one US cup, shared by every ingredient
pub const ML_PER_CUP: f64 = 236.588;

/// Tablespoons in one US cup
pub const TBSP_PER_CUP: f64 = 16.0;

/// Teaspoons in one US cup
pub const TSP_PER_CUP: f64 = 48.0;

/// Grams in one avoirdupois ounce
pub const GRAMS_PER_OUNCE: f64 = 28.349523125;

/// What a density unit measures
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Measure {
    /// `per_cup` of this unit make one US cup
    Volume { per_cup: f64 },
    /// One of this unit weighs `grams`
    Mass { grams: f64 },
}

/// A volume or mass unit usable in a density category
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DensityUnit {
    pub symbol: String,
    pub label: String,
    pub measure: Measure,
}

impl DensityUnit {
    pub fn volume(symbol: &str, label: &str, per_cup: f64) -> Self {
        DensityUnit {
            symbol: symbol.to_string(),
            label: label.to_string(),
            measure: Measure::Volume { per_cup },
        }
    }

    pub fn mass(symbol: &str, label: &str, grams: f64) -> Self {
        DensityUnit {
            symbol: symbol.to_string(),
            label: label.to_string(),
            measure: Measure::Mass { grams },
        }
    }

    pub fn is_volume(&self) -> bool {
        matches!(self.measure, Measure::Volume { .. })
    }

    pub fn is_mass(&self) -> bool {
        matches!(self.measure, Measure::Mass { .. })
    }

    /// Amount of this unit expressed in grams of `substance`
    pub fn to_grams(&self, amount: f64, substance: &Substance) -> f64 {
        match self.measure {
            Measure::Volume { per_cup } => amount * substance.grams_per_cup / per_cup,
            Measure::Mass { grams } => amount * grams,
        }
    }

    /// Grams of `substance` expressed in this unit
    pub fn from_grams(&self, grams: f64, substance: &Substance) -> f64 {
        match self.measure {
            Measure::Volume { per_cup } => grams * per_cup / substance.grams_per_cup,
            Measure::Mass { grams: per_unit } => grams / per_unit,
        }
    }
}

/// Ingredient density entry (grams per US cup)
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Substance {
    pub name: String,
    pub grams_per_cup: f64,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub aliases: Vec<String>,
}

impl Substance {
    pub fn new(name: &str, grams_per_cup: f64, aliases: &[&str]) -> Self {
        Substance {
            name: name.to_string(),
            grams_per_cup,
            aliases: aliases.iter().map(|a| a.to_string()).collect(),
        }
    }

    pub fn grams_per_tablespoon(&self) -> f64 {
        self.grams_per_cup / TBSP_PER_CUP
    }

    pub fn grams_per_teaspoon(&self) -> f64 {
        self.grams_per_cup / TSP_PER_CUP
    }

    pub fn grams_per_milliliter(&self) -> f64 {
        self.grams_per_cup / ML_PER_CUP
    }

    fn matches(&self, normalized: &str) -> bool {
        normalize_substance(&self.name) == normalized
            || self.aliases.iter().any(|a| normalize_substance(a) == normalized)
    }
}

/// Normalize substance name (lowercase, trim, standardize separators)
pub fn normalize_substance(name: &str) -> String {
    name.trim()
        .to_lowercase()
        .replace(['-', '_'], " ")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

impl DensityTable {
    /// Lookup a substance by exact name, then by normalized name or alias
    pub fn substance(&self, name: &str) -> Option<&Substance> {
        if let Some(found) = self.substances.iter().find(|s| s.name == name) {
            return Some(found);
        }
        let normalized = normalize_substance(name);
        self.substances.iter().find(|s| s.matches(&normalized))
    }

    pub fn unit(&self, symbol: &str) -> Option<&DensityUnit> {
        self.units.iter().find(|u| u.symbol == symbol)
    }

    pub fn substance_names(&self) -> Vec<&str> {
        self.substances.iter().map(|s| s.name.as_str()).collect()
    }

    pub fn volume_units(&self) -> impl Iterator<Item = &DensityUnit> {
        self.units.iter().filter(|u| u.is_volume())
    }

    pub fn mass_units(&self) -> impl Iterator<Item = &DensityUnit> {
        self.units.iter().filter(|u| u.is_mass())
    }
}

/// Cooking table: US volume measures, metric and avoirdupois masses
pub fn cooking_table() -> DensityTable {
    DensityTable {
        units: vec![
            DensityUnit::volume("cup", "Cups (US)", 1.0),
            DensityUnit::volume("tbsp", "Tablespoons", TBSP_PER_CUP),
            DensityUnit::volume("tsp", "Teaspoons", TSP_PER_CUP),
            DensityUnit::volume("ml", "Milliliters", ML_PER_CUP),
            DensityUnit::mass("g", "Grams", 1.0),
            DensityUnit::mass("kg", "Kilograms", 1000.0),
            DensityUnit::mass("oz", "Ounces", GRAMS_PER_OUNCE),
        ],
        substances: vec![
            Substance::new("Water", ML_PER_CUP, &["acqua"]),
            Substance::new("Flour (All Purpose)", 120.0,
                &["flour", "all purpose flour", "ap flour", "plain flour"]),
            Substance::new("Sugar (Granulated)", 200.0,
                &["sugar", "granulated sugar", "white sugar"]),
            Substance::new("Sugar (Brown, Packed)", 220.0,
                &["brown sugar", "packed brown sugar"]),
            Substance::new("Rice (Uncooked)", 185.0, &["rice", "white rice"]),
            Substance::new("Butter", 227.0, &["unsalted butter", "salted butter"]),
            Substance::new("Honey", 340.0, &[]),
            Substance::new("Milk", 240.0, &["whole milk"]),
            Substance::new("Olive Oil", 216.0, &["extra virgin olive oil"]),
            Substance::new("Cocoa Powder", 85.0, &["cocoa", "unsweetened cocoa"]),
        ],
        default_substance: "Flour (All Purpose)".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_by_name_and_alias() {
        let table = cooking_table();
        assert_eq!(table.substance("Flour (All Purpose)").unwrap().grams_per_cup, 120.0);
        assert_eq!(table.substance("flour").unwrap().name, "Flour (All Purpose)");
        assert_eq!(table.substance("  ALL-PURPOSE   flour ").unwrap().name, "Flour (All Purpose)");
        assert!(table.substance("Unobtainium").is_none());
    }

    #[test]
    fn test_derived_densities() {
        let flour = cooking_table().substance("flour").unwrap().clone();
        assert_eq!(flour.grams_per_tablespoon(), 7.5);
        assert_eq!(flour.grams_per_teaspoon(), 2.5);
        assert!((flour.grams_per_milliliter() - 120.0 / 236.588).abs() < 1e-12);
    }

    #[test]
    fn test_cup_to_grams() {
        let table = cooking_table();
        let flour = table.substance("flour").unwrap();
        let cup = table.unit("cup").unwrap();
        assert_eq!(cup.to_grams(1.0, flour), 120.0);
    }

    #[test]
    fn test_tablespoon_matches_derived_density() {
        let table = cooking_table();
        let butter = table.substance("Butter").unwrap();
        let tbsp = table.unit("tbsp").unwrap();
        assert!((tbsp.to_grams(2.0, butter) - 2.0 * butter.grams_per_tablespoon()).abs() < 1e-12);
    }

    #[test]
    fn test_grams_back_to_volume() {
        let table = cooking_table();
        let sugar = table.substance("sugar").unwrap();
        let cup = table.unit("cup").unwrap();
        assert_eq!(cup.from_grams(400.0, sugar), 2.0);
    }

    #[test]
    fn test_water_is_one_gram_per_ml() {
        let table = cooking_table();
        let water = table.substance("Water").unwrap();
        let ml = table.unit("ml").unwrap();
        assert!((ml.to_grams(500.0, water) - 500.0).abs() < 1e-9);
    }

    #[test]
    fn test_ounce_is_exact() {
        let table = cooking_table();
        let oz = table.unit("oz").unwrap();
        let water = table.substance("Water").unwrap();
        assert_eq!(oz.to_grams(16.0, water), 453.59237);
    }

    #[test]
    fn test_units_split_by_measure() {
        let table = cooking_table();
        let volumes: Vec<_> = table.volume_units().map(|u| u.symbol.as_str()).collect();
        let masses: Vec<_> = table.mass_units().map(|u| u.symbol.as_str()).collect();
        assert_eq!(volumes, vec!["cup", "tbsp", "tsp", "ml"]);
        assert_eq!(masses, vec!["g", "kg", "oz"]);
    }

    #[test]
    fn test_normalize_substance() {
        assert_eq!(normalize_substance("All-Purpose Flour"), "all purpose flour");
        assert_eq!(normalize_substance("  brown_sugar  "), "brown sugar");
        assert_eq!(normalize_substance("BUTTER"), "butter");
    }
}

//! Conversion catalog
//!
//! A static registry of categories -> units -> conversion rules, plus the
//! default unit pair and trivia facts of each category.
//!
//! Adding a unit to a scale category only needs its factor relative to the
//! category's base unit; no pairwise table is kept.

pub mod rules;
mod builtin;

use once_cell::sync::Lazy;
use std::collections::HashSet;

use crate::shared::errors::{ConvertError, ConvertResult};
use crate::shared::types::{CategoryDTO, UnitDTO};
use rules::{ConversionRule, Rule};

/// Built once on first use
static BUILTIN_CATALOG: Lazy<Catalog> = Lazy::new(|| Catalog {
    categories: builtin::categories(),
});

#[derive(Debug, Clone)]
pub struct Unit {
    pub id: String,
    pub name: String,
    pub symbol: String,
    /// `None` marks a unit that is listed but cannot be converted from
    pub rule: Option<Rule>,
    pub trivia: Option<String>,
}

impl Unit {
    pub fn new(id: &str, name: &str, symbol: &str, rule: Option<Rule>) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            symbol: symbol.to_string(),
            rule,
            trivia: None,
        }
    }

    /// Unit whose base value is `value * factor`
    pub fn scaled(id: &str, name: &str, symbol: &str, factor: f64) -> Self {
        Self::new(id, name, symbol, Some(Rule::scale(factor)))
    }

    pub fn with_trivia(mut self, trivia: &str) -> Self {
        self.trivia = Some(trivia.to_string());
        self
    }

    /// Option text for unit selectors, e.g. "Meter (m)"
    pub fn label(&self) -> String {
        format!("{} ({})", self.name, self.symbol)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DefaultPair {
    pub from: String,
    pub to: String,
}

impl DefaultPair {
    pub fn new(from: &str, to: &str) -> Self {
        Self { from: from.to_string(), to: to.to_string() }
    }
}

#[derive(Debug, Clone)]
pub struct Category {
    pub id: String,
    pub name: String,
    pub icon: String,
    /// Declaration order is the order unit selectors show
    pub units: Vec<Unit>,
    pub default_pair: Option<DefaultPair>,
    pub trivia: Vec<String>,
}

impl Category {
    pub fn new(id: &str, name: &str, icon: &str, units: Vec<Unit>) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            icon: icon.to_string(),
            units,
            default_pair: None,
            trivia: Vec::new(),
        }
    }

    pub fn with_default_pair(mut self, from: &str, to: &str) -> Self {
        self.default_pair = Some(DefaultPair::new(from, to));
        self
    }

    pub fn with_trivia(mut self, facts: &[&str]) -> Self {
        self.trivia = facts.iter().map(|f| f.to_string()).collect();
        self
    }

    pub fn unit(&self, unit_id: &str) -> Option<&Unit> {
        self.units.iter().find(|u| u.id == unit_id)
    }

    /// Registered default pair, else the first and second declared units,
    /// else the first unit on both sides.
    pub fn resolved_default_pair(&self) -> Option<(&str, &str)> {
        if let Some(pair) = &self.default_pair {
            if self.unit(&pair.from).is_some() && self.unit(&pair.to).is_some() {
                return Some((pair.from.as_str(), pair.to.as_str()));
            }
        }

        let first = self.units.first()?;
        let second = self.units.get(1).unwrap_or(first);
        Some((first.id.as_str(), second.id.as_str()))
    }

    pub fn to_dto(&self) -> CategoryDTO {
        CategoryDTO {
            id: self.id.clone(),
            name: self.name.clone(),
            icon: self.icon.clone(),
            units: self
                .units
                .iter()
                .map(|u| UnitDTO {
                    id: u.id.clone(),
                    label: u.label(),
                    symbol: u.symbol.clone(),
                    category: self.id.clone(),
                })
                .collect(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Catalog {
    categories: Vec<Category>,
}

impl Catalog {
    /// Build a catalog, checking that every category has at least one unit,
    /// unit ids are unique per category and category ids are unique.
    pub fn new(categories: Vec<Category>) -> ConvertResult<Self> {
        let mut seen_categories = HashSet::new();
        for category in &categories {
            if !seen_categories.insert(category.id.as_str()) {
                return Err(ConvertError::InvalidInput(format!(
                    "Duplicate category: {}",
                    category.id
                )));
            }
            if category.units.is_empty() {
                return Err(ConvertError::InvalidInput(format!(
                    "Category {} has no units",
                    category.id
                )));
            }
            let mut seen_units = HashSet::new();
            for unit in &category.units {
                if !seen_units.insert(unit.id.as_str()) {
                    return Err(ConvertError::InvalidInput(format!(
                        "Duplicate unit {} in category {}",
                        unit.id, category.id
                    )));
                }
            }
        }
        Ok(Self { categories })
    }

    /// The shipped catalog: length, mass, temperature, volume, time, speed, currency
    pub fn builtin() -> &'static Catalog {
        &BUILTIN_CATALOG
    }

    /// Categories in tab order
    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    pub fn get_category(&self, id: &str) -> Option<&Category> {
        self.categories.iter().find(|c| c.id == id)
    }

    pub fn get_unit(&self, category_id: &str, unit_id: &str) -> Option<&Unit> {
        self.get_category(category_id)?.unit(unit_id)
    }

    pub fn category_dtos(&self) -> Vec<CategoryDTO> {
        self.categories.iter().map(Category::to_dto).collect()
    }

    /// Convert `value` between two units of the same category.
    ///
    /// Identity conversions return `value` unchanged. Otherwise a direct
    /// formula on the source unit wins; failing that the value is routed
    /// through the base unit (`from_base(target)(to_base(source)(value))`).
    pub fn convert(&self, category_id: &str, from_unit: &str, to_unit: &str, value: f64) -> ConvertResult<f64> {
        let category = self
            .get_category(category_id)
            .ok_or_else(|| ConvertError::UnknownCategory(category_id.to_string()))?;
        let from = category
            .unit(from_unit)
            .ok_or_else(|| ConvertError::UnknownUnit(format!("{}:{}", category_id, from_unit)))?;
        let to = category
            .unit(to_unit)
            .ok_or_else(|| ConvertError::UnknownUnit(format!("{}:{}", category_id, to_unit)))?;

        let not_convertible = || ConvertError::NotConvertible(format!("{} -> {}", from.id, to.id));

        let rule = from.rule.as_ref().ok_or_else(not_convertible)?;

        if from.id == to.id {
            return Ok(value);
        }

        if let Some(result) = rule.convert_direct(value, &to.id) {
            log::debug!("[Catalog] {} {} -> {} {} (direct)", value, from.id, result, to.id);
            return Ok(result);
        }

        let base_value = rule.to_base(value).ok_or_else(not_convertible)?;
        let result = to
            .rule
            .as_ref()
            .and_then(|target| target.from_base(base_value))
            .ok_or_else(not_convertible)?;

        log::debug!(
            "[Catalog] {} {} -> {} {} (base: {})",
            value, from.id, result, to.id, base_value
        );
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn approx_eq(a: f64, b: f64) -> bool {
        (a - b).abs() <= 1e-6 * a.abs().max(b.abs()).max(1.0)
    }

    fn all_pairs() -> Vec<(String, String, String)> {
        let mut pairs = Vec::new();
        for category in Catalog::builtin().categories() {
            for a in &category.units {
                for b in &category.units {
                    pairs.push((category.id.clone(), a.id.clone(), b.id.clone()));
                }
            }
        }
        pairs
    }

    #[test]
    fn test_builtin_passes_validation() {
        let categories = Catalog::builtin().categories().to_vec();
        assert!(Catalog::new(categories).is_ok());
    }

    #[test]
    fn test_builtin_categories_in_tab_order() {
        let ids: Vec<&str> = Catalog::builtin().categories().iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, vec!["length", "mass", "temperature", "volume", "time", "speed", "currency"]);
    }

    #[test]
    fn test_every_unit_has_a_rule() {
        for category in Catalog::builtin().categories() {
            for unit in &category.units {
                assert!(unit.rule.is_some(), "{}:{} has no rule", category.id, unit.id);
            }
        }
    }

    #[test]
    fn test_default_pairs_resolve_to_registered_units() {
        for category in Catalog::builtin().categories() {
            let pair = category.default_pair.as_ref().expect("builtin categories register a default pair");
            assert_eq!(category.resolved_default_pair(), Some((pair.from.as_str(), pair.to.as_str())));
        }
    }

    #[test]
    fn test_identity_is_exact() {
        let catalog = Catalog::builtin();
        for category in catalog.categories() {
            for unit in &category.units {
                for v in [0.0, -17.25, 1.0e12, 0.1 + 0.2] {
                    assert_eq!(catalog.convert(&category.id, &unit.id, &unit.id, v).unwrap(), v);
                }
            }
        }
    }

    #[test]
    fn test_temperature_reference_points() {
        let catalog = Catalog::builtin();
        assert_eq!(catalog.convert("temperature", "celsius", "fahrenheit", 0.0).unwrap(), 32.0);
        assert_eq!(catalog.convert("temperature", "celsius", "fahrenheit", 100.0).unwrap(), 212.0);
        assert_eq!(catalog.convert("temperature", "celsius", "kelvin", 0.0).unwrap(), 273.15);
        let f = catalog.convert("temperature", "kelvin", "fahrenheit", 0.0).unwrap();
        assert!(approx_eq(f, -459.67));
    }

    #[test]
    fn test_length_meter_to_foot() {
        let feet = Catalog::builtin().convert("length", "meter", "foot", 1.0).unwrap();
        assert!((feet - 3.28084).abs() < 1e-5);
    }

    #[test]
    fn test_mass_kilogram_to_pound() {
        let pounds = Catalog::builtin().convert("mass", "kilogram", "pound", 1.0).unwrap();
        assert!((pounds - 2.20462).abs() < 1e-5);
    }

    #[test]
    fn test_unknown_ids() {
        let catalog = Catalog::builtin();
        assert!(matches!(
            catalog.convert("bogus", "meter", "foot", 1.0),
            Err(ConvertError::UnknownCategory(_))
        ));
        assert!(matches!(
            catalog.convert("length", "parsec", "foot", 1.0),
            Err(ConvertError::UnknownUnit(_))
        ));
        assert!(matches!(
            catalog.convert("length", "meter", "kelvin", 1.0),
            Err(ConvertError::UnknownUnit(_))
        ));
        assert!(catalog.get_unit("mass", "meter").is_none());
    }

    #[test]
    fn test_unit_without_rule_is_not_convertible() {
        let catalog = Catalog::new(vec![Category::new(
            "length",
            "Length",
            "ruler",
            vec![
                Unit::scaled("meter", "Meter", "m", 1.0),
                Unit::new("cubit", "Cubit", "cu", None),
            ],
        )])
        .unwrap();

        assert!(matches!(
            catalog.convert("length", "cubit", "meter", 1.0),
            Err(ConvertError::NotConvertible(_))
        ));
        assert!(matches!(
            catalog.convert("length", "meter", "cubit", 1.0),
            Err(ConvertError::NotConvertible(_))
        ));
    }

    #[test]
    fn test_new_rejects_malformed_categories() {
        assert!(Catalog::new(vec![Category::new("empty", "Empty", "x", vec![])]).is_err());

        let dup_units = Category::new(
            "length",
            "Length",
            "ruler",
            vec![Unit::scaled("meter", "Meter", "m", 1.0), Unit::scaled("meter", "Metre", "m", 1.0)],
        );
        assert!(Catalog::new(vec![dup_units]).is_err());

        let single = Category::new("length", "Length", "ruler", vec![Unit::scaled("meter", "Meter", "m", 1.0)]);
        assert!(Catalog::new(vec![single.clone(), single]).is_err());
    }

    #[test]
    fn test_default_pair_fallbacks() {
        let two = Category::new(
            "length",
            "Length",
            "ruler",
            vec![Unit::scaled("meter", "Meter", "m", 1.0), Unit::scaled("foot", "Foot", "ft", 0.3048)],
        );
        assert_eq!(two.resolved_default_pair(), Some(("meter", "foot")));

        let stale = two.clone().with_default_pair("meter", "furlong");
        assert_eq!(stale.resolved_default_pair(), Some(("meter", "foot")));

        let one = Category::new("length", "Length", "ruler", vec![Unit::scaled("meter", "Meter", "m", 1.0)]);
        assert_eq!(one.resolved_default_pair(), Some(("meter", "meter")));
    }

    #[test]
    fn test_dto_keeps_declaration_order() {
        let dto = Catalog::builtin().get_category("temperature").unwrap().to_dto();
        let ids: Vec<&str> = dto.units.iter().map(|u| u.id.as_str()).collect();
        assert_eq!(ids, vec!["celsius", "fahrenheit", "kelvin"]);
        assert_eq!(dto.units[0].label, "Celsius (°C)");
    }

    proptest! {
        #[test]
        fn prop_round_trip_every_pair(v in prop_oneof![Just(0.0), -1.0e6..1.0e6f64, 1.0e6..1.0e12f64]) {
            let catalog = Catalog::builtin();
            for (category, a, b) in all_pairs() {
                let there = catalog.convert(&category, &a, &b, v).unwrap();
                let back = catalog.convert(&category, &b, &a, there).unwrap();
                prop_assert!(approx_eq(back, v), "{}: {} -> {} -> {}: {} vs {}", category, a, b, a, back, v);
            }
        }
    }
}

//! Conversion rules with enum dispatch
//!
//! Scale-family units (length, mass, volume, time, speed, currency) route
//! through the category's base unit with a single factor. Temperature is not
//! a ratio, so its units carry one explicit formula per target unit instead.

use enum_dispatch::enum_dispatch;

/// How a value in one unit reaches the other units of its category
#[enum_dispatch]
pub trait ConversionRule {
    /// Value in this unit -> value in the category's base unit
    fn to_base(&self, value: f64) -> Option<f64>;

    /// Value in the category's base unit -> value in this unit
    fn from_base(&self, value: f64) -> Option<f64>;

    /// Direct formula from this unit to `target`, bypassing the base unit.
    /// Takes precedence over the base route when present.
    fn convert_direct(&self, _value: f64, _target: &str) -> Option<f64> {
        None
    }
}

/// A closed-form conversion between two units
pub type Formula = fn(f64) -> f64;

#[enum_dispatch(ConversionRule)]
#[derive(Debug, Clone, Copy)]
pub enum Rule {
    Scale(ScaleRule),
    Pairwise(PairwiseRule),
}

impl Rule {
    pub fn scale(factor: f64) -> Self {
        Rule::Scale(ScaleRule { factor })
    }

    pub fn pairwise(formulas: &'static [(&'static str, Formula)]) -> Self {
        Rule::Pairwise(PairwiseRule { formulas })
    }
}

/// `base = value * factor`
#[derive(Debug, Clone, Copy)]
pub struct ScaleRule {
    pub factor: f64,
}

impl ConversionRule for ScaleRule {
    fn to_base(&self, value: f64) -> Option<f64> {
        Some(value * self.factor)
    }

    fn from_base(&self, value: f64) -> Option<f64> {
        if self.factor == 0.0 {
            return None;
        }
        Some(value / self.factor)
    }
}

/// Explicit formula per target unit id; there is no base route
#[derive(Debug, Clone, Copy)]
pub struct PairwiseRule {
    pub formulas: &'static [(&'static str, Formula)],
}

impl ConversionRule for PairwiseRule {
    fn to_base(&self, _value: f64) -> Option<f64> {
        None
    }

    fn from_base(&self, _value: f64) -> Option<f64> {
        None
    }

    fn convert_direct(&self, value: f64, target: &str) -> Option<f64> {
        self.formulas
            .iter()
            .find(|(id, _)| *id == target)
            .map(|(_, formula)| formula(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scale_rule_routes_through_base() {
        let foot = Rule::scale(0.3048);
        assert!((foot.to_base(10.0).unwrap() - 3.048).abs() < 1e-12);
        assert!((foot.from_base(1.0).unwrap() - 3.280839895).abs() < 1e-9);
        assert_eq!(foot.convert_direct(1.0, "meter"), None);
    }

    #[test]
    fn test_zero_factor_has_no_inverse() {
        let broken = Rule::scale(0.0);
        assert_eq!(broken.from_base(1.0), None);
    }

    #[test]
    fn test_pairwise_rule_uses_target_formula() {
        fn double(v: f64) -> f64 { v * 2.0 }
        static TWICE: [(&str, Formula); 1] = [("twice", double)];
        let rule = Rule::pairwise(&TWICE);
        assert_eq!(rule.convert_direct(21.0, "twice"), Some(42.0));
        assert_eq!(rule.convert_direct(21.0, "thrice"), None);
        assert_eq!(rule.to_base(1.0), None);
    }
}

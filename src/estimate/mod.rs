//! Price display rules.
//!
//! The prediction service answers in Lakh. Anything with three or more
//! integer digits is at least 100 Lakh and is shown in Crore instead
//! (1 Crore = 100 Lakh).

pub mod grouping;

use std::fmt;

/// Raw estimates at or above this many Lakh are displayed in Crore.
pub const CRORE_THRESHOLD_LAKH: f64 = 100.0;

const LAKH_PER_CRORE: f64 = 100.0;

/// Maximum fractional digits shown for a display value.
const DISPLAY_PRECISION: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Unit {
    Lakh,
    Crore,
}

impl Unit {
    pub fn label(self) -> &'static str {
        match self {
            Unit::Lakh => "Lakh",
            Unit::Crore => "Crore",
        }
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A predicted price together with the unit it is displayed in.
#[derive(Debug, Clone, PartialEq)]
pub struct EstimateResult {
    /// Price exactly as returned by the service, in Lakh.
    pub raw: f64,
    /// `raw` rescaled into `unit`.
    pub value: f64,
    pub unit: Unit,
}

impl EstimateResult {
    pub fn from_raw(raw: f64) -> Self {
        if raw.trunc().abs() >= CRORE_THRESHOLD_LAKH {
            Self {
                raw,
                value: raw / LAKH_PER_CRORE,
                unit: Unit::Crore,
            }
        } else {
            Self {
                raw,
                value: raw,
                unit: Unit::Lakh,
            }
        }
    }

    /// The result panel only shows strictly positive estimates.
    pub fn is_displayable(&self) -> bool {
        self.raw.is_finite() && self.raw > 0.0
    }

    /// Value without the unit, e.g. `1.537` or `12,34,567.5`.
    pub fn formatted_value(&self) -> String {
        grouping::group_indian(&trim_fraction(self.value))
    }

    /// Value followed by its unit, e.g. `42.5 Lakh`.
    pub fn display(&self) -> String {
        format!("{} {}", self.formatted_value(), self.unit)
    }
}

impl fmt::Display for EstimateResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.display())
    }
}

/// Round to `DISPLAY_PRECISION` digits and drop trailing zeros.
fn trim_fraction(value: f64) -> String {
    let rounded = format!("{:.*}", DISPLAY_PRECISION, value);
    let trimmed = if rounded.contains('.') {
        rounded.trim_end_matches('0').trim_end_matches('.')
    } else {
        rounded.as_str()
    };
    if trimmed == "-0" {
        "0".to_string()
    } else {
        trimmed.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_two_digit_estimate_stays_in_lakh() {
        let est = EstimateResult::from_raw(42.5);
        assert_eq!(est.unit, Unit::Lakh);
        assert_eq!(est.display(), "42.5 Lakh");
    }

    #[test]
    fn test_three_digit_estimate_moves_to_crore() {
        let est = EstimateResult::from_raw(153.7);
        assert_eq!(est.unit, Unit::Crore);
        assert_eq!(est.display(), "1.537 Crore");
    }

    #[test]
    fn test_threshold_boundary() {
        assert_eq!(EstimateResult::from_raw(99.99).unit, Unit::Lakh);
        assert_eq!(EstimateResult::from_raw(100.0).unit, Unit::Crore);
        assert_eq!(EstimateResult::from_raw(100.0).display(), "1 Crore");
    }

    #[test]
    fn test_whole_number_has_no_fraction() {
        assert_eq!(EstimateResult::from_raw(85.0).display(), "85 Lakh");
        assert_eq!(EstimateResult::from_raw(250.0).display(), "2.5 Crore");
    }

    #[test]
    fn test_large_crore_value_is_grouped() {
        // 12,34,567 Crore expressed in Lakh
        let est = EstimateResult::from_raw(123_456_700.0);
        assert_eq!(est.display(), "12,34,567 Crore");
    }

    #[test]
    fn test_precision_is_capped() {
        assert_eq!(EstimateResult::from_raw(42.12345).display(), "42.123 Lakh");
        assert_eq!(EstimateResult::from_raw(1234.5).display(), "12.345 Crore");
    }

    #[test]
    fn test_non_positive_is_not_displayable() {
        assert!(!EstimateResult::from_raw(0.0).is_displayable());
        assert!(!EstimateResult::from_raw(-3.2).is_displayable());
        assert!(!EstimateResult::from_raw(f64::NAN).is_displayable());
        assert!(EstimateResult::from_raw(0.01).is_displayable());
    }
}

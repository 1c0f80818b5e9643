// ============================================================
// DERIVED COLUMN RULE
// ============================================================
// Ratio column computed from two numeric source columns

use serde::{Deserialize, Serialize};

pub const ABSENCES_COLUMN: &str = "Absences";
pub const DELIVERABLES_COLUMN: &str = "Deliverables";
pub const PERFORMANCE_RATIO_COLUMN: &str = "Performance Ratio";

/// `output = numerator / (denominator + denominator_offset)`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DerivedColumn {
    pub numerator: String,
    pub denominator: String,
    pub output: String,

    /// Added to every denominator value, zero or not
    pub denominator_offset: f64,
}

impl Default for DerivedColumn {
    fn default() -> Self {
        Self::performance_ratio()
    }
}

impl DerivedColumn {
    /// Deliverables / (Absences + 1)
    pub fn performance_ratio() -> Self {
        Self {
            numerator: DELIVERABLES_COLUMN.to_string(),
            denominator: ABSENCES_COLUMN.to_string(),
            output: PERFORMANCE_RATIO_COLUMN.to_string(),
            denominator_offset: 1.0,
        }
    }

    pub fn compute(&self, numerator: f64, denominator: f64) -> f64 {
        numerator / (denominator + self.denominator_offset)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_offset_applies_to_every_denominator() {
        let rule = DerivedColumn::performance_ratio();
        assert_eq!(rule.compute(6.0, 2.0), 2.0);
        assert_eq!(rule.compute(3.0, 0.0), 3.0);
        assert_eq!(rule.compute(5.0, 4.0), 1.0);
    }

    #[test]
    fn test_zero_denominator_follows_ieee() {
        let rule = DerivedColumn::default();
        assert_eq!(rule.compute(4.0, -1.0), f64::INFINITY);
        assert!(rule.compute(0.0, -1.0).is_nan());
    }
}

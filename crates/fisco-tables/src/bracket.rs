//! # Bracket Resolver — Generic Progressive-Bracket Tables
//!
//! A [`BracketTable`] is an ordered set of `(lower, upper, nominal rate,
//! deduction)` tuples. Every progressive algorithm in the engine (the five
//! Simples Nacional annexes) resolves through the same lookup:
//!
//! ```text
//! effective = (value * nominal_rate - deduction) / value
//! ```
//!
//! computed in integer centavos, floored at zero, and only then exposed as
//! an `f64` ratio.
//!
//! ## Invariants
//!
//! Enforced at construction, violations are fatal [`TableError`]s:
//! brackets are contiguous (next lower = upper + one centavo),
//! non-overlapping, sorted ascending, start at zero, only the last bracket
//! is unbounded, and nominal rates never decrease. With the statutory
//! deduction values this makes the effective rate continuous and
//! non-decreasing across tier boundaries.

use serde::Serialize;

use fisco_core::{EngineError, Money, Rate};

use crate::error::TableError;

/// One progressive tier: `lower <= value <= upper` selects it.
///
/// `upper = None` marks the final, unbounded tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TaxBracket {
    /// Inclusive lower bound.
    pub lower: Money,
    /// Inclusive upper bound; `None` for the last tier.
    pub upper: Option<Money>,
    /// Nominal statutory rate of the tier.
    pub nominal_rate: Rate,
    /// Deduction subtracted after applying the nominal rate.
    pub deduction: Money,
}

/// The outcome of resolving a value against a bracket table.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BracketMatch {
    /// 1-based tier number of the covering bracket.
    pub tier: usize,
    /// The covering bracket.
    pub bracket: TaxBracket,
    /// `max(0, value * nominal_rate - deduction)`, in centavos. For a
    /// Simples annex resolved on RBT12 this is the 12-month tax figure.
    pub tax_at_value: Money,
    /// `tax_at_value / value`; zero when `value` is zero.
    pub effective_rate: f64,
}

/// A named, year-tagged, validated progressive bracket table.
///
/// Tables are immutable snapshots: construct once per fiscal year, share
/// freely. Deserialization is deliberately not implemented — a table that
/// bypassed [`BracketTable::new`] could violate the contiguity invariants.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BracketTable {
    name: String,
    year: u16,
    brackets: Vec<TaxBracket>,
}

impl BracketTable {
    /// Validate and build a bracket table.
    pub fn new(
        name: impl Into<String>,
        year: u16,
        brackets: Vec<TaxBracket>,
    ) -> Result<Self, TableError> {
        let name = name.into();

        let Some(first) = brackets.first() else {
            return Err(TableError::Empty { name });
        };
        if !first.lower.is_zero() {
            return Err(TableError::FirstLowerNonZero {
                name,
                lower: first.lower,
            });
        }

        let last_index = brackets.len() - 1;
        for (i, bracket) in brackets.iter().enumerate() {
            let tier = i + 1;
            match bracket.upper {
                Some(upper) if upper < bracket.lower => {
                    return Err(TableError::InvertedBounds {
                        name,
                        tier,
                        lower: bracket.lower,
                        upper,
                    });
                }
                Some(upper) => {
                    if i == last_index {
                        return Err(TableError::BoundedLast { name, upper });
                    }
                    let expected = upper + Money::from_centavos(1);
                    let next = &brackets[i + 1];
                    if next.lower != expected {
                        return Err(TableError::Gap {
                            name,
                            tier: tier + 1,
                            expected,
                            found: next.lower,
                        });
                    }
                }
                None if i != last_index => {
                    return Err(TableError::UnboundedInner { name, tier });
                }
                None => {}
            }
            if i > 0 && bracket.nominal_rate < brackets[i - 1].nominal_rate {
                return Err(TableError::DecreasingRate { name, tier });
            }
        }

        Ok(Self {
            name,
            year,
            brackets,
        })
    }

    /// The table's name (e.g. `"simples/anexo_iii"`).
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The fiscal year this snapshot belongs to.
    pub fn year(&self) -> u16 {
        self.year
    }

    /// The tiers, ascending.
    pub fn brackets(&self) -> &[TaxBracket] {
        &self.brackets
    }

    /// Resolve the covering bracket for `value` and derive the effective
    /// rate.
    ///
    /// A zero value short-circuits to tier 1 with rate zero — no division
    /// is attempted. Negative values are rejected with `InvalidInput`.
    pub fn resolve(&self, value: Money) -> Result<BracketMatch, EngineError> {
        if value.is_negative() {
            return Err(EngineError::InvalidInput {
                field: "value",
                reason: format!("bracket lookup requires a non-negative value, got {value}"),
            });
        }

        if value.is_zero() {
            return Ok(BracketMatch {
                tier: 1,
                bracket: self.brackets[0],
                tax_at_value: Money::ZERO,
                effective_rate: 0.0,
            });
        }

        // The last bracket is unbounded, so the scan always terminates
        // with a match.
        let (i, bracket) = self
            .brackets
            .iter()
            .enumerate()
            .find(|(_, b)| value >= b.lower && b.upper.map_or(true, |upper| value <= upper))
            .map(|(i, b)| (i, *b))
            .unwrap_or((self.brackets.len() - 1, self.brackets[self.brackets.len() - 1]));

        let tax_at_value = bracket
            .nominal_rate
            .apply(value)
            .saturating_sub_floor_zero(bracket.deduction);

        tracing::debug!(
            table = %self.name,
            tier = i + 1,
            value = %value,
            tax = %tax_at_value,
            "bracket resolved"
        );

        Ok(BracketMatch {
            tier: i + 1,
            bracket,
            tax_at_value,
            effective_rate: tax_at_value.ratio_of(value),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn faixa(lower: i64, upper: Option<i64>, bps: i64, deduction: i64) -> TaxBracket {
        TaxBracket {
            lower: Money::from_centavos(lower),
            upper: upper.map(Money::from_centavos),
            nominal_rate: Rate::from_bps(bps),
            deduction: Money::from_reais(deduction),
        }
    }

    fn two_tier() -> BracketTable {
        BracketTable::new(
            "test/two_tier",
            2026,
            vec![
                faixa(0, Some(18_000_000), 400, 0),
                faixa(18_000_001, None, 730, 5_940),
            ],
        )
        .unwrap()
    }

    // -- Construction invariants --

    #[test]
    fn rejects_empty_table() {
        let err = BracketTable::new("t", 2026, vec![]).unwrap_err();
        assert!(matches!(err, TableError::Empty { .. }));
    }

    #[test]
    fn rejects_nonzero_first_lower() {
        let err =
            BracketTable::new("t", 2026, vec![faixa(100, None, 400, 0)]).unwrap_err();
        assert!(matches!(err, TableError::FirstLowerNonZero { .. }));
    }

    #[test]
    fn rejects_gap_between_tiers() {
        let err = BracketTable::new(
            "t",
            2026,
            vec![
                faixa(0, Some(18_000_000), 400, 0),
                faixa(18_000_100, None, 730, 5_940),
            ],
        )
        .unwrap_err();
        assert!(matches!(err, TableError::Gap { tier: 2, .. }));
    }

    #[test]
    fn rejects_overlapping_tiers() {
        // Overlap reads as a gap violation: next lower != upper + 0.01.
        let err = BracketTable::new(
            "t",
            2026,
            vec![
                faixa(0, Some(18_000_000), 400, 0),
                faixa(17_000_000, None, 730, 5_940),
            ],
        )
        .unwrap_err();
        assert!(matches!(err, TableError::Gap { .. }));
    }

    #[test]
    fn rejects_bounded_last_tier() {
        let err = BracketTable::new(
            "t",
            2026,
            vec![faixa(0, Some(18_000_000), 400, 0)],
        )
        .unwrap_err();
        assert!(matches!(err, TableError::BoundedLast { .. }));
    }

    #[test]
    fn rejects_unbounded_inner_tier() {
        let err = BracketTable::new(
            "t",
            2026,
            vec![faixa(0, None, 400, 0), faixa(0, None, 730, 0)],
        )
        .unwrap_err();
        assert!(matches!(err, TableError::UnboundedInner { tier: 1, .. }));
    }

    #[test]
    fn rejects_decreasing_nominal_rate() {
        let err = BracketTable::new(
            "t",
            2026,
            vec![
                faixa(0, Some(18_000_000), 730, 0),
                faixa(18_000_001, None, 400, 0),
            ],
        )
        .unwrap_err();
        assert!(matches!(err, TableError::DecreasingRate { tier: 2, .. }));
    }

    #[test]
    fn rejects_inverted_bounds() {
        let err = BracketTable::new(
            "t",
            2026,
            vec![
                faixa(0, Some(-1), 400, 0),
                faixa(0, None, 730, 0),
            ],
        )
        .unwrap_err();
        assert!(matches!(err, TableError::InvertedBounds { tier: 1, .. }));
    }

    // -- Resolution --

    #[test]
    fn resolves_first_tier() {
        let m = two_tier().resolve(Money::from_reais(100_000)).unwrap();
        assert_eq!(m.tier, 1);
        assert_eq!(m.tax_at_value, Money::from_reais(4_000));
        assert!((m.effective_rate - 0.04).abs() < 1e-12);
    }

    #[test]
    fn resolves_boundary_inclusive() {
        // Exactly 180,000.00 still sits in tier 1; one centavo more flips.
        let table = two_tier();
        assert_eq!(table.resolve(Money::from_reais(180_000)).unwrap().tier, 1);
        assert_eq!(
            table
                .resolve(Money::from_reais(180_000) + Money::from_centavos(1))
                .unwrap()
                .tier,
            2
        );
    }

    #[test]
    fn deduction_interpolates_effective_rate() {
        // 300,000 in tier 2: (300000 * 7.3% - 5940) / 300000 = 5.32%.
        let m = two_tier().resolve(Money::from_reais(300_000)).unwrap();
        assert_eq!(m.tax_at_value, Money::from_reais(15_960));
        assert!((m.effective_rate - 0.0532).abs() < 1e-9);
    }

    #[test]
    fn zero_value_short_circuits() {
        let m = two_tier().resolve(Money::ZERO).unwrap();
        assert_eq!(m.tier, 1);
        assert_eq!(m.effective_rate, 0.0);
        assert_eq!(m.tax_at_value, Money::ZERO);
    }

    #[test]
    fn negative_value_is_invalid_input() {
        let err = two_tier().resolve(Money::from_centavos(-1)).unwrap_err();
        assert!(matches!(err, EngineError::InvalidInput { field: "value", .. }));
    }

    #[test]
    fn deduction_never_drives_tax_negative() {
        // A deduction larger than the nominal tax floors at zero.
        let table = BracketTable::new(
            "t",
            2026,
            vec![
                faixa(0, Some(100_00), 100, 500),
                faixa(100_01, None, 200, 500),
            ],
        )
        .unwrap();
        let m = table.resolve(Money::from_reais(50)).unwrap();
        assert_eq!(m.tax_at_value, Money::ZERO);
        assert_eq!(m.effective_rate, 0.0);
    }
}

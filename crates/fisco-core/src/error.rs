//! # Error Types — Domain Error Taxonomy
//!
//! Expected business outcomes are typed `Err` variants, never panics:
//! a company whose revenue outgrew a regime is a calculation *result* the
//! caller renders, not an exception. All errors use `thiserror`.
//!
//! Fatal configuration errors (malformed bracket tables) live in
//! `fisco-tables`, since only table construction can produce them.

use thiserror::Error;

use crate::activity::{ActivityType, TaxRegime};
use crate::money::Money;

/// Domain errors returned by the regime calculators.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EngineError {
    /// A caller-supplied value is outside its valid domain.
    #[error("invalid input for {field}: {reason}")]
    InvalidInput {
        /// The offending profile field.
        field: &'static str,
        /// Why the value was rejected.
        reason: String,
    },

    /// Revenue exceeds the regime's ceiling.
    #[error(
        "{regime}: revenue {revenue} exceeds the {limit} ceiling by {excess_percentage:.1}%"
    )]
    RegimeIneligible {
        /// The regime that was requested.
        regime: TaxRegime,
        /// The regime's revenue ceiling.
        limit: Money,
        /// The annualized revenue that breached it.
        revenue: Money,
        /// How far over the ceiling, as a percentage of the ceiling.
        excess_percentage: f64,
        /// The regime the company should migrate to.
        next_regime: Option<TaxRegime>,
    },

    /// The activity is forbidden under the requested regime.
    #[error("activity {activity} is not supported under {regime}")]
    ActivityNotSupported {
        /// The regime that was requested.
        regime: TaxRegime,
        /// The barred activity.
        activity: ActivityType,
    },
}

impl EngineError {
    /// Build a [`EngineError::RegimeIneligible`] from a ceiling breach.
    pub fn ineligible(
        regime: TaxRegime,
        limit: Money,
        revenue: Money,
        next_regime: Option<TaxRegime>,
    ) -> Self {
        let excess = revenue.saturating_sub_floor_zero(limit);
        Self::RegimeIneligible {
            regime,
            limit,
            revenue,
            excess_percentage: excess.ratio_of(limit) * 100.0,
            next_regime,
        }
    }
}

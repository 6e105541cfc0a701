//! # Cross-Regime Comparison
//!
//! Runs every regime over one profile and names the cheapest eligible
//! one. Each calculation is independent and side-effect free, so the four
//! regimes could just as well run in parallel; here they run in sequence
//! and ineligible regimes are kept in the output with their reason
//! instead of being silently dropped.

use serde::Serialize;

use fisco_core::{CompanyProfile, EngineError, TaxRegime};
use fisco_tables::TableSet;

use crate::result::CalculationResult;

/// A regime the profile could not use, and why.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IneligibleRegime {
    /// The regime that was rejected.
    pub regime: TaxRegime,
    /// The rendered rejection reason.
    pub reason: String,
}

/// The outcome of comparing all regimes for one profile.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RegimeComparison {
    /// Fiscal year of the tables used.
    pub table_year: u16,
    /// Results for the regimes the profile may elect, in regime order.
    pub results: Vec<CalculationResult>,
    /// Regimes the profile cannot elect, with reasons.
    pub ineligible: Vec<IneligibleRegime>,
    /// The eligible regime with the lowest monthly tax.
    pub recommended: Option<TaxRegime>,
}

/// Compare all four regimes for a profile.
///
/// Domain rejections (ceiling breaches, barred activities) land in
/// `ineligible`; an invalid profile aborts the whole comparison, since no
/// regime could compute it.
pub fn compare_regimes(
    profile: &CompanyProfile,
    tables: &TableSet,
) -> Result<RegimeComparison, EngineError> {
    profile.validate()?;

    let mut results = Vec::new();
    let mut ineligible = Vec::new();

    for regime in TaxRegime::all() {
        let mut candidate = profile.clone();
        candidate.regime = *regime;
        match crate::calculate(&candidate, tables) {
            Ok(result) => results.push(result),
            Err(
                err @ (EngineError::RegimeIneligible { .. }
                | EngineError::ActivityNotSupported { .. }),
            ) => {
                ineligible.push(IneligibleRegime {
                    regime: *regime,
                    reason: err.to_string(),
                });
            }
            Err(other) => return Err(other),
        }
    }

    let recommended = results
        .iter()
        .min_by_key(|r| r.gross_tax)
        .map(|r| r.regime);

    Ok(RegimeComparison {
        table_year: tables.year(),
        results,
        ineligible,
        recommended,
    })
}

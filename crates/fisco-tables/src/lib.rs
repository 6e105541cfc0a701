//! # fisco-tables — Year-Versioned Statutory Constants
//!
//! Every number the engine needs, bundled as an immutable [`TableSet`]
//! snapshot tagged with its fiscal year. Calculators receive a `&TableSet`
//! and echo its year into every result, so stored results stay
//! reproducible after tables are updated for a new year.
//!
//! ## Design
//!
//! - Tables are append-only snapshots: a new fiscal year means a new
//!   constructor, never an in-place edit.
//! - The generic [`bracket::BracketTable`] enforces the contiguity and
//!   monotonicity invariants at construction; a violation is a fatal
//!   configuration error ([`error::TableError`]), not a business outcome.
//! - No I/O: the snapshots are plain Rust constants behind constructors,
//!   validated by the test suite.

pub mod bracket;
pub mod cprb;
pub mod error;
pub mod mei;
pub mod payroll;
pub mod presumido;
pub mod real;
pub mod simples;

use serde::Serialize;

use fisco_core::Rate;

pub use bracket::{BracketMatch, BracketTable, TaxBracket};
pub use cprb::{CprbBlend, CprbSchedule};
pub use error::TableError;
pub use mei::{MeiFee, MeiTables, MeiTributeMix};
pub use payroll::PayrollTables;
pub use presumido::{PresumidoTables, Presumption};
pub use real::RealTables;
pub use simples::{Partilha, SimplesTables};

/// The municipal ISS legal band.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct IssBand {
    /// Constitutional floor (2%).
    pub floor: Rate,
    /// Constitutional cap (5%).
    pub cap: Rate,
}

impl IssBand {
    /// Resolve a caller-supplied ISS rate against the band.
    ///
    /// `None` defaults to the cap (the conservative estimate); out-of-band
    /// values are clamped with a warning.
    pub fn resolve(&self, requested: Option<Rate>) -> Rate {
        match requested {
            None => self.cap,
            Some(rate) => {
                let clamped = rate.clamp(self.floor, self.cap);
                if clamped != rate {
                    tracing::warn!(
                        requested = %rate,
                        clamped = %clamped,
                        "ISS rate outside the 2-5% band, clamping"
                    );
                }
                clamped
            }
        }
    }
}

/// All statutory tables for one fiscal year.
///
/// Immutable after construction; safe to share across threads and
/// calculations. The only long-lived state in the engine.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TableSet {
    year: u16,
    /// Simples Nacional annexes, partilha and ceilings.
    pub simples: SimplesTables,
    /// MEI fees and ceilings.
    pub mei: MeiTables,
    /// Lucro Presumido presumptions and rates.
    pub presumido: PresumidoTables,
    /// Lucro Real rates.
    pub real: RealTables,
    /// CLT encargo rates and the INSS ceiling.
    pub payroll: PayrollTables,
    /// CPRB transition schedule and sector rates.
    pub cprb: CprbSchedule,
    /// Municipal ISS band.
    pub iss_band: IssBand,
}

impl TableSet {
    /// Build the 2026 snapshot, surfacing any table-construction error.
    pub fn try_brazil_2026() -> Result<Self, TableError> {
        Ok(Self {
            year: 2026,
            simples: SimplesTables::brazil_2026()?,
            mei: MeiTables::brazil_2026(),
            presumido: PresumidoTables::brazil_2026(),
            real: RealTables::brazil_2026(),
            payroll: PayrollTables::brazil_2026(),
            cprb: CprbSchedule::brazil_transition(),
            iss_band: IssBand {
                floor: Rate::from_percent(2),
                cap: Rate::from_percent(5),
            },
        })
    }

    /// The built-in 2026 snapshot.
    ///
    /// The constants are validated by the test suite; a failure here is a
    /// configuration bug, which per the error-handling contract is the one
    /// condition allowed to abort.
    pub fn brazil_2026() -> Self {
        match Self::try_brazil_2026() {
            Ok(tables) => tables,
            Err(err) => unreachable!("built-in 2026 tables failed validation: {err}"),
        }
    }

    /// The snapshot for a fiscal year, when one is built in.
    pub fn for_year(year: u16) -> Result<Self, TableError> {
        match year {
            2026 => Ok(Self::brazil_2026()),
            _ => Err(TableError::UnknownYear { year }),
        }
    }

    /// The fiscal year of this snapshot.
    pub fn year(&self) -> u16 {
        self.year
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn built_in_2026_snapshot_validates() {
        let tables = TableSet::try_brazil_2026().unwrap();
        assert_eq!(tables.year(), 2026);
        assert_eq!(tables.simples.year(), 2026);
        assert_eq!(tables.mei.year(), 2026);
        assert_eq!(tables.payroll.year(), 2026);
    }

    #[test]
    fn unknown_year_is_rejected() {
        let err = TableSet::for_year(1999).unwrap_err();
        assert_eq!(err, TableError::UnknownYear { year: 1999 });
    }

    #[test]
    fn iss_band_defaults_to_cap() {
        let band = TableSet::brazil_2026().iss_band;
        assert_eq!(band.resolve(None), Rate::from_percent(5));
    }

    #[test]
    fn iss_band_clamps_out_of_band_rates() {
        let band = TableSet::brazil_2026().iss_band;
        assert_eq!(band.resolve(Some(Rate::from_percent(7))), Rate::from_percent(5));
        assert_eq!(band.resolve(Some(Rate::from_percent(1))), Rate::from_percent(2));
        assert_eq!(band.resolve(Some(Rate::from_bps(350))), Rate::from_bps(350));
    }

    #[test]
    fn snapshot_serializes_for_inspection() {
        let json = serde_json::to_value(TableSet::brazil_2026()).unwrap();
        assert_eq!(json["year"], 2026);
        assert!(json["simples"]["general_ceiling"].is_i64());
    }
}

//! # Lucro Real Tables — Accrual-Regime Rates
//!
//! IRPJ/CSLL rates shared with Lucro Presumido (the statute repeats them;
//! the tables do too, so each regime snapshot stands alone) plus the
//! non-cumulative PIS/COFINS rates, which are higher than the cumulative
//! pair because costs and expenses generate credits at the same rates.

use serde::Serialize;

use fisco_core::{ActivityType, Money, Rate};

/// The Lucro Real snapshot for one fiscal year.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RealTables {
    year: u16,
    /// IRPJ rate on taxable profit.
    pub irpj_rate: Rate,
    /// IRPJ surtax rate on the profit portion above the threshold.
    pub irpj_surtax_rate: Rate,
    /// Monthly taxable-profit threshold above which the surtax applies.
    pub irpj_surtax_threshold: Money,
    /// CSLL rate on taxable profit.
    pub csll_rate: Rate,
    /// CSLL rate for financial institutions.
    pub csll_rate_financial: Rate,
    /// Non-cumulative PIS rate.
    pub pis_rate: Rate,
    /// Non-cumulative COFINS rate.
    pub cofins_rate: Rate,
}

impl RealTables {
    /// Build the 2026 snapshot.
    pub fn brazil_2026() -> Self {
        Self {
            year: 2026,
            irpj_rate: Rate::from_percent(15),
            irpj_surtax_rate: Rate::from_percent(10),
            irpj_surtax_threshold: Money::from_reais(20_000),
            csll_rate: Rate::from_percent(9),
            csll_rate_financial: Rate::from_percent(15),
            pis_rate: Rate::from_bps(165),
            cofins_rate: Rate::from_bps(760),
        }
    }

    /// The fiscal year of this snapshot.
    pub fn year(&self) -> u16 {
        self.year
    }

    /// The CSLL rate applicable to an activity.
    pub fn csll_rate_for(&self, activity: ActivityType) -> Rate {
        if activity == ActivityType::InstituicaoFinanceira {
            self.csll_rate_financial
        } else {
            self.csll_rate
        }
    }
}

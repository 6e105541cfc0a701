//! # Lucro Presumido Tables — Presumption Percentages and Rates
//!
//! Under Lucro Presumido the taxable profit is *presumed* as an
//! activity-specific percentage of gross revenue. The IRPJ and CSLL bases
//! use distinct percentages: fuel resale presumes 1.6% for IRPJ but 12%
//! for CSLL; services presume 32% for both.

use serde::Serialize;

use fisco_core::{ActivityType, Money, Rate};

/// The presumption percentages of one activity class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Presumption {
    /// Share of gross revenue presumed as the IRPJ base.
    pub irpj_base: Rate,
    /// Share of gross revenue presumed as the CSLL base.
    pub csll_base: Rate,
}

/// The Lucro Presumido snapshot for one fiscal year.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PresumidoTables {
    year: u16,
    /// Annual revenue ceiling for electing the regime (R$ 78M).
    pub annual_ceiling: Money,
    /// IRPJ rate on the presumed base.
    pub irpj_rate: Rate,
    /// IRPJ surtax rate on the base portion above the threshold.
    pub irpj_surtax_rate: Rate,
    /// Monthly presumed-profit threshold above which the surtax applies.
    pub irpj_surtax_threshold: Money,
    /// CSLL rate on the presumed base.
    pub csll_rate: Rate,
    /// CSLL rate for financial institutions.
    pub csll_rate_financial: Rate,
    /// Cumulative PIS rate on gross revenue.
    pub pis_rate: Rate,
    /// Cumulative COFINS rate on gross revenue.
    pub cofins_rate: Rate,
}

impl PresumidoTables {
    /// Build the 2026 snapshot.
    pub fn brazil_2026() -> Self {
        Self {
            year: 2026,
            annual_ceiling: Money::from_reais(78_000_000),
            irpj_rate: Rate::from_percent(15),
            irpj_surtax_rate: Rate::from_percent(10),
            irpj_surtax_threshold: Money::from_reais(20_000),
            csll_rate: Rate::from_percent(9),
            csll_rate_financial: Rate::from_percent(15),
            pis_rate: Rate::from_bps(65),
            cofins_rate: Rate::from_percent(3),
        }
    }

    /// The fiscal year of this snapshot.
    pub fn year(&self) -> u16 {
        self.year
    }

    /// The presumption percentages for an activity.
    pub fn presumption(&self, activity: ActivityType) -> Presumption {
        let (irpj_bps, csll_bps) = match activity {
            ActivityType::Comercio | ActivityType::Industria => (800, 1_200),
            ActivityType::RevendaCombustiveis => (160, 1_200),
            ActivityType::TransporteCargas => (800, 1_200),
            ActivityType::TransportePassageiros => (1_600, 1_200),
            ActivityType::InstituicaoFinanceira => (1_600, 1_200),
            ActivityType::Servicos
            | ActivityType::ServicosProfissionais
            | ActivityType::ConstrucaoCivil
            | ActivityType::Limpeza
            | ActivityType::Vigilancia => (3_200, 3_200),
        };
        Presumption {
            irpj_base: Rate::from_bps(irpj_bps),
            csll_base: Rate::from_bps(csll_bps),
        }
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

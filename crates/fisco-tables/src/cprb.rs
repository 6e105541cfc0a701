//! # CPRB Transition Schedule — Reoneração 2025–2028
//!
//! The payroll-tax substitution (CPRB) is being phased out: between 2025
//! and 2028 a company in a covered sector pays a *blend* of the
//! revenue-based CPRB and the payroll-based CPP, with the CPRB share
//! shrinking each year until only the CPP remains. Calculators must select
//! the year-appropriate blend from this schedule — never hard-code one
//! year's factors.

use std::collections::BTreeMap;

use serde::Serialize;

use fisco_core::{ActivityType, Rate};

/// One year's blend: what fraction of the full CPRB and of the full CPP
/// applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CprbBlend {
    /// Share of the sector's statutory CPRB rate still in force.
    pub cprb_share: Rate,
    /// Share of the 20% payroll CPP already in force.
    pub cpp_share: Rate,
}

/// The transition schedule plus the covered sectors' CPRB revenue rates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CprbSchedule {
    blends: BTreeMap<u16, CprbBlend>,
    sector_rates: BTreeMap<ActivityType, Rate>,
}

impl CprbSchedule {
    /// Build the statutory 2025–2028 transition schedule.
    pub fn brazil_transition() -> Self {
        let mut blends = BTreeMap::new();
        blends.insert(2025, blend(8_000, 2_500));
        blends.insert(2026, blend(6_000, 5_000));
        blends.insert(2027, blend(4_000, 7_500));
        blends.insert(2028, blend(0, 10_000));

        let mut sector_rates = BTreeMap::new();
        sector_rates.insert(ActivityType::Servicos, Rate::from_bps(450));
        sector_rates.insert(ActivityType::ServicosProfissionais, Rate::from_bps(450));
        sector_rates.insert(ActivityType::ConstrucaoCivil, Rate::from_bps(450));
        sector_rates.insert(ActivityType::Industria, Rate::from_bps(250));
        sector_rates.insert(ActivityType::TransporteCargas, Rate::from_bps(150));
        sector_rates.insert(ActivityType::TransportePassageiros, Rate::from_bps(200));

        Self {
            blends,
            sector_rates,
        }
    }

    /// The blend in force for a tax year.
    ///
    /// Years before the transition window get the full CPRB; years after
    /// it get the full CPP.
    pub fn blend_for(&self, year: u16) -> CprbBlend {
        if let Some(b) = self.blends.get(&year) {
            return *b;
        }
        match self.blends.keys().next() {
            Some(&first) if year < first => blend(10_000, 0),
            _ => blend(0, 10_000),
        }
    }

    /// The statutory CPRB revenue rate of a covered sector, or `None` when
    /// the sector never had the substitution.
    pub fn sector_rate(&self, activity: ActivityType) -> Option<Rate> {
        self.sector_rates.get(&activity).copied()
    }
}

fn blend(cprb_bps: i64, cpp_bps: i64) -> CprbBlend {
    CprbBlend {
        cprb_share: Rate::from_bps(cprb_bps),
        cpp_share: Rate::from_bps(cpp_bps),
    }
}

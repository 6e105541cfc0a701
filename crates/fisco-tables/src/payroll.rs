//! # Payroll Tables — CLT Encargo Rates and the INSS Ceiling
//!
//! The employer-side rates the encargos calculator adds on top of a CLT
//! gross salary, the salário-de-contribuição ceiling that caps the
//! partner's pro-labore INSS, and the pro-labore contribution rates.

use serde::Serialize;

use fisco_core::{Money, Rate};

/// The payroll snapshot for one fiscal year.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PayrollTables {
    year: u16,
    /// Employer INSS on salaries (patronal).
    pub inss_patronal: Rate,
    /// FGTS deposit rate.
    pub fgts: Rate,
    /// Monthly provision for the 13th salary (1/12).
    pub decimo_terceiro: Rate,
    /// Monthly provision for vacation plus the constitutional third
    /// (1/12 × 4/3).
    pub ferias_com_terco: Rate,
    /// Lowest RAT/GILRAT risk-class rate.
    pub rat_floor: Rate,
    /// Highest RAT/GILRAT risk-class rate.
    pub rat_cap: Rate,
    /// Salário-de-contribuição ceiling for employee-side INSS.
    pub inss_ceiling: Money,
    /// Employee-side INSS rate on pro-labore.
    pub prolabore_employee_rate: Rate,
    /// Employer-side INSS rate on pro-labore (Lucro Presumido/Real only).
    pub prolabore_employer_rate: Rate,
}

impl PayrollTables {
    /// Build the 2026 snapshot.
    pub fn brazil_2026() -> Self {
        Self {
            year: 2026,
            inss_patronal: Rate::from_percent(20),
            fgts: Rate::from_percent(8),
            decimo_terceiro: Rate::from_bps(833),
            ferias_com_terco: Rate::from_bps(1_111),
            rat_floor: Rate::from_percent(1),
            rat_cap: Rate::from_percent(3),
            inss_ceiling: Money::from_centavos(815_741),
            prolabore_employee_rate: Rate::from_percent(11),
            prolabore_employer_rate: Rate::from_percent(20),
        }
    }

    /// The fiscal year of this snapshot.
    pub fn year(&self) -> u16 {
        self.year
    }

    /// Clamp a RAT rate into the 1–3% statutory band, logging when the
    /// caller's value was out of band.
    pub fn clamp_rat(&self, requested: Rate) -> Rate {
        let clamped = requested.clamp(self.rat_floor, self.rat_cap);
        if clamped != requested {
            tracing::warn!(
                requested = %requested,
                clamped = %clamped,
                "RAT rate outside the 1-3% band, clamping"
            );
        }
        clamped
    }
}

//! # Payroll Encargos Calculator — CLT Burden and Pro-Labore
//!
//! The employer cost of a CLT salary: INSS patronal, FGTS, RAT, the 13th
//! salary and vacation provisions, and the employer charges that cascade
//! onto both provisions (the provisions are salary too, so they attract
//! INSS/FGTS/RAT of their own). The multiplier is the ratio of total cost
//! to gross salary.
//!
//! The partner's pro-labore is a separate computation with one statutory
//! branch that must never blur: the 20% employer INSS applies under Lucro
//! Presumido and Lucro Real only — never under Simples Nacional, whose
//! CPP is already inside the DAS.

use serde::Serialize;

use fisco_core::{EngineError, Money, Rate, TaxRegime};
use fisco_tables::TableSet;

use crate::result::TaxComponent;

/// The employer-side cost breakdown of one CLT salary.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EncargosClt {
    /// The gross salary the breakdown is measured against.
    pub gross_salary: Money,
    /// The RAT rate actually applied (clamped into 1–3%).
    pub rat_rate: Rate,
    /// Sum of all employer charges.
    pub total_encargos: Money,
    /// Gross salary plus charges.
    pub total_cost: Money,
    /// `total_cost / gross_salary`.
    pub multiplier: f64,
    /// Named charge lines summing to `total_encargos`.
    pub breakdown: Vec<TaxComponent>,
}

/// Compute the CLT employer burden for one gross salary.
pub fn calc_encargos_clt(
    gross_salary: Money,
    rat: Rate,
    tables: &TableSet,
) -> Result<EncargosClt, EngineError> {
    if gross_salary.is_negative() {
        return Err(EngineError::InvalidInput {
            field: "gross_salary",
            reason: format!("must be non-negative, got {gross_salary}"),
        });
    }

    let t = &tables.payroll;
    let rat = t.clamp_rat(rat);

    let inss = t.inss_patronal.apply(gross_salary);
    let fgts = t.fgts.apply(gross_salary);
    let rat_amount = rat.apply(gross_salary);
    let decimo_terceiro = t.decimo_terceiro.apply(gross_salary);
    let ferias = t.ferias_com_terco.apply(gross_salary);

    // The provisions are themselves salary: INSS + FGTS + RAT cascade
    // onto the 13th and vacation amounts.
    let provision_base = decimo_terceiro + ferias;
    let cascade_rate = Rate::from_bps(t.inss_patronal.bps() + t.fgts.bps() + rat.bps());
    let cascade = cascade_rate.apply(provision_base);

    let breakdown = vec![
        TaxComponent::new("inss_patronal", inss),
        TaxComponent::new("fgts", fgts),
        TaxComponent::new("rat", rat_amount),
        TaxComponent::new("decimo_terceiro", decimo_terceiro),
        TaxComponent::new("ferias_com_terco", ferias),
        TaxComponent::new("encargos_sobre_provisoes", cascade),
    ];
    let total_encargos: Money = breakdown.iter().map(|c| c.amount).sum();
    let total_cost = gross_salary + total_encargos;

    Ok(EncargosClt {
        gross_salary,
        rat_rate: rat,
        total_encargos,
        total_cost,
        multiplier: total_cost.ratio_of(gross_salary),
        breakdown,
    })
}

/// The INSS split on a partner's pro-labore.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProLabore {
    /// The pro-labore amount.
    pub gross: Money,
    /// Contribution base: the pro-labore capped at the INSS ceiling.
    pub contribution_base: Money,
    /// Employee-side INSS (11% of the capped base), withheld from the
    /// partner.
    pub employee_inss: Money,
    /// Employer-side INSS (20%, uncapped) — zero under Simples Nacional
    /// and MEI.
    pub employer_inss: Money,
    /// Company cost: the pro-labore plus the employer contribution.
    pub total_cost: Money,
}

/// Compute the pro-labore INSS split for a partner under a regime.
pub fn calc_pro_labore(
    gross: Money,
    regime: TaxRegime,
    tables: &TableSet,
) -> Result<ProLabore, EngineError> {
    if gross.is_negative() {
        return Err(EngineError::InvalidInput {
            field: "pro_labore",
            reason: format!("must be non-negative, got {gross}"),
        });
    }

    let t = &tables.payroll;
    let contribution_base = gross.min(t.inss_ceiling);
    let employee_inss = t.prolabore_employee_rate.apply(contribution_base);

    // The patronal contribution on pro-labore exists only outside the
    // unified regimes.
    let employer_inss = match regime {
        TaxRegime::LucroPresumido | TaxRegime::LucroReal => {
            t.prolabore_employer_rate.apply(gross)
        }
        TaxRegime::Mei | TaxRegime::SimplesNacional => Money::ZERO,
    };

    Ok(ProLabore {
        gross,
        contribution_base,
        employee_inss,
        employer_inss,
        total_cost: gross + employer_inss,
    })
}

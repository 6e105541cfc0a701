//! # Lucro Real Calculator — Accrual Regime
//!
//! Tax on actual profit: revenue minus deductible costs and expenses,
//! floored at zero (a loss means zero IRPJ/CSLL, never negative tax).
//! PIS/COFINS are non-cumulative — costs and expenses form a credit base
//! netted from revenue before the 1.65%/7.6% rates apply.
//!
//! The CPRB transition is table-driven: the calculator asks the schedule
//! for the blend in force for the snapshot's fiscal year, so moving from
//! the 2026 to a 2027 table set changes the CPRB/CPP split without
//! touching this code.

use fisco_core::{CompanyProfile, EngineError, TaxRegime};
use fisco_tables::TableSet;

use crate::result::{CalculationResult, Eligibility, RealDetail, RegimeDetail, TaxComponent};

/// Compute the monthly Lucro Real liability.
pub fn calc_real(
    profile: &CompanyProfile,
    tables: &TableSet,
) -> Result<CalculationResult, EngineError> {
    profile.validate()?;

    let revenue = profile.current_month_revenue;
    let t = &tables.real;

    let deductibles = profile.deductible_costs + profile.deductible_expenses;
    let taxable_profit = revenue.saturating_sub_floor_zero(deductibles);

    let irpj = t.irpj_rate.apply(taxable_profit);
    let surtax = t
        .irpj_surtax_rate
        .apply(taxable_profit.saturating_sub_floor_zero(t.irpj_surtax_threshold));
    let csll = t.csll_rate_for(profile.activity_type).apply(taxable_profit);

    // Non-cumulative contributions: credits accrue at the same rates on
    // the cost/expense base, so the net contribution falls on revenue
    // minus the credit base, floored at zero.
    let credit_base = deductibles.min(revenue);
    let contribution_base = revenue.saturating_sub_floor_zero(credit_base);
    let pis = t.pis_rate.apply(contribution_base);
    let cofins = t.cofins_rate.apply(contribution_base);

    let mut decomposition = vec![TaxComponent::new("irpj", irpj)];
    if !surtax.is_zero() {
        decomposition.push(TaxComponent::new("adicional_irpj", surtax));
    }
    decomposition.push(TaxComponent::new("csll", csll));
    decomposition.push(TaxComponent::new("pis", pis));
    decomposition.push(TaxComponent::new("cofins", cofins));

    // Employer social security: covered sectors blend the revenue-based
    // CPRB with the payroll-based CPP per the year's transition factors;
    // everyone else pays the full CPP.
    let cprb_rate = tables.cprb.sector_rate(profile.activity_type);
    let full_cpp = tables.payroll.inss_patronal.apply(profile.monthly_payroll);
    match cprb_rate {
        Some(rate) => {
            let blend = tables.cprb.blend_for(tables.year());
            let cprb = blend.cprb_share.apply(rate.apply(revenue));
            let cpp = blend.cpp_share.apply(full_cpp);
            if !cprb.is_zero() {
                decomposition.push(TaxComponent::new("cprb", cprb));
            }
            if !cpp.is_zero() {
                decomposition.push(TaxComponent::new("cpp", cpp));
            }
        }
        None => {
            if !full_cpp.is_zero() {
                decomposition.push(TaxComponent::new("cpp", full_cpp));
            }
        }
    }

    let iss_applies = profile.activity_type.is_service();
    if iss_applies {
        let rate = tables.iss_band.resolve(profile.iss_rate);
        decomposition.push(TaxComponent::new("iss", rate.apply(revenue)));
    }

    Ok(CalculationResult::assemble(
        TaxRegime::LucroReal,
        tables.year(),
        revenue,
        decomposition,
        Eligibility::unlimited(),
        Vec::new(),
        RegimeDetail::Real(RealDetail {
            taxable_profit,
            pis_cofins_credit_base: credit_base,
            cprb_rate,
        }),
    ))
}

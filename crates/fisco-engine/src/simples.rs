//! # Simples Nacional Calculator — Unified Progressive Regime
//!
//! The bracket is resolved on the trailing-12-month revenue (RBT12); the
//! resulting effective rate is applied to the *current month's* revenue
//! for the monthly DAS estimate. Both figures come from the profile as
//! separate fields — neither is ever derived from the other.
//!
//! Two statutory branches live here:
//!
//! - **Annex IV**: employer social security (CPP) is not part of the
//!   unified rate and is computed separately at 20% of payroll.
//! - **Sublimite**: RBT12 past R$ 3.6M (but within the R$ 4.8M ceiling)
//!   keeps the company in the regime, but ISS/ICMS leave the unified
//!   payment (`dentro_sublimite = false`).

use fisco_core::{ActivityType, Annex, CompanyProfile, EngineError, Money, TaxRegime};
use fisco_tables::TableSet;

use crate::alerts::{ceiling_proximity, fator_r_window, sublimite_proximity};
use crate::fator_r::{fator_r, resolve_annex};
use crate::result::{CalculationResult, Eligibility, RegimeDetail, SimplesDetail, TaxComponent};

/// Compute the monthly Simples Nacional estimate, or an eligibility
/// failure when RBT12 breached the general ceiling.
pub fn calc_simples(
    profile: &CompanyProfile,
    tables: &TableSet,
) -> Result<CalculationResult, EngineError> {
    profile.validate()?;

    let rbt12 = profile.trailing_12m_revenue;
    let ceiling = tables.simples.general_ceiling;
    if rbt12 > ceiling {
        return Err(EngineError::ineligible(
            TaxRegime::SimplesNacional,
            ceiling,
            rbt12,
            Some(TaxRegime::LucroPresumido),
        ));
    }

    // Fator R only matters for the Annex III/V switch; it is re-derived
    // from the trailing figures on every call.
    let fator_r_applicable = matches!(
        profile.activity_type,
        ActivityType::Servicos | ActivityType::ServicosProfissionais
    );
    let ratio = fator_r_applicable
        .then(|| fator_r(profile.trailing_12m_payroll, profile.trailing_12m_revenue));

    let annex = resolve_annex(
        profile.activity_type,
        ratio.unwrap_or(0.0),
        profile.requested_annex,
        profile.resale_share,
    )?;

    let bracket_match = tables.simples.annex_table(annex).resolve(rbt12)?;

    // Monthly DAS = effective rate × current month revenue, computed in
    // integers as tax12 * month / rbt12.
    let das = bracket_match.tax_at_value.mul_div(
        profile.current_month_revenue.centavos(),
        rbt12.centavos(),
    );

    let dentro_sublimite = rbt12 <= tables.simples.sublimite;

    let mut decomposition = partilha_decomposition(das, annex, tables);

    // Annex IV: CPP outside the DAS, at the employer INSS rate.
    let cpp_outside_das = (annex == Annex::IV).then(|| {
        tables
            .payroll
            .inss_patronal
            .apply(profile.monthly_payroll)
    });
    if let Some(cpp) = cpp_outside_das {
        if !cpp.is_zero() {
            decomposition.push(TaxComponent::new("cpp", cpp));
        }
    }

    let mut alerts = Vec::new();
    alerts.extend(ceiling_proximity(
        rbt12.ratio_of(ceiling),
        TaxRegime::SimplesNacional,
        Some(TaxRegime::LucroPresumido),
    ));
    alerts.extend(sublimite_proximity(rbt12, tables.simples.sublimite));
    if let Some(r) = ratio {
        alerts.extend(fator_r_window(r));
    }

    Ok(CalculationResult::assemble(
        TaxRegime::SimplesNacional,
        tables.year(),
        profile.current_month_revenue,
        decomposition,
        Eligibility::within(ceiling),
        alerts,
        RegimeDetail::Simples(SimplesDetail {
            annex,
            fator_r: ratio,
            faixa: bracket_match.tier,
            nominal_rate: bracket_match.bracket.nominal_rate,
            deduction: bracket_match.bracket.deduction,
            dentro_sublimite,
            cpp_outside_das,
        }),
    ))
}

/// Split the DAS across the annex's partilha, absorbing the rounding
/// remainder into the last component so the lines sum to the DAS exactly.
fn partilha_decomposition(das: Money, annex: Annex, tables: &TableSet) -> Vec<TaxComponent> {
    let shares = tables.simples.partilha(annex).components();
    let mut lines = Vec::with_capacity(shares.len());
    let mut allocated = Money::ZERO;
    for (i, (name, share)) in shares.iter().enumerate() {
        let amount = if i + 1 == shares.len() {
            das - allocated
        } else {
            share.apply(das)
        };
        allocated = allocated + amount;
        if !amount.is_zero() {
            lines.push(TaxComponent::new(*name, amount));
        }
    }
    lines
}

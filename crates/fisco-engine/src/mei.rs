//! # MEI Calculator — Fixed Monthly Fee Regime
//!
//! MEI is not a percentage regime: an eligible company pays a fixed
//! monthly DAS selected by its tribute mix, and the effective rate is a
//! *derived* presentation value (`fee / revenue`). The calculation is
//! therefore mostly an eligibility gate plus the ceiling-proximity
//! alerts.

use fisco_core::{ActivityType, CompanyProfile, EngineError, TaxRegime};
use fisco_tables::{MeiTributeMix, TableSet};

use crate::alerts::ceiling_proximity;
use crate::result::{CalculationResult, Eligibility, MeiDetail, RegimeDetail, TaxComponent};

/// Compute the MEI fixed fee, or an eligibility failure.
///
/// Eligibility annualizes the current month's revenue against the
/// standard or caminhoneiro ceiling. Regulated professions and financial
/// institutions are barred from the regime.
pub fn calc_mei(
    profile: &CompanyProfile,
    tables: &TableSet,
) -> Result<CalculationResult, EngineError> {
    profile.validate()?;

    if matches!(
        profile.activity_type,
        ActivityType::ServicosProfissionais | ActivityType::InstituicaoFinanceira
    ) {
        return Err(EngineError::ActivityNotSupported {
            regime: TaxRegime::Mei,
            activity: profile.activity_type,
        });
    }

    let annualized = profile.current_month_revenue.mul_div(12, 1);
    let ceiling = tables.mei.ceiling(profile.is_truck_driver);
    if annualized > ceiling {
        return Err(EngineError::ineligible(
            TaxRegime::Mei,
            ceiling,
            annualized,
            Some(TaxRegime::SimplesNacional),
        ));
    }

    let mix = MeiTributeMix::for_activity(profile.activity_type);
    let fee = tables.mei.monthly_fee(mix, profile.is_truck_driver);

    let mut decomposition = vec![TaxComponent::new("inss", fee.inss)];
    if !fee.icms.is_zero() {
        decomposition.push(TaxComponent::new("icms", fee.icms));
    }
    if !fee.iss.is_zero() {
        decomposition.push(TaxComponent::new("iss", fee.iss));
    }

    let ceiling_usage = annualized.ratio_of(ceiling);
    let alerts = ceiling_proximity(
        ceiling_usage,
        TaxRegime::Mei,
        Some(TaxRegime::SimplesNacional),
    )
    .into_iter()
    .collect();

    Ok(CalculationResult::assemble(
        TaxRegime::Mei,
        tables.year(),
        profile.current_month_revenue,
        decomposition,
        Eligibility::within(ceiling),
        alerts,
        RegimeDetail::Mei(MeiDetail {
            tribute_mix: mix,
            fixed_fee: fee.total,
            annual_ceiling: ceiling,
            ceiling_usage,
        }),
    ))
}

//! # Lucro Presumido Calculator — Presumption-Percentage Regime
//!
//! Profit is presumed as an activity-specific share of gross revenue;
//! IRPJ and CSLL apply to their (distinct) presumed bases, PIS/COFINS are
//! cumulative on gross revenue with no credits, and ISS applies to
//! service revenue at the municipal rate clamped into the 2–5% band.

use fisco_core::{CompanyProfile, EngineError, TaxRegime};
use fisco_tables::TableSet;

use crate::alerts::ceiling_proximity;
use crate::result::{
    CalculationResult, Eligibility, PresumidoDetail, RegimeDetail, TaxComponent,
};

/// Compute the monthly Lucro Presumido liability.
pub fn calc_presumido(
    profile: &CompanyProfile,
    tables: &TableSet,
) -> Result<CalculationResult, EngineError> {
    profile.validate()?;

    let ceiling = tables.presumido.annual_ceiling;
    if profile.trailing_12m_revenue > ceiling {
        return Err(EngineError::ineligible(
            TaxRegime::LucroPresumido,
            ceiling,
            profile.trailing_12m_revenue,
            Some(TaxRegime::LucroReal),
        ));
    }

    let revenue = profile.current_month_revenue;
    let t = &tables.presumido;
    let presumption = t.presumption(profile.activity_type);

    let irpj_base = presumption.irpj_base.apply(revenue);
    let csll_base = presumption.csll_base.apply(revenue);

    let irpj = t.irpj_rate.apply(irpj_base);
    // The 10% surtax hits only the slice of monthly presumed profit above
    // the threshold.
    let surtax = t
        .irpj_surtax_rate
        .apply(irpj_base.saturating_sub_floor_zero(t.irpj_surtax_threshold));
    let csll = t.csll_rate_for(profile.activity_type).apply(csll_base);
    let pis = t.pis_rate.apply(revenue);
    let cofins = t.cofins_rate.apply(revenue);

    let mut decomposition = vec![TaxComponent::new("irpj", irpj)];
    if !surtax.is_zero() {
        decomposition.push(TaxComponent::new("adicional_irpj", surtax));
    }
    decomposition.push(TaxComponent::new("csll", csll));
    decomposition.push(TaxComponent::new("pis", pis));
    decomposition.push(TaxComponent::new("cofins", cofins));

    let iss_rate = profile.activity_type.is_service().then(|| {
        let rate = tables.iss_band.resolve(profile.iss_rate);
        decomposition.push(TaxComponent::new("iss", rate.apply(revenue)));
        rate
    });

    let alerts = ceiling_proximity(
        profile.trailing_12m_revenue.ratio_of(ceiling),
        TaxRegime::LucroPresumido,
        Some(TaxRegime::LucroReal),
    )
    .into_iter()
    .collect();

    Ok(CalculationResult::assemble(
        TaxRegime::LucroPresumido,
        tables.year(),
        revenue,
        decomposition,
        Eligibility::within(ceiling),
        alerts,
        RegimeDetail::Presumido(PresumidoDetail {
            presumed_irpj_base: irpj_base,
            presumed_csll_base: csll_base,
            iss_rate,
        }),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use fisco_core::{ActivityType, Money, Rate};

    fn profile(month_reais: i64, activity: ActivityType) -> CompanyProfile {
        CompanyProfile::new(
            Money::from_reais(month_reais),
            Money::from_reais(month_reais * 12),
            activity,
            TaxRegime::LucroPresumido,
        )
    }

    #[test]
    fn services_30k_with_5_percent_iss() {
        let tables = TableSet::brazil_2026();
        let p = profile(30_000, ActivityType::Servicos).with_iss_rate(Rate::from_percent(5));
        let result = calc_presumido(&p, &tables).unwrap();

        // 32% presumption: bases of 9,600; IRPJ 1,440; CSLL 864.
        match &result.detail {
            RegimeDetail::Presumido(d) => {
                assert_eq!(d.presumed_irpj_base, Money::from_reais(9_600));
                assert_eq!(d.presumed_csll_base, Money::from_reais(9_600));
                assert_eq!(d.iss_rate, Some(Rate::from_percent(5)));
            }
            other => panic!("unexpected detail: {other:?}"),
        }

        let amount = |name: &str| {
            result
                .decomposition
                .iter()
                .find(|c| c.name == name)
                .map(|c| c.amount)
        };
        assert_eq!(amount("irpj"), Some(Money::from_reais(1_440)));
        assert_eq!(amount("adicional_irpj"), None);
        assert_eq!(amount("csll"), Some(Money::from_reais(864)));
        // PIS + COFINS = 3.65% of gross revenue.
        assert_eq!(amount("pis"), Some(Money::from_reais(195)));
        assert_eq!(amount("cofins"), Some(Money::from_reais(900)));
        assert_eq!(amount("iss"), Some(Money::from_reais(1_500)));

        assert_eq!(result.gross_tax, Money::from_reais(4_899));
        assert!((result.effective_rate - 0.1633).abs() < 1e-9);
    }

    #[test]
    fn surtax_applies_above_20k_presumed_profit() {
        let tables = TableSet::brazil_2026();
        // 100,000 revenue at 32% presumption = 32,000 base; surtax on
        // 12,000 = 1,200.
        let p = profile(100_000, ActivityType::Servicos).with_iss_rate(Rate::from_percent(3));
        let result = calc_presumido(&p, &tables).unwrap();
        let surtax = result
            .decomposition
            .iter()
            .find(|c| c.name == "adicional_irpj")
            .expect("surtax line");
        assert_eq!(surtax.amount, Money::from_reais(1_200));
    }

    #[test]
    fn comercio_presumes_8_percent_and_pays_no_iss() {
        let tables = TableSet::brazil_2026();
        let result = calc_presumido(&profile(100_000, ActivityType::Comercio), &tables).unwrap();
        match &result.detail {
            RegimeDetail::Presumido(d) => {
                assert_eq!(d.presumed_irpj_base, Money::from_reais(8_000));
                assert_eq!(d.presumed_csll_base, Money::from_reais(12_000));
                assert_eq!(d.iss_rate, None);
            }
            other => panic!("unexpected detail: {other:?}"),
        }
        assert!(!result.decomposition.iter().any(|c| c.name == "iss"));
    }

    #[test]
    fn iss_rate_is_clamped_into_the_band() {
        let tables = TableSet::brazil_2026();
        let p = profile(30_000, ActivityType::Servicos).with_iss_rate(Rate::from_percent(9));
        let result = calc_presumido(&p, &tables).unwrap();
        match &result.detail {
            RegimeDetail::Presumido(d) => assert_eq!(d.iss_rate, Some(Rate::from_percent(5))),
            other => panic!("unexpected detail: {other:?}"),
        }
    }

    #[test]
    fn missing_iss_rate_defaults_to_cap() {
        let tables = TableSet::brazil_2026();
        let result = calc_presumido(&profile(30_000, ActivityType::Servicos), &tables).unwrap();
        match &result.detail {
            RegimeDetail::Presumido(d) => assert_eq!(d.iss_rate, Some(Rate::from_percent(5))),
            other => panic!("unexpected detail: {other:?}"),
        }
    }

    #[test]
    fn financial_institution_pays_15_percent_csll() {
        let tables = TableSet::brazil_2026();
        let result = calc_presumido(
            &profile(100_000, ActivityType::InstituicaoFinanceira),
            &tables,
        )
        .unwrap();
        let csll = result
            .decomposition
            .iter()
            .find(|c| c.name == "csll")
            .expect("csll line");
        // 12% presumption base = 12,000; 15% CSLL = 1,800.
        assert_eq!(csll.amount, Money::from_reais(1_800));
    }

    #[test]
    fn over_78m_is_ineligible_toward_lucro_real() {
        let tables = TableSet::brazil_2026();
        let mut p = profile(100_000, ActivityType::Comercio);
        p.trailing_12m_revenue = Money::from_reais(80_000_000);
        match calc_presumido(&p, &tables).unwrap_err() {
            EngineError::RegimeIneligible { next_regime, .. } => {
                assert_eq!(next_regime, Some(TaxRegime::LucroReal));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn round_trip_effective_rate_times_base() {
        let tables = TableSet::brazil_2026();
        let result = calc_presumido(&profile(30_000, ActivityType::Servicos), &tables).unwrap();
        let reconstructed = result.effective_rate * result.base_revenue.centavos() as f64;
        assert!((reconstructed - result.gross_tax.centavos() as f64).abs() < 1.0);
    }
}

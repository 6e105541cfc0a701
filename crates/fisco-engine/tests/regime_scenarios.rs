//! End-to-end scenarios over the public engine surface: one
//! `CompanyProfile` in, one plain-data result out, checked against
//! hand-computed statutory figures.

use fisco_core::{ActivityType, Annex, CompanyProfile, EngineError, Money, Rate, TaxRegime};
use fisco_engine::{calculate, compare_regimes, RegimeDetail, Severity};
use fisco_tables::TableSet;

fn tables() -> TableSet {
    TableSet::brazil_2026()
}

#[test]
fn mei_services_5k_pays_the_fixed_fee() {
    let profile = CompanyProfile::new(
        Money::from_reais(5_000),
        Money::from_reais(60_000),
        ActivityType::Servicos,
        TaxRegime::Mei,
    );
    let result = calculate(&profile, &tables()).unwrap();

    assert_eq!(result.gross_tax, Money::from_centavos(8_605));
    assert!((result.effective_rate - 0.01721).abs() < 1e-9);
    match &result.detail {
        RegimeDetail::Mei(d) => {
            assert_eq!(d.fixed_fee, Money::from_centavos(8_605));
            assert_eq!(d.annual_ceiling, Money::from_reais(81_000));
        }
        other => panic!("unexpected detail: {other:?}"),
    }
}

#[test]
fn mei_near_ceiling_gets_a_critical_alert_and_migration_hint() {
    // 6,500/month = 78,000/year = 96% of the ceiling.
    let profile = CompanyProfile::new(
        Money::from_reais(6_500),
        Money::from_reais(78_000),
        ActivityType::Servicos,
        TaxRegime::Mei,
    );
    let result = calculate(&profile, &tables()).unwrap();
    assert_eq!(result.alerts[0].severity, Severity::Critico);
    assert!(result.alerts[0]
        .suggested_action
        .contains("simples_nacional"));
    // The fee itself does not move near the ceiling.
    assert_eq!(result.gross_tax, Money::from_centavos(8_605));
}

#[test]
fn simples_services_600k_with_fator_r_030_blends_annex_iii() {
    let profile = CompanyProfile::new(
        Money::from_reais(50_000),
        Money::from_reais(600_000),
        ActivityType::Servicos,
        TaxRegime::SimplesNacional,
    )
    .with_payroll(Money::from_reais(15_000), Money::from_reais(180_000))
    .with_requested_annex(Annex::V);
    let result = calculate(&profile, &tables()).unwrap();

    let (annex, first_nominal, last_nominal) = match &result.detail {
        RegimeDetail::Simples(d) => (d.annex, 0.06, 0.21),
        other => panic!("unexpected detail: {other:?}"),
    };
    assert_eq!(annex, Annex::III);
    // A single blended rate strictly between the annex's nominal
    // extremes — interpolated, not jumped.
    assert!(result.effective_rate > first_nominal);
    assert!(result.effective_rate < last_nominal);
}

#[test]
fn presumido_services_30k_iss_5_percent_statutory_figures() {
    let profile = CompanyProfile::new(
        Money::from_reais(30_000),
        Money::from_reais(360_000),
        ActivityType::Servicos,
        TaxRegime::LucroPresumido,
    )
    .with_iss_rate(Rate::from_percent(5));
    let result = calculate(&profile, &tables()).unwrap();

    // 32% presumption bases; PIS+COFINS at 3.65% of gross.
    match &result.detail {
        RegimeDetail::Presumido(d) => {
            assert_eq!(d.presumed_irpj_base, Money::from_reais(9_600));
            assert_eq!(d.presumed_csll_base, Money::from_reais(9_600));
        }
        other => panic!("unexpected detail: {other:?}"),
    }
    let pis_cofins: Money = result
        .decomposition
        .iter()
        .filter(|c| c.name == "pis" || c.name == "cofins")
        .map(|c| c.amount)
        .sum();
    assert_eq!(pis_cofins, Money::from_reais(1_095));
}

#[test]
fn lucro_real_loss_month_owes_no_profit_tax() {
    let profile = CompanyProfile::new(
        Money::from_reais(80_000),
        Money::from_reais(960_000),
        ActivityType::Comercio,
        TaxRegime::LucroReal,
    )
    .with_deductibles(Money::from_reais(70_000), Money::from_reais(30_000));
    let result = calculate(&profile, &tables()).unwrap();

    match &result.detail {
        RegimeDetail::Real(d) => assert_eq!(d.taxable_profit, Money::ZERO),
        other => panic!("unexpected detail: {other:?}"),
    }
    assert_eq!(result.gross_tax, Money::ZERO);
}

#[test]
fn every_result_round_trips_effective_rate_within_a_centavo() {
    let t = tables();
    let profiles = [
        CompanyProfile::new(
            Money::from_reais(5_000),
            Money::from_reais(60_000),
            ActivityType::Servicos,
            TaxRegime::Mei,
        ),
        CompanyProfile::new(
            Money::from_reais(50_000),
            Money::from_reais(600_000),
            ActivityType::Servicos,
            TaxRegime::SimplesNacional,
        )
        .with_payroll(Money::from_reais(15_000), Money::from_reais(180_000)),
        CompanyProfile::new(
            Money::from_reais(30_000),
            Money::from_reais(360_000),
            ActivityType::Servicos,
            TaxRegime::LucroPresumido,
        )
        .with_iss_rate(Rate::from_percent(5)),
        CompanyProfile::new(
            Money::from_reais(100_000),
            Money::from_reais(1_200_000),
            ActivityType::Industria,
            TaxRegime::LucroReal,
        )
        .with_deductibles(Money::from_reais(40_000), Money::from_reais(10_000)),
    ];
    for profile in profiles {
        let result = calculate(&profile, &t).unwrap();
        let reconstructed = result.effective_rate * result.base_revenue.centavos() as f64;
        assert!(
            (reconstructed - result.gross_tax.centavos() as f64).abs() < 1.0,
            "{}: rate round-trip off by more than a centavo",
            result.regime
        );
        let sum: Money = result.decomposition.iter().map(|c| c.amount).sum();
        assert_eq!(sum, result.gross_tax, "{}", result.regime);
    }
}

#[test]
fn results_serialize_to_plain_json() {
    let profile = CompanyProfile::new(
        Money::from_reais(50_000),
        Money::from_reais(600_000),
        ActivityType::Servicos,
        TaxRegime::SimplesNacional,
    )
    .with_payroll(Money::from_reais(15_000), Money::from_reais(180_000));
    let result = calculate(&profile, &tables()).unwrap();

    let json = serde_json::to_value(&result).unwrap();
    assert_eq!(json["regime"], "simples_nacional");
    assert_eq!(json["table_year"], 2026);
    assert_eq!(json["detail"]["kind"], "simples");
    assert_eq!(json["detail"]["annex"], "iii");
    assert!(json["decomposition"].as_array().unwrap().len() >= 5);
}

#[test]
fn growth_path_across_the_three_ceilings() {
    let t = tables();

    // A services company growing 10x at each step.
    let step = |month: i64, rbt12: i64| {
        CompanyProfile::new(
            Money::from_reais(month),
            Money::from_reais(rbt12),
            ActivityType::Servicos,
            TaxRegime::Mei,
        )
    };

    // Small: fits MEI.
    assert!(calculate(&step(5_000, 60_000), &t).is_ok());

    // Mid: out of MEI, fits Simples.
    let mut mid = step(50_000, 600_000);
    assert!(matches!(
        calculate(&mid, &t).unwrap_err(),
        EngineError::RegimeIneligible { .. }
    ));
    mid.regime = TaxRegime::SimplesNacional;
    assert!(calculate(&mid, &t).is_ok());

    // Large: out of Simples, fits Presumido.
    let mut large = step(500_000, 6_000_000);
    large.regime = TaxRegime::SimplesNacional;
    match calculate(&large, &t).unwrap_err() {
        EngineError::RegimeIneligible { next_regime, .. } => {
            assert_eq!(next_regime, Some(TaxRegime::LucroPresumido));
        }
        other => panic!("unexpected error: {other:?}"),
    }
    large.regime = TaxRegime::LucroPresumido;
    assert!(calculate(&large, &t).is_ok());
}

#[test]
fn comparison_view_runs_all_regimes_in_one_pass() {
    let profile = CompanyProfile::new(
        Money::from_reais(20_000),
        Money::from_reais(240_000),
        ActivityType::Servicos,
        TaxRegime::SimplesNacional,
    )
    .with_payroll(Money::from_reais(7_000), Money::from_reais(84_000))
    .with_iss_rate(Rate::from_percent(3));

    let comparison = compare_regimes(&profile, &tables()).unwrap();
    // MEI is out (240,000 annualized against 81,000), the rest compute.
    assert_eq!(comparison.results.len(), 3);
    assert_eq!(comparison.ineligible[0].regime, TaxRegime::Mei);

    let recommended = comparison.recommended.expect("a cheapest regime");
    let cheapest = comparison
        .results
        .iter()
        .min_by_key(|r| r.gross_tax)
        .unwrap();
    assert_eq!(recommended, cheapest.regime);
}

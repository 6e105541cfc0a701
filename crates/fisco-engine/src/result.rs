//! # Calculation Results — Plain-Data Output Records
//!
//! Every calculator returns a [`CalculationResult`]: common fields shared
//! by all regimes plus a [`RegimeDetail`] tagged union for the fields only
//! one regime produces. The union replaces the one-loose-object-with-
//! optional-fields shape — a Simples-only field cannot leak into a Lucro
//! Real result by construction.
//!
//! Results are plain serializable data with no behavior beyond assembly;
//! presentation layers render them as-is.

use serde::Serialize;

use fisco_core::{Annex, Money, Rate, TaxRegime};
use fisco_tables::MeiTributeMix;

use crate::alerts::Alert;

/// One named line of the tax decomposition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TaxComponent {
    /// Tribute name (e.g. `"irpj"`, `"cofins"`, `"cpp"`).
    pub name: String,
    /// Amount of the line.
    pub amount: Money,
}

impl TaxComponent {
    /// Create a component line.
    pub fn new(name: impl Into<String>, amount: Money) -> Self {
        Self {
            name: name.into(),
            amount,
        }
    }
}

/// Eligibility verdict attached to a successful calculation.
///
/// Ceiling *breaches* surface as `RegimeIneligible` errors, so a result's
/// eligibility always has `eligible = true`; the record carries the limit
/// the alerts were measured against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Eligibility {
    /// Whether the company may stay in the regime.
    pub eligible: bool,
    /// Whether revenue breached the ceiling.
    pub exceeds_limit: bool,
    /// The regime's revenue ceiling, when it has one.
    pub limit: Option<Money>,
    /// Suggested migration target, when near or over the ceiling.
    pub next_regime: Option<TaxRegime>,
}

impl Eligibility {
    /// Eligible under a ceiling.
    pub fn within(limit: Money) -> Self {
        Self {
            eligible: true,
            exceeds_limit: false,
            limit: Some(limit),
            next_regime: None,
        }
    }

    /// Eligible with no ceiling (Lucro Real).
    pub fn unlimited() -> Self {
        Self {
            eligible: true,
            exceeds_limit: false,
            limit: None,
            next_regime: None,
        }
    }
}

/// MEI-specific result fields.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MeiDetail {
    /// Which flat tributes join the INSS in the DAS.
    pub tribute_mix: MeiTributeMix,
    /// The fixed monthly fee.
    pub fixed_fee: Money,
    /// The annual ceiling the eligibility check used.
    pub annual_ceiling: Money,
    /// Annualized revenue as a fraction of the ceiling.
    pub ceiling_usage: f64,
}

/// Simples Nacional-specific result fields.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SimplesDetail {
    /// The annex the calculation resolved to.
    pub annex: Annex,
    /// The Fator R that drove annex resolution, for service activities.
    pub fator_r: Option<f64>,
    /// 1-based faixa of the bracket table.
    pub faixa: usize,
    /// Nominal rate of the faixa.
    pub nominal_rate: Rate,
    /// Deduction of the faixa.
    pub deduction: Money,
    /// False when RBT12 exceeds the ISS/ICMS sublimite: those tributes
    /// must be collected outside the unified payment.
    pub dentro_sublimite: bool,
    /// Annex IV only: employer social security computed outside the DAS.
    pub cpp_outside_das: Option<Money>,
}

/// Lucro Presumido-specific result fields.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PresumidoDetail {
    /// Presumed IRPJ base (presumption percentage × revenue).
    pub presumed_irpj_base: Money,
    /// Presumed CSLL base.
    pub presumed_csll_base: Money,
    /// The ISS rate actually applied, for service activities.
    pub iss_rate: Option<Rate>,
}

/// Lucro Real-specific result fields.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RealDetail {
    /// Revenue minus deductible costs and expenses, floored at zero.
    pub taxable_profit: Money,
    /// Credit base netted from revenue for non-cumulative PIS/COFINS.
    pub pis_cofins_credit_base: Money,
    /// The sector's statutory CPRB revenue rate, when covered by the
    /// substitution.
    pub cprb_rate: Option<Rate>,
}

/// Regime-specific result fields as a tagged union.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RegimeDetail {
    /// MEI fields.
    Mei(MeiDetail),
    /// Simples Nacional fields.
    Simples(SimplesDetail),
    /// Lucro Presumido fields.
    Presumido(PresumidoDetail),
    /// Lucro Real fields.
    Real(RealDetail),
}

/// The output of one regime calculation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CalculationResult {
    /// The regime that was computed.
    pub regime: TaxRegime,
    /// Fiscal year of the table snapshot used — stored results stay
    /// reproducible after tables are updated.
    pub table_year: u16,
    /// The revenue the effective rate is measured against.
    pub base_revenue: Money,
    /// Total monthly tax: the sum of the decomposition lines.
    pub gross_tax: Money,
    /// `gross_tax / base_revenue`; zero when the base is zero.
    pub effective_rate: f64,
    /// Named tax lines summing to `gross_tax`.
    pub decomposition: Vec<TaxComponent>,
    /// Eligibility verdict and ceiling context.
    pub eligibility: Eligibility,
    /// Advisory alerts, most severe first.
    pub alerts: Vec<Alert>,
    /// Regime-specific fields.
    pub detail: RegimeDetail,
}

impl CalculationResult {
    /// Assemble a result from its decomposition.
    ///
    /// `gross_tax` and `effective_rate` are derived here, so the
    /// `gross_tax = effective_rate * base_revenue` round-trip and the
    /// decomposition-sums-to-total invariant hold by construction.
    pub fn assemble(
        regime: TaxRegime,
        table_year: u16,
        base_revenue: Money,
        decomposition: Vec<TaxComponent>,
        eligibility: Eligibility,
        mut alerts: Vec<Alert>,
        detail: RegimeDetail,
    ) -> Self {
        let gross_tax: Money = decomposition.iter().map(|c| c.amount).sum();
        crate::alerts::sort_alerts(&mut alerts);
        Self {
            regime,
            table_year,
            base_revenue,
            gross_tax,
            effective_rate: gross_tax.ratio_of(base_revenue),
            decomposition,
            eligibility,
            alerts,
            detail,
        }
    }
}

//! # Company Profile — Canonical Calculator Input
//!
//! One record carries everything a calculator may need, with the monthly
//! and trailing-12-month figures as *separate required fields*. No
//! calculator divides one to infer the other: Simples Nacional resolves
//! its bracket on `trailing_12m_revenue` and applies the effective rate to
//! `current_month_revenue`; MEI annualizes `current_month_revenue` for its
//! ceiling check. The engine never reads ambient state — this record and
//! an injected table set are the whole world.

use serde::{Deserialize, Serialize};

use crate::activity::{ActivityType, Annex, TaxRegime};
use crate::error::EngineError;
use crate::money::{Money, Rate};

/// A company's tax-relevant facts for one calculation call.
///
/// Built with [`CompanyProfile::new`] plus `with_*` setters for the
/// optional fields. [`CompanyProfile::validate`] is called by every
/// calculator before any arithmetic.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompanyProfile {
    /// Gross revenue of the current month.
    pub current_month_revenue: Money,
    /// Gross revenue of the trailing 12 months (RBT12).
    pub trailing_12m_revenue: Money,
    /// Payroll of the current month (salaries + pro-labore + encargos).
    #[serde(default)]
    pub monthly_payroll: Money,
    /// Payroll of the trailing 12 months (Fator R numerator).
    #[serde(default)]
    pub trailing_12m_payroll: Money,
    /// The company's activity class.
    pub activity_type: ActivityType,
    /// The elected tax regime.
    pub regime: TaxRegime,
    /// Simples Nacional annex requested by the caller, when the activity
    /// leaves room for choice. Services default to Annex V and may be
    /// overridden to III by Fator R.
    #[serde(default)]
    pub requested_annex: Option<Annex>,
    /// Municipal ISS rate for service activities. Clamped to the 2–5%
    /// legal band by the calculators.
    #[serde(default)]
    pub iss_rate: Option<Rate>,
    /// MEI caminhoneiro variant (freight truck driver).
    #[serde(default)]
    pub is_truck_driver: bool,
    /// Share of an indústria's revenue that is resale of goods. Above 80%
    /// the company is classified as comércio for annex purposes.
    #[serde(default)]
    pub resale_share: Option<Rate>,
    /// Deductible costs of the month (Lucro Real).
    #[serde(default)]
    pub deductible_costs: Money,
    /// Deductible operating expenses of the month (Lucro Real).
    #[serde(default)]
    pub deductible_expenses: Money,
}

impl CompanyProfile {
    /// Create a profile with the required fields; optionals default off.
    pub fn new(
        current_month_revenue: Money,
        trailing_12m_revenue: Money,
        activity_type: ActivityType,
        regime: TaxRegime,
    ) -> Self {
        Self {
            current_month_revenue,
            trailing_12m_revenue,
            monthly_payroll: Money::ZERO,
            trailing_12m_payroll: Money::ZERO,
            activity_type,
            regime,
            requested_annex: None,
            iss_rate: None,
            is_truck_driver: false,
            resale_share: None,
            deductible_costs: Money::ZERO,
            deductible_expenses: Money::ZERO,
        }
    }

    /// Builder: set current-month and trailing-12-month payroll.
    pub fn with_payroll(mut self, monthly: Money, trailing_12m: Money) -> Self {
        self.monthly_payroll = monthly;
        self.trailing_12m_payroll = trailing_12m;
        self
    }

    /// Builder: set the requested Simples Nacional annex.
    pub fn with_requested_annex(mut self, annex: Annex) -> Self {
        self.requested_annex = Some(annex);
        self
    }

    /// Builder: set the municipal ISS rate.
    pub fn with_iss_rate(mut self, rate: Rate) -> Self {
        self.iss_rate = Some(rate);
        self
    }

    /// Builder: mark the MEI caminhoneiro variant.
    pub fn with_truck_driver(mut self) -> Self {
        self.is_truck_driver = true;
        self
    }

    /// Builder: set the resale share of an indústria's revenue.
    pub fn with_resale_share(mut self, share: Rate) -> Self {
        self.resale_share = Some(share);
        self
    }

    /// Builder: set Lucro Real deductible costs and expenses.
    pub fn with_deductibles(mut self, costs: Money, expenses: Money) -> Self {
        self.deductible_costs = costs;
        self.deductible_expenses = expenses;
        self
    }

    /// Reject profiles with values outside their domain.
    ///
    /// Money fields must be non-negative; a resale share must sit in
    /// `[0%, 100%]`. The trailing figure is deliberately *not* required to
    /// exceed the monthly one (caller-controlled, per the input contract).
    pub fn validate(&self) -> Result<(), EngineError> {
        let money_fields: [(&'static str, Money); 6] = [
            ("current_month_revenue", self.current_month_revenue),
            ("trailing_12m_revenue", self.trailing_12m_revenue),
            ("monthly_payroll", self.monthly_payroll),
            ("trailing_12m_payroll", self.trailing_12m_payroll),
            ("deductible_costs", self.deductible_costs),
            ("deductible_expenses", self.deductible_expenses),
        ];
        for (field, value) in money_fields {
            if value.is_negative() {
                return Err(EngineError::InvalidInput {
                    field,
                    reason: format!("must be non-negative, got {value}"),
                });
            }
        }
        if let Some(share) = self.resale_share {
            if share.bps() < 0 || share.bps() > 10_000 {
                return Err(EngineError::InvalidInput {
                    field: "resale_share",
                    reason: format!("must be between 0% and 100%, got {share}"),
                });
            }
        }
        if let Some(rate) = self.iss_rate {
            if rate.bps() < 0 {
                return Err(EngineError::InvalidInput {
                    field: "iss_rate",
                    reason: format!("must be non-negative, got {rate}"),
                });
            }
        }
        Ok(())
    }
}

//! # Fator R and Annex Resolution
//!
//! The payroll-to-revenue ratio over the trailing 12 months decides which
//! bracket table a service company falls under: at or above 28% the
//! company earns the cheaper Annex III, below it Annex V applies. For
//! every other activity the annex follows directly from the activity
//! class.
//!
//! ## Determinism
//!
//! Both functions are pure decisions over their arguments and are
//! re-derived on every calculation — Fator R is never cached, so a stale
//! payroll figure can never select a stale annex.

use fisco_core::{ActivityType, Annex, EngineError, Money, Rate, TaxRegime};

/// The Fator R threshold that switches services from Annex V to III.
pub const FATOR_R_THRESHOLD: f64 = 0.28;

/// Payroll share of revenue over the trailing 12 months, clamped to
/// `[0, 1]`.
///
/// Zero trailing revenue yields zero (and a warning): without revenue
/// the ratio is undefined and the conservative annex must apply.
pub fn fator_r(trailing_12m_payroll: Money, trailing_12m_revenue: Money) -> f64 {
    if trailing_12m_revenue.is_zero() {
        if !trailing_12m_payroll.is_zero() {
            tracing::warn!(
                payroll = %trailing_12m_payroll,
                "Fator R undefined with zero trailing revenue, using 0"
            );
        }
        return 0.0;
    }
    trailing_12m_payroll.ratio_of(trailing_12m_revenue).clamp(0.0, 1.0)
}

/// Resolve the effective Simples Nacional annex.
///
/// - Service activities in the Fator R band: at or above the 28%
///   threshold the engine overrides to Annex III regardless of the
///   requested annex; below it, an explicit Annex III request (natively
///   Annex III activities) is honored and everything else lands in V.
/// - Indústria with more than 80% of revenue from resale is treated as
///   comércio.
/// - Financial institutions are barred from the regime.
pub fn resolve_annex(
    activity: ActivityType,
    fator_r: f64,
    requested: Option<Annex>,
    resale_share: Option<Rate>,
) -> Result<Annex, EngineError> {
    let annex = match activity {
        ActivityType::Comercio | ActivityType::RevendaCombustiveis => Annex::I,
        ActivityType::Industria => {
            let resale = resale_share.unwrap_or(Rate::ZERO);
            if resale > Rate::from_percent(80) {
                Annex::I
            } else {
                Annex::II
            }
        }
        ActivityType::ConstrucaoCivil | ActivityType::Limpeza | ActivityType::Vigilancia => {
            Annex::IV
        }
        ActivityType::TransporteCargas | ActivityType::TransportePassageiros => Annex::III,
        ActivityType::Servicos | ActivityType::ServicosProfissionais => {
            if fator_r >= FATOR_R_THRESHOLD {
                Annex::III
            } else if requested == Some(Annex::III) {
                // Natively Annex III service activities keep their table.
                Annex::III
            } else {
                Annex::V
            }
        }
        ActivityType::InstituicaoFinanceira => {
            return Err(EngineError::ActivityNotSupported {
                regime: TaxRegime::SimplesNacional,
                activity,
            });
        }
    };

    if let Some(req) = requested {
        if req != annex {
            tracing::debug!(
                requested = %req,
                resolved = %annex,
                fator_r,
                "requested annex overridden by activity/Fator R resolution"
            );
        }
    }

    Ok(annex)
}

//! # fisco-engine — Multi-Regime Tax Calculators
//!
//! The rules engine of the Fisco workspace: given a [`CompanyProfile`] and
//! a [`TableSet`] snapshot, compute the tax liability, effective rate,
//! component decomposition and advisory alerts under any of the four
//! Brazilian regimes.
//!
//! ## Determinism
//!
//! Every calculator is a pure function of its two arguments. There is no
//! wall-clock, no randomness, no cache and no shared mutable state:
//! identical profile + identical table snapshot always produce an
//! identical [`CalculationResult`]. Tables are immutable after
//! construction, so the four regimes are safe to compute concurrently for
//! a comparison view.
//!
//! ## Error Contract
//!
//! Expected business outcomes — ceiling breaches, barred activities,
//! invalid caller input — come back as typed [`EngineError`] values.
//! Calculators never panic on caller data.

pub mod alerts;
pub mod comparison;
pub mod encargos;
pub mod fator_r;
pub mod mei;
pub mod presumido;
pub mod real;
pub mod result;
pub mod simples;

use fisco_core::{CompanyProfile, EngineError, TaxRegime};
use fisco_tables::TableSet;

// Re-export primary types for ergonomic imports.
pub use alerts::{Alert, Severity};
pub use comparison::{compare_regimes, IneligibleRegime, RegimeComparison};
pub use encargos::{calc_encargos_clt, calc_pro_labore, EncargosClt, ProLabore};
pub use fator_r::{fator_r, resolve_annex, FATOR_R_THRESHOLD};
pub use mei::calc_mei;
pub use presumido::calc_presumido;
pub use real::calc_real;
pub use result::{
    CalculationResult, Eligibility, MeiDetail, PresumidoDetail, RealDetail, RegimeDetail,
    SimplesDetail, TaxComponent,
};
pub use simples::calc_simples;

/// Compute the profile under its elected regime.
pub fn calculate(
    profile: &CompanyProfile,
    tables: &TableSet,
) -> Result<CalculationResult, EngineError> {
    match profile.regime {
        TaxRegime::Mei => mei::calc_mei(profile, tables),
        TaxRegime::SimplesNacional => simples::calc_simples(profile, tables),
        TaxRegime::LucroPresumido => presumido::calc_presumido(profile, tables),
        TaxRegime::LucroReal => real::calc_real(profile, tables),
    }
}

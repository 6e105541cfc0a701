//! # Domain Enums — Activity, Regime, Annex
//!
//! The closed vocabularies of the engine. [`ActivityType`] drives annex
//! mapping under Simples Nacional and presumption percentages under Lucro
//! Presumido; [`TaxRegime`] selects the calculator; [`Annex`] names the
//! Simples Nacional bracket table in force.

use serde::{Deserialize, Serialize};

/// The economic activity of a company, at the granularity tax rules
/// distinguish.
///
/// Variants map to the activity classes Brazilian tax law treats
/// differently — the annex splits of Simples Nacional and the presumption
/// percentages of Lucro Presumido. Finer CNAE distinctions collapse onto
/// these classes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivityType {
    /// Retail or wholesale trade.
    Comercio,
    /// Manufacturing.
    Industria,
    /// Services in general (Annex III/V band, 32% presumption).
    Servicos,
    /// Regulated professional services (medicine, law, engineering...).
    ServicosProfissionais,
    /// Civil construction.
    ConstrucaoCivil,
    /// Cleaning services.
    Limpeza,
    /// Security/surveillance services.
    Vigilancia,
    /// Freight transport.
    TransporteCargas,
    /// Passenger transport.
    TransportePassageiros,
    /// Fuel resale (1.6% IRPJ presumption).
    RevendaCombustiveis,
    /// Banks, insurers and other financial institutions.
    InstituicaoFinanceira,
}

impl ActivityType {
    /// Return the string representation of this activity.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Comercio => "comercio",
            Self::Industria => "industria",
            Self::Servicos => "servicos",
            Self::ServicosProfissionais => "servicos_profissionais",
            Self::ConstrucaoCivil => "construcao_civil",
            Self::Limpeza => "limpeza",
            Self::Vigilancia => "vigilancia",
            Self::TransporteCargas => "transporte_cargas",
            Self::TransportePassageiros => "transporte_passageiros",
            Self::RevendaCombustiveis => "revenda_combustiveis",
            Self::InstituicaoFinanceira => "instituicao_financeira",
        }
    }

    /// Return all activity variants.
    pub fn all() -> &'static [ActivityType] {
        &[
            Self::Comercio,
            Self::Industria,
            Self::Servicos,
            Self::ServicosProfissionais,
            Self::ConstrucaoCivil,
            Self::Limpeza,
            Self::Vigilancia,
            Self::TransporteCargas,
            Self::TransportePassageiros,
            Self::RevendaCombustiveis,
            Self::InstituicaoFinanceira,
        ]
    }

    /// Whether revenue from this activity is subject to municipal ISS.
    ///
    /// Interstate/intermunicipal transport is an ICMS activity, so the
    /// transport variants are excluded.
    pub fn is_service(&self) -> bool {
        matches!(
            self,
            Self::Servicos
                | Self::ServicosProfissionais
                | Self::ConstrucaoCivil
                | Self::Limpeza
                | Self::Vigilancia
        )
    }
}

impl std::fmt::Display for ActivityType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The elected federal tax regime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaxRegime {
    /// Microempreendedor Individual — fixed monthly fee.
    Mei,
    /// Simples Nacional — unified progressive tax on RBT12.
    SimplesNacional,
    /// Lucro Presumido — profit presumed from revenue.
    LucroPresumido,
    /// Lucro Real — tax on actual accrual profit.
    LucroReal,
}

impl TaxRegime {
    /// Return the string representation of this regime.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Mei => "mei",
            Self::SimplesNacional => "simples_nacional",
            Self::LucroPresumido => "lucro_presumido",
            Self::LucroReal => "lucro_real",
        }
    }

    /// Return all regime variants.
    pub fn all() -> &'static [TaxRegime] {
        &[
            Self::Mei,
            Self::SimplesNacional,
            Self::LucroPresumido,
            Self::LucroReal,
        ]
    }
}

impl std::fmt::Display for TaxRegime {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A Simples Nacional annex — one of the five bracket tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Annex {
    /// Annex I — comércio.
    I,
    /// Annex II — indústria.
    II,
    /// Annex III — services (higher Fator R band).
    III,
    /// Annex IV — construction, cleaning, surveillance (CPP outside DAS).
    IV,
    /// Annex V — services (lower Fator R band).
    V,
}

impl Annex {
    /// Return the string representation of this annex.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::I => "I",
            Self::II => "II",
            Self::III => "III",
            Self::IV => "IV",
            Self::V => "V",
        }
    }

    /// Return all annex variants.
    pub fn all() -> &'static [Annex] {
        &[Self::I, Self::II, Self::III, Self::IV, Self::V]
    }
}

impl std::fmt::Display for Annex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

//! # Simples Nacional Tables — Annexes, Partilha, Ceilings
//!
//! The five annex bracket tables of LC 123/2006 (five faixas each, the
//! fifth unbounded), the per-annex partilha split of the unified DAS, the
//! R$ 4.8M general ceiling and the R$ 3.6M ISS/ICMS sublimite.
//!
//! ## Shape
//!
//! The statutory deduction values make the effective rate exactly
//! continuous at every faixa boundary, so the monthly estimate never jumps
//! when RBT12 crosses a tier. Revenue past the sublimite keeps faixa-5
//! rates; the ISS/ICMS exit is reported through the `dentro_sublimite`
//! flag, not a bracket row.

use serde::Serialize;

use fisco_core::{Annex, Money, Rate};

use crate::bracket::{BracketTable, TaxBracket};
use crate::error::TableError;

/// Per-annex split of the unified DAS across the tributes it replaces.
///
/// Shares are basis points of the DAS and sum to 100%. Annex IV carries no
/// CPP share — employer social security is collected outside the unified
/// payment for those activities.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Partilha {
    /// Corporate income tax share.
    pub irpj: Rate,
    /// Social contribution on profit share.
    pub csll: Rate,
    /// COFINS share.
    pub cofins: Rate,
    /// PIS/Pasep share.
    pub pis_pasep: Rate,
    /// Employer social security share (zero for Annex IV).
    pub cpp: Rate,
    /// Industrialized-products tax share (Annex II only).
    pub ipi: Rate,
    /// State goods-circulation tax share.
    pub icms: Rate,
    /// Municipal services tax share.
    pub iss: Rate,
}

impl Partilha {
    /// The nonzero components in statutory order.
    pub fn components(&self) -> Vec<(&'static str, Rate)> {
        [
            ("irpj", self.irpj),
            ("csll", self.csll),
            ("cofins", self.cofins),
            ("pis_pasep", self.pis_pasep),
            ("cpp", self.cpp),
            ("ipi", self.ipi),
            ("icms", self.icms),
            ("iss", self.iss),
        ]
        .into_iter()
        .filter(|(_, share)| !share.is_zero())
        .collect()
    }

    /// Sum of all shares; 100.00% for a well-formed split.
    pub fn total(&self) -> Rate {
        Rate::from_bps(
            self.irpj.bps()
                + self.csll.bps()
                + self.cofins.bps()
                + self.pis_pasep.bps()
                + self.cpp.bps()
                + self.ipi.bps()
                + self.icms.bps()
                + self.iss.bps(),
        )
    }
}

/// The Simples Nacional snapshot for one fiscal year.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SimplesTables {
    year: u16,
    annexes: [BracketTable; 5],
    partilha: [Partilha; 5],
    /// General RBT12 ceiling (R$ 4.8M).
    pub general_ceiling: Money,
    /// ISS/ICMS sublimite (R$ 3.6M).
    pub sublimite: Money,
}

impl SimplesTables {
    /// Build the 2026 snapshot.
    pub fn brazil_2026() -> Result<Self, TableError> {
        Ok(Self {
            year: 2026,
            annexes: [
                annex_table("simples/anexo_i", 2026, ANNEX_I_2026)?,
                annex_table("simples/anexo_ii", 2026, ANNEX_II_2026)?,
                annex_table("simples/anexo_iii", 2026, ANNEX_III_2026)?,
                annex_table("simples/anexo_iv", 2026, ANNEX_IV_2026)?,
                annex_table("simples/anexo_v", 2026, ANNEX_V_2026)?,
            ],
            partilha: [
                PARTILHA_I,
                PARTILHA_II,
                PARTILHA_III,
                PARTILHA_IV,
                PARTILHA_V,
            ],
            general_ceiling: Money::from_reais(4_800_000),
            sublimite: Money::from_reais(3_600_000),
        })
    }

    /// The fiscal year of this snapshot.
    pub fn year(&self) -> u16 {
        self.year
    }

    /// The bracket table of an annex.
    pub fn annex_table(&self, annex: Annex) -> &BracketTable {
        &self.annexes[annex_index(annex)]
    }

    /// The partilha split of an annex.
    pub fn partilha(&self, annex: Annex) -> &Partilha {
        &self.partilha[annex_index(annex)]
    }
}

fn annex_index(annex: Annex) -> usize {
    match annex {
        Annex::I => 0,
        Annex::II => 1,
        Annex::III => 2,
        Annex::IV => 3,
        Annex::V => 4,
    }
}

/// `(upper bound in reais or 0 for unbounded, rate in bps, deduction in reais)`
type FaixaSpec = (i64, i64, i64);

fn annex_table(
    name: &str,
    year: u16,
    faixas: [FaixaSpec; 5],
) -> Result<BracketTable, TableError> {
    let mut brackets = Vec::with_capacity(faixas.len());
    let mut lower = Money::ZERO;
    for (upper_reais, bps, deduction_reais) in faixas {
        let upper = if upper_reais == 0 {
            None
        } else {
            Some(Money::from_reais(upper_reais))
        };
        brackets.push(TaxBracket {
            lower,
            upper,
            nominal_rate: Rate::from_bps(bps),
            deduction: Money::from_reais(deduction_reais),
        });
        if let Some(u) = upper {
            lower = u + Money::from_centavos(1);
        }
    }
    BracketTable::new(name, year, brackets)
}

// Faixa boundaries shared by every annex: 180k / 360k / 720k / 1.8M, then
// unbounded.
const ANNEX_I_2026: [FaixaSpec; 5] = [
    (180_000, 400, 0),
    (360_000, 730, 5_940),
    (720_000, 950, 13_860),
    (1_800_000, 1_070, 22_500),
    (0, 1_430, 87_300),
];

const ANNEX_II_2026: [FaixaSpec; 5] = [
    (180_000, 450, 0),
    (360_000, 780, 5_940),
    (720_000, 1_000, 13_860),
    (1_800_000, 1_120, 22_500),
    (0, 1_470, 85_500),
];

const ANNEX_III_2026: [FaixaSpec; 5] = [
    (180_000, 600, 0),
    (360_000, 1_120, 9_360),
    (720_000, 1_350, 17_640),
    (1_800_000, 1_600, 35_640),
    (0, 2_100, 125_640),
];

const ANNEX_IV_2026: [FaixaSpec; 5] = [
    (180_000, 450, 0),
    (360_000, 900, 8_100),
    (720_000, 1_020, 12_420),
    (1_800_000, 1_400, 39_780),
    (0, 2_200, 183_780),
];

const ANNEX_V_2026: [FaixaSpec; 5] = [
    (180_000, 1_550, 0),
    (360_000, 1_800, 4_500),
    (720_000, 1_950, 9_900),
    (1_800_000, 2_050, 17_100),
    (0, 2_300, 62_100),
];

const PARTILHA_I: Partilha = Partilha {
    irpj: Rate::from_bps(550),
    csll: Rate::from_bps(350),
    cofins: Rate::from_bps(1_274),
    pis_pasep: Rate::from_bps(276),
    cpp: Rate::from_bps(4_150),
    ipi: Rate::ZERO,
    icms: Rate::from_bps(3_400),
    iss: Rate::ZERO,
};

const PARTILHA_II: Partilha = Partilha {
    irpj: Rate::from_bps(550),
    csll: Rate::from_bps(350),
    cofins: Rate::from_bps(1_151),
    pis_pasep: Rate::from_bps(249),
    cpp: Rate::from_bps(3_750),
    ipi: Rate::from_bps(750),
    icms: Rate::from_bps(3_200),
    iss: Rate::ZERO,
};

const PARTILHA_III: Partilha = Partilha {
    irpj: Rate::from_bps(400),
    csll: Rate::from_bps(350),
    cofins: Rate::from_bps(1_282),
    pis_pasep: Rate::from_bps(278),
    cpp: Rate::from_bps(4_340),
    ipi: Rate::ZERO,
    icms: Rate::ZERO,
    iss: Rate::from_bps(3_350),
};

// Annex IV: no CPP share — employer social security is collected outside
// the DAS for construction, cleaning and surveillance.
const PARTILHA_IV: Partilha = Partilha {
    irpj: Rate::from_bps(1_880),
    csll: Rate::from_bps(1_520),
    cofins: Rate::from_bps(1_767),
    pis_pasep: Rate::from_bps(383),
    cpp: Rate::ZERO,
    ipi: Rate::ZERO,
    icms: Rate::ZERO,
    iss: Rate::from_bps(4_450),
};

const PARTILHA_V: Partilha = Partilha {
    irpj: Rate::from_bps(2_500),
    csll: Rate::from_bps(1_500),
    cofins: Rate::from_bps(1_410),
    pis_pasep: Rate::from_bps(305),
    cpp: Rate::from_bps(2_885),
    ipi: Rate::ZERO,
    icms: Rate::ZERO,
    iss: Rate::from_bps(1_400),
};


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// The effective rate never decreases as RBT12 grows, for any
        /// annex — the deduction structure interpolates between nominal
        /// rates instead of jumping. Centavo truncation can wobble the
        /// ratio by at most one centavo per endpoint, hence the 2/value
        /// tolerance.
        #[test]
        fn effective_rate_is_monotone_non_decreasing(
            annex_idx in 0usize..5,
            a in 1i64..480_000_000_00,
            b in 1i64..480_000_000_00,
        ) {
            let tables = SimplesTables::brazil_2026().unwrap();
            let annex = Annex::all()[annex_idx];
            let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
            let low = tables
                .annex_table(annex)
                .resolve(Money::from_centavos(lo))
                .unwrap();
            let high = tables
                .annex_table(annex)
                .resolve(Money::from_centavos(hi))
                .unwrap();
            let truncation_tolerance = 2.0 / lo as f64;
            prop_assert!(
                high.effective_rate >= low.effective_rate - truncation_tolerance,
                "annex {}: rate fell from {} to {} between {} and {}",
                annex, low.effective_rate, high.effective_rate, lo, hi
            );
        }

        /// The effective rate stays inside `[0, last nominal rate]`.
        #[test]
        fn effective_rate_bounded_by_nominal_band(
            annex_idx in 0usize..5,
            value in 0i64..480_000_000_00,
        ) {
            let tables = SimplesTables::brazil_2026().unwrap();
            let annex = Annex::all()[annex_idx];
            let table = tables.annex_table(annex);
            let last = table.brackets()[4].nominal_rate.as_fraction();
            let m = table.resolve(Money::from_centavos(value)).unwrap();
            prop_assert!(m.effective_rate >= 0.0);
            prop_assert!(m.effective_rate <= last + 1e-9);
        }
    }
}

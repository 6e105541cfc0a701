//! # MEI Tables — Fixed Monthly Fees and Ceilings
//!
//! MEI pays a fixed monthly DAS, not a percentage of revenue: INSS as a
//! fraction of the minimum wage plus flat ICMS and/or ISS add-ons selected
//! by the tribute mix. The caminhoneiro (truck driver) variant contributes
//! INSS at 12% of the minimum wage instead of 5% and has its own, higher
//! revenue ceiling.

use serde::{Deserialize, Serialize};

use fisco_core::{ActivityType, Money, Rate};

/// Which flat tributes join the INSS contribution in the monthly DAS.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MeiTributeMix {
    /// Goods activities: INSS + ICMS.
    Comercio,
    /// Service activities: INSS + ISS.
    Servicos,
    /// Mixed activities: INSS + ICMS + ISS.
    ComercioEServicos,
}

impl MeiTributeMix {
    /// Return the string representation of this mix.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Comercio => "comercio",
            Self::Servicos => "servicos",
            Self::ComercioEServicos => "comercio_e_servicos",
        }
    }

    /// Derive the tribute mix from an activity class.
    ///
    /// Goods and transport activities collect ICMS; ISS-taxed services
    /// collect ISS.
    pub fn for_activity(activity: ActivityType) -> Self {
        if activity.is_service() {
            Self::Servicos
        } else {
            Self::Comercio
        }
    }
}

impl std::fmt::Display for MeiTributeMix {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The component breakdown of one month's fixed DAS.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MeiFee {
    /// INSS contribution (5% or 12% of the minimum wage).
    pub inss: Money,
    /// Flat ICMS add-on, when the mix includes goods.
    pub icms: Money,
    /// Flat ISS add-on, when the mix includes services.
    pub iss: Money,
    /// Sum of the components.
    pub total: Money,
}

/// The MEI snapshot for one fiscal year.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MeiTables {
    year: u16,
    /// National minimum wage the INSS contribution is computed from.
    pub minimum_wage: Money,
    /// Annual revenue ceiling for the standard MEI.
    pub annual_ceiling: Money,
    /// Annual revenue ceiling for the caminhoneiro variant.
    pub truck_driver_ceiling: Money,
    /// INSS contribution rate for the standard MEI.
    pub inss_rate: Rate,
    /// INSS contribution rate for the caminhoneiro variant.
    pub truck_driver_inss_rate: Rate,
    /// Flat monthly ICMS add-on.
    pub icms_addon: Money,
    /// Flat monthly ISS add-on.
    pub iss_addon: Money,
}

impl MeiTables {
    /// Build the 2026 snapshot.
    pub fn brazil_2026() -> Self {
        Self {
            year: 2026,
            minimum_wage: Money::from_centavos(162_100),
            annual_ceiling: Money::from_reais(81_000),
            truck_driver_ceiling: Money::from_reais(251_600),
            inss_rate: Rate::from_percent(5),
            truck_driver_inss_rate: Rate::from_percent(12),
            icms_addon: Money::from_reais(1),
            iss_addon: Money::from_reais(5),
        }
    }

    /// The fiscal year of this snapshot.
    pub fn year(&self) -> u16 {
        self.year
    }

    /// The applicable annual ceiling.
    pub fn ceiling(&self, is_truck_driver: bool) -> Money {
        if is_truck_driver {
            self.truck_driver_ceiling
        } else {
            self.annual_ceiling
        }
    }

    /// The fixed monthly fee for a tribute mix.
    ///
    /// Constant across all eligible revenue levels — revenue plays no part
    /// in the amount, only in the eligibility check.
    pub fn monthly_fee(&self, mix: MeiTributeMix, is_truck_driver: bool) -> MeiFee {
        let inss_rate = if is_truck_driver {
            self.truck_driver_inss_rate
        } else {
            self.inss_rate
        };
        let inss = inss_rate.apply(self.minimum_wage);
        let (icms, iss) = match mix {
            MeiTributeMix::Comercio => (self.icms_addon, Money::ZERO),
            MeiTributeMix::Servicos => (Money::ZERO, self.iss_addon),
            MeiTributeMix::ComercioEServicos => (self.icms_addon, self.iss_addon),
        };
        MeiFee {
            inss,
            icms,
            iss,
            total: inss + icms + iss,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn services_fee_is_86_05() {
        let tables = MeiTables::brazil_2026();
        let fee = tables.monthly_fee(MeiTributeMix::Servicos, false);
        assert_eq!(fee.inss, Money::from_centavos(8_105));
        assert_eq!(fee.iss, Money::from_reais(5));
        assert_eq!(fee.icms, Money::ZERO);
        assert_eq!(fee.total, Money::from_centavos(8_605));
    }

    #[test]
    fn comercio_fee_is_82_05() {
        let fee = MeiTables::brazil_2026().monthly_fee(MeiTributeMix::Comercio, false);
        assert_eq!(fee.total, Money::from_centavos(8_205));
    }

    #[test]
    fn mixed_fee_carries_both_addons() {
        let fee =
            MeiTables::brazil_2026().monthly_fee(MeiTributeMix::ComercioEServicos, false);
        assert_eq!(fee.total, Money::from_centavos(8_705));
        assert_eq!(fee.icms, Money::from_reais(1));
        assert_eq!(fee.iss, Money::from_reais(5));
    }

    #[test]
    fn truck_driver_inss_is_12_percent_of_wage() {
        let fee = MeiTables::brazil_2026().monthly_fee(MeiTributeMix::Comercio, true);
        assert_eq!(fee.inss, Money::from_centavos(19_452));
        assert_eq!(fee.total, Money::from_centavos(19_552));
    }

    #[test]
    fn truck_driver_ceiling_is_higher() {
        let tables = MeiTables::brazil_2026();
        assert_eq!(tables.ceiling(false), Money::from_reais(81_000));
        assert_eq!(tables.ceiling(true), Money::from_reais(251_600));
    }

    #[test]
    fn mix_for_activity() {
        assert_eq!(
            MeiTributeMix::for_activity(ActivityType::Comercio),
            MeiTributeMix::Comercio
        );
        assert_eq!(
            MeiTributeMix::for_activity(ActivityType::Servicos),
            MeiTributeMix::Servicos
        );
        assert_eq!(
            MeiTributeMix::for_activity(ActivityType::TransporteCargas),
            MeiTributeMix::Comercio
        );
    }
}

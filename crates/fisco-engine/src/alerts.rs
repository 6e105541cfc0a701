//! # Alert Generator — Threshold and Migration Advisories
//!
//! Pure, read-only derivations over a calculation's ratios: proximity to a
//! regime ceiling, proximity to the ISS/ICMS sublimite, and the Fator R
//! near-miss window. Nothing here mutates a result; calculators collect
//! the alerts and [`sort_alerts`] orders them most severe first, then by
//! message, for deterministic output.

use serde::{Deserialize, Serialize};

use fisco_core::{Money, TaxRegime};

/// Alert severity, ascending.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    /// Worth watching.
    Atencao,
    /// Action should be planned.
    Alerta,
    /// Action is due now.
    Critico,
}

impl Severity {
    /// Return the string representation of this severity.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Atencao => "atencao",
            Self::Alerta => "alerta",
            Self::Critico => "critico",
        }
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single advisory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Alert {
    /// How urgent the advisory is.
    pub severity: Severity,
    /// What was observed.
    pub message: String,
    /// What the company should do about it.
    pub suggested_action: String,
}

impl Alert {
    /// Create an alert.
    pub fn new(
        severity: Severity,
        message: impl Into<String>,
        suggested_action: impl Into<String>,
    ) -> Self {
        Self {
            severity,
            message: message.into(),
            suggested_action: suggested_action.into(),
        }
    }
}

/// Sort alerts most severe first, then by message.
pub fn sort_alerts(alerts: &mut Vec<Alert>) {
    alerts.sort_by(|a, b| {
        b.severity
            .cmp(&a.severity)
            .then_with(|| a.message.cmp(&b.message))
    });
}

/// Ceiling-proximity advisory at the 70/80/90% thresholds.
///
/// `usage` is annualized revenue over the ceiling. Returns at most one
/// alert — the highest threshold crossed.
pub fn ceiling_proximity(
    usage: f64,
    regime: TaxRegime,
    next_regime: Option<TaxRegime>,
) -> Option<Alert> {
    let severity = if usage >= 0.9 {
        Severity::Critico
    } else if usage >= 0.8 {
        Severity::Alerta
    } else if usage >= 0.7 {
        Severity::Atencao
    } else {
        return None;
    };
    let action = match next_regime {
        Some(next) => format!("plan the migration to {next}"),
        None => "review revenue projections for the coming months".to_string(),
    };
    Some(Alert::new(
        severity,
        format!(
            "revenue at {:.0}% of the {regime} ceiling",
            usage * 100.0
        ),
        action,
    ))
}

/// Sublimite advisory: breached, or within 90% of it.
pub fn sublimite_proximity(rbt12: Money, sublimite: Money) -> Option<Alert> {
    if rbt12 > sublimite {
        return Some(Alert::new(
            Severity::Alerta,
            format!("RBT12 {rbt12} exceeds the ISS/ICMS sublimite of {sublimite}"),
            "collect ISS/ICMS outside the unified payment",
        ));
    }
    let usage = rbt12.ratio_of(sublimite);
    if usage >= 0.9 {
        return Some(Alert::new(
            Severity::Atencao,
            format!(
                "RBT12 at {:.0}% of the ISS/ICMS sublimite",
                usage * 100.0
            ),
            "prepare to collect ISS/ICMS outside the unified payment",
        ));
    }
    None
}

/// Fator R near-miss advisory: the company sits just below the 28%
/// threshold that would move it from Annex V to the cheaper Annex III.
pub fn fator_r_window(fator_r: f64) -> Option<Alert> {
    if (0.23..0.28).contains(&fator_r) {
        Some(Alert::new(
            Severity::Atencao,
            format!(
                "Fator R at {:.1}%, below the 28% threshold for Annex III",
                fator_r * 100.0
            ),
            "review pro-labore and payroll to reach the 28% threshold",
        ))
    } else {
        None
    }
}

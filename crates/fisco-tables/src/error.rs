//! # Table Errors — Fatal Configuration Class
//!
//! A malformed bracket table is a configuration bug, not a business-rule
//! outcome, so these errors are a separate enum from the domain
//! `EngineError` taxonomy. Built-in snapshots are validated by tests; a
//! `TableError` escaping into production means the constants were edited
//! incorrectly.

use fisco_core::Money;
use thiserror::Error;

/// Errors detected while constructing or selecting a bracket table.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TableError {
    /// A table must contain at least one bracket.
    #[error("table {name}: no brackets")]
    Empty {
        /// The table's name.
        name: String,
    },

    /// The first bracket must start at zero.
    #[error("table {name}: first bracket starts at {lower}, expected 0.00")]
    FirstLowerNonZero {
        /// The table's name.
        name: String,
        /// The offending lower bound.
        lower: Money,
    },

    /// Adjacent brackets must be contiguous (next lower = upper + 0.01).
    #[error("table {name}: bracket {tier} starts at {found}, expected {expected}")]
    Gap {
        /// The table's name.
        name: String,
        /// The 1-based tier whose lower bound is wrong.
        tier: usize,
        /// The lower bound contiguity requires.
        expected: Money,
        /// The lower bound found.
        found: Money,
    },

    /// Only the last bracket may be unbounded.
    #[error("table {name}: bracket {tier} is unbounded but is not the last")]
    UnboundedInner {
        /// The table's name.
        name: String,
        /// The 1-based offending tier.
        tier: usize,
    },

    /// The last bracket must be unbounded.
    #[error("table {name}: last bracket has upper bound {upper}, expected unbounded")]
    BoundedLast {
        /// The table's name.
        name: String,
        /// The offending upper bound.
        upper: Money,
    },

    /// A bracket's bounds must satisfy lower <= upper.
    #[error("table {name}: bracket {tier} has lower {lower} above upper {upper}")]
    InvertedBounds {
        /// The table's name.
        name: String,
        /// The 1-based offending tier.
        tier: usize,
        /// The bracket's lower bound.
        lower: Money,
        /// The bracket's upper bound.
        upper: Money,
    },

    /// Nominal rates must be non-decreasing across tiers.
    #[error("table {name}: nominal rate decreases at bracket {tier}")]
    DecreasingRate {
        /// The table's name.
        name: String,
        /// The 1-based tier whose rate dropped.
        tier: usize,
    },

    /// No table snapshot exists for the requested fiscal year.
    #[error("no table snapshot for fiscal year {year}")]
    UnknownYear {
        /// The requested year.
        year: u16,
    },
}

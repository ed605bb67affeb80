//! Business tiers and the compliance strictness ladder.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Business subscription/maturity level.
///
/// The governance rule set is strictly increasing in strictness as the
/// tier escalates from `Solopreneur` to `Enterprise`; the derived
/// ordering reflects that ladder.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
#[serde(rename_all = "lowercase")]
pub enum Tier {
    Solopreneur,
    #[default]
    Startup,
    Sme,
    Enterprise,
}

impl Tier {
    /// Lenient parse: case-insensitive, unknown values yield `None`.
    ///
    /// Tier resolution falls through a chain of candidate fields, so an
    /// unrecognized value is skipped rather than treated as an error.
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "solopreneur" => Some(Self::Solopreneur),
            "startup" => Some(Self::Startup),
            "sme" => Some(Self::Sme),
            "enterprise" => Some(Self::Enterprise),
            _ => None,
        }
    }

    /// Minimum acceptable effective SLA in hours. Zero means no floor.
    pub fn sla_floor_hours(&self) -> f64 {
        match self {
            Self::Sme => 24.0,
            Self::Enterprise => 48.0,
            _ => 0.0,
        }
    }

    /// SLA assigned to approval steps created or raised by remediation.
    pub fn remediation_sla_hours(&self) -> f64 {
        match self {
            Self::Enterprise => 48.0,
            _ => 24.0,
        }
    }

    /// Tiers from SME upward require at least one approval step.
    pub fn requires_approval(&self) -> bool {
        matches!(self, Self::Sme | Self::Enterprise)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Solopreneur => "solopreneur",
            Self::Startup => "startup",
            Self::Sme => "sme",
            Self::Enterprise => "enterprise",
        }
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

//! Per-business automation settings.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::escalation::ViolationType;
use crate::ids::{BusinessId, UserId};

/// Where and when non-remediated violations are escalated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EscalationRules {
    /// Minimum number of error-severity issues a workflow must carry
    /// before a non-remediated violation is escalated.
    pub threshold: u32,
    /// Escalation target. When unset, the automation sweep skips
    /// escalation entirely.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub escalate_to: Option<UserId>,
}

impl Default for EscalationRules {
    fn default() -> Self {
        Self {
            threshold: 1,
            escalate_to: None,
        }
    }
}

/// Which violation types are auto-remediated vs. escalated, per business.
///
/// Created lazily with safe defaults (nothing auto-remediates) on
/// first read; updates replace the whole record, there is no merge.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AutomationSettings {
    pub business_id: BusinessId,
    pub auto_remediate: HashMap<ViolationType, bool>,
    pub escalation_rules: EscalationRules,
    pub updated_at: DateTime<Utc>,
}

impl AutomationSettings {
    /// Safe defaults: every known violation type disabled, threshold 1,
    /// no escalation target.
    pub fn defaults(business_id: BusinessId) -> Self {
        Self {
            business_id,
            auto_remediate: ViolationType::ALL.iter().map(|vt| (*vt, false)).collect(),
            escalation_rules: EscalationRules::default(),
            updated_at: Utc::now(),
        }
    }

    pub fn auto_remediate_enabled(&self, violation: ViolationType) -> bool {
        self.auto_remediate.get(&violation).copied().unwrap_or(false)
    }

    pub fn enable_auto_remediate(mut self, violation: ViolationType) -> Self {
        self.auto_remediate.insert(violation, true);
        self
    }

    pub fn with_escalation_target(mut self, user: UserId) -> Self {
        self.escalation_rules.escalate_to = Some(user);
        self
    }
}

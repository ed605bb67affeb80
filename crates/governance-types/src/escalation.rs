//! Escalations: durable records routing unresolved violations to a human.
//!
//! Escalation is explicit — when a violation is not auto-remediated,
//! a record is created and a person is notified. The status machine is
//! one-way: `Pending → Resolved`, no reopen.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::ids::{BusinessId, EscalationId, UserId, WorkflowId};

/// The named violation categories the remediation and escalation
/// machinery understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ViolationType {
    MissingApproval,
    InsufficientSla,
    InsufficientApprovals,
    RoleDiversity,
}

impl ViolationType {
    /// Every known violation type, in a stable order. Used to seed
    /// automation-settings defaults.
    pub const ALL: [ViolationType; 4] = [
        Self::MissingApproval,
        Self::InsufficientSla,
        Self::InsufficientApprovals,
        Self::RoleDiversity,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::MissingApproval => "missing_approval",
            Self::InsufficientSla => "insufficient_sla",
            Self::InsufficientApprovals => "insufficient_approvals",
            Self::RoleDiversity => "role_diversity",
        }
    }
}

impl fmt::Display for ViolationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Escalation lifecycle state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EscalationStatus {
    Pending,
    Resolved,
}

impl EscalationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Resolved => "resolved",
        }
    }
}

impl fmt::Display for EscalationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when resolving an escalation that is already resolved.
#[derive(Debug, thiserror::Error)]
#[error("escalation {0} is already resolved")]
pub struct AlreadyResolved(pub EscalationId);

/// A governance escalation record.
///
/// Each escalate call creates a new row with `count` initialized to 1;
/// repeated escalations of the same violation are separate rows, not
/// increments.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GovernanceEscalation {
    pub id: EscalationId,
    pub business_id: BusinessId,
    pub workflow_id: WorkflowId,
    pub violation_type: ViolationType,
    pub count: u32,
    pub escalated_to: UserId,
    pub status: EscalationStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resolution: Option<String>,
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resolved_at: Option<DateTime<Utc>>,
}

impl GovernanceEscalation {
    pub fn new(
        business_id: BusinessId,
        workflow_id: WorkflowId,
        violation_type: ViolationType,
        escalated_to: UserId,
        notes: Option<String>,
    ) -> Self {
        Self {
            id: EscalationId::generate(),
            business_id,
            workflow_id,
            violation_type,
            count: 1,
            escalated_to,
            status: EscalationStatus::Pending,
            notes,
            resolution: None,
            created_at: Utc::now(),
            resolved_at: None,
        }
    }

    pub fn is_pending(&self) -> bool {
        self.status == EscalationStatus::Pending
    }

    /// Transition `Pending → Resolved`, stamping the resolution text
    /// and timestamp. Terminal: resolving twice is an error, and no
    /// path transitions a record back to pending.
    pub fn resolve(
        &mut self,
        resolution: impl Into<String>,
        at: DateTime<Utc>,
    ) -> Result<(), AlreadyResolved> {
        if self.status == EscalationStatus::Resolved {
            return Err(AlreadyResolved(self.id.clone()));
        }
        self.status = EscalationStatus::Resolved;
        self.resolution = Some(resolution.into());
        self.resolved_at = Some(at);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> GovernanceEscalation {
        GovernanceEscalation::new(
            BusinessId::new("biz-1"),
            WorkflowId::new("wf-1"),
            ViolationType::MissingApproval,
            UserId::new("user-1"),
            Some("found during sweep".into()),
        )
    }

    #[test]
    fn new_escalation_is_pending_with_count_one() {
        let esc = sample();
        assert_eq!(esc.status, EscalationStatus::Pending);
        assert_eq!(esc.count, 1);
        assert!(esc.resolved_at.is_none());
        assert!(esc.resolution.is_none());
    }

    #[test]
    fn resolve_is_terminal() {
        let mut esc = sample();
        let at = Utc::now();
        esc.resolve("added approval step", at).unwrap();
        assert_eq!(esc.status, EscalationStatus::Resolved);
        assert_eq!(esc.resolved_at, Some(at));
        assert_eq!(esc.resolution.as_deref(), Some("added approval step"));

        let err = esc.resolve("again", Utc::now()).unwrap_err();
        assert_eq!(err.0, esc.id);
        // still resolved, first resolution untouched
        assert_eq!(esc.resolution.as_deref(), Some("added approval step"));
    }

    #[test]
    fn violation_types_serialize_snake_case() {
        let json = serde_json::to_string(&ViolationType::InsufficientSla).unwrap();
        assert_eq!(json, "\"insufficient_sla\"");
    }
}

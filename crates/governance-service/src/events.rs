//! Events emitted by the governance service.

use governance_types::{BusinessId, EscalationId, ViolationType, WorkflowId};

/// Broadcast on the service's event channel as governance state
/// changes. Dropped silently when nobody is subscribed.
#[derive(Debug, Clone)]
pub enum GovernanceEvent {
    /// A workflow's health was recomputed and persisted.
    HealthEnforced {
        workflow_id: WorkflowId,
        score: u8,
    },

    /// A batch enforcement pass over a business completed.
    BatchCompleted {
        business_id: BusinessId,
        count: usize,
    },

    /// Auto-remediation changed a workflow's steps.
    RemediationApplied {
        workflow_id: WorkflowId,
        violation: ViolationType,
    },

    /// A violation was escalated to a human.
    EscalationRaised {
        escalation_id: EscalationId,
        workflow_id: WorkflowId,
        violation: ViolationType,
    },

    /// An escalation was resolved.
    EscalationResolved {
        escalation_id: EscalationId,
    },
}

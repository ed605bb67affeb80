//! Storage error taxonomy.

use governance_types::{BusinessId, EscalationId, WorkflowId};

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Workflow not found: {0}")]
    WorkflowNotFound(WorkflowId),

    #[error("Business not found: {0}")]
    BusinessNotFound(BusinessId),

    #[error("Escalation not found: {0}")]
    EscalationNotFound(EscalationId),

    #[error("Storage backend error: {0}")]
    Backend(String),
}

pub type StoreResult<T> = Result<T, StoreError>;

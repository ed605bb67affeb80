//! Service error taxonomy.
//!
//! Errors surface directly to the caller (UI toast or scheduler
//! failure) — there is no retry layer and no message translation.

use governance_store::StoreError;
use governance_types::{EscalationId, WorkflowId};

#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error("Not authenticated")]
    NotAuthenticated,

    #[error("Workflow not found: {0}")]
    WorkflowNotFound(WorkflowId),

    #[error("Escalation not found: {0}")]
    EscalationNotFound(EscalationId),

    #[error("Invalid transition: {0}")]
    InvalidTransition(String),

    #[error(transparent)]
    Store(#[from] StoreError),
}

pub type ServiceResult<T> = Result<T, ServiceError>;

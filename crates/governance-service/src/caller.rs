//! Caller identity.
//!
//! Interactive entry points require a user; the scheduler-triggered
//! internal variants act as the system and skip the check.

use governance_types::{AuditActor, UserId};

use crate::error::{ServiceError, ServiceResult};

/// Who is invoking a service operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Caller {
    User(UserId),
    /// Scheduler or other non-interactive invocation.
    Internal,
}

impl Caller {
    pub fn user(id: impl Into<String>) -> Self {
        Self::User(UserId::new(id))
    }

    /// The authenticated user, or `NotAuthenticated` for internal
    /// callers hitting an interactive entry point.
    pub fn require_user(&self) -> ServiceResult<&UserId> {
        match self {
            Self::User(id) => Ok(id),
            Self::Internal => Err(ServiceError::NotAuthenticated),
        }
    }

    pub fn audit_actor(&self) -> AuditActor {
        match self {
            Self::User(id) => AuditActor::User(id.clone()),
            Self::Internal => AuditActor::System,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn internal_callers_are_not_authenticated() {
        assert!(matches!(
            Caller::Internal.require_user(),
            Err(ServiceError::NotAuthenticated)
        ));
    }

    #[test]
    fn user_callers_pass_the_check() {
        let caller = Caller::user("user-1");
        assert_eq!(caller.require_user().unwrap(), &UserId::new("user-1"));
        assert_eq!(caller.audit_actor(), AuditActor::User(UserId::new("user-1")));
    }
}

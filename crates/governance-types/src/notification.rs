//! Notifications addressed to escalation targets.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::ids::{NotificationId, UserId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationPriority {
    Normal,
    High,
}

/// A notification record for one user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Notification {
    pub id: NotificationId,
    pub user_id: UserId,
    pub title: String,
    pub body: String,
    pub priority: NotificationPriority,
    pub read: bool,
    pub created_at: DateTime<Utc>,
}

impl Notification {
    pub fn new(
        user_id: UserId,
        title: impl Into<String>,
        body: impl Into<String>,
        priority: NotificationPriority,
    ) -> Self {
        Self {
            id: NotificationId::generate(),
            user_id,
            title: title.into(),
            body: body.into(),
            priority,
            read: false,
            created_at: Utc::now(),
        }
    }

    /// A high-priority notification, the form escalation uses.
    pub fn high(user_id: UserId, title: impl Into<String>, body: impl Into<String>) -> Self {
        Self::new(user_id, title, body, NotificationPriority::High)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn high_priority_notification_starts_unread() {
        let n = Notification::high(UserId::new("user-1"), "Escalation", "details");
        assert_eq!(n.priority, NotificationPriority::High);
        assert!(!n.read);
    }
}

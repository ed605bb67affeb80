//! Identifier newtypes.
//!
//! Ids are opaque strings so records keyed by the surrounding CRUD
//! layer can be referenced without conversion; `generate` mints a
//! UUIDv4-backed id for records created inside this system.

use serde::{Deserialize, Serialize};
use std::fmt;

macro_rules! id_type {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(
            Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Wrap an existing identifier.
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            /// Mint a fresh UUIDv4-backed identifier.
            pub fn generate() -> Self {
                Self(uuid::Uuid::new_v4().to_string())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(value: &str) -> Self {
                Self(value.to_string())
            }
        }

        impl From<String> for $name {
            fn from(value: String) -> Self {
                Self(value)
            }
        }
    };
}

id_type!(
    /// A business (tenant) identifier.
    BusinessId
);
id_type!(
    /// A workflow record identifier.
    WorkflowId
);
id_type!(
    /// A user identifier (escalation targets, interactive callers).
    UserId
);
id_type!(
    /// A governance escalation record identifier.
    EscalationId
);
id_type!(
    /// A notification record identifier.
    NotificationId
);
id_type!(
    /// An audit log entry identifier.
    AuditEntryId
);

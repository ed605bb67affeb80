//! Domain types for workflow governance.
//!
//! A workflow is an ordered sequence of steps (approvals, delays,
//! tasks) owned by a business. Governance attaches a computed
//! **health** to each workflow: a 0–100 compliance score plus a list
//! of typed issues, derived from the rules of the business's tier.
//! Violations that cannot be auto-remediated become **escalations**
//! routed to a human.
//!
//! # Key Concepts
//!
//! - [`Tier`]: subscription/maturity level; the rule set gets strictly
//!   stricter as the tier escalates from solopreneur to enterprise.
//! - [`WorkflowDocument`]: the heterogeneous record shape supplied by
//!   the surrounding CRUD layer (`steps` vs `pipeline`, several tier
//!   fields). Normalization into a strict shape happens in the engine.
//! - [`GovernanceHealth`]: score + structured [`Issue`] list, recomputed
//!   wholesale on every evaluation and overwritten in place.
//! - [`GovernanceEscalation`]: a durable `pending → resolved` record
//!   routing an unresolved violation to a person.
//! - [`AutomationSettings`]: per-business toggles deciding which
//!   violation types are auto-remediated vs. escalated.
//!
//! Issues carry their [`IssueCode`] through persistence so downstream
//! aggregation never has to text-match rendered messages.

#![deny(unsafe_code)]

pub mod audit;
pub mod document;
pub mod escalation;
pub mod health;
pub mod ids;
pub mod notification;
pub mod record;
pub mod settings;
pub mod step;
pub mod tier;

pub use audit::{AuditActor, AuditEntry, AuditEvent};
pub use document::WorkflowDocument;
pub use escalation::{
    AlreadyResolved, EscalationStatus, GovernanceEscalation, ViolationType,
};
pub use health::{GovernanceHealth, Issue, IssueCode, Severity};
pub use ids::{AuditEntryId, BusinessId, EscalationId, NotificationId, UserId, WorkflowId};
pub use notification::{Notification, NotificationPriority};
pub use record::{BusinessRecord, WorkflowRecord};
pub use settings::{AutomationSettings, EscalationRules};
pub use step::{StepKind, WorkflowStep};
pub use tier::Tier;

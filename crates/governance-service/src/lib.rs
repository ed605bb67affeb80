//! Governance mutation layer.
//!
//! [`GovernanceService`] is the single entry point the application and
//! the scheduler call: it evaluates workflows with the engine,
//! persists health through the injected stores, applies
//! auto-remediation, tracks escalations, and runs the per-business
//! automation sweep. All operations execute request-scoped and run to
//! completion independently — there is no background work and no
//! cross-record transaction.
//!
//! # Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use governance_service::{Caller, GovernanceConfig, GovernanceService};
//! use governance_store::{
//!     InMemoryBusinessStore, InMemoryEscalationStore, InMemoryNotificationStore,
//!     InMemorySettingsStore, InMemoryWorkflowStore, MemoryAuditRecorder,
//! };
//! use governance_types::WorkflowId;
//!
//! # async fn example() {
//! let service = GovernanceService::new(
//!     GovernanceConfig::default(),
//!     Arc::new(InMemoryWorkflowStore::new()),
//!     Arc::new(InMemoryBusinessStore::new()),
//!     Arc::new(InMemoryEscalationStore::new()),
//!     Arc::new(InMemorySettingsStore::new()),
//!     Arc::new(InMemoryNotificationStore::new()),
//!     Arc::new(MemoryAuditRecorder::new()),
//! );
//!
//! let caller = Caller::user("user-1");
//! let summary = service
//!     .enforce_workflow(&caller, &WorkflowId::new("wf-1"))
//!     .await
//!     .unwrap();
//! println!("score: {}", summary.score);
//! # }
//! ```

#![deny(unsafe_code)]

mod audit;
pub mod automation;
pub mod caller;
pub mod config;
pub mod enforcement;
pub mod error;
pub mod escalation;
pub mod events;
pub mod manager;
pub mod remediation;
pub mod settings;
pub mod trend;

pub use automation::{AutomationSweepReport, RemediatedViolation, SkippedViolation};
pub use caller::Caller;
pub use config::GovernanceConfig;
pub use enforcement::{
    BatchEnforcement, EnforcementSummary, ValidationOutcome, WorkflowScore,
};
pub use error::{ServiceError, ServiceResult};
pub use escalation::EnrichedEscalation;
pub use events::GovernanceEvent;
pub use manager::GovernanceService;
pub use remediation::RemediationOutcome;
pub use settings::SettingsUpdate;
pub use trend::{DepartmentTrend, GovernanceScoreTrend, TrendPoint};

//! Storage abstraction for governance records.
//!
//! Each collection gets an async trait; the in-memory backends back
//! tests and single-process deployments. Mutation semantics are
//! per-record: a write replaces one record atomically, there is no
//! cross-record transaction and no version check, so concurrent
//! writers to the same workflow are last-writer-wins.

#![deny(unsafe_code)]

pub mod error;
pub mod memory;
pub mod traits;

pub use error::{StoreError, StoreResult};
pub use memory::{
    FailingAuditRecorder, InMemoryBusinessStore, InMemoryEscalationStore,
    InMemoryNotificationStore, InMemorySettingsStore, InMemoryWorkflowStore,
    MemoryAuditRecorder,
};
pub use traits::{
    AuditRecorder, BusinessStore, EscalationStore, NotificationStore, SettingsStore,
    WorkflowStore,
};

//! Best-effort audit recording.

use tracing::warn;

use governance_store::AuditRecorder;
use governance_types::AuditEvent;

/// Record an audit event, swallowing failures.
///
/// Audit writes are side effects performed after the primary mutation
/// has committed; a recorder failure must not fail the operation it
/// describes. The skip is logged so it is observable.
pub(crate) async fn record_best_effort(recorder: &dyn AuditRecorder, event: AuditEvent) {
    let action = event.action.clone();
    if let Err(err) = recorder.record(event).await {
        warn!(action = %action, error = %err, "audit write skipped");
    }
}

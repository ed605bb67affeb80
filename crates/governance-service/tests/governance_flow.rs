//! End-to-end governance lifecycle: enforce → remediate → re-evaluate
//! → escalate → resolve.

use std::sync::Arc;

use governance_service::{
    Caller, GovernanceConfig, GovernanceEvent, GovernanceService, ServiceError, SettingsUpdate,
};
use governance_store::{
    BusinessStore, FailingAuditRecorder, InMemoryBusinessStore, InMemoryEscalationStore,
    InMemoryNotificationStore, InMemorySettingsStore, InMemoryWorkflowStore,
    MemoryAuditRecorder, NotificationStore, WorkflowStore,
};
use governance_types::{
    AutomationSettings, BusinessId, BusinessRecord, EscalationStatus, IssueCode, Tier,
    UserId, ViolationType, WorkflowDocument, WorkflowId, WorkflowRecord, WorkflowStep,
};

struct Harness {
    service: GovernanceService,
    workflows: Arc<InMemoryWorkflowStore>,
    notifications: Arc<InMemoryNotificationStore>,
    audit: Arc<MemoryAuditRecorder>,
    business: BusinessId,
}

impl Harness {
    async fn new(tier: Tier) -> Self {
        let workflows = Arc::new(InMemoryWorkflowStore::new());
        let businesses = Arc::new(InMemoryBusinessStore::new());
        let notifications = Arc::new(InMemoryNotificationStore::new());
        let audit = Arc::new(MemoryAuditRecorder::new());

        let business = BusinessRecord::new("Acme").with_tier(tier);
        let business_id = business.id.clone();
        businesses.insert(business).await.unwrap();

        let service = GovernanceService::new(
            GovernanceConfig::default(),
            workflows.clone(),
            businesses,
            Arc::new(InMemoryEscalationStore::new()),
            Arc::new(InMemorySettingsStore::new()),
            notifications.clone(),
            audit.clone(),
        );

        Self {
            service,
            workflows,
            notifications,
            audit,
            business: business_id,
        }
    }

    async fn seed_workflow(&self, name: &str, document: WorkflowDocument) -> WorkflowId {
        let record = WorkflowRecord::new(self.business.clone(), name, document);
        let id = record.id.clone();
        self.workflows.insert(record).await.unwrap();
        id
    }
}

fn caller() -> Caller {
    Caller::user("user-1")
}

fn enterprise_doc(steps: Vec<WorkflowStep>) -> WorkflowDocument {
    WorkflowDocument::new().with_tier("enterprise").with_steps(steps)
}

#[tokio::test]
async fn evaluate_does_not_persist_but_enforce_does() {
    let h = Harness::new(Tier::Enterprise).await;
    let id = h
        .seed_workflow("Deal approval", enterprise_doc(vec![WorkflowStep::approval("admin", 48.0)]))
        .await;

    let health = h.service.evaluate_workflow(&caller(), &id).await.unwrap();
    assert!(health.has_issue(IssueCode::MissingSecondApproval));
    let stored = h.workflows.get(&id).await.unwrap().unwrap();
    assert!(stored.governance_health.is_none());

    let summary = h.service.enforce_workflow(&caller(), &id).await.unwrap();
    assert_eq!(summary.score, health.score);
    let stored = h.workflows.get(&id).await.unwrap().unwrap();
    let persisted = stored.governance_health.unwrap();
    assert_eq!(persisted.score, health.score);
    // structured codes survive persistence
    assert!(persisted.has_issue(IssueCode::MissingSecondApproval));
}

#[tokio::test]
async fn interactive_entry_points_require_a_user() {
    let h = Harness::new(Tier::Sme).await;
    let id = h.seed_workflow("wf", WorkflowDocument::new()).await;

    let err = h
        .service
        .enforce_workflow(&Caller::Internal, &id)
        .await
        .unwrap_err();
    assert!(matches!(err, ServiceError::NotAuthenticated));

    // the scheduler path works without a user
    let batch = h
        .service
        .enforce_business_internal(&h.business)
        .await
        .unwrap();
    assert_eq!(batch.count, 1);
}

#[tokio::test]
async fn missing_workflows_are_reported_as_not_found() {
    let h = Harness::new(Tier::Sme).await;
    let err = h
        .service
        .evaluate_workflow(&caller(), &WorkflowId::new("ghost"))
        .await
        .unwrap_err();
    assert!(matches!(err, ServiceError::WorkflowNotFound(_)));
    assert_eq!(err.to_string(), "Workflow not found: ghost");
}

#[tokio::test]
async fn validate_gates_on_error_severity_only() {
    let h = Harness::new(Tier::Sme).await;
    let failing = h
        .seed_workflow("no approvals", WorkflowDocument::new().with_tier("sme"))
        .await;
    let outcome = h.service.validate_workflow(&caller(), &failing).await.unwrap();
    assert!(!outcome.ok);
    assert!(outcome.health.has_errors());

    // warns alone do not fail validation
    let warned = h
        .seed_workflow(
            "warns only",
            WorkflowDocument::new()
                .with_tier("sme")
                .with_steps(vec![WorkflowStep::approval("admin", 24.0)]),
        )
        .await;
    let outcome = h.service.validate_workflow(&caller(), &warned).await.unwrap();
    assert!(outcome.ok);
    assert!(!outcome.health.issues.is_empty()); // missing description warn
}

#[tokio::test]
async fn batch_enforcement_updates_every_workflow_in_order() {
    let h = Harness::new(Tier::Sme).await;
    let first = h.seed_workflow("first", WorkflowDocument::new().with_tier("sme")).await;
    let second = h
        .seed_workflow(
            "second",
            WorkflowDocument::new()
                .with_tier("sme")
                .with_steps(vec![WorkflowStep::approval("admin", 24.0)]),
        )
        .await;

    let batch = h.service.enforce_business(&caller(), &h.business).await.unwrap();
    assert_eq!(batch.count, 2);
    assert_eq!(batch.updated[0].id, first);
    assert_eq!(batch.updated[1].id, second);
    assert!(batch.updated[0].score < batch.updated[1].score);

    for id in [&first, &second] {
        assert!(h
            .workflows
            .get(id)
            .await
            .unwrap()
            .unwrap()
            .governance_health
            .is_some());
    }
}

#[tokio::test]
async fn remediation_fixes_the_violation_and_audits_it() {
    let h = Harness::new(Tier::Sme).await;
    let id = h
        .seed_workflow("no approvals", WorkflowDocument::new().with_tier("sme"))
        .await;

    let before = h.service.evaluate_workflow(&caller(), &id).await.unwrap();
    assert!(before.has_issue(IssueCode::MissingApproval));

    let outcome = h
        .service
        .auto_remediate(&caller(), &id, ViolationType::MissingApproval)
        .await
        .unwrap();
    assert!(outcome.remediated);
    assert!(outcome.action.contains("24h")); // SME business tier

    // remediation does not evaluate; re-evaluation clears the issue
    let after = h.service.evaluate_workflow(&caller(), &id).await.unwrap();
    assert!(!after.has_issue(IssueCode::MissingApproval));

    let entries = h.audit.entries();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].event.action, "governance.auto_remediate");

    // the appended step already meets the SLA floor, so an SLA pass
    // is a no-op and writes no further audit entry
    let outcome = h
        .service
        .auto_remediate(&caller(), &id, ViolationType::InsufficientSla)
        .await
        .unwrap();
    assert!(!outcome.remediated);
    assert_eq!(outcome.action, "No remediation applied");
    assert_eq!(h.audit.entries().len(), 1);
}

#[tokio::test]
async fn enforcement_writes_no_audit_entries() {
    let h = Harness::new(Tier::Sme).await;
    let id = h.seed_workflow("wf", WorkflowDocument::new().with_tier("sme")).await;
    h.service.enforce_workflow(&caller(), &id).await.unwrap();
    h.service.enforce_business(&caller(), &h.business).await.unwrap();
    assert!(h.audit.entries().is_empty());
}

#[tokio::test]
async fn audit_failures_never_fail_the_mutation() {
    let workflows = Arc::new(InMemoryWorkflowStore::new());
    let businesses = Arc::new(InMemoryBusinessStore::new());
    let business = BusinessRecord::new("Acme").with_tier(Tier::Sme);
    let business_id = business.id.clone();
    businesses.insert(business).await.unwrap();

    let service = GovernanceService::new(
        GovernanceConfig::default(),
        workflows.clone(),
        businesses,
        Arc::new(InMemoryEscalationStore::new()),
        Arc::new(InMemorySettingsStore::new()),
        Arc::new(InMemoryNotificationStore::new()),
        Arc::new(FailingAuditRecorder),
    );

    let record = WorkflowRecord::new(
        business_id,
        "no approvals",
        WorkflowDocument::new().with_tier("sme"),
    );
    let id = record.id.clone();
    workflows.insert(record).await.unwrap();

    let outcome = service
        .auto_remediate(&caller(), &id, ViolationType::MissingApproval)
        .await
        .unwrap();
    assert!(outcome.remediated);
}

#[tokio::test]
async fn escalation_lifecycle_is_one_way() {
    let h = Harness::new(Tier::Enterprise).await;
    let id = h
        .seed_workflow("Deal approval", enterprise_doc(vec![WorkflowStep::approval("admin", 48.0)]))
        .await;

    let target = UserId::new("ops-lead");
    let escalation_id = h
        .service
        .escalate_violation(
            &caller(),
            &h.business,
            &id,
            ViolationType::InsufficientApprovals,
            target.clone(),
            Some("needs a second approver".to_string()),
        )
        .await
        .unwrap();

    let pending = h
        .service
        .get_escalations(&caller(), &h.business, Some(EscalationStatus::Pending))
        .await
        .unwrap();
    assert_eq!(pending.len(), 1);
    assert_eq!(pending[0].escalation.id, escalation_id);
    assert_eq!(pending[0].escalation.count, 1);
    assert_eq!(pending[0].workflow_name, "Deal approval");

    // the target got a high-priority notification naming the workflow
    let inbox = h.notifications.list_for_user(&target).await.unwrap();
    assert_eq!(inbox.len(), 1);
    assert!(inbox[0].body.contains("Deal approval"));

    h.service
        .resolve_escalation(&caller(), &escalation_id, "added second approver")
        .await
        .unwrap();

    let resolved = h
        .service
        .get_escalations(&caller(), &h.business, Some(EscalationStatus::Resolved))
        .await
        .unwrap();
    assert_eq!(resolved.len(), 1);
    assert!(resolved[0].escalation.resolved_at.is_some());
    assert_eq!(
        resolved[0].escalation.resolution.as_deref(),
        Some("added second approver")
    );

    // terminal: resolving again is an invalid transition
    let err = h
        .service
        .resolve_escalation(&caller(), &escalation_id, "again")
        .await
        .unwrap_err();
    assert!(matches!(err, ServiceError::InvalidTransition(_)));

    // escalate + resolve are both audited
    let actions: Vec<_> = h
        .audit
        .entries()
        .iter()
        .map(|e| e.event.action.clone())
        .collect();
    assert_eq!(
        actions,
        vec!["governance.escalate", "governance.resolve_escalation"]
    );
}

#[tokio::test]
async fn repeated_escalations_create_separate_rows() {
    let h = Harness::new(Tier::Enterprise).await;
    let id = h.seed_workflow("wf", enterprise_doc(vec![])).await;
    let target = UserId::new("ops-lead");

    for _ in 0..2 {
        h.service
            .escalate_violation(
                &caller(),
                &h.business,
                &id,
                ViolationType::MissingApproval,
                target.clone(),
                None,
            )
            .await
            .unwrap();
    }

    let listed = h
        .service
        .get_escalations(&caller(), &h.business, None)
        .await
        .unwrap();
    assert_eq!(listed.len(), 2);
    assert!(listed.iter().all(|e| e.escalation.count == 1));
}

#[tokio::test]
async fn settings_are_lazily_created_and_replaced_wholesale() {
    let h = Harness::new(Tier::Sme).await;

    let settings = h
        .service
        .get_automation_settings(&caller(), &h.business)
        .await
        .unwrap();
    for vt in ViolationType::ALL {
        assert!(!settings.auto_remediate_enabled(vt));
    }

    let updated = h
        .service
        .update_automation_settings(
            &caller(),
            &h.business,
            SettingsUpdate {
                auto_remediate: [(ViolationType::MissingApproval, true)].into(),
                escalation_rules: settings.escalation_rules.clone(),
            },
        )
        .await
        .unwrap();
    assert!(updated.auto_remediate_enabled(ViolationType::MissingApproval));
    // wholesale replacement: entries not supplied are simply gone
    assert!(!updated.auto_remediate.contains_key(&ViolationType::RoleDiversity));
    assert!(!updated.auto_remediate_enabled(ViolationType::RoleDiversity));
}

#[tokio::test]
async fn automation_sweep_remediates_enabled_and_escalates_the_rest() {
    let h = Harness::new(Tier::Enterprise).await;
    let id = h.seed_workflow("Quarterly close", enterprise_doc(vec![])).await;
    let target = UserId::new("ops-lead");

    let defaults = AutomationSettings::defaults(h.business.clone());
    h.service
        .update_automation_settings(
            &caller(),
            &h.business,
            SettingsUpdate {
                auto_remediate: defaults
                    .auto_remediate
                    .into_iter()
                    .map(|(vt, _)| (vt, vt == ViolationType::MissingApproval))
                    .collect(),
                escalation_rules: governance_types::EscalationRules {
                    threshold: 1,
                    escalate_to: Some(target.clone()),
                },
            },
        )
        .await
        .unwrap();

    let report = h.service.run_automation_sweep(&h.business).await.unwrap();
    assert_eq!(report.evaluated, 1);

    // missing_approval was enabled: fixed and re-evaluated
    assert_eq!(report.remediated.len(), 1);
    assert_eq!(report.remediated[0].violation, ViolationType::MissingApproval);

    // insufficient_approvals was not enabled: escalated to the target
    assert!(!report.escalated.is_empty());
    let pending = h
        .service
        .get_escalations(&caller(), &h.business, Some(EscalationStatus::Pending))
        .await
        .unwrap();
    assert!(pending
        .iter()
        .any(|e| e.escalation.violation_type == ViolationType::InsufficientApprovals));

    // the remediation really landed: the workflow now has an approval step
    let health = h.service.evaluate_workflow(&caller(), &id).await.unwrap();
    assert!(!health.has_issue(IssueCode::MissingApproval));
}

#[tokio::test]
async fn automation_sweep_skips_when_no_target_is_configured() {
    let h = Harness::new(Tier::Enterprise).await;
    h.seed_workflow("wf", enterprise_doc(vec![])).await;

    // defaults: nothing enabled, no escalation target
    let report = h.service.run_automation_sweep(&h.business).await.unwrap();
    assert!(report.remediated.is_empty());
    assert!(report.escalated.is_empty());
    assert!(!report.skipped.is_empty());
    assert!(report
        .skipped
        .iter()
        .all(|s| s.reason == "no escalation target configured"));
}

#[tokio::test]
async fn events_are_broadcast_to_subscribers() {
    let h = Harness::new(Tier::Sme).await;
    let id = h.seed_workflow("wf", WorkflowDocument::new().with_tier("sme")).await;

    let mut events = h.service.subscribe();
    h.service.enforce_workflow(&caller(), &id).await.unwrap();

    match events.try_recv().unwrap() {
        GovernanceEvent::HealthEnforced { workflow_id, .. } => assert_eq!(workflow_id, id),
        other => panic!("unexpected event: {other:?}"),
    }
}

#[tokio::test]
async fn trend_aggregates_structured_codes_and_regions() {
    let h = Harness::new(Tier::Sme).await;

    // two regions, one workflow each; only one is compliant
    let clean = WorkflowRecord::new(
        h.business.clone(),
        "clean",
        WorkflowDocument::new()
            .with_tier("sme")
            .with_description("documented")
            .with_steps(vec![WorkflowStep::approval("admin", 24.0)]),
    )
    .with_region("emea");
    let dirty = WorkflowRecord::new(
        h.business.clone(),
        "dirty",
        WorkflowDocument::new().with_tier("sme"),
    )
    .with_region("amer");
    h.workflows.insert(clean).await.unwrap();
    h.workflows.insert(dirty).await.unwrap();

    h.service.enforce_business(&caller(), &h.business).await.unwrap();
    let trend = h
        .service
        .governance_score_trend(&caller(), &h.business)
        .await
        .unwrap();

    assert_eq!(trend.total_workflows, 2);
    assert_eq!(trend.evaluated_workflows, 2);
    assert_eq!(trend.compliant_workflows, 1);
    assert_eq!(trend.compliance_rate, 0.5);
    assert_eq!(trend.history.len(), 12);
    assert!(trend.history.iter().all(|p| (0.0..=100.0).contains(&p.score)));

    // the dirty workflow's missing approval and SLA show up as buckets
    assert!(trend.violation_counts[&ViolationType::MissingApproval] >= 1);
    assert!(trend.violation_counts[&ViolationType::InsufficientSla] >= 1);

    let departments: Vec<_> = trend
        .by_department
        .iter()
        .map(|d| d.department.as_str())
        .collect();
    assert_eq!(departments, vec!["amer", "emea"]); // sorted
}

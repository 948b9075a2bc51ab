use rust_decimal::Decimal;
use tracing::{info, warn};

use spendflow_core::audit::{AuditCategory, AuditEvent, AuditOutcome, AuditSink};
use spendflow_core::config::AppConfig;
use spendflow_core::{
    steps_awaiting_approver, ApprovalWorkflowEngine, Bill, BillDraft, BillId, ChainPolicy,
    Comment, Decision, DomainError, Employee, EmployeeId, InMemoryAuditSink,
};

use crate::directory::{DirectoryError, EmployeeDirectory, EmployeeDraft, EmployeeUpdate};

/// The application state behind every view: one engine owning the bills, the
/// employee directory, and the chain policy. Constructed at process start
/// and injected into consumers; views read snapshots and submit intents,
/// never touching the collections directly.
pub struct ExpenseService<S = InMemoryAuditSink> {
    engine: ApprovalWorkflowEngine,
    policy: ChainPolicy,
    directory: EmployeeDirectory,
    audit: S,
}

impl ExpenseService<InMemoryAuditSink> {
    pub fn new(config: &AppConfig) -> Self {
        Self::with_audit(config, InMemoryAuditSink::default())
    }
}

impl<S> ExpenseService<S>
where
    S: AuditSink,
{
    pub fn with_audit(config: &AppConfig, audit: S) -> Self {
        let mut policy = ChainPolicy::default();
        policy.set_threshold(config.workflow.approval_threshold);
        Self {
            engine: ApprovalWorkflowEngine::new(),
            policy,
            directory: EmployeeDirectory::new(),
            audit,
        }
    }

    /// Validate a submission draft, compose its approval chain from the
    /// current threshold, and hand both to the engine.
    pub fn submit_expense(&mut self, draft: BillDraft) -> Result<Bill, DomainError> {
        draft.validate()?;
        let chain = self.policy.build_chain(draft.amount);
        let submitter = draft.employee_name.clone();
        let bill = self.engine.submit(draft, chain);

        info!(
            bill_id = %bill.id.0,
            amount = %bill.amount,
            steps = bill.approval_steps.len(),
            "expense submitted"
        );
        self.audit.emit(
            AuditEvent::new(
                Some(bill.id.clone()),
                "workflow.bill_submitted",
                AuditCategory::Workflow,
                submitter,
                AuditOutcome::Success,
            )
            .with_metadata("amount", bill.amount.to_string())
            .with_metadata("chain_length", bill.approval_steps.len().to_string()),
        );
        Ok(bill)
    }

    /// Apply one reviewer decision to a bill's current step.
    pub fn decide(
        &mut self,
        bill_id: &BillId,
        decision: Decision,
        comment: Option<String>,
        actor: &str,
    ) -> Result<Bill, DomainError> {
        match self.engine.decide(bill_id, decision, comment) {
            Ok(bill) => {
                info!(
                    bill_id = %bill.id.0,
                    ?decision,
                    status = ?bill.status,
                    current_step = bill.current_step,
                    "decision applied"
                );
                self.audit.emit(
                    AuditEvent::new(
                        Some(bill.id.clone()),
                        "workflow.decision_applied",
                        AuditCategory::Workflow,
                        actor,
                        AuditOutcome::Success,
                    )
                    .with_metadata("decision", format!("{decision:?}"))
                    .with_metadata("status", format!("{:?}", bill.status)),
                );
                Ok(bill)
            }
            Err(error) => {
                warn!(bill_id = %bill_id.0, %error, "decision refused");
                self.audit.emit(
                    AuditEvent::new(
                        Some(bill_id.clone()),
                        "workflow.decision_refused",
                        AuditCategory::Workflow,
                        actor,
                        AuditOutcome::Rejected,
                    )
                    .with_metadata("error", error.to_string()),
                );
                Err(error)
            }
        }
    }

    /// Append a discussion comment. Review views emit these alongside their
    /// decisions ("Approved by manager" and the like).
    pub fn add_comment(
        &mut self,
        bill_id: &BillId,
        text: impl Into<String>,
        author_id: EmployeeId,
        author_name: impl Into<String>,
    ) -> Result<Comment, DomainError> {
        let text = text.into();
        if text.trim().is_empty() {
            return Err(DomainError::invalid_draft("comment", "must not be empty"));
        }
        let author_name = author_name.into();
        let comment = self.engine.add_comment(bill_id, text, author_id, author_name.clone())?;
        info!(bill_id = %bill_id.0, comment_id = %comment.id.0, "comment appended");
        self.audit.emit(AuditEvent::new(
            Some(bill_id.clone()),
            "workflow.comment_appended",
            AuditCategory::Workflow,
            author_name,
            AuditOutcome::Success,
        ));
        Ok(comment)
    }

    /// Admin control for the auto-escalation threshold. Only chains built by
    /// future submissions are affected; existing bills keep their chains.
    pub fn set_threshold(&mut self, threshold: Decimal, actor: &str) -> Result<(), DomainError> {
        if threshold <= Decimal::ZERO {
            return Err(DomainError::invalid_draft("threshold", "must be greater than zero"));
        }
        let previous = self.policy.threshold();
        self.policy.set_threshold(threshold);
        info!(%previous, %threshold, "approval threshold changed");
        self.audit.emit(
            AuditEvent::new(
                None,
                "workflow.threshold_changed",
                AuditCategory::System,
                actor,
                AuditOutcome::Success,
            )
            .with_metadata("previous", previous.to_string())
            .with_metadata("threshold", threshold.to_string()),
        );
        Ok(())
    }

    pub fn threshold(&self) -> Decimal {
        self.policy.threshold()
    }

    pub fn bills(&self) -> &[Bill] {
        self.engine.bills()
    }

    pub fn snapshot(&self) -> Vec<Bill> {
        self.engine.snapshot()
    }

    pub fn find_bill(&self, bill_id: &BillId) -> Option<&Bill> {
        self.engine.find(bill_id)
    }

    /// The queue a review dashboard renders: bills whose current step awaits
    /// the given approver role.
    pub fn pending_for_role(&self, approver_role: &str) -> Vec<&Bill> {
        self.engine
            .bills()
            .iter()
            .filter(|bill| steps_awaiting_approver(bill, approver_role))
            .collect()
    }

    pub fn add_employee(&mut self, draft: EmployeeDraft) -> Employee {
        let employee = self.directory.add(draft);
        info!(employee_id = %employee.id.0, "employee added");
        self.audit.emit(AuditEvent::new(
            None,
            "directory.employee_added",
            AuditCategory::Directory,
            employee.name.clone(),
            AuditOutcome::Success,
        ));
        employee
    }

    pub fn update_employee(
        &mut self,
        employee_id: &EmployeeId,
        update: EmployeeUpdate,
    ) -> Result<Employee, DirectoryError> {
        let employee = self.directory.update(employee_id, update)?;
        info!(employee_id = %employee.id.0, "employee updated");
        Ok(employee)
    }

    pub fn remove_employee(&mut self, employee_id: &EmployeeId) -> Result<Employee, DirectoryError> {
        let employee = self.directory.remove(employee_id)?;
        info!(employee_id = %employee.id.0, "employee removed");
        Ok(employee)
    }

    pub fn employees(&self) -> &[Employee] {
        self.directory.employees()
    }

    pub fn audit(&self) -> &S {
        &self.audit
    }

    pub(crate) fn seed(&mut self, bills: Vec<Bill>, employees: Vec<Employee>) {
        self.engine = ApprovalWorkflowEngine::with_bills(bills);
        self.directory = EmployeeDirectory::with_employees(employees);
    }
}

use chrono::{NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::bill::{
    derive_status, ApprovalStep, Bill, BillId, Comment, CommentId, Decision, OcrSnapshot,
};
use crate::domain::employee::EmployeeId;
use crate::errors::DomainError;

/// Caller-supplied fields for a new bill. The engine consumes drafts
/// verbatim; [`BillDraft::validate`] is for submitting views to run before
/// handing the draft over.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BillDraft {
    pub description: String,
    pub category: String,
    pub paid_by: String,
    pub amount: Decimal,
    pub expense_date: NaiveDate,
    pub employee_id: EmployeeId,
    pub employee_name: String,
    pub ocr: Option<OcrSnapshot>,
}

impl BillDraft {
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.description.trim().is_empty() {
            return Err(DomainError::invalid_draft("description", "must not be empty"));
        }
        if self.amount <= Decimal::ZERO {
            return Err(DomainError::invalid_draft("amount", "must be greater than zero"));
        }
        Ok(())
    }
}

/// Single owner of the bill collection and of the two state-changing
/// workflow operations: bill creation and step-decision application.
///
/// Every mutation runs synchronously to completion; either the whole effect
/// is applied or, on a guard failure, nothing is. Read consumers get clones,
/// never mutable access.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApprovalWorkflowEngine {
    bills: Vec<Bill>,
}

impl ApprovalWorkflowEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the engine with pre-existing bills, most recent first.
    pub fn with_bills(bills: Vec<Bill>) -> Self {
        Self { bills }
    }

    /// Create a bill from a draft and a pre-built approval chain. The chain
    /// is fixed in length and order from here on; the new bill starts at
    /// step zero with a generated id and submission timestamp, and is
    /// inserted at the front of the collection.
    pub fn submit(&mut self, draft: BillDraft, chain: Vec<ApprovalStep>) -> Bill {
        let bill = Bill {
            id: BillId(Uuid::new_v4().to_string()),
            description: draft.description,
            category: draft.category,
            paid_by: draft.paid_by,
            amount: draft.amount,
            expense_date: draft.expense_date,
            employee_id: draft.employee_id,
            employee_name: draft.employee_name,
            status: derive_status(&chain),
            approval_steps: chain,
            current_step: 0,
            ocr: draft.ocr,
            comments: Vec::new(),
            submitted_at: Utc::now(),
        };
        self.bills.insert(0, bill.clone());
        bill
    }

    /// Apply one reviewer decision to the bill's current step.
    ///
    /// Approval advances `current_step` (past the end of the chain on the
    /// final step); rejection freezes it at the rejecting step and
    /// short-circuits the remaining reviewers. The overall status is then
    /// recomputed from all steps. Deciding on a terminal bill or a step that
    /// has already been decided is an error and leaves the bill untouched.
    pub fn decide(
        &mut self,
        bill_id: &BillId,
        decision: Decision,
        comment: Option<String>,
    ) -> Result<Bill, DomainError> {
        let bill = self.bill_mut(bill_id)?;

        if bill.status.is_terminal() {
            return Err(DomainError::BillAlreadyTerminal {
                bill_id: bill_id.0.clone(),
                status: bill.status,
            });
        }
        let step_index = bill.current_step;
        let Some(step) = bill.approval_steps.get_mut(step_index) else {
            return Err(DomainError::ChainExhausted { bill_id: bill_id.0.clone() });
        };
        if step.is_decided() {
            return Err(DomainError::StepAlreadyDecided {
                bill_id: bill_id.0.clone(),
                step_index,
                status: step.status,
            });
        }

        step.status = decision.into();
        step.decided_at = Some(Utc::now());
        step.comment = comment;

        if decision == Decision::Approved {
            bill.current_step += 1;
        }
        bill.status = derive_status(&bill.approval_steps);

        Ok(bill.clone())
    }

    /// Append a comment to the bill. Comments are immutable once appended
    /// and only ever fail on a missing bill id.
    pub fn add_comment(
        &mut self,
        bill_id: &BillId,
        text: impl Into<String>,
        author_id: EmployeeId,
        author_name: impl Into<String>,
    ) -> Result<Comment, DomainError> {
        let bill = self.bill_mut(bill_id)?;
        let comment = Comment {
            id: CommentId(Uuid::new_v4().to_string()),
            author_id,
            author_name: author_name.into(),
            text: text.into(),
            created_at: Utc::now(),
        };
        bill.comments.push(comment.clone());
        Ok(comment)
    }

    /// Point-in-time view of the whole collection, most recent first.
    pub fn bills(&self) -> &[Bill] {
        &self.bills
    }

    pub fn snapshot(&self) -> Vec<Bill> {
        self.bills.clone()
    }

    pub fn find(&self, bill_id: &BillId) -> Option<&Bill> {
        self.bills.iter().find(|bill| &bill.id == bill_id)
    }

    fn bill_mut(&mut self, bill_id: &BillId) -> Result<&mut Bill, DomainError> {
        self.bills
            .iter_mut()
            .find(|bill| &bill.id == bill_id)
            .ok_or_else(|| DomainError::BillNotFound { bill_id: bill_id.0.clone() })
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use rust_decimal::Decimal;

    use crate::domain::bill::{BillId, BillStatus, Decision, StepStatus};
    use crate::domain::employee::EmployeeId;
    use crate::errors::DomainError;
    use crate::workflow::chain::ChainPolicy;

    use super::{ApprovalWorkflowEngine, BillDraft};

    fn draft(amount: Decimal) -> BillDraft {
        BillDraft {
            description: "Client Dinner Meeting".to_string(),
            category: "Meals & Entertainment".to_string(),
            paid_by: "Personal".to_string(),
            amount,
            expense_date: NaiveDate::from_ymd_opt(2025, 1, 18).expect("valid date"),
            employee_id: EmployeeId("emp002".to_string()),
            employee_name: "Jane Smith".to_string(),
            ocr: None,
        }
    }

    fn submit(engine: &mut ApprovalWorkflowEngine, amount: Decimal) -> BillId {
        let policy = ChainPolicy::default();
        let chain = policy.build_chain(amount);
        engine.submit(draft(amount), chain).id
    }

    #[test]
    fn small_expense_starts_pending_with_single_manager_step() {
        let mut engine = ApprovalWorkflowEngine::new();
        let id = submit(&mut engine, Decimal::new(45_000, 2));

        let bill = engine.find(&id).expect("bill exists");
        assert_eq!(bill.approval_steps.len(), 1);
        assert_eq!(bill.current_step, 0);
        assert_eq!(bill.status, BillStatus::Pending);
        assert!(bill.comments.is_empty());
    }

    #[test]
    fn new_bills_are_inserted_most_recent_first() {
        let mut engine = ApprovalWorkflowEngine::new();
        let first = submit(&mut engine, Decimal::new(10_000, 2));
        let second = submit(&mut engine, Decimal::new(20_000, 2));

        let ids: Vec<&BillId> = engine.bills().iter().map(|bill| &bill.id).collect();
        assert_eq!(ids, vec![&second, &first]);
    }

    #[test]
    fn escalated_expense_walks_manager_then_admin_to_approval() {
        let mut engine = ApprovalWorkflowEngine::new();
        let id = submit(&mut engine, Decimal::new(150_000, 2));

        let after_manager =
            engine.decide(&id, Decision::Approved, None).expect("manager approves");
        assert_eq!(after_manager.current_step, 1);
        assert_eq!(after_manager.status, BillStatus::Pending);

        let after_admin = engine.decide(&id, Decision::Approved, None).expect("admin approves");
        assert_eq!(after_admin.current_step, 2);
        assert_eq!(after_admin.status, BillStatus::Approved);
    }

    #[test]
    fn rejection_freezes_the_chain_at_the_rejecting_step() {
        let mut engine = ApprovalWorkflowEngine::new();
        let id = submit(&mut engine, Decimal::new(150_000, 2));

        let rejected = engine
            .decide(&id, Decision::Rejected, Some("missing receipt".to_string()))
            .expect("manager rejects");

        assert_eq!(rejected.status, BillStatus::Rejected);
        assert_eq!(rejected.current_step, 0);
        assert_eq!(rejected.approval_steps[0].status, StepStatus::Rejected);
        assert_eq!(rejected.approval_steps[0].comment.as_deref(), Some("missing receipt"));
        assert!(rejected.approval_steps[0].decided_at.is_some());
        // Trailing steps stay pending; the rejection alone makes the bill terminal.
        assert_eq!(rejected.approval_steps[1].status, StepStatus::Pending);
    }

    #[test]
    fn deciding_on_a_terminal_bill_is_rejected() {
        let mut engine = ApprovalWorkflowEngine::new();
        let id = submit(&mut engine, Decimal::new(150_000, 2));
        engine.decide(&id, Decision::Rejected, None).expect("first decision lands");

        let error = engine
            .decide(&id, Decision::Approved, None)
            .expect_err("second decision must be refused");
        assert!(matches!(error, DomainError::BillAlreadyTerminal { .. }));

        let bill = engine.find(&id).expect("bill exists");
        assert_eq!(bill.approval_steps[0].status, StepStatus::Rejected);
        assert_eq!(bill.current_step, 0);
    }

    #[test]
    fn fully_approved_bill_accepts_no_further_decisions() {
        let mut engine = ApprovalWorkflowEngine::new();
        let id = submit(&mut engine, Decimal::new(45_000, 2));
        engine.decide(&id, Decision::Approved, None).expect("manager approves");

        let error =
            engine.decide(&id, Decision::Approved, None).expect_err("chain is exhausted");
        assert!(matches!(
            error,
            DomainError::BillAlreadyTerminal { status: BillStatus::Approved, .. }
        ));
    }

    #[test]
    fn decisions_against_unknown_bills_report_not_found() {
        let mut engine = ApprovalWorkflowEngine::new();
        let error = engine
            .decide(&BillId("missing".to_string()), Decision::Approved, None)
            .expect_err("unknown bill");
        assert_eq!(error, DomainError::BillNotFound { bill_id: "missing".to_string() });
    }

    #[test]
    fn comments_append_in_order_and_leave_bill_fields_untouched() {
        let mut engine = ApprovalWorkflowEngine::new();
        let id = submit(&mut engine, Decimal::new(45_000, 2));
        let before = engine.find(&id).expect("bill exists").clone();

        engine
            .add_comment(&id, "Approved by manager", EmployeeId("m1".to_string()), "Sarah Manager")
            .expect("comment lands");
        engine
            .add_comment(&id, "Looks fine", EmployeeId("a1".to_string()), "Admin User")
            .expect("comment lands");

        let after = engine.find(&id).expect("bill exists");
        assert_eq!(after.comments.len(), 2);
        assert_eq!(after.comments[0].text, "Approved by manager");
        assert_eq!(after.comments[1].text, "Looks fine");
        assert_eq!(after.approval_steps, before.approval_steps);
        assert_eq!(after.amount, before.amount);
        assert_eq!(after.submitted_at, before.submitted_at);
    }

    #[test]
    fn draft_validation_catches_blank_description_and_bad_amount() {
        let mut blank = draft(Decimal::new(10_000, 2));
        blank.description = "   ".to_string();
        assert!(matches!(
            blank.validate().expect_err("blank description"),
            DomainError::InvalidDraft { ref field, .. } if field == "description"
        ));

        let negative = draft(Decimal::new(-5, 0));
        assert!(matches!(
            negative.validate().expect_err("negative amount"),
            DomainError::InvalidDraft { ref field, .. } if field == "amount"
        ));

        assert!(draft(Decimal::new(10_000, 2)).validate().is_ok());
    }
}

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::employee::EmployeeId;

#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BillId(pub String);

#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StepId(pub String);

#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CommentId(pub String);

/// Overall bill status. Always derivable from the step statuses via
/// [`derive_status`]; the cached copy on [`Bill`] exists for snapshot
/// consumers and is recomputed on every mutation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BillStatus {
    Pending,
    Approved,
    Rejected,
}

impl BillStatus {
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Approved | Self::Rejected)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StepStatus {
    Pending,
    Approved,
    Rejected,
}

/// A reviewer's verdict on the current step of a chain.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Decision {
    Approved,
    Rejected,
}

impl From<Decision> for StepStatus {
    fn from(decision: Decision) -> Self {
        match decision {
            Decision::Approved => Self::Approved,
            Decision::Rejected => Self::Rejected,
        }
    }
}

/// One decision point in a bill's approval chain. A step transitions at most
/// once, from `Pending` to a terminal status, and never again.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApprovalStep {
    pub id: StepId,
    pub approver_id: EmployeeId,
    pub approver_name: String,
    pub approver_role: String,
    pub status: StepStatus,
    pub decided_at: Option<DateTime<Utc>>,
    pub comment: Option<String>,
}

impl ApprovalStep {
    pub fn is_decided(&self) -> bool {
        self.status != StepStatus::Pending
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    pub id: CommentId,
    pub author_id: EmployeeId,
    pub author_name: String,
    pub text: String,
    pub created_at: DateTime<Utc>,
}

/// Values lifted from a scanned receipt. Informational only; never consulted
/// by the workflow engine.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct OcrSnapshot {
    pub merchant_name: Option<String>,
    pub total_amount: Option<Decimal>,
    pub date: Option<NaiveDate>,
    pub items: Vec<String>,
}

/// One submitted expense record.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bill {
    pub id: BillId,
    pub description: String,
    pub category: String,
    pub paid_by: String,
    pub amount: Decimal,
    pub expense_date: NaiveDate,
    pub employee_id: EmployeeId,
    pub employee_name: String,
    pub approval_steps: Vec<ApprovalStep>,
    /// Zero-based index of the next step awaiting a decision. Equal to
    /// `approval_steps.len()` once the chain is exhausted.
    pub current_step: usize,
    pub status: BillStatus,
    pub ocr: Option<OcrSnapshot>,
    pub comments: Vec<Comment>,
    pub submitted_at: DateTime<Utc>,
}

impl Bill {
    /// The step currently awaiting a decision, if any.
    pub fn pending_step(&self) -> Option<&ApprovalStep> {
        if self.status.is_terminal() {
            return None;
        }
        self.approval_steps.get(self.current_step)
    }
}

/// Derive the overall status from the full set of step statuses. A single
/// rejection anywhere dominates; approval requires every step approved.
pub fn derive_status(steps: &[ApprovalStep]) -> BillStatus {
    if steps.iter().any(|step| step.status == StepStatus::Rejected) {
        return BillStatus::Rejected;
    }
    if steps.iter().all(|step| step.status == StepStatus::Approved) {
        return BillStatus::Approved;
    }
    BillStatus::Pending
}

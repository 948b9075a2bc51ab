use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::bill::{ApprovalStep, StepId, StepStatus};
use crate::domain::employee::EmployeeId;

pub const MANAGER_ROLE: &str = "Manager";
pub const ADMIN_ROLE: &str = "Admin";

/// The person filling one reviewing role in newly built chains.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApproverSeat {
    pub employee_id: EmployeeId,
    pub name: String,
}

/// Composes approval chains for new bills. Every chain begins with exactly
/// one Manager step; an Admin step is appended iff the amount reaches the
/// escalation threshold. This is the sole threshold-based rule in the system.
///
/// Changing the threshold only affects chains built afterwards; chains on
/// existing bills are fixed at submission.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChainPolicy {
    threshold: Decimal,
    manager: ApproverSeat,
    admin: ApproverSeat,
}

impl ChainPolicy {
    pub const DEFAULT_THRESHOLD: Decimal = Decimal::from_parts(1000, 0, 0, false, 0);

    pub fn new(threshold: Decimal, manager: ApproverSeat, admin: ApproverSeat) -> Self {
        Self { threshold, manager, admin }
    }

    pub fn threshold(&self) -> Decimal {
        self.threshold
    }

    pub fn set_threshold(&mut self, threshold: Decimal) {
        self.threshold = threshold;
    }

    pub fn requires_admin_signoff(&self, amount: Decimal) -> bool {
        amount >= self.threshold
    }

    /// Build the chain for one submission, Manager first, Admin appended at
    /// or above the threshold.
    pub fn build_chain(&self, amount: Decimal) -> Vec<ApprovalStep> {
        let mut steps = vec![pending_step(&self.manager, MANAGER_ROLE)];
        if self.requires_admin_signoff(amount) {
            steps.push(pending_step(&self.admin, ADMIN_ROLE));
        }
        steps
    }
}

impl Default for ChainPolicy {
    fn default() -> Self {
        Self {
            threshold: Self::DEFAULT_THRESHOLD,
            manager: ApproverSeat {
                employee_id: EmployeeId("m1".to_string()),
                name: "Sarah Manager".to_string(),
            },
            admin: ApproverSeat {
                employee_id: EmployeeId("a1".to_string()),
                name: "Admin User".to_string(),
            },
        }
    }
}

fn pending_step(seat: &ApproverSeat, role: &str) -> ApprovalStep {
    ApprovalStep {
        id: StepId(Uuid::new_v4().to_string()),
        approver_id: seat.employee_id.clone(),
        approver_name: seat.name.clone(),
        approver_role: role.to_string(),
        status: StepStatus::Pending,
        decided_at: None,
        comment: None,
    }
}

use crate::domain::bill::Bill;

/// Role labels are user-facing strings ("Manager", "Admin"). Comparisons go
/// through one normalization so callers never repeat ad hoc string matching.
pub fn normalize_role(raw: &str) -> String {
    raw.trim().to_ascii_lowercase()
}

/// True when the bill's next undecided step is assigned to `approver_role`.
/// This is the single capability check review dashboards use to build their
/// pending queues.
pub fn steps_awaiting_approver(bill: &Bill, approver_role: &str) -> bool {
    bill.pending_step()
        .is_some_and(|step| normalize_role(&step.approver_role) == normalize_role(approver_role))
}

#[cfg(test)]
mod tests {
    use chrono::{NaiveDate, Utc};
    use rust_decimal::Decimal;

    use crate::domain::bill::{
        derive_status, ApprovalStep, Bill, BillId, StepId, StepStatus,
    };
    use crate::domain::employee::EmployeeId;

    use super::{normalize_role, steps_awaiting_approver};

    fn bill_with_steps(steps: Vec<ApprovalStep>, current_step: usize) -> Bill {
        let status = derive_status(&steps);
        Bill {
            id: BillId("b-1".to_string()),
            description: "Team lunch".to_string(),
            category: "Meals & Entertainment".to_string(),
            paid_by: "Personal".to_string(),
            amount: Decimal::new(12_000, 2),
            expense_date: NaiveDate::from_ymd_opt(2025, 2, 3).expect("valid date"),
            employee_id: EmployeeId("emp001".to_string()),
            employee_name: "John Doe".to_string(),
            approval_steps: steps,
            current_step,
            status,
            ocr: None,
            comments: Vec::new(),
            submitted_at: Utc::now(),
        }
    }

    fn step(role: &str, status: StepStatus) -> ApprovalStep {
        ApprovalStep {
            id: StepId(format!("s-{role}")),
            approver_id: EmployeeId("m1".to_string()),
            approver_name: "Sarah Manager".to_string(),
            approver_role: role.to_string(),
            status,
            decided_at: None,
            comment: None,
        }
    }

    #[test]
    fn role_matching_ignores_case_and_whitespace() {
        assert_eq!(normalize_role("  Manager "), "manager");
    }

    #[test]
    fn pending_manager_step_awaits_manager_not_admin() {
        let bill = bill_with_steps(
            vec![step("Manager", StepStatus::Pending), step("Admin", StepStatus::Pending)],
            0,
        );

        assert!(steps_awaiting_approver(&bill, "manager"));
        assert!(!steps_awaiting_approver(&bill, "Admin"));
    }

    #[test]
    fn admin_step_becomes_current_after_manager_approval() {
        let bill = bill_with_steps(
            vec![step("Manager", StepStatus::Approved), step("Admin", StepStatus::Pending)],
            1,
        );

        assert!(steps_awaiting_approver(&bill, "Admin"));
        assert!(!steps_awaiting_approver(&bill, "Manager"));
    }

    #[test]
    fn terminal_bills_await_nobody() {
        let bill = bill_with_steps(
            vec![step("Manager", StepStatus::Rejected), step("Admin", StepStatus::Pending)],
            0,
        );

        assert!(!steps_awaiting_approver(&bill, "Manager"));
        assert!(!steps_awaiting_approver(&bill, "Admin"));
    }
}

use std::collections::BTreeMap;

use rust_decimal::Decimal;

use spendflow_core::{Bill, BillStatus, EmployeeId};

/// Pure aggregation over bill snapshots for the dashboard and analytics
/// screens. Read-only and outside the engine's contract; everything here is
/// recomputable from a snapshot at any time.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SpendSummary {
    pub total: Decimal,
    pub approved: Decimal,
    pub pending: Decimal,
    pub rejected: Decimal,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct StatusCounts {
    pub pending: usize,
    pub approved: usize,
    pub rejected: usize,
}

pub fn spend_summary(bills: &[Bill]) -> SpendSummary {
    let mut summary = SpendSummary::default();
    for bill in bills {
        summary.total += bill.amount;
        match bill.status {
            BillStatus::Approved => summary.approved += bill.amount,
            BillStatus::Pending => summary.pending += bill.amount,
            BillStatus::Rejected => summary.rejected += bill.amount,
        }
    }
    summary
}

pub fn status_counts(bills: &[Bill]) -> StatusCounts {
    let mut counts = StatusCounts::default();
    for bill in bills {
        match bill.status {
            BillStatus::Pending => counts.pending += 1,
            BillStatus::Approved => counts.approved += 1,
            BillStatus::Rejected => counts.rejected += 1,
        }
    }
    counts
}

pub fn spend_by_category(bills: &[Bill]) -> BTreeMap<String, Decimal> {
    let mut by_category = BTreeMap::new();
    for bill in bills {
        *by_category.entry(bill.category.clone()).or_insert(Decimal::ZERO) += bill.amount;
    }
    by_category
}

pub fn spend_by_employee(bills: &[Bill]) -> BTreeMap<String, Decimal> {
    let mut by_employee = BTreeMap::new();
    for bill in bills {
        *by_employee.entry(bill.employee_name.clone()).or_insert(Decimal::ZERO) += bill.amount;
    }
    by_employee
}

/// The personal view: only bills submitted by the given employee.
pub fn bills_for_employee<'a>(bills: &'a [Bill], employee_id: &EmployeeId) -> Vec<&'a Bill> {
    bills.iter().filter(|bill| &bill.employee_id == employee_id).collect()
}

#[cfg(test)]
mod tests {
    use chrono::{NaiveDate, Utc};
    use rust_decimal::Decimal;

    use spendflow_core::{
        derive_status, ApprovalStep, Bill, BillId, EmployeeId, StepId, StepStatus,
    };

    use super::{
        bills_for_employee, spend_by_category, spend_by_employee, spend_summary, status_counts,
    };

    fn bill(id: &str, employee: &str, category: &str, cents: i64, step: StepStatus) -> Bill {
        let steps = vec![ApprovalStep {
            id: StepId(format!("s-{id}")),
            approver_id: EmployeeId("m1".to_string()),
            approver_name: "Sarah Manager".to_string(),
            approver_role: "Manager".to_string(),
            status: step,
            decided_at: None,
            comment: None,
        }];
        let status = derive_status(&steps);
        Bill {
            id: BillId(id.to_string()),
            description: format!("{category} spend"),
            category: category.to_string(),
            paid_by: "Personal".to_string(),
            amount: Decimal::new(cents, 2),
            expense_date: NaiveDate::from_ymd_opt(2025, 2, 1).expect("valid date"),
            employee_id: EmployeeId(employee.to_string()),
            employee_name: employee.to_string(),
            approval_steps: steps,
            current_step: usize::from(step == StepStatus::Approved),
            status,
            ocr: None,
            comments: Vec::new(),
            submitted_at: Utc::now(),
        }
    }

    fn dataset() -> Vec<Bill> {
        vec![
            bill("b-1", "emp001", "Travel", 40_000, StepStatus::Approved),
            bill("b-2", "emp001", "Travel", 10_000, StepStatus::Pending),
            bill("b-3", "emp002", "Software", 25_000, StepStatus::Rejected),
        ]
    }

    #[test]
    fn summary_splits_totals_by_status() {
        let summary = spend_summary(&dataset());

        assert_eq!(summary.total, Decimal::new(75_000, 2));
        assert_eq!(summary.approved, Decimal::new(40_000, 2));
        assert_eq!(summary.pending, Decimal::new(10_000, 2));
        assert_eq!(summary.rejected, Decimal::new(25_000, 2));
    }

    #[test]
    fn counts_cover_every_bill_exactly_once() {
        let counts = status_counts(&dataset());
        assert_eq!((counts.pending, counts.approved, counts.rejected), (1, 1, 1));
    }

    #[test]
    fn category_breakdown_sums_within_each_category() {
        let by_category = spend_by_category(&dataset());

        assert_eq!(by_category.get("Travel"), Some(&Decimal::new(50_000, 2)));
        assert_eq!(by_category.get("Software"), Some(&Decimal::new(25_000, 2)));
    }

    #[test]
    fn employee_views_see_only_their_own_bills() {
        let bills = dataset();
        let mine = bills_for_employee(&bills, &EmployeeId("emp001".to_string()));

        assert_eq!(mine.len(), 2);
        assert!(mine.iter().all(|bill| bill.employee_id.0 == "emp001"));

        let by_employee = spend_by_employee(&bills);
        assert_eq!(by_employee.get("emp001"), Some(&Decimal::new(50_000, 2)));
    }
}

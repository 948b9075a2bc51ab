use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use rust_decimal::Decimal;

use spendflow_core::audit::AuditSink;
use spendflow_core::{
    derive_status, ApprovalStep, Bill, BillId, BillStatus, Comment, CommentId, Employee,
    EmployeeId, OcrSnapshot, StepId, StepStatus,
};

use crate::state::ExpenseService;

/// Deterministic demo dataset standing in for a backend: the two canonical
/// bills (one mid-chain, one fully approved) plus the staff directory,
/// including the approver seats referenced by chain steps.
pub struct SeedDataset;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SeedSummary {
    pub bill_count: usize,
    pub employee_count: usize,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct VerificationReport {
    pub problems: Vec<String>,
}

impl VerificationReport {
    pub fn is_ok(&self) -> bool {
        self.problems.is_empty()
    }
}

impl SeedDataset {
    pub fn load<S>(service: &mut ExpenseService<S>) -> SeedSummary
    where
        S: AuditSink,
    {
        let bills = seed_bills();
        let employees = seed_employees();
        let summary = SeedSummary { bill_count: bills.len(), employee_count: employees.len() };
        service.seed(bills, employees);
        summary
    }

    /// Check the seeded state against the workflow invariants; returns the
    /// list of violations, empty on a healthy dataset.
    pub fn verify<S>(service: &ExpenseService<S>) -> VerificationReport
    where
        S: AuditSink,
    {
        let mut report = VerificationReport::default();
        for bill in service.bills() {
            if bill.current_step > bill.approval_steps.len() {
                report.problems.push(format!(
                    "bill `{}`: current_step {} exceeds chain length {}",
                    bill.id.0,
                    bill.current_step,
                    bill.approval_steps.len()
                ));
            }
            if bill.status != derive_status(&bill.approval_steps) {
                report.problems.push(format!(
                    "bill `{}`: cached status {:?} does not match its steps",
                    bill.id.0, bill.status
                ));
            }
            if bill.amount <= Decimal::ZERO {
                report
                    .problems
                    .push(format!("bill `{}`: non-positive amount {}", bill.id.0, bill.amount));
            }
        }
        report
    }
}

fn seed_bills() -> Vec<Bill> {
    vec![
        Bill {
            id: BillId("bill-office-supplies-001".to_string()),
            description: "Office Supplies Purchase".to_string(),
            category: "Office Supplies".to_string(),
            paid_by: "Company Card".to_string(),
            amount: Decimal::new(45_000, 2),
            expense_date: date(2025, 1, 15),
            employee_id: EmployeeId("emp001".to_string()),
            employee_name: "John Doe".to_string(),
            approval_steps: vec![pending_manager_step("seed-step-001")],
            current_step: 0,
            status: BillStatus::Pending,
            ocr: Some(OcrSnapshot {
                merchant_name: Some("Office Depot".to_string()),
                total_amount: Some(Decimal::new(45_000, 2)),
                date: Some(date(2025, 1, 15)),
                items: vec![
                    "Printer Paper".to_string(),
                    "Pens".to_string(),
                    "Folders".to_string(),
                ],
            }),
            comments: Vec::new(),
            submitted_at: timestamp(2025, 1, 15, 10, 30),
        },
        Bill {
            id: BillId("bill-client-dinner-001".to_string()),
            description: "Client Dinner Meeting".to_string(),
            category: "Meals & Entertainment".to_string(),
            paid_by: "Personal".to_string(),
            amount: Decimal::new(125_000, 2),
            expense_date: date(2025, 1, 18),
            employee_id: EmployeeId("emp002".to_string()),
            employee_name: "Jane Smith".to_string(),
            approval_steps: vec![
                decided_step("seed-step-002", "m1", "Sarah Manager", "Manager", 2025, 1, 19),
                decided_step("seed-step-003", "a1", "Admin User", "Admin", 2025, 1, 20),
            ],
            current_step: 2,
            status: BillStatus::Approved,
            ocr: Some(OcrSnapshot {
                merchant_name: Some("The Prime Restaurant".to_string()),
                total_amount: Some(Decimal::new(125_000, 2)),
                date: Some(date(2025, 1, 18)),
                items: vec!["Dinner for 4".to_string(), "Beverages".to_string()],
            }),
            comments: vec![Comment {
                id: CommentId("seed-comment-001".to_string()),
                author_id: EmployeeId("m1".to_string()),
                author_name: "Sarah Manager".to_string(),
                text: "Approved for client meeting".to_string(),
                created_at: timestamp(2025, 1, 19, 9, 0),
            }],
            submitted_at: timestamp(2025, 1, 18, 20, 0),
        },
    ]
}

fn seed_employees() -> Vec<Employee> {
    vec![
        employee("emp001", "John Doe", "john@company.com", "employee", "Sales", 2023, 1, 15),
        employee("emp002", "Jane Smith", "jane@company.com", "employee", "Marketing", 2023, 3, 20),
        employee("emp003", "Bob Johnson", "bob@company.com", "manager", "Finance", 2022, 6, 10),
        employee("m1", "Sarah Manager", "sarah@company.com", "manager", "Operations", 2021, 4, 1),
        employee("a1", "Admin User", "admin@company.com", "admin", "Operations", 2020, 9, 7),
    ]
}

fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("fixture dates are valid")
}

fn timestamp(year: i32, month: u32, day: u32, hour: u32, minute: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, day, hour, minute, 0)
        .single()
        .expect("fixture timestamps are valid")
}

fn pending_manager_step(id: &str) -> ApprovalStep {
    ApprovalStep {
        id: StepId(id.to_string()),
        approver_id: EmployeeId("m1".to_string()),
        approver_name: "Sarah Manager".to_string(),
        approver_role: "Manager".to_string(),
        status: StepStatus::Pending,
        decided_at: None,
        comment: None,
    }
}

fn decided_step(
    id: &str,
    approver_id: &str,
    approver_name: &str,
    role: &str,
    year: i32,
    month: u32,
    day: u32,
) -> ApprovalStep {
    ApprovalStep {
        id: StepId(id.to_string()),
        approver_id: EmployeeId(approver_id.to_string()),
        approver_name: approver_name.to_string(),
        approver_role: role.to_string(),
        status: StepStatus::Approved,
        decided_at: Some(timestamp(year, month, day, 9, 0)),
        comment: None,
    }
}

fn employee(
    id: &str,
    name: &str,
    email: &str,
    role: &str,
    department: &str,
    year: i32,
    month: u32,
    day: u32,
) -> Employee {
    Employee {
        id: EmployeeId(id.to_string()),
        name: name.to_string(),
        email: email.to_string(),
        role: role.to_string(),
        department: department.to_string(),
        join_date: date(year, month, day),
    }
}

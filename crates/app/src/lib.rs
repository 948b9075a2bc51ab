pub mod analytics;
pub mod directory;
pub mod fixtures;
pub mod session;
pub mod state;
pub mod telemetry;

pub use analytics::{
    bills_for_employee, spend_by_category, spend_by_employee, spend_summary, status_counts,
    SpendSummary, StatusCounts,
};
pub use directory::{DirectoryError, EmployeeDirectory, EmployeeDraft, EmployeeUpdate};
pub use fixtures::{SeedDataset, SeedSummary, VerificationReport};
pub use session::{SessionError, SessionStore, SessionUser};
pub use state::ExpenseService;
pub use telemetry::init_logging;

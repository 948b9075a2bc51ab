pub mod chain;
pub mod engine;

pub use chain::{ApproverSeat, ChainPolicy, ADMIN_ROLE, MANAGER_ROLE};
pub use engine::{ApprovalWorkflowEngine, BillDraft};

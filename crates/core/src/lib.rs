pub mod access;
pub mod audit;
pub mod config;
pub mod domain;
pub mod errors;
pub mod workflow;

pub use access::{normalize_role, steps_awaiting_approver};
pub use audit::{AuditCategory, AuditEvent, AuditOutcome, AuditSink, InMemoryAuditSink};
pub use config::{AppConfig, ConfigError, LoadOptions, LogFormat};
pub use domain::bill::{
    derive_status, ApprovalStep, Bill, BillId, BillStatus, Comment, CommentId, Decision,
    OcrSnapshot, StepId, StepStatus,
};
pub use domain::employee::{Employee, EmployeeId};
pub use errors::DomainError;
pub use workflow::{ApprovalWorkflowEngine, ApproverSeat, BillDraft, ChainPolicy};

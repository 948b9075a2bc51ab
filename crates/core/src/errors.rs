use thiserror::Error;

use crate::domain::bill::{BillStatus, StepStatus};

/// Failures of the workflow core. All are local, recoverable, per-operation
/// errors reported back to the initiating view; nothing here is fatal and no
/// state is mutated when one is returned.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum DomainError {
    #[error("bill `{bill_id}` does not exist")]
    BillNotFound { bill_id: String },
    #[error("bill `{bill_id}` is already {status:?}; no further decisions are valid")]
    BillAlreadyTerminal { bill_id: String, status: BillStatus },
    #[error("step {step_index} of bill `{bill_id}` is already {status:?}")]
    StepAlreadyDecided { bill_id: String, step_index: usize, status: StepStatus },
    #[error("bill `{bill_id}` has no step awaiting a decision")]
    ChainExhausted { bill_id: String },
    #[error("invalid `{field}`: {reason}")]
    InvalidDraft { field: String, reason: String },
}

impl DomainError {
    pub fn invalid_draft(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidDraft { field: field.into(), reason: reason.into() }
    }
}

#[cfg(test)]
mod tests {
    use crate::domain::bill::BillStatus;

    use super::DomainError;

    #[test]
    fn terminal_bill_error_names_the_offending_bill() {
        let error = DomainError::BillAlreadyTerminal {
            bill_id: "b-7".to_string(),
            status: BillStatus::Rejected,
        };

        assert_eq!(
            error.to_string(),
            "bill `b-7` is already Rejected; no further decisions are valid"
        );
    }

    #[test]
    fn draft_validation_error_carries_field_and_reason() {
        let error = DomainError::invalid_draft("amount", "must be greater than zero");
        assert_eq!(error.to_string(), "invalid `amount`: must be greater than zero");
    }
}

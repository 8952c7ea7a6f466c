//! Error taxonomy shared by the remote client and the reconciliation controller.

use crate::model::PersonId;

/// A draft rejected before any remote call is made.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("name is required")]
    EmptyName,
    #[error("number is required")]
    EmptyNumber,
    #[error("please enter both name and number")]
    EmptyDraft,
}

/// A single remote exchange that did not produce the expected response.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum TransportError {
    #[error("{label}: remote unreachable ({reason})")]
    Unreachable { label: String, reason: String },
    #[error("{label}: remote returned status {status}")]
    Status { label: String, status: u16 },
    #[error("{label}: person {id} not found on the remote")]
    NotFound { label: String, id: PersonId },
    #[error("{label}: malformed response ({reason})")]
    Malformed { label: String, reason: String },
}

impl TransportError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, TransportError::NotFound { .. })
    }
}

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum PhonebookError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Transport(#[from] TransportError),
    #[error("another operation on {target} is still in flight")]
    Busy { target: String },
}

//! Error kinds returned by ledger operations.
//!
//! Every failure leaves the ledger untouched: operations validate first and
//! mutate last. Declined confirmations are not errors, see [`crate::ledger::Outcome`].

use thiserror::Error;

/// Why a seat number supplied by the caller was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SeatInputError {
    #[error("seat number must be an integer, got {0:?}")]
    NotANumber(String),
    #[error("seat number must be between 1 and {max}, got {value}")]
    OutOfRange { value: i64, max: usize },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LedgerError {
    /// Malformed bus number or time, or an empty required field.
    #[error("invalid {field}: {value:?}")]
    InvalidFormat { field: &'static str, value: String },

    #[error("bus number {0} already exists")]
    DuplicateKey(String),

    #[error("cannot add more buses, limit of {limit} reached")]
    CapacityExceeded { limit: usize },

    #[error("{0} not found")]
    NotFound(String),

    #[error(transparent)]
    InvalidInput(#[from] SeatInputError),

    #[error("seat {seat} on bus {bus} is already occupied")]
    SeatTaken { bus: String, seat: usize },

    /// Informational: there is nothing to list.
    #[error("no buses available")]
    EmptyCollection,

    #[error("no unused ticket id after {attempts} attempts")]
    TicketIdUnavailable { attempts: u32 },
}

impl LedgerError {
    /// True for states that are worth telling the user about but are not failures.
    pub fn is_informational(&self) -> bool {
        matches!(self, LedgerError::EmptyCollection)
    }

    /// True when the ledger itself could not complete a well-formed request.
    /// Every other variant is a rejected input: a typo, a miss, a taken seat.
    pub fn is_anomaly(&self) -> bool {
        matches!(self, LedgerError::TicketIdUnavailable { .. })
    }

    /// Short stable name of the error kind, used as a structured log field.
    pub fn kind(&self) -> &'static str {
        match self {
            LedgerError::InvalidFormat { .. } => "invalid_format",
            LedgerError::DuplicateKey(_) => "duplicate_key",
            LedgerError::CapacityExceeded { .. } => "capacity_exceeded",
            LedgerError::NotFound(_) => "not_found",
            LedgerError::InvalidInput(_) => "invalid_input",
            LedgerError::SeatTaken { .. } => "seat_taken",
            LedgerError::EmptyCollection => "empty_collection",
            LedgerError::TicketIdUnavailable { .. } => "ticket_id_unavailable",
        }
    }

    pub(crate) fn invalid(field: &'static str, value: &str) -> Self {
        LedgerError::InvalidFormat {
            field,
            value: value.to_string(),
        }
    }
}

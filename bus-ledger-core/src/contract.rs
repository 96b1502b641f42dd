//! # contract: collaborator interfaces the ledger depends on
//!
//! The ledger issues ticket identifiers but does not decide how they are
//! produced. Anything implementing [`TicketIdGenerator`] can be plugged in:
//! the seeded/random default in [`crate::ticket_id`], or a scripted mock.
//!
//! ## Mocking & Testing
//! - The trait is annotated for `mockall`, so tests get a `MockTicketIdGenerator`
//!   with deterministic return sequences (see the collision tests in `ledger`).
//! - The mock is exported outside this crate under the `test-export-mocks` feature.

#[cfg(any(test, feature = "test-export-mocks"))]
use mockall::automock;

/// Produces raw ticket identifiers.
///
/// Implementations should return 8 characters drawn from `[0-9A-Za-z]`. No
/// uniqueness is promised: the ledger canonicalises the value to lowercase
/// and applies its own collision policy.
#[cfg_attr(any(test, feature = "test-export-mocks"), automock)]
pub trait TicketIdGenerator: Send + Sync {
    fn generate(&mut self) -> String;
}

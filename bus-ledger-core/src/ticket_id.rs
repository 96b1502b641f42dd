//! Ticket identifiers and the default generator.

use rand::distributions::Alphanumeric;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::Serialize;
use std::fmt;

use crate::contract::TicketIdGenerator;

pub const TICKET_ID_LEN: usize = 8;

/// A ticket id in canonical (lowercase) form. All comparisons go through this type,
/// which makes lookups case-insensitive.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct TicketId(String);

impl TicketId {
    pub fn canonical(raw: &str) -> Self {
        TicketId(raw.to_lowercase())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Eight characters from `[a-z0-9]`.
    pub fn is_well_formed(&self) -> bool {
        self.0.len() == TICKET_ID_LEN
            && self
                .0
                .bytes()
                .all(|b| b.is_ascii_lowercase() || b.is_ascii_digit())
    }
}

impl fmt::Display for TicketId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Draws [`TICKET_ID_LEN`] characters uniformly from `[0-9A-Za-z]`.
pub struct RandomTicketIdGenerator {
    rng: ChaCha8Rng,
}

impl RandomTicketIdGenerator {
    pub fn from_entropy() -> Self {
        Self {
            rng: ChaCha8Rng::from_entropy(),
        }
    }

    /// Same seed, same sequence of ids.
    pub fn from_seed(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }
}

impl Default for RandomTicketIdGenerator {
    fn default() -> Self {
        Self::from_entropy()
    }
}

impl TicketIdGenerator for RandomTicketIdGenerator {
    fn generate(&mut self) -> String {
        (&mut self.rng)
            .sample_iter(Alphanumeric)
            .take(TICKET_ID_LEN)
            .map(char::from)
            .collect()
    }
}

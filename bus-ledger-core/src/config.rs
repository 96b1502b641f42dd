//! Ledger settings: how ticket id collisions are handled.
//!
//! Deserialised from the `ticket_ids` section of the CLI's YAML file; the
//! defaults apply when the section or a field is missing.

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

pub const DEFAULT_MAX_ATTEMPTS: u32 = 16;

/// What the ledger does when the generator hands out an id that an occupied
/// seat already holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CollisionPolicy {
    /// Ask the generator again, up to `max_attempts` times.
    #[default]
    Reroll,
    /// Store the first generated id even if it is already in use.
    Allow,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LedgerConfig {
    pub on_collision: CollisionPolicy,
    pub max_attempts: u32,
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            on_collision: CollisionPolicy::Reroll,
            max_attempts: DEFAULT_MAX_ATTEMPTS,
        }
    }
}

impl LedgerConfig {
    pub fn trace_loaded(&self) {
        info!(
            on_collision = ?self.on_collision,
            max_attempts = self.max_attempts,
            "Loaded ledger config"
        );
        debug!(?self, "Ledger config loaded (full debug)");
    }
}

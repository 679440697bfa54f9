//! Domain events emitted by the escrow engine.
//!
//! Events are observational only: sinks receive them on successful state
//! changes but have no effect on correctness. Hosts typically forward them
//! to an indexer or message bus.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{ChainTag, OwnerId};

/// A structured notification from the escrow engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum EscrowEvent {
    /// Emitted on every successful create and extend: an automatic unlock
    /// has been scheduled for `deadline`.
    UnlockScheduled {
        owner: OwnerId,
        chain: ChainTag,
        deadline: DateTime<Utc>,
    },
}

impl EscrowEvent {
    /// Stable event kind string, matching the serialized `kind` tag.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::UnlockScheduled { .. } => "unlock_scheduled",
        }
    }
}

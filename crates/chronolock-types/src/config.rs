//! Configuration for the escrow engine.

use serde::{Deserialize, Serialize};

use crate::constants;

/// Static configuration injected into the engine at construction.
///
/// This is host wiring, not a governance surface: the values never change
/// for the lifetime of an engine instance.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Upper bound on a lock's cumulative `lock_hours`. Because every
    /// extension adds to the cumulative total, repeated extensions
    /// eventually hit this cap rather than growing without limit.
    pub max_lock_hours: u32,
}

impl EngineConfig {
    /// Config with no effective duration cap.
    #[must_use]
    pub fn unlimited() -> Self {
        Self {
            max_lock_hours: u32::MAX,
        }
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            max_lock_hours: constants::DEFAULT_MAX_LOCK_HOURS,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_cap_is_one_year() {
        let cfg = EngineConfig::default();
        assert_eq!(cfg.max_lock_hours, 8760);
    }

    #[test]
    fn serde_roundtrip() {
        let cfg = EngineConfig { max_lock_hours: 48 };
        let json = serde_json::to_string(&cfg).unwrap();
        let back: EngineConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(cfg.max_lock_hours, back.max_lock_hours);
    }
}

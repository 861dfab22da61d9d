//! Module Descriptors
//!
//! Static registry of the configurable event modules. Every module shares
//! the same submit/rank/settings machinery; the descriptor captures what
//! differs: record scope, score thresholds and the display title.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{EventsError, EventsResult};

/// Stage value stored for modules without stages.
///
/// The record table is unique on (user, module, stage); using 0 instead
/// of NULL keeps that index total, since Postgres treats NULLs as
/// distinct in unique indexes.
pub const NO_STAGE: i16 = 0;

/// Keys of the known event modules
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModuleKey {
    Mobilization,
    KvkInitial,
    KvkBattle,
    Honor,
    Fortress,
}

impl ModuleKey {
    pub const fn as_str(&self) -> &'static str {
        match self {
            ModuleKey::Mobilization => "mobilization",
            ModuleKey::KvkInitial => "kvk_initial",
            ModuleKey::KvkBattle => "kvk_battle",
            ModuleKey::Honor => "honor",
            ModuleKey::Fortress => "fortress",
        }
    }

    /// Parse a module key from a URL path segment
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "mobilization" => Some(ModuleKey::Mobilization),
            "kvk_initial" => Some(ModuleKey::KvkInitial),
            "kvk_battle" => Some(ModuleKey::KvkBattle),
            "honor" => Some(ModuleKey::Honor),
            "fortress" => Some(ModuleKey::Fortress),
            _ => None,
        }
    }
}

impl fmt::Display for ModuleKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What makes a record unique within a module
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScopeShape {
    /// One record per user
    PerUser,
    /// One record per user per stage, stages 1..=stages
    PerUserStage { stages: i16 },
}

/// Per-module parameters for the shared submission machinery
#[derive(Debug, Clone, Copy)]
pub struct ModuleDescriptor {
    pub key: ModuleKey,
    pub title: &'static str,
    pub scope: ScopeShape,
    /// Threshold for the derived `meets_minimum` flag
    pub min_score: i64,
    pub max_score: Option<i64>,
}

impl ModuleDescriptor {
    /// Resolve the stage field against the scope shape.
    ///
    /// Per-user modules must not carry a stage; staged modules require one
    /// in range. Returns the stage value to store.
    pub fn resolve_stage(&self, stage: Option<i16>) -> EventsResult<i16> {
        match (self.scope, stage) {
            (ScopeShape::PerUser, None) => Ok(NO_STAGE),
            (ScopeShape::PerUser, Some(_)) => Err(EventsError::Validation(format!(
                "Module '{}' does not have stages",
                self.key
            ))),
            (ScopeShape::PerUserStage { stages }, Some(s)) if (1..=stages).contains(&s) => Ok(s),
            (ScopeShape::PerUserStage { stages }, Some(s)) => Err(EventsError::Validation(
                format!("Stage {s} is out of range for '{}' (1..={stages})", self.key),
            )),
            (ScopeShape::PerUserStage { .. }, None) => Err(EventsError::Validation(format!(
                "Module '{}' requires a stage",
                self.key
            ))),
        }
    }

    /// Validate a submitted score against the descriptor's range
    pub fn validate_score(&self, score: i64) -> EventsResult<()> {
        if score < 0 {
            return Err(EventsError::Validation(
                "Score must be zero or greater".to_string(),
            ));
        }
        if let Some(max) = self.max_score
            && score > max
        {
            return Err(EventsError::Validation(format!(
                "Score must not exceed {max}"
            )));
        }
        Ok(())
    }

    /// Derived flag, recomputed on every write
    pub fn meets_minimum(&self, score: i64) -> bool {
        score >= self.min_score
    }
}

/// All known modules, in display order
pub static REGISTRY: &[ModuleDescriptor] = &[
    ModuleDescriptor {
        key: ModuleKey::Mobilization,
        title: "Alliance Mobilization",
        scope: ScopeShape::PerUser,
        min_score: 100,
        max_score: None,
    },
    ModuleDescriptor {
        key: ModuleKey::KvkInitial,
        title: "KvK Pre-Registration",
        scope: ScopeShape::PerUser,
        min_score: 0,
        max_score: None,
    },
    ModuleDescriptor {
        key: ModuleKey::KvkBattle,
        title: "KvK Battle Results",
        scope: ScopeShape::PerUser,
        min_score: 0,
        max_score: None,
    },
    ModuleDescriptor {
        key: ModuleKey::Honor,
        title: "Honor Contributions",
        scope: ScopeShape::PerUser,
        min_score: 0,
        max_score: None,
    },
    ModuleDescriptor {
        key: ModuleKey::Fortress,
        title: "Fortress Event",
        scope: ScopeShape::PerUserStage { stages: 3 },
        min_score: 0,
        max_score: None,
    },
];

/// Look up the descriptor for a module key
pub fn descriptor(key: ModuleKey) -> &'static ModuleDescriptor {
    REGISTRY
        .iter()
        .find(|d| d.key == key)
        .unwrap_or_else(|| unreachable!("every ModuleKey has a registry entry"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_roundtrip() {
        for d in REGISTRY {
            assert_eq!(ModuleKey::parse(d.key.as_str()), Some(d.key));
        }
        assert_eq!(ModuleKey::parse("unknown"), None);
        assert_eq!(ModuleKey::parse(""), None);
        assert_eq!(ModuleKey::parse("Mobilization"), None);
    }

    #[test]
    fn test_registry_covers_every_key() {
        for key in [
            ModuleKey::Mobilization,
            ModuleKey::KvkInitial,
            ModuleKey::KvkBattle,
            ModuleKey::Honor,
            ModuleKey::Fortress,
        ] {
            assert_eq!(descriptor(key).key, key);
        }
    }

    #[test]
    fn test_resolve_stage_per_user() {
        let d = descriptor(ModuleKey::Mobilization);
        assert_eq!(d.resolve_stage(None).unwrap(), NO_STAGE);
        assert!(d.resolve_stage(Some(1)).is_err());
    }

    #[test]
    fn test_resolve_stage_staged() {
        let d = descriptor(ModuleKey::Fortress);
        assert_eq!(d.resolve_stage(Some(1)).unwrap(), 1);
        assert_eq!(d.resolve_stage(Some(3)).unwrap(), 3);
        assert!(d.resolve_stage(Some(0)).is_err());
        assert!(d.resolve_stage(Some(4)).is_err());
        assert!(d.resolve_stage(None).is_err());
    }

    #[test]
    fn test_validate_score() {
        let d = descriptor(ModuleKey::Mobilization);
        assert!(d.validate_score(0).is_ok());
        assert!(d.validate_score(1_000_000).is_ok());
        assert!(d.validate_score(-1).is_err());

        let capped = ModuleDescriptor {
            max_score: Some(500),
            ..*d
        };
        assert!(capped.validate_score(500).is_ok());
        assert!(capped.validate_score(501).is_err());
    }

    #[test]
    fn test_meets_minimum() {
        let d = descriptor(ModuleKey::Mobilization);
        assert!(d.meets_minimum(d.min_score));
        assert!(d.meets_minimum(d.min_score + 1));
        assert!(!d.meets_minimum(d.min_score - 1));
    }
}

//! Event Module Entities

use chrono::{DateTime, Utc};
use kernel::id::{RecordId, UserId};
use serde_json::Value;

use crate::domain::descriptor::{ModuleDescriptor, ModuleKey};

/// One live submission per (user, module, stage)
#[derive(Debug, Clone)]
pub struct ModuleRecord {
    pub record_id: RecordId,
    pub user_id: UserId,
    pub module: ModuleKey,
    /// `NO_STAGE` (0) for per-user modules
    pub stage: i16,
    pub score: i64,
    /// Reference into the photo store
    pub photo: Option<String>,
    /// Derived from the descriptor threshold, never client-supplied
    pub meets_minimum: bool,
    /// First submission time; preserved across resubmissions so ranking
    /// ties reward the earliest submitter
    pub submitted_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ModuleRecord {
    /// Create a record for a first submission
    pub fn new(
        user_id: UserId,
        descriptor: &ModuleDescriptor,
        stage: i16,
        score: i64,
        photo: Option<String>,
    ) -> Self {
        let now = Utc::now();
        Self {
            record_id: RecordId::new(),
            user_id,
            module: descriptor.key,
            stage,
            score,
            photo,
            meets_minimum: descriptor.meets_minimum(score),
            submitted_at: now,
            updated_at: now,
        }
    }

    /// Apply a resubmission in place.
    ///
    /// `submitted_at` is untouched; a photo of `None` keeps the stored one.
    pub fn resubmit(&mut self, descriptor: &ModuleDescriptor, score: i64, photo: Option<String>) {
        self.score = score;
        self.meets_minimum = descriptor.meets_minimum(score);
        if let Some(photo) = photo {
            self.photo = Some(photo);
        }
        self.updated_at = Utc::now();
    }
}

/// One ranking row, joined with the owner's display name
#[derive(Debug, Clone)]
pub struct RankedRecord {
    pub user_id: UserId,
    pub display_name: String,
    pub score: i64,
    pub meets_minimum: bool,
    pub photo: Option<String>,
    pub submitted_at: DateTime<Utc>,
}

/// Admin-managed per-module configuration
#[derive(Debug, Clone)]
pub struct ModuleConfig {
    pub module: ModuleKey,
    pub enabled: bool,
    /// Free-form configuration blob for the frontend
    pub configuration: Value,
    /// Shown verbatim to users when the module is disabled
    pub status_message: Option<String>,
    pub updated_at: DateTime<Utc>,
}

impl ModuleConfig {
    /// Fail-open default for a module with no stored row
    pub fn default_for(module: ModuleKey) -> Self {
        Self {
            module,
            enabled: true,
            configuration: Value::Null,
            status_message: None,
            updated_at: Utc::now(),
        }
    }
}

/// Gating view consumed by the submission path
#[derive(Debug, Clone)]
pub struct ModuleSettings {
    pub enabled: bool,
    pub message: Option<String>,
}

impl ModuleSettings {
    pub fn from_config(config: &ModuleConfig) -> Self {
        Self {
            enabled: config.enabled,
            message: config.status_message.clone(),
        }
    }

    /// Fail-open default when no configuration row exists
    pub fn fail_open() -> Self {
        Self {
            enabled: true,
            message: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::descriptor::{NO_STAGE, descriptor};

    #[test]
    fn test_new_record_derives_meets_minimum() {
        let d = descriptor(ModuleKey::Mobilization);
        let user = UserId::new();

        let above = ModuleRecord::new(user, d, NO_STAGE, d.min_score, Some("p.jpg".into()));
        assert!(above.meets_minimum);

        let below = ModuleRecord::new(user, d, NO_STAGE, d.min_score - 1, Some("p.jpg".into()));
        assert!(!below.meets_minimum);
    }

    #[test]
    fn test_resubmit_preserves_photo_and_submitted_at() {
        let d = descriptor(ModuleKey::Mobilization);
        let mut record =
            ModuleRecord::new(UserId::new(), d, NO_STAGE, 120, Some("first.jpg".into()));
        let submitted_at = record.submitted_at;

        record.resubmit(d, 80, None);

        assert_eq!(record.score, 80);
        assert_eq!(record.photo.as_deref(), Some("first.jpg"));
        assert_eq!(record.submitted_at, submitted_at);
        assert!(!record.meets_minimum);
    }

    #[test]
    fn test_resubmit_replaces_photo_when_supplied() {
        let d = descriptor(ModuleKey::Honor);
        let mut record =
            ModuleRecord::new(UserId::new(), d, NO_STAGE, 10, Some("first.jpg".into()));

        record.resubmit(d, 20, Some("second.jpg".into()));

        assert_eq!(record.photo.as_deref(), Some("second.jpg"));
        assert_eq!(record.score, 20);
    }
}

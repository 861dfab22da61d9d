//! API DTOs (Data Transfer Objects)

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::application::ranking::RankingRow;
use crate::application::settings::ModuleConfigView;
use crate::application::submit::SubmitOutcome;
use crate::domain::entity::{ModuleRecord, ModuleSettings};

// ============================================================================
// Save
// ============================================================================

/// Save response
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveResponse {
    /// "created" or "updated"
    pub outcome: &'static str,
    pub record: RecordDto,
}

impl SaveResponse {
    pub fn new(outcome: SubmitOutcome, record: &ModuleRecord) -> Self {
        Self {
            outcome: match outcome {
                SubmitOutcome::Created => "created",
                SubmitOutcome::Updated => "updated",
            },
            record: RecordDto::from_record(record),
        }
    }
}

/// A user's own record
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordDto {
    pub module: String,
    pub stage: Option<i16>,
    pub score: i64,
    pub photo: Option<String>,
    pub meets_minimum: bool,
    pub submitted_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl RecordDto {
    pub fn from_record(record: &ModuleRecord) -> Self {
        Self {
            module: record.module.to_string(),
            stage: (record.stage != crate::domain::descriptor::NO_STAGE).then_some(record.stage),
            score: record.score,
            photo: record.photo.clone(),
            meets_minimum: record.meets_minimum,
            submitted_at: record.submitted_at,
            updated_at: record.updated_at,
        }
    }
}

// ============================================================================
// Ranking
// ============================================================================

/// Query parameters for ranking and user-data reads
#[derive(Debug, Clone, Deserialize)]
pub struct ScopeQuery {
    pub stage: Option<i16>,
}

/// One ranking row
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RankingRowDto {
    pub position: usize,
    pub display_name: String,
    pub score: i64,
    pub meets_minimum: bool,
    pub photo: Option<String>,
    pub submitted_at: DateTime<Utc>,
    pub is_requesting_user: bool,
}

impl RankingRowDto {
    pub fn from_row(row: RankingRow) -> Self {
        Self {
            position: row.position,
            display_name: row.display_name,
            score: row.score,
            meets_minimum: row.meets_minimum,
            photo: row.photo,
            submitted_at: row.submitted_at,
            is_requesting_user: row.is_requesting_user,
        }
    }
}

// ============================================================================
// Settings / Configuration
// ============================================================================

/// Gating view for one module
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SettingsResponse {
    pub enabled: bool,
    pub message: Option<String>,
}

impl SettingsResponse {
    pub fn from_settings(settings: ModuleSettings) -> Self {
        Self {
            enabled: settings.enabled,
            message: settings.message,
        }
    }
}

/// Configuration entry in the all-modules listing
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ModuleConfigDto {
    pub module: String,
    pub title: String,
    pub enabled: bool,
    pub configuration: Value,
    pub status_message: Option<String>,
}

impl ModuleConfigDto {
    pub fn from_view(view: ModuleConfigView) -> Self {
        Self {
            module: view.module.to_string(),
            title: view.title.to_string(),
            enabled: view.enabled,
            configuration: view.configuration,
            status_message: view.status_message,
        }
    }
}

/// Admin config mutation request
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SetConfigRequest {
    pub enabled: bool,
    #[serde(default)]
    pub configuration: Value,
    pub status_message: Option<String>,
}

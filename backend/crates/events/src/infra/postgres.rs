//! PostgreSQL Repository Implementation

use chrono::{DateTime, Utc};
use kernel::id::{RecordId, UserId};
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::descriptor::ModuleKey;
use crate::domain::entity::{ModuleConfig, ModuleRecord, RankedRecord};
use crate::domain::repository::{ConfigRepository, RecordRepository};
use crate::error::{EventsError, EventsResult};

/// PostgreSQL-backed events repository
#[derive(Clone)]
pub struct PgEventsRepository {
    pool: PgPool,
}

impl PgEventsRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

// ============================================================================
// Record Repository Implementation
// ============================================================================

impl RecordRepository for PgEventsRepository {
    async fn upsert(&self, record: &ModuleRecord) -> EventsResult<()> {
        // Single atomic statement; concurrent writers on the same scope
        // key resolve to last-write-wins. submitted_at is only set on
        // insert so resubmission keeps the first submission time.
        sqlx::query(
            r#"
            INSERT INTO event_records (
                record_id,
                user_id,
                module_key,
                stage,
                score,
                photo,
                meets_minimum,
                submitted_at,
                updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            ON CONFLICT (user_id, module_key, stage)
            DO UPDATE SET
                score = EXCLUDED.score,
                photo = EXCLUDED.photo,
                meets_minimum = EXCLUDED.meets_minimum,
                updated_at = EXCLUDED.updated_at
            "#,
        )
        .bind(record.record_id.as_uuid())
        .bind(record.user_id.as_uuid())
        .bind(record.module.as_str())
        .bind(record.stage)
        .bind(record.score)
        .bind(record.photo.as_deref())
        .bind(record.meets_minimum)
        .bind(record.submitted_at)
        .bind(record.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn find_by_scope(
        &self,
        user_id: &UserId,
        module: ModuleKey,
        stage: i16,
    ) -> EventsResult<Option<ModuleRecord>> {
        let row = sqlx::query_as::<_, RecordRow>(
            r#"
            SELECT
                record_id,
                user_id,
                module_key,
                stage,
                score,
                photo,
                meets_minimum,
                submitted_at,
                updated_at
            FROM event_records
            WHERE user_id = $1 AND module_key = $2 AND stage = $3
            "#,
        )
        .bind(user_id.as_uuid())
        .bind(module.as_str())
        .bind(stage)
        .fetch_optional(&self.pool)
        .await?;

        row.map(|r| r.into_record()).transpose()
    }

    async fn list_ranked(&self, module: ModuleKey, stage: i16) -> EventsResult<Vec<RankedRecord>> {
        let rows = sqlx::query_as::<_, RankedRow>(
            r#"
            SELECT
                r.user_id,
                u.display_name,
                r.score,
                r.meets_minimum,
                r.photo,
                r.submitted_at
            FROM event_records r
            JOIN users u ON u.user_id = r.user_id
            WHERE r.module_key = $1 AND r.stage = $2
            ORDER BY r.score DESC, r.submitted_at ASC
            "#,
        )
        .bind(module.as_str())
        .bind(stage)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(RankedRow::into_ranked).collect())
    }
}

// ============================================================================
// Config Repository Implementation
// ============================================================================

impl ConfigRepository for PgEventsRepository {
    async fn get(&self, module: ModuleKey) -> EventsResult<Option<ModuleConfig>> {
        let row = sqlx::query_as::<_, ConfigRow>(
            r#"
            SELECT module_key, enabled, configuration, status_message, updated_at
            FROM module_configs
            WHERE module_key = $1
            "#,
        )
        .bind(module.as_str())
        .fetch_optional(&self.pool)
        .await?;

        row.map(|r| r.into_config()).transpose()
    }

    async fn get_all(&self) -> EventsResult<Vec<ModuleConfig>> {
        let rows = sqlx::query_as::<_, ConfigRow>(
            r#"
            SELECT module_key, enabled, configuration, status_message, updated_at
            FROM module_configs
            ORDER BY module_key
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(|r| r.into_config()).collect()
    }

    async fn set(&self, config: &ModuleConfig) -> EventsResult<()> {
        sqlx::query(
            r#"
            INSERT INTO module_configs (module_key, enabled, configuration, status_message, updated_at)
            VALUES ($1, $2, $3, $4, $5)
            ON CONFLICT (module_key)
            DO UPDATE SET
                enabled = EXCLUDED.enabled,
                configuration = EXCLUDED.configuration,
                status_message = EXCLUDED.status_message,
                updated_at = EXCLUDED.updated_at
            "#,
        )
        .bind(config.module.as_str())
        .bind(config.enabled)
        .bind(&config.configuration)
        .bind(config.status_message.as_deref())
        .bind(config.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}

// ============================================================================
// Row Mapping
// ============================================================================

fn parse_module_key(value: &str) -> EventsResult<ModuleKey> {
    ModuleKey::parse(value)
        .ok_or_else(|| EventsError::Internal(format!("Unknown module_key in database: {value}")))
}

#[derive(sqlx::FromRow)]
struct RecordRow {
    record_id: Uuid,
    user_id: Uuid,
    module_key: String,
    stage: i16,
    score: i64,
    photo: Option<String>,
    meets_minimum: bool,
    submitted_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl RecordRow {
    fn into_record(self) -> EventsResult<ModuleRecord> {
        Ok(ModuleRecord {
            record_id: RecordId::from_uuid(self.record_id),
            user_id: UserId::from_uuid(self.user_id),
            module: parse_module_key(&self.module_key)?,
            stage: self.stage,
            score: self.score,
            photo: self.photo,
            meets_minimum: self.meets_minimum,
            submitted_at: self.submitted_at,
            updated_at: self.updated_at,
        })
    }
}

#[derive(sqlx::FromRow)]
struct RankedRow {
    user_id: Uuid,
    display_name: String,
    score: i64,
    meets_minimum: bool,
    photo: Option<String>,
    submitted_at: DateTime<Utc>,
}

impl RankedRow {
    fn into_ranked(self) -> RankedRecord {
        RankedRecord {
            user_id: UserId::from_uuid(self.user_id),
            display_name: self.display_name,
            score: self.score,
            meets_minimum: self.meets_minimum,
            photo: self.photo,
            submitted_at: self.submitted_at,
        }
    }
}

#[derive(sqlx::FromRow)]
struct ConfigRow {
    module_key: String,
    enabled: bool,
    configuration: serde_json::Value,
    status_message: Option<String>,
    updated_at: DateTime<Utc>,
}

impl ConfigRow {
    fn into_config(self) -> EventsResult<ModuleConfig> {
        Ok(ModuleConfig {
            module: parse_module_key(&self.module_key)?,
            enabled: self.enabled,
            configuration: self.configuration,
            status_message: self.status_message,
            updated_at: self.updated_at,
        })
    }
}

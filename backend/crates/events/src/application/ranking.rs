//! Ranking Use Case
//!
//! Ordered views over module records, with the caller's row flagged.

use std::sync::Arc;

use kernel::id::UserId;

use crate::domain::descriptor::{ModuleKey, descriptor};
use crate::domain::entity::ModuleRecord;
use crate::domain::repository::RecordRepository;
use crate::error::EventsResult;

/// One ranking row as seen by a specific caller
#[derive(Debug, Clone)]
pub struct RankingRow {
    pub position: usize,
    pub display_name: String,
    pub score: i64,
    pub meets_minimum: bool,
    pub photo: Option<String>,
    pub submitted_at: chrono::DateTime<chrono::Utc>,
    /// Computed against the caller at query time, never stored
    pub is_requesting_user: bool,
}

/// Ranking use case
pub struct RankingUseCase<R>
where
    R: RecordRepository,
{
    record_repo: Arc<R>,
}

impl<R> RankingUseCase<R>
where
    R: RecordRepository,
{
    pub fn new(record_repo: Arc<R>) -> Self {
        Self { record_repo }
    }

    /// Ranked rows for a module, one consistent snapshot read.
    ///
    /// Ordering comes from the repository: score descending, then
    /// submission time ascending, so the earliest submitter wins ties.
    pub async fn ranking(
        &self,
        module: ModuleKey,
        stage: Option<i16>,
        caller: &UserId,
    ) -> EventsResult<Vec<RankingRow>> {
        let desc = descriptor(module);
        let stage = desc.resolve_stage(stage)?;

        let records = self.record_repo.list_ranked(module, stage).await?;

        Ok(records
            .into_iter()
            .enumerate()
            .map(|(i, r)| RankingRow {
                position: i + 1,
                is_requesting_user: r.user_id == *caller,
                display_name: r.display_name,
                score: r.score,
                meets_minimum: r.meets_minimum,
                photo: r.photo,
                submitted_at: r.submitted_at,
            })
            .collect())
    }

    /// The caller's own record for a module, if any
    pub async fn user_record(
        &self,
        module: ModuleKey,
        stage: Option<i16>,
        caller: &UserId,
    ) -> EventsResult<Option<ModuleRecord>> {
        let desc = descriptor(module);
        let stage = desc.resolve_stage(stage)?;

        self.record_repo.find_by_scope(caller, module, stage).await
    }
}

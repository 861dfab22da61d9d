//! Repository Traits
//!
//! Interfaces for data persistence. Implementation is in infrastructure layer.

use kernel::id::UserId;

use crate::domain::descriptor::ModuleKey;
use crate::domain::entity::{ModuleConfig, ModuleRecord, RankedRecord};
use crate::error::EventsResult;

/// Module record repository trait
#[trait_variant::make(RecordRepository: Send)]
pub trait LocalRecordRepository {
    /// Atomically insert or update the record for its (user, module, stage)
    async fn upsert(&self, record: &ModuleRecord) -> EventsResult<()>;

    /// Find the live record for a scope key
    async fn find_by_scope(
        &self,
        user_id: &UserId,
        module: ModuleKey,
        stage: i16,
    ) -> EventsResult<Option<ModuleRecord>>;

    /// All records for a module + stage, ranked: score descending,
    /// submission time ascending on ties
    async fn list_ranked(&self, module: ModuleKey, stage: i16) -> EventsResult<Vec<RankedRecord>>;
}

/// Module configuration repository trait
#[trait_variant::make(ConfigRepository: Send)]
pub trait LocalConfigRepository {
    /// Stored configuration for one module, if any
    async fn get(&self, module: ModuleKey) -> EventsResult<Option<ModuleConfig>>;

    /// All stored configurations
    async fn get_all(&self) -> EventsResult<Vec<ModuleConfig>>;

    /// Insert or replace a module's configuration
    async fn set(&self, config: &ModuleConfig) -> EventsResult<()>;
}

/// Evidence-photo store trait
///
/// Keys are generated per module + user, so no two users or modules
/// contend for the same storage key.
#[trait_variant::make(PhotoStore: Send)]
pub trait LocalPhotoStore {
    /// Durably store photo bytes; returns the reference to persist
    async fn store(
        &self,
        module: ModuleKey,
        user_id: &UserId,
        file_name: &str,
        bytes: &[u8],
    ) -> EventsResult<String>;

    /// Release a previously stored photo
    async fn remove(&self, photo_ref: &str) -> EventsResult<()>;
}

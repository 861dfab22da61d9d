//! Submit Use Case
//!
//! The shared "one live record per scope key" upsert workflow: validate,
//! gate on module settings, store the photo, write the row.

use std::sync::Arc;

use kernel::id::UserId;

use crate::domain::descriptor::{ModuleKey, descriptor};
use crate::domain::entity::ModuleRecord;
use crate::domain::repository::{ConfigRepository, PhotoStore, RecordRepository};
use crate::error::{EventsError, EventsResult};

/// Submit input
pub struct SubmitInput {
    pub user_id: UserId,
    pub score: i64,
    pub stage: Option<i16>,
    pub photo: Option<PhotoUpload>,
}

/// Uploaded photo payload
pub struct PhotoUpload {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

/// Whether the submission created or replaced a record
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    Created,
    Updated,
}

/// Submit output
#[derive(Debug)]
pub struct SubmitOutput {
    pub outcome: SubmitOutcome,
    pub record: ModuleRecord,
}

/// Submit use case
pub struct SubmitUseCase<R, C, P>
where
    R: RecordRepository,
    C: ConfigRepository,
    P: PhotoStore,
{
    record_repo: Arc<R>,
    config_repo: Arc<C>,
    photos: Arc<P>,
}

impl<R, C, P> SubmitUseCase<R, C, P>
where
    R: RecordRepository,
    C: ConfigRepository,
    P: PhotoStore,
{
    pub fn new(record_repo: Arc<R>, config_repo: Arc<C>, photos: Arc<P>) -> Self {
        Self {
            record_repo,
            config_repo,
            photos,
        }
    }

    pub async fn execute(&self, module: ModuleKey, input: SubmitInput) -> EventsResult<SubmitOutput> {
        let desc = descriptor(module);

        // Gating runs before input validation: a disabled module rejects
        // every submission with its configured message, valid or not. The
        // configuration is read per request; a missing row means enabled,
        // but a failing lookup is a storage error.
        if let Some(config) = self.config_repo.get(module).await?
            && !config.enabled
        {
            let message = config
                .status_message
                .unwrap_or_else(|| format!("{} is currently closed", desc.title));
            return Err(EventsError::ModuleDisabled { message });
        }

        let stage = desc.resolve_stage(input.stage)?;
        desc.validate_score(input.score)?;

        let existing = self
            .record_repo
            .find_by_scope(&input.user_id, module, stage)
            .await?;

        if existing.is_none() && input.photo.is_none() {
            return Err(EventsError::Validation(
                "A photo is required on the first submission".to_string(),
            ));
        }

        // Store the new photo before touching the row so a row failure
        // never leaves a record pointing at a missing file.
        let new_photo = match &input.photo {
            Some(upload) => Some(
                self.photos
                    .store(module, &input.user_id, &upload.file_name, &upload.bytes)
                    .await?,
            ),
            None => None,
        };

        let (outcome, record, replaced_photo) = match existing {
            None => {
                let record =
                    ModuleRecord::new(input.user_id, desc, stage, input.score, new_photo.clone());
                (SubmitOutcome::Created, record, None)
            }
            Some(mut record) => {
                let replaced = match new_photo {
                    Some(_) => record.photo.clone(),
                    None => None,
                };
                record.resubmit(desc, input.score, new_photo.clone());
                (SubmitOutcome::Updated, record, replaced)
            }
        };

        if let Err(e) = self.record_repo.upsert(&record).await {
            // Roll back to the prior observable state.
            if let Some(photo_ref) = &new_photo
                && let Err(cleanup) = self.photos.remove(photo_ref).await
            {
                tracing::warn!(
                    photo = %photo_ref,
                    error = %cleanup,
                    "Failed to remove orphaned photo after row write failure"
                );
            }
            return Err(e);
        }

        // The old photo is released only after the new row is durable.
        if let Some(photo_ref) = replaced_photo
            && let Err(e) = self.photos.remove(&photo_ref).await
        {
            tracing::warn!(
                photo = %photo_ref,
                error = %e,
                "Failed to remove replaced photo"
            );
        }

        tracing::info!(
            user_id = %record.user_id,
            module = %module,
            stage = record.stage,
            score = record.score,
            outcome = ?outcome,
            "Module record saved"
        );

        Ok(SubmitOutput { outcome, record })
    }
}

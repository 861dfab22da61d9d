//! HTTP Handlers

use std::sync::Arc;

use auth::application::config::AuthConfig;
use auth::application::credential::Identity;
use auth::presentation::extract::RequireAdmin;
use axum::Json;
use axum::extract::{FromRef, Multipart, Path, Query, State};

use kernel::response::ApiResponse;

use crate::application::ranking::RankingUseCase;
use crate::application::settings::SettingsUseCase;
use crate::application::submit::{PhotoUpload, SubmitInput, SubmitUseCase};
use crate::domain::descriptor::ModuleKey;
use crate::domain::repository::{ConfigRepository, PhotoStore, RecordRepository};
use crate::error::{EventsError, EventsResult};
use crate::presentation::dto::{
    ModuleConfigDto, RankingRowDto, RecordDto, SaveResponse, ScopeQuery, SetConfigRequest,
    SettingsResponse,
};

/// Shared state for events handlers
#[derive(Clone)]
pub struct EventsAppState<R, P>
where
    R: RecordRepository + ConfigRepository + Clone + Send + Sync + 'static,
    P: PhotoStore + Clone + Send + Sync + 'static,
{
    pub repo: Arc<R>,
    pub photos: Arc<P>,
    pub auth_config: Arc<AuthConfig>,
}

// Lets the auth extractors run against this router's state
impl<R, P> FromRef<EventsAppState<R, P>> for Arc<AuthConfig>
where
    R: RecordRepository + ConfigRepository + Clone + Send + Sync + 'static,
    P: PhotoStore + Clone + Send + Sync + 'static,
{
    fn from_ref(state: &EventsAppState<R, P>) -> Self {
        state.auth_config.clone()
    }
}

fn module_key(segment: &str) -> EventsResult<ModuleKey> {
    ModuleKey::parse(segment).ok_or(EventsError::NotFound)
}

// ============================================================================
// Save (multipart)
// ============================================================================

/// POST /api/{module}/save
///
/// Multipart fields: `score` (required), `stage` (staged modules),
/// `photo` (file; required on first submission).
pub async fn save<R, P>(
    State(state): State<EventsAppState<R, P>>,
    Path(module): Path<String>,
    identity: Identity,
    multipart: Multipart,
) -> EventsResult<ApiResponse<SaveResponse>>
where
    R: RecordRepository + ConfigRepository + Clone + Send + Sync + 'static,
    P: PhotoStore + Clone + Send + Sync + 'static,
{
    let module = module_key(&module)?;
    let form = SaveForm::read(multipart).await?;

    let use_case = SubmitUseCase::new(
        state.repo.clone(),
        state.repo.clone(),
        state.photos.clone(),
    );

    let output = use_case
        .execute(
            module,
            SubmitInput {
                user_id: identity.user_id,
                score: form.score,
                stage: form.stage,
                photo: form.photo,
            },
        )
        .await?;

    Ok(ApiResponse::ok_with_message(
        "Record saved",
        SaveResponse::new(output.outcome, &output.record),
    ))
}

/// Parsed multipart form for a save request
struct SaveForm {
    score: i64,
    stage: Option<i16>,
    photo: Option<PhotoUpload>,
}

impl SaveForm {
    async fn read(mut multipart: Multipart) -> EventsResult<Self> {
        let mut score: Option<i64> = None;
        let mut stage: Option<i16> = None;
        let mut photo: Option<PhotoUpload> = None;

        while let Some(field) = multipart
            .next_field()
            .await
            .map_err(|e| EventsError::Validation(format!("Malformed multipart body: {e}")))?
        {
            match field.name() {
                Some("score") => {
                    let text = field
                        .text()
                        .await
                        .map_err(|e| EventsError::Validation(format!("Unreadable score: {e}")))?;
                    score = Some(text.trim().parse::<i64>().map_err(|_| {
                        EventsError::Validation("Score must be a whole number".to_string())
                    })?);
                }
                Some("stage") => {
                    let text = field
                        .text()
                        .await
                        .map_err(|e| EventsError::Validation(format!("Unreadable stage: {e}")))?;
                    stage = Some(text.trim().parse::<i16>().map_err(|_| {
                        EventsError::Validation("Stage must be a whole number".to_string())
                    })?);
                }
                Some("photo") => {
                    let file_name = field.file_name().unwrap_or("photo.bin").to_string();
                    let bytes = field
                        .bytes()
                        .await
                        .map_err(|e| EventsError::Validation(format!("Unreadable photo: {e}")))?;
                    if !bytes.is_empty() {
                        photo = Some(PhotoUpload {
                            file_name,
                            bytes: bytes.to_vec(),
                        });
                    }
                }
                _ => {}
            }
        }

        let score =
            score.ok_or_else(|| EventsError::Validation("Score is required".to_string()))?;

        Ok(Self {
            score,
            stage,
            photo,
        })
    }
}

// ============================================================================
// Ranking / User Data
// ============================================================================

/// GET /api/{module}/ranking
pub async fn ranking<R, P>(
    State(state): State<EventsAppState<R, P>>,
    Path(module): Path<String>,
    Query(query): Query<ScopeQuery>,
    identity: Identity,
) -> EventsResult<ApiResponse<Vec<RankingRowDto>>>
where
    R: RecordRepository + ConfigRepository + Clone + Send + Sync + 'static,
    P: PhotoStore + Clone + Send + Sync + 'static,
{
    let module = module_key(&module)?;

    let use_case = RankingUseCase::new(state.repo.clone());
    let rows = use_case
        .ranking(module, query.stage, &identity.user_id)
        .await?;

    Ok(ApiResponse::ok(
        rows.into_iter().map(RankingRowDto::from_row).collect(),
    ))
}

/// GET /api/{module}/user-data
pub async fn user_data<R, P>(
    State(state): State<EventsAppState<R, P>>,
    Path(module): Path<String>,
    Query(query): Query<ScopeQuery>,
    identity: Identity,
) -> EventsResult<ApiResponse<Option<RecordDto>>>
where
    R: RecordRepository + ConfigRepository + Clone + Send + Sync + 'static,
    P: PhotoStore + Clone + Send + Sync + 'static,
{
    let module = module_key(&module)?;

    let use_case = RankingUseCase::new(state.repo.clone());
    let record = use_case
        .user_record(module, query.stage, &identity.user_id)
        .await?;

    Ok(ApiResponse::ok(
        record.as_ref().map(RecordDto::from_record),
    ))
}

// ============================================================================
// Settings / Configuration
// ============================================================================

/// GET /api/{module}/settings
pub async fn settings<R, P>(
    State(state): State<EventsAppState<R, P>>,
    Path(module): Path<String>,
    _identity: Identity,
) -> EventsResult<ApiResponse<SettingsResponse>>
where
    R: RecordRepository + ConfigRepository + Clone + Send + Sync + 'static,
    P: PhotoStore + Clone + Send + Sync + 'static,
{
    let module = module_key(&module)?;

    let use_case = SettingsUseCase::new(state.repo.clone());
    let settings = use_case.module_settings(module).await?;

    Ok(ApiResponse::ok(SettingsResponse::from_settings(settings)))
}

/// GET /api/modules/config
pub async fn all_configs<R, P>(
    State(state): State<EventsAppState<R, P>>,
    _identity: Identity,
) -> EventsResult<ApiResponse<Vec<ModuleConfigDto>>>
where
    R: RecordRepository + ConfigRepository + Clone + Send + Sync + 'static,
    P: PhotoStore + Clone + Send + Sync + 'static,
{
    let use_case = SettingsUseCase::new(state.repo.clone());
    let configs = use_case.all_configs().await?;

    Ok(ApiResponse::ok(
        configs.into_iter().map(ModuleConfigDto::from_view).collect(),
    ))
}

/// POST /api/admin/modules/{module}/config
pub async fn set_config<R, P>(
    State(state): State<EventsAppState<R, P>>,
    Path(module): Path<String>,
    RequireAdmin(admin): RequireAdmin,
    Json(req): Json<SetConfigRequest>,
) -> EventsResult<ApiResponse<()>>
where
    R: RecordRepository + ConfigRepository + Clone + Send + Sync + 'static,
    P: PhotoStore + Clone + Send + Sync + 'static,
{
    let module = module_key(&module)?;

    tracing::info!(
        admin = %admin.handle,
        module = %module,
        enabled = req.enabled,
        "Admin configuration change"
    );

    let use_case = SettingsUseCase::new(state.repo.clone());
    use_case
        .set_config(module, req.enabled, req.configuration, req.status_message)
        .await?;

    Ok(ApiResponse::empty("Configuration updated"))
}

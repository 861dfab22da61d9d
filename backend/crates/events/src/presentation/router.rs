//! Events Router

use std::sync::Arc;

use auth::application::config::AuthConfig;
use axum::extract::DefaultBodyLimit;
use axum::{
    Router,
    routing::{get, post},
};

use crate::domain::repository::{ConfigRepository, PhotoStore, RecordRepository};
use crate::infra::fs::FsPhotoStore;
use crate::infra::postgres::PgEventsRepository;
use crate::presentation::handlers::{self, EventsAppState};

/// Photo uploads are capped at 10 MiB
const MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

/// Create the events router with PostgreSQL repository and filesystem photos
pub fn events_router(
    repo: PgEventsRepository,
    photos: FsPhotoStore,
    auth_config: Arc<AuthConfig>,
) -> Router {
    events_router_generic(repo, photos, auth_config)
}

/// Create a generic events router for any repository implementation
pub fn events_router_generic<R, P>(repo: R, photos: P, auth_config: Arc<AuthConfig>) -> Router
where
    R: RecordRepository + ConfigRepository + Clone + Send + Sync + 'static,
    P: PhotoStore + Clone + Send + Sync + 'static,
{
    let state = EventsAppState {
        repo: Arc::new(repo),
        photos: Arc::new(photos),
        auth_config,
    };

    Router::new()
        .route("/modules/config", get(handlers::all_configs::<R, P>))
        .route(
            "/admin/modules/{module}/config",
            post(handlers::set_config::<R, P>),
        )
        .route("/{module}/ranking", get(handlers::ranking::<R, P>))
        .route("/{module}/user-data", get(handlers::user_data::<R, P>))
        .route(
            "/{module}/save",
            post(handlers::save::<R, P>).layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES)),
        )
        .route("/{module}/settings", get(handlers::settings::<R, P>))
        .with_state(state)
}

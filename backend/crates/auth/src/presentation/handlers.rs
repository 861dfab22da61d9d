//! HTTP Handlers

use axum::Json;
use axum::extract::{FromRef, State};
use std::sync::Arc;

use kernel::response::ApiResponse;

use crate::application::config::AuthConfig;
use crate::application::credential::Identity;
use crate::application::{RegisterInput, RegisterUseCase, SignInInput, SignInUseCase};
use crate::domain::repository::UserRepository;
use crate::error::AuthResult;
use crate::presentation::dto::{
    LoginRequest, LoginResponse, RegisterRequest, RegisterResponse, ValidateResponse,
};

/// Shared state for auth handlers
#[derive(Clone)]
pub struct AuthAppState<R>
where
    R: UserRepository + Clone + Send + Sync + 'static,
{
    pub repo: Arc<R>,
    pub config: Arc<AuthConfig>,
}

impl<R> FromRef<AuthAppState<R>> for Arc<AuthConfig>
where
    R: UserRepository + Clone + Send + Sync + 'static,
{
    fn from_ref(state: &AuthAppState<R>) -> Self {
        state.config.clone()
    }
}

/// POST /api/auth/register
pub async fn register<R>(
    State(state): State<AuthAppState<R>>,
    Json(req): Json<RegisterRequest>,
) -> AuthResult<ApiResponse<RegisterResponse>>
where
    R: UserRepository + Clone + Send + Sync + 'static,
{
    let use_case = RegisterUseCase::new(state.repo.clone(), state.config.clone());

    let output = use_case
        .execute(RegisterInput {
            handle: req.handle,
            display_name: req.display_name,
            password: req.password,
        })
        .await?;

    Ok(ApiResponse::ok_with_message(
        "Registration successful",
        RegisterResponse {
            handle: output.handle,
            display_name: output.display_name,
        },
    ))
}

/// POST /api/auth/login
pub async fn login<R>(
    State(state): State<AuthAppState<R>>,
    Json(req): Json<LoginRequest>,
) -> AuthResult<ApiResponse<LoginResponse>>
where
    R: UserRepository + Clone + Send + Sync + 'static,
{
    let use_case = SignInUseCase::new(state.repo.clone(), state.config.clone());

    let output = use_case
        .execute(SignInInput {
            identifier: req.identifier,
            password: req.password,
        })
        .await?;

    Ok(ApiResponse::ok_with_message(
        "Login successful",
        LoginResponse {
            token: output.token,
            handle: output.handle,
            display_name: output.display_name,
            role: output.role,
        },
    ))
}

/// GET /api/auth/validate
///
/// The extractor does the actual verification; reaching the handler
/// means the credential is valid.
pub async fn validate<R>(
    State(_state): State<AuthAppState<R>>,
    identity: Identity,
) -> AuthResult<ApiResponse<ValidateResponse>>
where
    R: UserRepository + Clone + Send + Sync + 'static,
{
    Ok(ApiResponse::ok(ValidateResponse {
        handle: identity.handle,
        display_name: identity.display_name,
        role: identity.role.code().to_string(),
    }))
}

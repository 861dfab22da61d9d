//! Request Extractors
//!
//! Axum extractors that turn the Authorization header into a verified
//! caller identity. Any router whose state exposes `Arc<AuthConfig>`
//! via `FromRef` can use them.

use std::sync::Arc;

use axum::extract::{FromRef, FromRequestParts};
use axum::http::{header, request::Parts};

use crate::application::config::AuthConfig;
use crate::application::credential::{self, Identity};
use crate::error::AuthError;

/// Pull the bearer token out of the Authorization header
fn bearer_token(parts: &Parts) -> Result<&str, AuthError> {
    let header = parts
        .headers
        .get(header::AUTHORIZATION)
        .ok_or(AuthError::CredentialMissing)?
        .to_str()
        .map_err(|_| AuthError::CredentialMalformed)?;

    header
        .strip_prefix("Bearer ")
        .ok_or(AuthError::CredentialMalformed)
}

impl<S> FromRequestParts<S> for Identity
where
    Arc<AuthConfig>: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let config = Arc::<AuthConfig>::from_ref(state);
        let token = bearer_token(parts)?;
        credential::verify(token, &config)
    }
}

/// Extractor that additionally requires the admin role
#[derive(Debug, Clone)]
pub struct RequireAdmin(pub Identity);

impl<S> FromRequestParts<S> for RequireAdmin
where
    Arc<AuthConfig>: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let identity = Identity::from_request_parts(parts, state).await?;

        if !identity.is_admin() {
            return Err(AuthError::AdminRequired);
        }

        Ok(Self(identity))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::Request;

    fn parts_with_auth(value: Option<&str>) -> Parts {
        let mut builder = Request::builder().uri("/");
        if let Some(v) = value {
            builder = builder.header(header::AUTHORIZATION, v);
        }
        let (parts, ()) = builder.body(()).unwrap().into_parts();
        parts
    }

    #[test]
    fn test_bearer_token_extraction() {
        let parts = parts_with_auth(Some("Bearer abc.def"));
        assert_eq!(bearer_token(&parts).unwrap(), "abc.def");
    }

    #[test]
    fn test_missing_header() {
        let parts = parts_with_auth(None);
        assert!(matches!(
            bearer_token(&parts),
            Err(AuthError::CredentialMissing)
        ));
    }

    #[test]
    fn test_wrong_scheme() {
        let parts = parts_with_auth(Some("Basic dXNlcjpwYXNz"));
        assert!(matches!(
            bearer_token(&parts),
            Err(AuthError::CredentialMalformed)
        ));
    }
}

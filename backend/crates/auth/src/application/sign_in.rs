//! Sign In Use Case
//!
//! Authenticates a user and mints a bearer credential.

use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::application::credential;
use crate::domain::repository::UserRepository;
use crate::domain::value_object::{
    display_name::DisplayName, user_handle::UserHandle, user_password::RawPassword,
};
use crate::error::{AuthError, AuthResult};

/// Sign in input
pub struct SignInInput {
    /// Handle or display name
    pub identifier: String,
    /// Password
    pub password: String,
}

/// Sign in output
#[derive(Debug)]
pub struct SignInOutput {
    /// Signed bearer credential
    pub token: String,
    pub handle: String,
    pub display_name: String,
    pub role: String,
}

/// Sign in use case
pub struct SignInUseCase<U>
where
    U: UserRepository,
{
    user_repo: Arc<U>,
    config: Arc<AuthConfig>,
}

impl<U> SignInUseCase<U>
where
    U: UserRepository,
{
    pub fn new(user_repo: Arc<U>, config: Arc<AuthConfig>) -> Self {
        Self { user_repo, config }
    }

    pub async fn execute(&self, input: SignInInput) -> AuthResult<SignInOutput> {
        // The identifier may be a handle or a display name. Lookup
        // failures all collapse into InvalidCredentials so the response
        // never reveals which part was wrong.
        let user = self.find_user(&input.identifier).await?;
        let mut user = user.ok_or(AuthError::InvalidCredentials)?;

        // Verify password
        let raw_password =
            RawPassword::new(input.password).map_err(|_| AuthError::InvalidCredentials)?;

        if !user
            .password_hash
            .verify(&raw_password, self.config.pepper())
        {
            return Err(AuthError::InvalidCredentials);
        }

        // Update last login
        user.record_login();
        self.user_repo.update(&user).await?;

        // Mint credential
        let token = credential::mint(&user, &self.config)?;

        tracing::info!(
            user_id = %user.user_id,
            handle = %user.handle,
            "User signed in"
        );

        Ok(SignInOutput {
            token,
            handle: user.handle.as_str().to_string(),
            display_name: user.display_name.original().to_string(),
            role: user.user_role.code().to_string(),
        })
    }

    async fn find_user(
        &self,
        identifier: &str,
    ) -> AuthResult<Option<crate::domain::entity::user::User>> {
        if let Ok(handle) = UserHandle::new(identifier) {
            if let Some(user) = self.user_repo.find_by_handle(&handle).await? {
                return Ok(Some(user));
            }
        }

        if let Ok(display_name) = DisplayName::new(identifier) {
            if let Some(user) = self.user_repo.find_by_display_name(&display_name).await? {
                return Ok(Some(user));
            }
        }

        Ok(None)
    }
}

//! Register Use Case
//!
//! Creates a new guild member account.

use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::domain::entity::user::User;
use crate::domain::repository::UserRepository;
use crate::domain::value_object::{
    display_name::DisplayName,
    user_handle::UserHandle,
    user_password::{RawPassword, UserPassword},
};
use crate::error::{AuthError, AuthResult};

/// Register input
pub struct RegisterInput {
    pub handle: String,
    pub display_name: String,
    pub password: String,
}

/// Register output
#[derive(Debug)]
pub struct RegisterOutput {
    pub handle: String,
    pub display_name: String,
}

/// Register use case
pub struct RegisterUseCase<U>
where
    U: UserRepository,
{
    user_repo: Arc<U>,
    config: Arc<AuthConfig>,
}

impl<U> RegisterUseCase<U>
where
    U: UserRepository,
{
    pub fn new(user_repo: Arc<U>, config: Arc<AuthConfig>) -> Self {
        Self { user_repo, config }
    }

    pub async fn execute(&self, input: RegisterInput) -> AuthResult<RegisterOutput> {
        // Validate handle and display name
        let handle =
            UserHandle::new(input.handle).map_err(|e| AuthError::Validation(e.to_string()))?;
        let display_name = DisplayName::new(input.display_name)
            .map_err(|e| AuthError::Validation(e.to_string()))?;

        // Uniqueness checks (race loses to the database constraint)
        if self.user_repo.exists_by_handle(&handle).await? {
            return Err(AuthError::HandleTaken);
        }
        if self.user_repo.exists_by_display_name(&display_name).await? {
            return Err(AuthError::DisplayNameTaken);
        }

        // Validate and hash password
        let raw_password = RawPassword::new(input.password)?;
        let password_hash = UserPassword::from_raw(&raw_password, self.config.pepper())?;

        // Create and persist
        let user = User::new(handle, display_name, password_hash);
        self.user_repo.create(&user).await?;

        tracing::info!(
            user_id = %user.user_id,
            handle = %user.handle,
            "User registered"
        );

        Ok(RegisterOutput {
            handle: user.handle.as_str().to_string(),
            display_name: user.display_name.original().to_string(),
        })
    }
}

//! Repository Traits
//!
//! Interfaces for data persistence. Implementation is in infrastructure layer.

use crate::domain::entity::user::User;
use crate::domain::value_object::{display_name::DisplayName, user_handle::UserHandle};
use crate::error::AuthResult;

/// User repository trait
#[trait_variant::make(UserRepository: Send)]
pub trait LocalUserRepository {
    /// Create a new user
    async fn create(&self, user: &User) -> AuthResult<()>;

    /// Find user by handle
    async fn find_by_handle(&self, handle: &UserHandle) -> AuthResult<Option<User>>;

    /// Find user by display name (canonical form)
    async fn find_by_display_name(&self, display_name: &DisplayName) -> AuthResult<Option<User>>;

    /// Check if handle exists
    async fn exists_by_handle(&self, handle: &UserHandle) -> AuthResult<bool>;

    /// Check if display name exists (canonical form)
    async fn exists_by_display_name(&self, display_name: &DisplayName) -> AuthResult<bool>;

    /// Update user
    async fn update(&self, user: &User) -> AuthResult<()>;
}

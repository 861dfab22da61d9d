//! User Entity
//!
//! Guild member account with credentials and role.

use chrono::{DateTime, Utc};

use crate::domain::value_object::{
    display_name::DisplayName, user_handle::UserHandle, user_id::UserId,
    user_password::UserPassword, user_role::UserRole,
};

/// User entity
///
/// A registered guild member. The handle is the login identifier,
/// the display name is what other members see in rankings.
#[derive(Debug, Clone)]
pub struct User {
    /// Internal UUID identifier
    pub user_id: UserId,
    /// Login handle (unique, lowercase)
    pub handle: UserHandle,
    /// Display name (unique by canonical form)
    pub display_name: DisplayName,
    /// Argon2id password hash (PHC string)
    pub password_hash: UserPassword,
    /// Role (User, Admin)
    pub user_role: UserRole,
    /// Last successful login time
    pub last_login_at: Option<DateTime<Utc>>,
    /// Created timestamp
    pub created_at: DateTime<Utc>,
    /// Updated timestamp
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Create a new user with the default role
    pub fn new(handle: UserHandle, display_name: DisplayName, password_hash: UserPassword) -> Self {
        let now = Utc::now();

        Self {
            user_id: UserId::new(),
            handle,
            display_name,
            password_hash,
            user_role: UserRole::default(),
            last_login_at: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Record successful login
    pub fn record_login(&mut self) {
        let now = Utc::now();
        self.last_login_at = Some(now);
        self.updated_at = now;
    }

    /// Check if user has admin privileges
    pub fn is_admin(&self) -> bool {
        self.user_role.is_admin()
    }

    /// Update user role
    pub fn set_role(&mut self, role: UserRole) {
        self.user_role = role;
        self.updated_at = Utc::now();
    }
}

//! Auth (Authentication) Backend Module
//!
//! Clean Architecture structure:
//! - `domain/` - Business logic, entities, repository traits
//! - `application/` - Use cases and application services
//! - `infra/` - Database implementations
//! - `presentation/` - HTTP handlers, DTOs, router, extractors
//!
//! ## Features
//! - Registration with handle + display name + password
//! - Login with handle or display name
//! - Stateless bearer credentials (HMAC-SHA256 signed, fixed lifetime)
//! - Role-based access (User, Admin) via the `Identity` extractor
//!
//! ## Security Model
//! - Passwords hashed with Argon2id (NIST SP 800-63B style policy)
//! - Credentials are signed, not stored; expiry is embedded in the claims
//! - Wrong handle and wrong password are indistinguishable to the caller

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;

// Re-exports for convenience
pub use application::config::AuthConfig;
pub use application::credential::Identity;
pub use error::{AuthError, AuthResult};
pub use infra::postgres::PgUserRepository;
pub use presentation::extract::RequireAdmin;
pub use presentation::router::auth_router;

// Re-export kernel error types for unified error handling
pub use kernel::error::{
    app_error::{AppError, AppResult},
    kind::ErrorKind,
};

#[cfg(test)]
mod tests;

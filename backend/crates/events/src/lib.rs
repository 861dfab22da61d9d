//! Events Backend Module
//!
//! Module Submission Engine, Ranking Service and Admin Configuration for
//! the guild event tracker.
//!
//! Clean Architecture structure:
//! - `domain/` - Descriptors, entities, repository traits
//! - `application/` - Use cases
//! - `infra/` - PostgreSQL and filesystem implementations
//! - `presentation/` - HTTP handlers, DTOs, router
//!
//! ## Model
//! - Every event module shares one submission workflow, parameterized by
//!   a static [`domain::descriptor::ModuleDescriptor`]
//! - At most one live record per (user, module, stage), enforced by a
//!   unique index and an atomic insert-or-update
//! - `meets_minimum` is derived from the descriptor threshold on every
//!   write, never taken from the client
//! - Module gating reads the stored configuration per request; a missing
//!   row means enabled (fail-open)

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;

// Re-exports for convenience
pub use application::config::EventsConfig;
pub use domain::descriptor::{ModuleDescriptor, ModuleKey, REGISTRY};
pub use error::{EventsError, EventsResult};
pub use infra::fs::FsPhotoStore;
pub use infra::postgres::PgEventsRepository;
pub use presentation::router::events_router;

// Re-export kernel error types for unified error handling
pub use kernel::error::{
    app_error::{AppError, AppResult},
    kind::ErrorKind,
};

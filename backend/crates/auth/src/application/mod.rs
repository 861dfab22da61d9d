//! Application Layer
//!
//! Use cases orchestrating domain logic.

pub mod config;
pub mod credential;
pub mod register;
pub mod sign_in;

pub use config::AuthConfig;
pub use credential::Identity;
pub use register::{RegisterInput, RegisterOutput, RegisterUseCase};
pub use sign_in::{SignInInput, SignInOutput, SignInUseCase};

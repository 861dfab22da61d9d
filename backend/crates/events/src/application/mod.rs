//! Application Layer
//!
//! Use cases orchestrating domain logic.

pub mod config;
pub mod ranking;
pub mod settings;
pub mod submit;

pub use config::EventsConfig;
pub use ranking::{RankingRow, RankingUseCase};
pub use settings::{ModuleConfigView, SettingsUseCase};
pub use submit::{PhotoUpload, SubmitInput, SubmitOutcome, SubmitOutput, SubmitUseCase};

//! Domain Layer

pub mod descriptor;
pub mod entity;
pub mod repository;

pub use descriptor::{ModuleDescriptor, ModuleKey, NO_STAGE, ScopeShape, descriptor};
pub use entity::{ModuleConfig, ModuleRecord, ModuleSettings, RankedRecord};
pub use repository::{ConfigRepository, PhotoStore, RecordRepository};

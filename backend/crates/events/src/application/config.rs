//! Application Configuration

use std::path::PathBuf;

/// Events application configuration
#[derive(Debug, Clone)]
pub struct EventsConfig {
    /// Root directory for stored evidence photos
    pub upload_root: PathBuf,
}

impl Default for EventsConfig {
    fn default() -> Self {
        Self {
            upload_root: PathBuf::from("uploads"),
        }
    }
}

impl EventsConfig {
    pub fn new(upload_root: impl Into<PathBuf>) -> Self {
        Self {
            upload_root: upload_root.into(),
        }
    }
}

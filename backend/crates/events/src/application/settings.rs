//! Module Settings Use Cases
//!
//! Read paths for gating and the admin write path. Settings are read per
//! request; nothing here caches across requests, so an admin write is
//! visible to the very next gating check.

use std::sync::Arc;

use serde_json::Value;

use crate::domain::descriptor::{ModuleKey, REGISTRY, descriptor};
use crate::domain::entity::{ModuleConfig, ModuleSettings};
use crate::domain::repository::ConfigRepository;
use crate::error::EventsResult;

/// Configuration view for one module, defaults applied
#[derive(Debug, Clone)]
pub struct ModuleConfigView {
    pub module: ModuleKey,
    pub title: &'static str,
    pub enabled: bool,
    pub configuration: Value,
    pub status_message: Option<String>,
}

/// Module settings use case
pub struct SettingsUseCase<C>
where
    C: ConfigRepository,
{
    config_repo: Arc<C>,
}

impl<C> SettingsUseCase<C>
where
    C: ConfigRepository,
{
    pub fn new(config_repo: Arc<C>) -> Self {
        Self { config_repo }
    }

    /// Gating view for one module; missing row means enabled (fail-open)
    pub async fn module_settings(&self, module: ModuleKey) -> EventsResult<ModuleSettings> {
        Ok(match self.config_repo.get(module).await? {
            Some(config) => ModuleSettings::from_config(&config),
            None => ModuleSettings::fail_open(),
        })
    }

    /// Configuration for every known module, fail-open defaults for
    /// modules without a stored row
    pub async fn all_configs(&self) -> EventsResult<Vec<ModuleConfigView>> {
        let stored = self.config_repo.get_all().await?;

        Ok(REGISTRY
            .iter()
            .map(|desc| {
                let config = stored
                    .iter()
                    .find(|c| c.module == desc.key)
                    .cloned()
                    .unwrap_or_else(|| ModuleConfig::default_for(desc.key));

                ModuleConfigView {
                    module: desc.key,
                    title: desc.title,
                    enabled: config.enabled,
                    configuration: config.configuration,
                    status_message: config.status_message,
                }
            })
            .collect())
    }

    /// Admin write path; replaces the stored configuration for a module
    pub async fn set_config(
        &self,
        module: ModuleKey,
        enabled: bool,
        configuration: Value,
        status_message: Option<String>,
    ) -> EventsResult<()> {
        let config = ModuleConfig {
            module,
            enabled,
            configuration,
            status_message,
            updated_at: chrono::Utc::now(),
        };

        self.config_repo.set(&config).await?;

        tracing::info!(
            module = %module,
            enabled = enabled,
            title = descriptor(module).title,
            "Module configuration updated"
        );

        Ok(())
    }
}

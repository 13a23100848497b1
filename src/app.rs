//! Startup wiring: settings, service clients, local store, identity and the
//! controller, bundled into the context every command receives.

use std::path::PathBuf;
use std::sync::Arc;

use tracing::info;

use crate::core::controller::{AppController, ControllerServices};
use crate::core::identity::UserIdentity;
use crate::core::local_store::{LocalStore, RedbLocalStore};
use crate::core::services::{GeminiClient, SupabaseClient};
use crate::shared::emit::BroadcastEmitter;
use crate::shared::error::AppResult;
use crate::shared::settings::AppSettings;

pub struct AppContext {
    pub controller: Arc<AppController>,
    /// Subscribe here for state and counter events.
    pub events: BroadcastEmitter,
    pub settings: AppSettings,
    pub settings_path: PathBuf,
}

impl AppContext {
    /// Loads settings from the platform config directory (environment
    /// overrides applied) and opens the local store in the data directory.
    pub async fn bootstrap() -> AppResult<Self> {
        let settings_path = AppSettings::get_settings_path()?;
        let settings = AppSettings::load().await?;

        let store = Arc::new(RedbLocalStore::open_default()?);
        Self::from_settings(settings, settings_path, store)
    }

    pub fn from_settings(
        settings: AppSettings,
        settings_path: PathBuf,
        local_store: Arc<dyn LocalStore>,
    ) -> AppResult<Self> {
        settings.validate()?;

        let timeout = settings.http.timeout();
        let gemini = Arc::new(GeminiClient::new(settings.gemini.clone(), timeout)?);
        let supabase = Arc::new(SupabaseClient::new(&settings.supabase, timeout)?);
        let identity = UserIdentity::resolve(local_store.as_ref())?;
        let events = BroadcastEmitter::default();

        let controller = AppController::new(
            ControllerServices {
                generator: gemini.clone(),
                translator: gemini,
                ratings: supabase.clone(),
                interactions: supabase,
                local_store,
                emitter: Arc::new(events.clone()),
            },
            identity,
            settings.admin.pin.clone(),
        );

        info!(model = %settings.gemini.model, "[App] Initialized");
        Ok(Self {
            controller: Arc::new(controller),
            events,
            settings,
            settings_path,
        })
    }
}

#[cfg(test)]
impl AppContext {
    /// Context around a controller wired to in-memory fakes.
    pub(crate) fn for_tests(kitchen: &crate::core::controller::fakes::Kitchen, settings_path: PathBuf) -> Self {
        Self {
            controller: kitchen.controller.clone(),
            events: (*kitchen.emitter).clone(),
            settings: AppSettings::default(),
            settings_path,
        }
    }
}

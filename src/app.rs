//! App Core for TreeBrowser.
//!
//! Central struct holding the settings, the session, and the engine event
//! queue. It is the single owner of sidebar state: engine reports posted
//! through [`EventSender`]s only take effect when [`App::pump_events`]
//! runs on the owning context.

use tracing::info;

use crate::managers::session_controller::SessionController;
use crate::services::event_bus::{EventBus, EventSender};
use crate::services::settings_engine::{SettingsEngine, SettingsEngineTrait};
use crate::types::errors::SettingsError;
use crate::types::settings::BrowserSettings;

/// Central application struct.
pub struct App {
    pub settings_engine: SettingsEngine,
    pub session: SessionController,
    events: EventBus,
}

impl App {
    /// Creates an App with settings read from `config_path` (or the platform
    /// default) and a session seeded from them.
    pub fn new(config_path: Option<String>) -> Result<Self, SettingsError> {
        let mut settings_engine = SettingsEngine::new(config_path);
        let settings = settings_engine.load()?;
        Ok(Self::with_settings(settings_engine, &settings))
    }

    /// Like [`App::new`], but falls back to defaults when the config file is broken.
    pub fn new_lenient(config_path: Option<String>) -> Self {
        let mut settings_engine = SettingsEngine::new(config_path);
        let settings = settings_engine.load_or_default().clone();
        Self::with_settings(settings_engine, &settings)
    }

    fn with_settings(settings_engine: SettingsEngine, settings: &BrowserSettings) -> Self {
        let session = SessionController::from_settings(settings);
        info!(
            config = settings_engine.get_config_path(),
            items = session.tree().len(),
            "App started"
        );
        Self {
            settings_engine,
            session,
            events: EventBus::new(),
        }
    }

    pub fn settings(&self) -> &BrowserSettings {
        self.settings_engine.get_settings()
    }

    /// Handle for engines to report through. Safe to move to other threads.
    pub fn event_sender(&self) -> EventSender {
        self.events.sender()
    }

    /// Applies every queued engine report to the session. Returns how many were applied.
    pub fn pump_events(&mut self) -> usize {
        let events = self.events.drain();
        let count = events.len();
        for event in events {
            self.session.handle_event(event);
        }
        count
    }

    /// Shutdown sequence: flush remaining reports and log the final state.
    pub fn shutdown(&mut self) {
        self.pump_events();
        self.session.log_summary();
    }
}

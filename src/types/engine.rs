use serde::{Deserialize, Serialize};

use super::sidebar::ItemId;

/// A report from a page engine about the tab it renders.
///
/// Engines may produce these on any thread; they are applied to the sidebar
/// only after being drained on the session's owning context.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum EngineEvent {
    NavigationStarted { tab: ItemId },
    NavigationFinished { tab: ItemId },
    NavigationFailed { tab: ItemId, error: String },
    TitleChanged { tab: ItemId, title: String },
    FaviconDiscovered { tab: ItemId, url: String },
    ProgressChanged { tab: ItemId, fraction: f64 },
    /// The page now shows `url` without the session asking for it.
    UrlChanged { tab: ItemId, url: String },
    /// The page asked for a new window; it opens as a new selected tab instead.
    NewWindowRequested { url: String },
}

impl EngineEvent {
    /// The tab the event refers to, if any.
    pub fn tab(&self) -> Option<ItemId> {
        match self {
            EngineEvent::NavigationStarted { tab }
            | EngineEvent::NavigationFinished { tab }
            | EngineEvent::NavigationFailed { tab, .. }
            | EngineEvent::TitleChanged { tab, .. }
            | EngineEvent::FaviconDiscovered { tab, .. }
            | EngineEvent::ProgressChanged { tab, .. }
            | EngineEvent::UrlChanged { tab, .. } => Some(*tab),
            EngineEvent::NewWindowRequested { .. } => None,
        }
    }
}

/// Options for find-on-page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FindOptions {
    pub backwards: bool,
    pub case_sensitive: bool,
    pub wraps: bool,
}

impl Default for FindOptions {
    fn default() -> Self {
        Self {
            backwards: false,
            case_sensitive: false,
            wraps: true,
        }
    }
}

impl FindOptions {
    pub fn previous() -> Self {
        Self {
            backwards: true,
            ..Self::default()
        }
    }
}

/// Image format requested for page captures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SnapshotFormat {
    #[default]
    Png,
    Jpeg,
}

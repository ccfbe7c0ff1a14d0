use thiserror::Error;

use super::sidebar::ItemId;

// === SidebarError ===

/// Reasons a sidebar mutation was refused. Every variant is raised before the
/// forest is touched.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SidebarError {
    /// No item with the given ID exists anywhere in the forest.
    #[error("Sidebar item not found: {0}")]
    NotFound(ItemId),
    /// An item was dropped onto itself.
    #[error("Cannot move item into itself: {0}")]
    SelfParent(ItemId),
    /// A folder was dropped into one of its own descendants.
    #[error("Cannot move folder {dragged} into its descendant {target}")]
    IntoDescendant { dragged: ItemId, target: ItemId },
}

// === SettingsError ===

/// Errors related to settings management.
#[derive(Debug, Error)]
pub enum SettingsError {
    /// An I/O error occurred while reading or writing settings.
    #[error("Settings I/O error: {0}")]
    IoError(String),
    /// Failed to serialize or deserialize settings.
    #[error("Settings serialization error: {0}")]
    SerializationError(String),
    /// The provided settings key is invalid.
    #[error("Invalid settings key: {0}")]
    InvalidKey(String),
    /// The provided settings value is invalid.
    #[error("Invalid settings value: {0}")]
    InvalidValue(String),
}

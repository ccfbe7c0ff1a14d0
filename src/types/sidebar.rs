use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::services::page_engine::PageHandle;

/// Stable identifier shared by every item in the sidebar forest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(Uuid);

impl ItemId {
    /// Generates a fresh random identifier.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for ItemId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Loading status of a tab's page, driven by engine callbacks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum LoadState {
    #[default]
    Idle,
    Loading,
}

/// What the sidebar draws next to an item's name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Icon {
    /// Remote site icon URL.
    Favicon(String),
    /// Named glyph from the UI's symbol set.
    Glyph(String),
}

pub const TAB_GLYPH: &str = "globe";
pub const FOLDER_GLYPH: &str = "folder";

/// A leaf sidebar entry bound to one browsing session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tab {
    pub id: ItemId,
    pub name: String,
    url: String,
    pub favicon: Option<String>,
    pub load_state: LoadState,
    /// Set once the navigation for the current `url` has been issued to the engine.
    pub has_loaded: bool,
    pub progress: f64,
    pub load_error: Option<String>,
    #[serde(skip)]
    pub page_handle: PageHandle,
}

impl Tab {
    pub fn new(url: &str, name: &str) -> Self {
        Self {
            id: ItemId::new(),
            name: name.to_string(),
            url: url.to_string(),
            favicon: None,
            load_state: LoadState::Idle,
            has_loaded: false,
            progress: 0.0,
            load_error: None,
            page_handle: PageHandle::default(),
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// Points the tab at a new address. Clears `has_loaded` so the engine
    /// binding issues a fresh navigation.
    pub fn set_url(&mut self, url: &str) {
        self.url = url.to_string();
        self.has_loaded = false;
    }

    /// Records the address the engine is already showing, after a redirect,
    /// link click or history step. No new navigation is requested.
    pub fn set_committed_url(&mut self, url: &str) {
        self.url = url.to_string();
    }

    pub fn is_loading(&self) -> bool {
        self.load_state == LoadState::Loading
    }

    pub fn icon(&self) -> Icon {
        match &self.favicon {
            Some(favicon) => Icon::Favicon(favicon.clone()),
            None => Icon::Glyph(TAB_GLYPH.to_string()),
        }
    }
}

/// An interior sidebar node. Children are ordered; the order is what the sidebar shows.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Folder {
    pub id: ItemId,
    pub name: String,
    pub icon: Option<String>,
    pub children: Vec<ItemId>,
    pub is_expanded: bool,
}

impl Folder {
    pub fn new(name: &str) -> Self {
        Self {
            id: ItemId::new(),
            name: name.to_string(),
            icon: Some(FOLDER_GLYPH.to_string()),
            children: Vec::new(),
            is_expanded: true,
        }
    }
}

/// Anything the sidebar can display.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum SidebarItem {
    Tab(Tab),
    Folder(Folder),
}

impl SidebarItem {
    pub fn id(&self) -> ItemId {
        match self {
            SidebarItem::Tab(tab) => tab.id,
            SidebarItem::Folder(folder) => folder.id,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            SidebarItem::Tab(tab) => &tab.name,
            SidebarItem::Folder(folder) => &folder.name,
        }
    }

    pub fn set_name(&mut self, name: &str) {
        match self {
            SidebarItem::Tab(tab) => tab.name = name.to_string(),
            SidebarItem::Folder(folder) => folder.name = name.to_string(),
        }
    }

    pub fn icon(&self) -> Option<Icon> {
        match self {
            SidebarItem::Tab(tab) => Some(tab.icon()),
            SidebarItem::Folder(folder) => folder.icon.clone().map(Icon::Glyph),
        }
    }

    pub fn as_tab(&self) -> Option<&Tab> {
        match self {
            SidebarItem::Tab(tab) => Some(tab),
            SidebarItem::Folder(_) => None,
        }
    }

    pub fn as_tab_mut(&mut self) -> Option<&mut Tab> {
        match self {
            SidebarItem::Tab(tab) => Some(tab),
            SidebarItem::Folder(_) => None,
        }
    }

    pub fn as_folder(&self) -> Option<&Folder> {
        match self {
            SidebarItem::Folder(folder) => Some(folder),
            SidebarItem::Tab(_) => None,
        }
    }

    pub fn as_folder_mut(&mut self) -> Option<&mut Folder> {
        match self {
            SidebarItem::Folder(folder) => Some(folder),
            SidebarItem::Tab(_) => None,
        }
    }

    pub fn is_folder(&self) -> bool {
        matches!(self, SidebarItem::Folder(_))
    }
}

/// Nested, owned view of the forest handed to the rendering layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SidebarNode {
    Tab {
        id: ItemId,
        name: String,
        url: String,
    },
    Folder {
        id: ItemId,
        name: String,
        expanded: bool,
        children: Vec<SidebarNode>,
    },
}

impl SidebarNode {
    pub fn id(&self) -> ItemId {
        match self {
            SidebarNode::Tab { id, .. } | SidebarNode::Folder { id, .. } => *id,
        }
    }
}

/// One visible line of the sidebar list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SidebarRow {
    pub id: ItemId,
    pub depth: usize,
    pub parent: Option<ItemId>,
}

/// Where a moved item ended up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placement {
    pub parent: Option<ItemId>,
    pub index: usize,
}

/// An item detached from the forest together with its whole subtree.
#[derive(Debug, Clone)]
pub struct RemovedItem {
    pub item: SidebarItem,
    /// Pre-order descendants of a removed folder; empty for tabs.
    pub descendants: Vec<SidebarItem>,
}

impl RemovedItem {
    pub fn id(&self) -> ItemId {
        self.item.id()
    }

    /// Ids of every removed item, the root first.
    pub fn ids(&self) -> Vec<ItemId> {
        std::iter::once(&self.item)
            .chain(self.descendants.iter())
            .map(SidebarItem::id)
            .collect()
    }

    pub fn contains(&self, id: ItemId) -> bool {
        self.item.id() == id || self.descendants.iter().any(|item| item.id() == id)
    }
}

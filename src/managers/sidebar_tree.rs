//! Sidebar tree for TreeBrowser.
//!
//! Implements `SidebarTreeTrait`: the ordered forest of tabs and folders shown
//! in the sidebar. Items live in an arena keyed by `ItemId`; folders hold the
//! ordered ids of their children and a child→parent map answers "where is this
//! item" without searching. All traversals are depth-first pre-order: siblings
//! left to right, a folder's children visited before the folder's next sibling.

use std::collections::HashMap;

use tracing::{debug, info, warn};
use url::Url;

use crate::types::errors::SidebarError;
use crate::types::settings::SeedItem;
use crate::types::sidebar::{
    Folder, ItemId, Placement, RemovedItem, SidebarItem, SidebarNode, SidebarRow, Tab,
};

pub const DEFAULT_TAB_NAME: &str = "New Tab";

/// Trait defining the sidebar hierarchy interface.
pub trait SidebarTreeTrait {
    fn add_tab(&mut self, url: &str, name: Option<&str>, parent: Option<ItemId>) -> ItemId;
    fn create_folder(&mut self, name: &str, parent: Option<ItemId>) -> ItemId;
    fn close_or_delete(&mut self, id: ItemId) -> Option<RemovedItem>;
    fn rename(&mut self, id: ItemId, new_name: &str) -> bool;
    fn toggle_expansion(&mut self, folder_id: ItemId) -> bool;
    fn move_item(
        &mut self,
        dragged: ItemId,
        new_parent: Option<ItemId>,
        target_index: usize,
    ) -> Result<Placement, SidebarError>;
    fn find_tab(&self, id: ItemId) -> Option<&Tab>;
    fn find_tab_mut(&mut self, id: ItemId) -> Option<&mut Tab>;
    fn all_tabs(&self) -> Vec<&Tab>;
    fn first_tab(&self) -> Option<&Tab>;
}

/// Arena-backed forest of sidebar items.
#[derive(Debug, Clone)]
pub struct SidebarTree {
    nodes: HashMap<ItemId, SidebarItem>,
    roots: Vec<ItemId>,
    parents: HashMap<ItemId, ItemId>,
    placeholder_name: String,
}

impl SidebarTree {
    pub fn new() -> Self {
        Self {
            nodes: HashMap::new(),
            roots: Vec::new(),
            parents: HashMap::new(),
            placeholder_name: DEFAULT_TAB_NAME.to_string(),
        }
    }

    /// Builds a forest from declarative seed entries, preserving their order.
    pub fn from_seed(seed: &[SeedItem]) -> Self {
        Self::from_seed_with_placeholder(seed, DEFAULT_TAB_NAME)
    }

    /// Like [`Self::from_seed`], naming host-less seed tabs `placeholder_name`.
    pub fn from_seed_with_placeholder(seed: &[SeedItem], placeholder_name: &str) -> Self {
        let mut tree = Self::new();
        tree.set_placeholder_name(placeholder_name);
        for entry in seed {
            tree.plant(entry, None);
        }
        info!(items = tree.len(), "Seeded sidebar");
        tree
    }

    /// Name given to tabs whose URL has no host and no explicit name.
    pub fn set_placeholder_name(&mut self, name: &str) {
        self.placeholder_name = name.to_string();
    }

    fn plant(&mut self, entry: &SeedItem, parent: Option<ItemId>) {
        match entry {
            SeedItem::Tab { url, name } => {
                let name = self.tab_name(url, name.as_deref());
                let tab = Tab::new(url, &name);
                self.attach(SidebarItem::Tab(tab), parent, usize::MAX);
            }
            SeedItem::Folder {
                name,
                expanded,
                children,
            } => {
                let mut folder = Folder::new(name);
                folder.is_expanded = *expanded;
                let id = folder.id;
                self.attach(SidebarItem::Folder(folder), parent, usize::MAX);
                for child in children {
                    self.plant(child, Some(id));
                }
            }
        }
    }

    fn tab_name(&self, url: &str, name: Option<&str>) -> String {
        if let Some(name) = name {
            return name.to_string();
        }
        Url::parse(url)
            .ok()
            .and_then(|u| u.host_str().map(str::to_string))
            .unwrap_or_else(|| self.placeholder_name.clone())
    }

    /// Returns `parent` when it names a folder in the forest.
    fn resolve_folder(&self, parent: Option<ItemId>) -> Option<ItemId> {
        let id = parent?;
        match self.nodes.get(&id) {
            Some(SidebarItem::Folder(_)) => Some(id),
            Some(SidebarItem::Tab(_)) => {
                debug!(%id, "Parent is a tab, falling back to root");
                None
            }
            None => {
                debug!(%id, "Parent folder not found, falling back to root");
                None
            }
        }
    }

    /// The child list of `parent`, or the root list when `parent` is not a folder.
    fn siblings_mut(&mut self, parent: Option<ItemId>) -> &mut Vec<ItemId> {
        let children = parent
            .and_then(|id| self.nodes.get_mut(&id))
            .and_then(SidebarItem::as_folder_mut)
            .map(|folder| &mut folder.children);
        match children {
            Some(children) => children,
            None => &mut self.roots,
        }
    }

    /// Inserts a new item under `parent` (a resolved folder, or root) at a clamped index.
    fn attach(&mut self, item: SidebarItem, parent: Option<ItemId>, index: usize) -> Placement {
        let id = item.id();
        self.nodes.insert(id, item);
        self.link(id, parent, index)
    }

    fn link(&mut self, id: ItemId, parent: Option<ItemId>, index: usize) -> Placement {
        let parent = parent.filter(|folder| self.find_folder(*folder).is_some());
        let siblings = self.siblings_mut(parent);
        let index = index.min(siblings.len());
        siblings.insert(index, id);
        match parent {
            Some(parent_id) => {
                self.parents.insert(id, parent_id);
            }
            None => {
                self.parents.remove(&id);
            }
        }
        Placement { parent, index }
    }

    /// Unlinks `id` from whichever list holds it. The node stays in the arena.
    fn detach(&mut self, id: ItemId) -> Option<Placement> {
        if !self.nodes.contains_key(&id) {
            return None;
        }
        let parent = self.parents.remove(&id);
        let siblings = self.siblings_mut(parent);
        let index = siblings.iter().position(|child| *child == id)?;
        siblings.remove(index);
        Some(Placement { parent, index })
    }

    /// True when `ancestor` appears on the parent chain of `id`.
    fn is_descendant(&self, id: ItemId, ancestor: ItemId) -> bool {
        let mut current = self.parents.get(&id).copied();
        while let Some(parent) = current {
            if parent == ancestor {
                return true;
            }
            current = self.parents.get(&parent).copied();
        }
        false
    }

    fn preorder_from(&self, start: &[ItemId]) -> Vec<ItemId> {
        Preorder::new(self, start).map(SidebarItem::id).collect()
    }

    pub fn get(&self, id: ItemId) -> Option<&SidebarItem> {
        self.nodes.get(&id)
    }

    pub fn find_folder(&self, id: ItemId) -> Option<&Folder> {
        self.nodes.get(&id).and_then(SidebarItem::as_folder)
    }

    pub fn contains(&self, id: ItemId) -> bool {
        self.nodes.contains_key(&id)
    }

    /// Number of items (tabs and folders) in the forest.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn tab_count(&self) -> usize {
        self.nodes.values().filter(|item| !item.is_folder()).count()
    }

    pub fn root_ids(&self) -> &[ItemId] {
        &self.roots
    }

    pub fn children_of(&self, folder_id: ItemId) -> Option<&[ItemId]> {
        self.find_folder(folder_id).map(|folder| folder.children.as_slice())
    }

    /// The folder holding `id`; `None` for root items and unknown ids.
    pub fn parent_of(&self, id: ItemId) -> Option<ItemId> {
        self.parents.get(&id).copied()
    }

    pub fn index_in_parent(&self, id: ItemId) -> Option<usize> {
        let siblings = match self.parent_of(id) {
            Some(parent) => self.children_of(parent)?,
            None => self.roots.as_slice(),
        };
        siblings.iter().position(|child| *child == id)
    }

    /// Depth-first pre-order iterator over every item.
    pub fn iter(&self) -> Preorder<'_> {
        Preorder::new(self, &self.roots)
    }

    /// Nested snapshot of the forest.
    pub fn outline(&self) -> Vec<SidebarNode> {
        self.roots.iter().filter_map(|id| self.outline_node(*id)).collect()
    }

    fn outline_node(&self, id: ItemId) -> Option<SidebarNode> {
        let node = match self.nodes.get(&id)? {
            SidebarItem::Tab(tab) => SidebarNode::Tab {
                id,
                name: tab.name.clone(),
                url: tab.url().to_string(),
            },
            SidebarItem::Folder(folder) => SidebarNode::Folder {
                id,
                name: folder.name.clone(),
                expanded: folder.is_expanded,
                children: folder
                    .children
                    .iter()
                    .filter_map(|child| self.outline_node(*child))
                    .collect(),
            },
        };
        Some(node)
    }

    /// Rows the sidebar draws, in order. Children of collapsed folders are skipped.
    pub fn visible_rows(&self) -> Vec<SidebarRow> {
        let mut rows = Vec::new();
        let mut stack: Vec<(ItemId, usize)> = self.roots.iter().rev().map(|id| (*id, 0)).collect();
        while let Some((id, depth)) = stack.pop() {
            let Some(item) = self.nodes.get(&id) else {
                continue;
            };
            rows.push(SidebarRow {
                id,
                depth,
                parent: self.parent_of(id),
            });
            if let SidebarItem::Folder(folder) = item {
                if folder.is_expanded {
                    stack.extend(folder.children.iter().rev().map(|child| (*child, depth + 1)));
                }
            }
        }
        rows
    }
}

impl Default for SidebarTree {
    fn default() -> Self {
        Self::new()
    }
}

impl SidebarTreeTrait for SidebarTree {
    /// Adds a tab. Inside a folder it is appended; at root (or when the folder
    /// is missing) it goes to the front so the newest tab is on top.
    fn add_tab(&mut self, url: &str, name: Option<&str>, parent: Option<ItemId>) -> ItemId {
        let name = self.tab_name(url, name);
        let tab = Tab::new(url, &name);
        let id = tab.id;
        let placement = match self.resolve_folder(parent) {
            Some(folder) => self.attach(SidebarItem::Tab(tab), Some(folder), usize::MAX),
            None => self.attach(SidebarItem::Tab(tab), None, 0),
        };
        info!(%id, url, parent = ?placement.parent, "Added tab");
        id
    }

    /// Creates a folder. Always appended, at root or inside `parent`.
    fn create_folder(&mut self, name: &str, parent: Option<ItemId>) -> ItemId {
        let folder = Folder::new(name);
        let id = folder.id;
        let parent = self.resolve_folder(parent);
        self.attach(SidebarItem::Folder(folder), parent, usize::MAX);
        info!(%id, name, ?parent, "Created folder");
        id
    }

    /// Removes an item and, for folders, its entire subtree.
    fn close_or_delete(&mut self, id: ItemId) -> Option<RemovedItem> {
        if self.detach(id).is_none() {
            debug!(%id, "Nothing to remove");
            return None;
        }
        let mut removed = self
            .preorder_from(&[id])
            .into_iter()
            .filter_map(|item_id| {
                self.parents.remove(&item_id);
                self.nodes.remove(&item_id)
            });
        let item = removed.next()?;
        let descendants: Vec<SidebarItem> = removed.collect();
        info!(%id, descendants = descendants.len(), "Removed sidebar item");
        Some(RemovedItem { item, descendants })
    }

    fn rename(&mut self, id: ItemId, new_name: &str) -> bool {
        if new_name.trim().is_empty() {
            debug!(%id, "Ignoring rename to an empty name");
            return false;
        }
        match self.nodes.get_mut(&id) {
            Some(item) => {
                item.set_name(new_name);
                true
            }
            None => {
                debug!(%id, "Rename target not found");
                false
            }
        }
    }

    fn toggle_expansion(&mut self, folder_id: ItemId) -> bool {
        match self.nodes.get_mut(&folder_id).and_then(SidebarItem::as_folder_mut) {
            Some(folder) => {
                folder.is_expanded = !folder.is_expanded;
                true
            }
            None => {
                debug!(%folder_id, "Toggle target is not a folder");
                false
            }
        }
    }

    /// Drag-and-drop re-parenting.
    ///
    /// The index is clamped to the destination length after the dragged item
    /// has been removed, so an oversized index appends. A destination that is
    /// missing or not a folder sends the item to root instead of losing it.
    fn move_item(
        &mut self,
        dragged: ItemId,
        new_parent: Option<ItemId>,
        target_index: usize,
    ) -> Result<Placement, SidebarError> {
        if new_parent == Some(dragged) {
            warn!(%dragged, "Rejected drop onto itself");
            return Err(SidebarError::SelfParent(dragged));
        }
        if !self.contains(dragged) {
            debug!(%dragged, "Dragged item not found");
            return Err(SidebarError::NotFound(dragged));
        }
        if let Some(target) = new_parent {
            if self.is_descendant(target, dragged) {
                warn!(%dragged, %target, "Rejected drop into a descendant");
                return Err(SidebarError::IntoDescendant { dragged, target });
            }
        }

        self.detach(dragged)
            .ok_or(SidebarError::NotFound(dragged))?;
        let parent = self.resolve_folder(new_parent);
        let placement = self.link(dragged, parent, target_index);
        debug!(%dragged, parent = ?placement.parent, index = placement.index, "Moved item");
        Ok(placement)
    }

    fn find_tab(&self, id: ItemId) -> Option<&Tab> {
        self.nodes.get(&id).and_then(SidebarItem::as_tab)
    }

    fn find_tab_mut(&mut self, id: ItemId) -> Option<&mut Tab> {
        self.nodes.get_mut(&id).and_then(SidebarItem::as_tab_mut)
    }

    fn all_tabs(&self) -> Vec<&Tab> {
        self.iter().filter_map(SidebarItem::as_tab).collect()
    }

    fn first_tab(&self) -> Option<&Tab> {
        self.iter().find_map(SidebarItem::as_tab)
    }
}

/// Depth-first pre-order walk over part of a [`SidebarTree`].
pub struct Preorder<'a> {
    tree: &'a SidebarTree,
    stack: Vec<ItemId>,
}

impl<'a> Preorder<'a> {
    fn new(tree: &'a SidebarTree, start: &[ItemId]) -> Self {
        Self {
            tree,
            stack: start.iter().rev().copied().collect(),
        }
    }
}

impl<'a> Iterator for Preorder<'a> {
    type Item = &'a SidebarItem;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(id) = self.stack.pop() {
            if let Some(item) = self.tree.nodes.get(&id) {
                if let SidebarItem::Folder(folder) = item {
                    self.stack.extend(folder.children.iter().rev().copied());
                }
                return Some(item);
            }
        }
        None
    }
}

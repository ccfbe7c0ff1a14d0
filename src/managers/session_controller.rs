//! Session controller for TreeBrowser.
//!
//! Owns the sidebar forest and the selected tab. Every structural change that
//! can remove the selected tab goes through here so the selection is repaired
//! in the same step. Engine reports are applied via [`SessionController::handle_event`].

use std::sync::Arc;

use tracing::{debug, info, warn};
use url::Url;

use crate::managers::sidebar_tree::{SidebarTree, SidebarTreeTrait};
use crate::services::address_input;
use crate::services::page_engine::{PageEngine, PageHandle};
use crate::types::engine::{EngineEvent, FindOptions, SnapshotFormat};
use crate::types::errors::SidebarError;
use crate::types::settings::{BrowserSettings, GeneralSettings, SearchEngine};
use crate::types::sidebar::{ItemId, LoadState, Placement, RemovedItem, Tab};

/// Tab lifecycle and selection policy on top of a [`SidebarTree`].
pub struct SessionController {
    tree: SidebarTree,
    selected_tab_id: Option<ItemId>,
    search_engine: SearchEngine,
    default_tab_url: String,
    new_folder_name: String,
}

impl SessionController {
    /// Wraps an existing tree with default general and search settings.
    pub fn new(tree: SidebarTree) -> Self {
        let general = GeneralSettings::default();
        Self {
            tree,
            selected_tab_id: None,
            search_engine: SearchEngine::default(),
            default_tab_url: general.default_tab_url,
            new_folder_name: general.new_folder_name,
        }
    }

    /// Builds a session from the configured seed and defaults. The first
    /// seeded tab starts selected.
    pub fn from_settings(settings: &BrowserSettings) -> Self {
        let tree = SidebarTree::from_seed_with_placeholder(
            &settings.sidebar.seed,
            &settings.general.new_tab_name,
        );
        let selected_tab_id = tree.first_tab().map(|tab| tab.id);
        Self {
            tree,
            selected_tab_id,
            search_engine: settings.search.engine,
            default_tab_url: settings.general.default_tab_url.clone(),
            new_folder_name: settings.general.new_folder_name.clone(),
        }
    }

    pub fn tree(&self) -> &SidebarTree {
        &self.tree
    }

    pub fn selected_tab_id(&self) -> Option<ItemId> {
        self.selected_tab_id
    }

    /// Selects `id` without validation. An id that names no tab leaves the
    /// session without a current tab.
    pub fn select_tab(&mut self, id: ItemId) {
        self.selected_tab_id = Some(id);
    }

    pub fn current_tab(&self) -> Option<&Tab> {
        self.selected_tab_id.and_then(|id| self.tree.find_tab(id))
    }

    pub fn current_tab_mut(&mut self) -> Option<&mut Tab> {
        let id = self.selected_tab_id?;
        self.tree.find_tab_mut(id)
    }

    // --- Tab lifecycle ---

    /// Adds a tab and selects it.
    pub fn add_tab_and_select(
        &mut self,
        url: &str,
        name: Option<&str>,
        parent: Option<ItemId>,
    ) -> ItemId {
        let id = self.tree.add_tab(url, name, parent);
        self.selected_tab_id = Some(id);
        id
    }

    /// Opens the configured default page in a new selected tab.
    pub fn new_tab(&mut self, parent: Option<ItemId>) -> ItemId {
        let url = self.default_tab_url.clone();
        self.add_tab_and_select(&url, None, parent)
    }

    /// Opens a search results page for `term`, named after the term.
    pub fn add_search_tab_and_select(&mut self, term: &str, parent: Option<ItemId>) -> ItemId {
        let url = self.search_engine.query_url(term);
        self.add_tab_and_select(&url, Some(term), parent)
    }

    /// Closes a tab. Folders are left alone; use [`Self::delete_item`] for them.
    pub fn close_tab(&mut self, id: ItemId) -> Option<RemovedItem> {
        if self.tree.find_tab(id).is_none() {
            debug!(%id, "close_tab ignored: not a tab");
            return None;
        }
        self.delete_item(id)
    }

    /// Removes a tab or a whole folder, repairing the selection if it was inside.
    pub fn delete_item(&mut self, id: ItemId) -> Option<RemovedItem> {
        let removed = self.tree.close_or_delete(id)?;
        if let Some(selected) = self.selected_tab_id {
            if removed.contains(selected) {
                self.selected_tab_id = self.tree.first_tab().map(|tab| tab.id);
                debug!(selected = ?self.selected_tab_id, "Selection moved after removal");
            }
        }
        Some(removed)
    }

    pub fn create_folder(&mut self, name: Option<&str>, parent: Option<ItemId>) -> ItemId {
        let name = name.unwrap_or(self.new_folder_name.as_str()).to_string();
        self.tree.create_folder(&name, parent)
    }

    pub fn rename(&mut self, id: ItemId, new_name: &str) -> bool {
        self.tree.rename(id, new_name)
    }

    pub fn toggle_expansion(&mut self, folder_id: ItemId) -> bool {
        self.tree.toggle_expansion(folder_id)
    }

    pub fn move_item(
        &mut self,
        dragged: ItemId,
        new_parent: Option<ItemId>,
        target_index: usize,
    ) -> Result<Placement, SidebarError> {
        self.tree.move_item(dragged, new_parent, target_index)
    }

    // --- Navigation ---

    /// Handles an address-bar submission. A URL or search term is loaded in
    /// the current tab, or in a new tab when nothing is selected.
    pub fn navigate_current(&mut self, input: &str) -> Option<ItemId> {
        let url = address_input::resolve(input, self.search_engine)?;
        match self.current_tab().map(|tab| tab.id) {
            Some(id) => {
                self.navigate_tab(id, &url);
                Some(id)
            }
            None => Some(self.add_tab_and_select(&url, None, None)),
        }
    }

    /// Points a tab at `url` and issues the navigation if an engine is attached.
    pub fn navigate_tab(&mut self, id: ItemId, url: &str) -> bool {
        let Some(tab) = self.tree.find_tab_mut(id) else {
            debug!(%id, "navigate_tab ignored: unknown tab");
            return false;
        };
        tab.set_url(url);
        tab.favicon = None;
        self.issue_pending_navigation(id);
        true
    }

    /// Binds the rendering layer's engine to a tab and loads the tab's URL
    /// if it has not been requested yet.
    pub fn attach_engine(&mut self, id: ItemId, engine: &Arc<dyn PageEngine>) -> bool {
        let Some(tab) = self.tree.find_tab_mut(id) else {
            debug!(%id, "attach_engine ignored: unknown tab");
            return false;
        };
        tab.page_handle = PageHandle::new(engine);
        self.issue_pending_navigation(id);
        true
    }

    fn issue_pending_navigation(&mut self, id: ItemId) {
        let Some(tab) = self.tree.find_tab_mut(id) else {
            return;
        };
        if tab.has_loaded {
            return;
        }
        if let Some(engine) = tab.page_handle.upgrade() {
            engine.navigate(tab.url());
            tab.has_loaded = true;
            debug!(%id, url = tab.url(), "Issued navigation");
        }
    }

    /// Applies an engine report to the tab it concerns.
    pub fn handle_event(&mut self, event: EngineEvent) {
        if let EngineEvent::NewWindowRequested { url } = &event {
            self.add_tab_and_select(url, None, None);
            return;
        }
        let Some(id) = event.tab() else {
            return;
        };
        let Some(tab) = self.tree.find_tab_mut(id) else {
            debug!(%id, ?event, "Dropping event for unknown tab");
            return;
        };
        match event {
            EngineEvent::NavigationStarted { .. } => {
                tab.load_state = LoadState::Loading;
                tab.progress = 0.0;
                tab.load_error = None;
                if tab.favicon.is_none() {
                    tab.favicon = default_favicon(tab.url());
                }
            }
            EngineEvent::NavigationFinished { .. } => {
                tab.load_state = LoadState::Idle;
                tab.progress = 1.0;
            }
            EngineEvent::NavigationFailed { error, .. } => {
                warn!(%id, url = tab.url(), %error, "Navigation failed");
                tab.load_state = LoadState::Idle;
                tab.load_error = Some(error);
            }
            EngineEvent::TitleChanged { title, .. } => {
                if !title.trim().is_empty() {
                    tab.name = title;
                }
            }
            EngineEvent::FaviconDiscovered { url, .. } => {
                tab.favicon = Some(url);
            }
            EngineEvent::ProgressChanged { fraction, .. } => {
                tab.progress = if fraction.is_nan() {
                    0.0
                } else {
                    fraction.clamp(0.0, 1.0)
                };
            }
            EngineEvent::UrlChanged { url, .. } => {
                let derived = default_favicon(&url);
                if derived != default_favicon(tab.url()) {
                    tab.favicon = derived;
                }
                debug!(%id, from = tab.url(), to = %url, "Engine moved to a new address");
                tab.set_committed_url(&url);
            }
            EngineEvent::NewWindowRequested { .. } => {}
        }
    }

    // --- Page actions on the current tab ---

    fn with_current_engine(&self, action: &str, f: impl FnOnce(&dyn PageEngine)) {
        match self.current_tab().and_then(|tab| tab.page_handle.upgrade()) {
            Some(engine) => f(engine.as_ref()),
            None => debug!(action, "No engine for current tab"),
        }
    }

    pub fn reload(&self) {
        self.with_current_engine("reload", |engine| engine.reload());
    }

    pub fn stop(&self) {
        self.with_current_engine("stop", |engine| engine.stop());
    }

    pub fn go_back(&self) {
        self.with_current_engine("go_back", |engine| engine.go_back());
    }

    pub fn go_forward(&self) {
        self.with_current_engine("go_forward", |engine| engine.go_forward());
    }

    pub fn find_on_page(&self, text: &str, options: FindOptions) {
        if text.is_empty() {
            return;
        }
        self.with_current_engine("find", |engine| engine.find(text, options));
    }

    pub fn take_snapshot(&self, format: SnapshotFormat) {
        self.with_current_engine("snapshot", |engine| engine.take_snapshot(format));
    }

    pub fn clear_cache(&self) {
        self.with_current_engine("clear_cache", |engine| engine.clear_cache());
    }

    pub fn clear_cookies(&self) {
        self.with_current_engine("clear_cookies", |engine| engine.clear_cookies());
    }

    pub fn evaluate_script(&self, script: &str) {
        self.with_current_engine("evaluate_script", |engine| engine.evaluate_script(script));
    }

    // --- Read-only views for the chrome ---

    /// Text shown in the address bar: the current tab's URL, or empty.
    pub fn address_bar_text(&self) -> String {
        self.current_tab()
            .map(|tab| tab.url().to_string())
            .unwrap_or_default()
    }

    pub fn current_progress(&self) -> f64 {
        self.current_tab().map(|tab| tab.progress).unwrap_or(0.0)
    }

    pub fn log_summary(&self) {
        info!(
            items = self.tree.len(),
            tabs = self.tree.tab_count(),
            selected = ?self.selected_tab_id,
            "Session state"
        );
    }
}

impl Default for SessionController {
    fn default() -> Self {
        Self::new(SidebarTree::new())
    }
}

/// `https://<host>/favicon.ico` for the page's host.
pub fn default_favicon(url: &str) -> Option<String> {
    let parsed = Url::parse(url).ok()?;
    let host = parsed.host_str()?;
    Some(format!("https://{}/favicon.ico", host))
}

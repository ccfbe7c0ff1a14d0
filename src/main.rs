//! TreeBrowser demo entry point.
//!
//! Builds a session from the user's settings, attaches a console page engine
//! to a few tabs, drives some sidebar operations, and prints the resulting tree.

use std::error::Error;
use std::sync::Arc;
use std::thread;

use tracing_subscriber::EnvFilter;
use treebrowser::app::App;
use treebrowser::managers::sidebar_tree::SidebarTreeTrait;
use treebrowser::services::event_bus::EventSender;
use treebrowser::services::page_engine::PageEngine;
use treebrowser::services::settings_engine::{SettingsEngine, SettingsEngineTrait};
use treebrowser::types::engine::{EngineEvent, FindOptions, SnapshotFormat};
use treebrowser::types::sidebar::{ItemId, SidebarItem};
use url::Url;

/// Page engine that prints commands and reports a successful load from a
/// background thread, the way a real renderer would.
struct ConsoleEngine {
    tab: ItemId,
    events: EventSender,
}

impl ConsoleEngine {
    fn command(&self, what: &str) {
        println!("  [engine {}] {}", short(self.tab), what);
    }
}

impl PageEngine for ConsoleEngine {
    fn navigate(&self, url: &str) {
        self.command(&format!("navigate {}", url));
        let tab = self.tab;
        let events = self.events.clone();
        let title = url.trim_start_matches("https://").trim_end_matches('/').to_string();
        // Servers canonicalise the address; report where the page landed.
        let landed = Url::parse(url)
            .map(|parsed| parsed.to_string())
            .unwrap_or_else(|_| url.to_string());
        thread::spawn(move || {
            events.post(EngineEvent::NavigationStarted { tab });
            events.post(EngineEvent::UrlChanged { tab, url: landed });
            events.post(EngineEvent::ProgressChanged { tab, fraction: 0.5 });
            events.post(EngineEvent::TitleChanged { tab, title });
            events.post(EngineEvent::NavigationFinished { tab });
        });
    }

    fn reload(&self) {
        self.command("reload");
    }

    fn stop(&self) {
        self.command("stop");
    }

    fn go_back(&self) {
        self.command("go back");
    }

    fn go_forward(&self) {
        self.command("go forward");
    }

    fn find(&self, text: &str, options: FindOptions) {
        self.command(&format!("find {:?} (backwards: {})", text, options.backwards));
    }

    fn take_snapshot(&self, format: SnapshotFormat) {
        self.command(&format!("snapshot as {:?}", format));
    }

    fn clear_cache(&self) {
        self.command("clear cache");
    }

    fn clear_cookies(&self) {
        self.command("clear cookies");
    }

    fn evaluate_script(&self, script: &str) {
        self.command(&format!("evaluate {} bytes of script", script.len()));
    }
}

fn short(id: ItemId) -> String {
    id.to_string().chars().take(8).collect()
}

fn init_logging(default_level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

fn print_tree(app: &App) {
    let session = &app.session;
    let tree = session.tree();
    for row in tree.visible_rows() {
        let Some(item) = tree.get(row.id) else {
            continue;
        };
        let indent = "  ".repeat(row.depth + 1);
        match item {
            SidebarItem::Folder(folder) => {
                let marker = if folder.is_expanded { "v" } else { ">" };
                println!("{}{} {}/", indent, marker, folder.name);
            }
            SidebarItem::Tab(tab) => {
                let selected = if session.selected_tab_id() == Some(tab.id) { "*" } else { " " };
                println!("{}{} {}  <{}>", indent, selected, tab.name, tab.url());
            }
        }
    }
    println!();
}

fn main() -> Result<(), Box<dyn Error>> {
    let config_path = std::env::args().nth(1);
    let level = SettingsEngine::new(config_path.clone())
        .load_or_default()
        .logging
        .level
        .clone();
    init_logging(&level);

    let mut app = App::new_lenient(config_path);
    println!("TreeBrowser v{} - sidebar demo", env!("CARGO_PKG_VERSION"));
    println!("Settings: {}", app.settings_engine.get_config_path());
    println!();
    print_tree(&app);

    // Realise every seeded tab with an engine, as the rendering layer would.
    let mut engines: Vec<Arc<dyn PageEngine>> = Vec::new();
    let tab_ids: Vec<ItemId> = app.session.tree().all_tabs().iter().map(|tab| tab.id).collect();
    for id in tab_ids {
        let engine: Arc<dyn PageEngine> = Arc::new(ConsoleEngine {
            tab: id,
            events: app.event_sender(),
        });
        app.session.attach_engine(id, &engine);
        engines.push(engine);
    }

    let folder = app.session.create_folder(Some("Scratch"), None);
    let search = app.session.add_search_tab_and_select("arena allocation in rust", Some(folder));
    let engine: Arc<dyn PageEngine> = Arc::new(ConsoleEngine {
        tab: search,
        events: app.event_sender(),
    });
    app.session.attach_engine(search, &engine);
    engines.push(engine);

    app.session.reload();
    app.session.find_on_page("arena", FindOptions::default());

    let first_other = app.session.tree().root_ids().iter().copied().find(|id| *id != folder);
    if let Some(first) = first_other {
        app.session.move_item(first, Some(folder), usize::MAX)?;
    }

    // Give the engine threads a moment, then apply their reports here.
    thread::sleep(std::time::Duration::from_millis(50));
    let applied = app.pump_events();
    println!();
    println!("Applied {} engine reports", applied);
    print_tree(&app);

    if let Some(selected) = app.session.selected_tab_id() {
        app.session.close_tab(selected);
    }
    println!("After closing the selected tab:");
    print_tree(&app);

    println!("{}", serde_json::to_string_pretty(&app.session.tree().outline())?);

    app.shutdown();
    drop(engines);
    Ok(())
}

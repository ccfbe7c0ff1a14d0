use serde::{Deserialize, Serialize};

/// Top-level browser settings container.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct BrowserSettings {
    pub general: GeneralSettings,
    pub search: SearchSettings,
    pub sidebar: SidebarSettings,
    #[serde(default)]
    pub logging: LoggingSettings,
}

/// Defaults applied when tabs and folders are created.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GeneralSettings {
    /// Address opened by the "new tab" command.
    pub default_tab_url: String,
    /// Display name used when a tab's URL has no host.
    pub new_tab_name: String,
    pub new_folder_name: String,
}

impl Default for GeneralSettings {
    fn default() -> Self {
        Self {
            default_tab_url: "https://google.com".to_string(),
            new_tab_name: "New Tab".to_string(),
            new_folder_name: "New Folder".to_string(),
        }
    }
}

/// Search engine used for address-bar input that is not a URL.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub enum SearchEngine {
    #[default]
    Google,
    DuckDuckGo,
    Bing,
    Brave,
}

impl SearchEngine {
    pub fn query_prefix(&self) -> &'static str {
        match self {
            Self::Google => "https://www.google.com/search?q=",
            Self::DuckDuckGo => "https://duckduckgo.com/?q=",
            Self::Bing => "https://www.bing.com/search?q=",
            Self::Brave => "https://search.brave.com/search?q=",
        }
    }

    /// Builds the results URL for `term`, percent-encoding it into the query string.
    pub fn query_url(&self, term: &str) -> String {
        format!("{}{}", self.query_prefix(), urlencoding::encode(term))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct SearchSettings {
    pub engine: SearchEngine,
}

/// Initial sidebar contents, rebuilt on every launch.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SidebarSettings {
    pub seed: Vec<SeedItem>,
}

impl Default for SidebarSettings {
    fn default() -> Self {
        Self {
            seed: vec![
                SeedItem::Tab {
                    url: "https://www.rust-lang.org".to_string(),
                    name: None,
                },
                SeedItem::Folder {
                    name: "Reading".to_string(),
                    expanded: true,
                    children: vec![
                        SeedItem::Tab {
                            url: "https://doc.rust-lang.org/book/".to_string(),
                            name: Some("The Book".to_string()),
                        },
                        SeedItem::Tab {
                            url: "https://docs.rs".to_string(),
                            name: None,
                        },
                    ],
                },
                SeedItem::Folder {
                    name: "Projects".to_string(),
                    expanded: false,
                    children: vec![SeedItem::Tab {
                        url: "https://github.com".to_string(),
                        name: None,
                    }],
                },
            ],
        }
    }
}

/// A declarative sidebar entry used to build the startup forest.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SeedItem {
    Tab {
        url: String,
        #[serde(default)]
        name: Option<String>,
    },
    Folder {
        name: String,
        #[serde(default = "default_true")]
        expanded: bool,
        #[serde(default)]
        children: Vec<SeedItem>,
    },
}

fn default_true() -> bool {
    true
}

/// Log filter used when `RUST_LOG` is not set.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LoggingSettings {
    pub level: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

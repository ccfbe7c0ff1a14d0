// TreeBrowser platform paths.
// Only the configuration directory is needed: the sidebar itself is never persisted.
//
// - Linux:   $XDG_CONFIG_HOME/treebrowser or ~/.config/treebrowser
// - macOS:   ~/Library/Application Support/TreeBrowser
// - Windows: %APPDATA%/TreeBrowser

use std::env;
use std::path::PathBuf;

/// Returns the platform-specific configuration directory for TreeBrowser.
pub fn get_config_dir() -> PathBuf {
    #[cfg(target_os = "macos")]
    {
        home_dir()
            .join("Library")
            .join("Application Support")
            .join("TreeBrowser")
    }
    #[cfg(target_os = "windows")]
    {
        let appdata = env::var("APPDATA")
            .unwrap_or_else(|_| String::from("C:\\Users\\Default\\AppData\\Roaming"));
        PathBuf::from(appdata).join("TreeBrowser")
    }
    #[cfg(not(any(target_os = "macos", target_os = "windows")))]
    {
        match env::var("XDG_CONFIG_HOME") {
            Ok(xdg) if !xdg.is_empty() => PathBuf::from(xdg).join("treebrowser"),
            _ => home_dir().join(".config").join("treebrowser"),
        }
    }
}

#[cfg(not(target_os = "windows"))]
fn home_dir() -> PathBuf {
    PathBuf::from(env::var("HOME").unwrap_or_else(|_| String::from("/tmp")))
}

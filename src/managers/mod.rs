// TreeBrowser state managers
// Managers own mutable state: the sidebar forest and the tab session built on it.

pub mod session_controller;
pub mod sidebar_tree;

// TreeBrowser shared type definitions
// Each submodule defines types used across the application.

pub mod engine;
pub mod errors;
pub mod settings;
pub mod sidebar;

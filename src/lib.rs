//! TreeBrowser: the sidebar and tab-session model of a desktop web browser.
//!
//! Tabs and folders live in a tree shown in the sidebar; the session tracks
//! the selected tab and forwards page commands to an external page engine.
//! This library crate exposes all modules for use by the binary and integration tests.

pub mod app;
pub mod managers;
pub mod platform;
pub mod services;
pub mod types;

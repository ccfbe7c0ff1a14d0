// TreeBrowser services
// Stateless helpers and collaborators around the session: settings, address input,
// the page engine boundary, and the engine event queue.

pub mod address_input;
pub mod event_bus;
pub mod page_engine;
pub mod settings_engine;

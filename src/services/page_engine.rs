//! Page engine capability.
//!
//! The rendering layer owns one engine instance per realised tab. Tabs keep
//! only a [`PageHandle`], a weak back-reference, so dropping the engine never
//! needs the sidebar's cooperation and closing a tab never tears the engine down.

use std::fmt;
use std::sync::{Arc, Weak};

use crate::types::engine::{FindOptions, SnapshotFormat};

/// Commands the session issues to the engine rendering a tab.
///
/// All methods are fire-and-forget; results come back as
/// [`EngineEvent`](crate::types::engine::EngineEvent)s.
pub trait PageEngine {
    fn navigate(&self, url: &str);
    fn reload(&self);
    fn stop(&self);
    fn go_back(&self);
    fn go_forward(&self);
    fn find(&self, text: &str, options: FindOptions);
    fn take_snapshot(&self, format: SnapshotFormat);
    fn clear_cache(&self);
    fn clear_cookies(&self);
    fn evaluate_script(&self, script: &str);
}

/// Non-owning reference from a tab to its engine.
#[derive(Clone, Default)]
pub struct PageHandle(Option<Weak<dyn PageEngine>>);

impl PageHandle {
    pub fn new(engine: &Arc<dyn PageEngine>) -> Self {
        Self(Some(Arc::downgrade(engine)))
    }

    /// The engine, if it has been attached and is still alive.
    pub fn upgrade(&self) -> Option<Arc<dyn PageEngine>> {
        self.0.as_ref().and_then(Weak::upgrade)
    }

    pub fn is_attached(&self) -> bool {
        self.upgrade().is_some()
    }

    pub fn clear(&mut self) {
        self.0 = None;
    }
}

impl fmt::Debug for PageHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = match &self.0 {
            None => "unset",
            Some(weak) if weak.strong_count() > 0 => "attached",
            Some(_) => "released",
        };
        write!(f, "PageHandle({})", state)
    }
}

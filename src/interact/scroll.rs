use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use tracing::debug;

/// Session key holding the list page's scroll offset.
pub const SCROLL_KEY: &str = "scrollPosition";

/// Wait before restoring, so the list has its final layout.
pub const RESTORE_DELAY: Duration = Duration::from_millis(10);

/// Wait before scrolling to an anchor, so the CV has been laid out.
pub const ANCHOR_DELAY: Duration = Duration::from_millis(100);

/// Scroll requests the page should carry out.
#[derive(Debug, Clone, PartialEq)]
pub enum ScrollEffect {
    /// Jump to an absolute offset, instantly.
    To { top: f64 },
    /// Bring the element with this id into view.
    IntoView { id: String, smooth: bool },
    Top { smooth: bool },
    /// Scroll so the info block sits `offset_rem` below the top edge.
    Info { offset_rem: f64 },
}

/// Per-session string storage that survives navigation between pages.
pub trait SessionStore: Send {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: String);
    fn remove(&self, key: &str);
}

/// In-memory [`SessionStore`]. Clones share the same storage, the way every
/// page of a browser tab shares one session.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    map: Arc<Mutex<HashMap<String, String>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.map.lock().unwrap().get(key).cloned()
    }

    fn set(&self, key: &str, value: String) {
        self.map.lock().unwrap().insert(key.to_string(), value);
    }

    fn remove(&self, key: &str) {
        self.map.lock().unwrap().remove(key);
    }
}

/// Remembers where the list page was scrolled to when leaving it, and puts it
/// back exactly once on return.
pub struct ScrollRestoration {
    store: Box<dyn SessionStore>,
}

impl ScrollRestoration {
    pub fn new(store: impl SessionStore + 'static) -> Self {
        Self {
            store: Box::new(store),
        }
    }

    /// Persist `offset` for the next visit.
    pub fn remember(&self, offset: f64) {
        debug!(offset, "saving list scroll position");
        self.store.set(SCROLL_KEY, offset.to_string());
    }

    /// Whether there's an offset waiting to be restored.
    pub fn is_pending(&self) -> bool {
        self.store.get(SCROLL_KEY).is_some()
    }

    /// Consume the stored offset. Every call after the first one that found
    /// something yields `None` until [`ScrollRestoration::remember`] runs again.
    pub fn take(&self) -> Option<f64> {
        let value = self.store.get(SCROLL_KEY)?;
        self.store.remove(SCROLL_KEY);

        value
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|offset| offset.is_finite())
            .map(f64::trunc)
    }
}

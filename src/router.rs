//! Path routing over a browser-style history.
//!
//! The router is the single source of truth for what is displayed: a
//! normalized absolute path. It changes through exactly two doors:
//!
//! - [`Router::navigate`] for in-site navigation, which pushes one history
//!   entry (never a reload) unless the path is already current.
//! - [`Router::on_popstate`] for back/forward, which adopts whatever location
//!   the history reports. With a [`MemoryHistory`], [`Router::back`] and
//!   [`Router::forward`] move the history and report in one step.
//!
//! The [`History`] trait stands in for `window.history`. [`MemoryHistory`] is
//! the in-process implementation used by the view and the tests.

use tracing::debug;

/// Convert a page or link slug to its routed path.
///
/// - `""`, `"/"` and `"home"` → `"/"`
/// - `"about"` → `"/about"`
/// - `"/about"` → `"/about"` (at most one leading slash is stripped)
///
/// Nothing else is normalized: `"docs/faq/"` keeps its trailing slash.
pub fn slug_to_path(slug: &str) -> String {
    if slug.is_empty() || slug == "/" || slug == "home" {
        return "/".to_string();
    }
    let rest = slug.strip_prefix('/').unwrap_or(slug);
    format!("/{rest}")
}

/// Browser history as seen by the router.
pub trait History {
    /// The location the history currently points at.
    fn location(&self) -> String;
    /// Append an entry and make it current (`pushState`).
    fn push(&mut self, path: &str);
    /// Number of entries.
    fn len(&self) -> usize;
}

/// In-memory history with a cursor, like a browser tab's session history.
///
/// Pushing while the cursor is behind the newest entry drops the forward
/// entries, the same way a browser does.
#[derive(Debug, Clone)]
pub struct MemoryHistory {
    entries: Vec<String>,
    cursor: usize,
}

impl MemoryHistory {
    pub fn new(initial: &str) -> Self {
        Self {
            entries: vec![initial.to_string()],
            cursor: 0,
        }
    }

    /// Step back one entry. Returns the new location, or `None` at the start.
    pub fn back(&mut self) -> Option<String> {
        if self.cursor == 0 {
            return None;
        }
        self.cursor -= 1;
        Some(self.location())
    }

    /// Step forward one entry. Returns the new location, or `None` at the end.
    pub fn forward(&mut self) -> Option<String> {
        if self.cursor + 1 >= self.entries.len() {
            return None;
        }
        self.cursor += 1;
        Some(self.location())
    }
}

impl History for MemoryHistory {
    fn location(&self) -> String {
        self.entries[self.cursor].clone()
    }

    fn push(&mut self, path: &str) {
        self.entries.truncate(self.cursor + 1);
        self.entries.push(path.to_string());
        self.cursor = self.entries.len() - 1;
    }

    fn len(&self) -> usize {
        self.entries.len()
    }
}

/// Make `path` absolute: empty becomes `/`, a missing leading slash is added.
fn absolute(path: &str) -> String {
    if path.starts_with('/') {
        path.to_string()
    } else {
        format!("/{path}")
    }
}

/// Owns the current path and the history it is synchronized with.
#[derive(Debug)]
pub struct Router<H: History> {
    current: String,
    history: H,
}

impl<H: History> Router<H> {
    /// Create a router whose current path is the history's location.
    ///
    /// An empty location is read as `/` so the current path is never empty.
    pub fn new(history: H) -> Self {
        let current = absolute(&history.location());
        Self { current, history }
    }

    pub fn current(&self) -> &str {
        &self.current
    }

    pub fn history(&self) -> &H {
        &self.history
    }

    /// Navigate to `path`. Returns `false` (and touches nothing) when `path`
    /// is already current. A relative path is made absolute first.
    pub fn navigate(&mut self, path: &str) -> bool {
        let path = absolute(path);
        if path == self.current {
            return false;
        }
        debug!(from = %self.current, to = %path, "navigate");
        self.history.push(&path);
        self.current = path;
        true
    }

    /// Adopt the location reported by a back/forward transition. The history
    /// is expected to have moved already, as the browser's has when it fires
    /// `popstate`.
    pub fn on_popstate(&mut self, location: &str) {
        debug!(from = %self.current, to = %location, "popstate");
        self.current = absolute(location);
    }
}

impl Router<MemoryHistory> {
    /// Step the history back one entry and adopt its location. `None` at the
    /// oldest entry.
    pub fn back(&mut self) -> Option<&str> {
        let location = self.history.back()?;
        self.on_popstate(&location);
        Some(self.current())
    }

    /// Step the history forward one entry and adopt its location. `None` at
    /// the newest entry.
    pub fn forward(&mut self) -> Option<&str> {
        let location = self.history.forward()?;
        self.on_popstate(&location);
        Some(self.current())
    }
}

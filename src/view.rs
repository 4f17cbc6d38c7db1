//! The view: one owner for the current path, the fetch state, and the
//! document head.
//!
//! # Event model
//!
//! The view is single-threaded and driven by events. The only asynchronous
//! work is the manifest fetch, which runs on a worker thread and reports back
//! over an `mpsc` channel as a [`LoadResult`]. Each load is stamped with a
//! generation ([`LoadTicket`]); [`View::apply`] drops results whose ticket is
//! no longer current or that arrive after [`View::unmount`]. A late response
//! can therefore never overwrite newer state.
//!
//! ```text
//! mount ──► Uninitialized ──start_load──► Loading ──apply──► Loaded | Failed
//!   └─────► ConfigurationMissing (no URL: permanent, nothing fetched)
//! ```
//!
//! Rendering ([`View::render`]) is a pure function of the fetch state and the
//! current path.

use crate::client::{self, FetchState, ManifestSource};
use crate::compose::{Resolution, render_page, resolve_page};
use crate::config::SiteConfig;
use crate::document::{DocumentHead, base_document};
use crate::router::{History, MemoryHistory, Router, slug_to_path};
use crate::shell::{effective_site_name, render_shell, render_status};
use crate::types::Manifest;
use maud::Markup;
use std::sync::Arc;
use std::sync::mpsc::{Receiver, Sender, channel};
use std::thread;
use tracing::debug;

pub const CONFIG_MISSING_MESSAGE: &str =
    "Site configuration missing: no manifest URL is configured.";
pub const LOADING_MESSAGE: &str = "Loading…";

const CSS_STATIC: &str = include_str!("../static/style.css");

/// Generation stamp for one load.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadTicket(u64);

#[derive(Debug)]
pub struct LoadResult {
    pub ticket: LoadTicket,
    pub state: FetchState,
}

/// What [`View::apply`] did with a result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Applied {
    Accepted,
    Stale,
}

pub struct View<H: History> {
    config: SiteConfig,
    router: Router<H>,
    fetch: FetchState,
    head: DocumentHead,
    generation: u64,
    /// Loads started whose result has not been received yet.
    pending: usize,
    mounted: bool,
    results_tx: Sender<LoadResult>,
    results_rx: Receiver<LoadResult>,
}

impl<H: History> View<H> {
    /// Mount a view at the history's current location.
    ///
    /// Without a manifest URL the view goes straight to
    /// [`FetchState::ConfigurationMissing`] and will never fetch.
    pub fn mount(config: SiteConfig, history: H) -> Self {
        let fetch = if config.manifest_url().is_some() {
            FetchState::Uninitialized
        } else {
            FetchState::ConfigurationMissing
        };
        let (results_tx, results_rx) = channel();
        Self {
            config,
            router: Router::new(history),
            fetch,
            head: DocumentHead::default(),
            generation: 0,
            pending: 0,
            mounted: true,
            results_tx,
            results_rx,
        }
    }

    /// Mount a view whose manifest is already in hand, as if a load had just
    /// completed. Used by the static export, where every page is rendered
    /// from one fetch.
    pub fn preloaded(config: SiteConfig, history: H, manifest: Arc<Manifest>) -> Self {
        let mut view = Self::mount(config, history);
        let site_name = effective_site_name(view.config.site_name(), &manifest).to_string();
        view.head.apply_manifest(&manifest, &site_name);
        view.fetch = FetchState::Loaded(manifest);
        view
    }

    pub fn fetch_state(&self) -> &FetchState {
        &self.fetch
    }

    pub fn current_path(&self) -> &str {
        self.router.current()
    }

    pub fn router(&self) -> &Router<H> {
        &self.router
    }

    pub fn head(&self) -> &DocumentHead {
        &self.head
    }

    /// Begin a load on a worker thread. Returns `None` (and fetches nothing)
    /// when configuration is missing or the view is unmounted.
    pub fn start_load(&mut self, source: Arc<dyn ManifestSource>) -> Option<LoadTicket> {
        if !self.mounted || self.fetch == FetchState::ConfigurationMissing {
            return None;
        }
        let url = self.config.manifest_url()?.to_string();
        self.generation += 1;
        let ticket = LoadTicket(self.generation);
        self.fetch = FetchState::Loading;
        self.pending += 1;

        let tx = self.results_tx.clone();
        thread::spawn(move || {
            let state = client::load(Some(&url), source.as_ref());
            // The view may be gone; nobody to tell.
            let _ = tx.send(LoadResult { ticket, state });
        });
        Some(ticket)
    }

    /// Block until the next load result arrives and apply it. Returns `None`
    /// at once when no load is outstanding.
    pub fn wait_for_load(&mut self) -> Option<Applied> {
        if self.pending == 0 {
            return None;
        }
        let result = self.results_rx.recv().ok()?;
        self.pending -= 1;
        Some(self.apply(result))
    }

    /// Apply every result already delivered, without blocking.
    pub fn pump(&mut self) -> Vec<Applied> {
        let mut applied = Vec::new();
        while let Ok(result) = self.results_rx.try_recv() {
            self.pending -= 1;
            applied.push(self.apply(result));
        }
        applied
    }

    /// Apply a load result if it belongs to the current generation of a
    /// mounted view.
    pub fn apply(&mut self, result: LoadResult) -> Applied {
        if !self.mounted || result.ticket != LoadTicket(self.generation) {
            debug!(
                ticket = result.ticket.0,
                current = self.generation,
                "Dropping stale load result"
            );
            return Applied::Stale;
        }
        if let FetchState::Loaded(manifest) = &result.state {
            let site_name = effective_site_name(self.config.site_name(), manifest).to_string();
            self.head.apply_manifest(manifest, &site_name);
        }
        self.fetch = result.state;
        Applied::Accepted
    }

    /// Follow a link by slug.
    pub fn follow(&mut self, slug: &str) -> bool {
        self.router.navigate(&slug_to_path(slug))
    }

    /// Navigate to a path. A path without a leading slash is made absolute.
    pub fn navigate(&mut self, path: &str) -> bool {
        self.router.navigate(path)
    }

    /// A back/forward transition reported by the history, which has already
    /// moved to `location`.
    pub fn on_popstate(&mut self, location: &str) {
        if self.mounted {
            self.router.on_popstate(location);
        }
    }

    /// Tear down: later load results and popstate events are ignored.
    pub fn unmount(&mut self) {
        self.mounted = false;
    }

    /// Render the app region for the current state and path.
    pub fn render_body(&self) -> Markup {
        match &self.fetch {
            FetchState::ConfigurationMissing => {
                render_status("config-missing", CONFIG_MISSING_MESSAGE)
            }
            FetchState::Uninitialized | FetchState::Loading => {
                render_status("loading", LOADING_MESSAGE)
            }
            FetchState::Failed(message) => render_status("fetch-failed", message),
            FetchState::Loaded(manifest) => {
                let site_name = effective_site_name(self.config.site_name(), manifest);
                let resolution = resolve_page(manifest.pages(), self.current_path());
                if let Resolution::NotFound { fallback } = resolution {
                    debug!(
                        path = self.current_path(),
                        fallback = %fallback.slug,
                        "No page routes to path"
                    );
                }
                render_shell(
                    manifest,
                    site_name,
                    self.current_path(),
                    render_page(&resolution),
                )
            }
        }
    }

    /// Render the full document, with an optional client script appended.
    pub fn render_document(&self, script: Option<&str>) -> Markup {
        base_document(&self.head, CSS_STATIC, script, self.render_body())
    }

    pub fn render(&self) -> Markup {
        self.render_document(None)
    }
}

impl View<MemoryHistory> {
    /// The back button: step the history back and re-render from its
    /// location. `None` at the oldest entry or once unmounted.
    pub fn back(&mut self) -> Option<&str> {
        if !self.mounted {
            return None;
        }
        self.router.back()
    }

    /// The forward button. `None` at the newest entry or once unmounted.
    pub fn forward(&mut self) -> Option<&str> {
        if !self.mounted {
            return None;
        }
        self.router.forward()
    }
}

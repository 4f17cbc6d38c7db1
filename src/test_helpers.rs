//! Shared test utilities for the siteshell test suite.
//!
//! Provides the sample manifest from `fixtures/site.json`, builders for
//! manifest pieces, and [`RecordingSource`], an in-memory
//! [`ManifestSource`] that counts calls and can be held open to simulate a
//! slow response.
//!
//! # Usage
//!
//! ```rust
//! use crate::test_helpers::*;
//!
//! let (source, release) = RecordingSource::gated(SAMPLE_MANIFEST);
//! let mut view = View::mount(config_with_url(), MemoryHistory::new("/"));
//! view.start_load(Arc::new(source));
//! // ... view is Loading here ...
//! release.send(()).unwrap();
//! view.wait_for_load();
//! ```

use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::mpsc::{Receiver, Sender, channel};

use crate::client::{FetchError, ManifestSource};
use crate::config::SiteConfig;
use crate::sections::SectionKind;
use crate::types::{Footer, Manifest, NavLink, Page, Section, SiteContent};

pub const SAMPLE_MANIFEST: &str = include_str!("../fixtures/site.json");

// =========================================================================
// Builders
// =========================================================================

pub fn config_with_url() -> SiteConfig {
    SiteConfig {
        manifest_url: Some("https://example.com/site.json".to_string()),
        ..SiteConfig::default()
    }
}

pub fn link(label: &str, slug: &str) -> NavLink {
    NavLink {
        label: label.to_string(),
        slug: slug.to_string(),
    }
}

pub fn section(tag: &str, heading: Option<&str>, body: Option<&str>) -> Section {
    Section {
        kind: SectionKind::from_tag(tag),
        heading: heading.map(str::to_string),
        body: body.map(str::to_string),
    }
}

pub fn page(slug: &str, title: &str, sections: Vec<Section>) -> Page {
    Page {
        slug: slug.to_string(),
        title: title.to_string(),
        sections,
    }
}

/// "Acme Bakery" with Home/About nav, a footer, and the given pages.
pub fn manifest_with_pages(pages: Vec<Page>) -> Manifest {
    Manifest {
        id: 1,
        business_name: "Acme Bakery".to_string(),
        page_title: Some("Acme Bakery | Fresh Bread".to_string()),
        meta_description: Some("Fresh bread daily.".to_string()),
        cta: None,
        content: SiteContent {
            nav: vec![link("Home", "home"), link("About", "about")],
            footer: Some(Footer {
                text: Some("(c) Acme Bakery".to_string()),
                links: vec![link("Contact", "contact")],
            }),
            pages,
        },
    }
}

// =========================================================================
// Recording source
// =========================================================================

/// A manifest source that answers from memory and records how often it was
/// asked.
pub struct RecordingSource {
    response: Result<String, u16>,
    calls: AtomicUsize,
    gate: Option<Mutex<Receiver<()>>>,
}

impl RecordingSource {
    /// Answers with `json` (parsed on each call).
    pub fn ok(json: &str) -> Self {
        Self {
            response: Ok(json.to_string()),
            calls: AtomicUsize::new(0),
            gate: None,
        }
    }

    /// Answers with an HTTP status failure.
    pub fn failing(status: u16) -> Self {
        Self {
            response: Err(status),
            calls: AtomicUsize::new(0),
            gate: None,
        }
    }

    /// Answers with `json`, but only after the returned sender fires.
    pub fn gated(json: &str) -> (Self, Sender<()>) {
        let (tx, rx) = channel();
        let source = Self {
            gate: Some(Mutex::new(rx)),
            ..Self::ok(json)
        };
        (source, tx)
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl ManifestSource for RecordingSource {
    fn fetch(&self, _url: &str) -> Result<Manifest, FetchError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(gate) = &self.gate {
            let _ = gate.lock().unwrap().recv();
        }
        match &self.response {
            Ok(json) => Ok(Manifest::from_json(json)?),
            Err(status) => Err(FetchError::Status(*status)),
        }
    }
}

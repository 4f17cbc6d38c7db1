//! Document-level metadata and the outer HTML document.
//!
//! [`DocumentHead`] is the only state the renderer keeps outside its own
//! region: the title and the `<meta>` elements. Applying a manifest sets the
//! title and upserts the `description` meta, so loading the same or a newer
//! manifest any number of times leaves exactly one description element.

use crate::types::Manifest;
use maud::{DOCTYPE, Markup, PreEscaped, html};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetaTag {
    pub name: String,
    pub content: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentHead {
    pub title: String,
    pub metas: Vec<MetaTag>,
}

impl Default for DocumentHead {
    fn default() -> Self {
        Self {
            title: String::new(),
            metas: vec![MetaTag {
                name: "viewport".to_string(),
                content: "width=device-width, initial-scale=1.0".to_string(),
            }],
        }
    }
}

impl DocumentHead {
    /// Update the named meta element in place, or append it if absent.
    pub fn upsert_meta(&mut self, name: &str, content: &str) {
        match self.metas.iter_mut().find(|m| m.name == name) {
            Some(meta) => meta.content = content.to_string(),
            None => self.metas.push(MetaTag {
                name: name.to_string(),
                content: content.to_string(),
            }),
        }
    }

    pub fn meta(&self, name: &str) -> Option<&str> {
        self.metas
            .iter()
            .find(|m| m.name == name)
            .map(|m| m.content.as_str())
    }

    /// Apply a freshly loaded manifest.
    ///
    /// Title is the manifest's page title, else `site_name`. The description
    /// is the manifest's meta description, or empty when it has none.
    pub fn apply_manifest(&mut self, manifest: &Manifest, site_name: &str) {
        self.title = manifest
            .page_title
            .clone()
            .unwrap_or_else(|| site_name.to_string());
        let description = manifest.meta_description.as_deref().unwrap_or_default();
        self.upsert_meta("description", description);
    }
}

/// The full HTML document around `body`.
///
/// `script` is emitted raw at the end of `<body>`; `css` is inlined in `<head>`.
pub fn base_document(head: &DocumentHead, css: &str, script: Option<&str>, body: Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="UTF-8";
                @for meta in &head.metas {
                    meta name=(meta.name) content=(meta.content);
                }
                title { (head.title) }
                style { (PreEscaped(css)) }
            }
            body {
                div #app {
                    (body)
                }
                @if let Some(script) = script {
                    script { (PreEscaped(script)) }
                }
            }
        }
    }
}

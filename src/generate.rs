//! Static export.
//!
//! Renders every manifest page through a [`View`] mounted at that page's
//! routed path and writes the document to disk. The client router script is
//! embedded in each page so in-site links swap content with
//! `history.pushState` instead of reloading.
//!
//! ## Output Structure
//!
//! ```text
//! dist/
//! ├── index.html            # "/" (slug "home", "" or "/")
//! ├── about/index.html      # "/about"
//! ├── docs/faq/index.html   # "/docs/faq/" (trailing slash kept in the route)
//! └── 404.html              # not-found rendering with full chrome
//! ```
//!
//! When two pages route to the same path only the first is written, matching
//! page lookup. With an empty page list only `index.html` is written, showing
//! the "no pages" message.

use crate::config::SiteConfig;
use crate::router::{MemoryHistory, slug_to_path};
use crate::types::Manifest;
use crate::view::View;
use rayon::prelude::*;
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use thiserror::Error;
use tracing::debug;

const ROUTER_JS: &str = include_str!("../static/router.js");
const NOT_FOUND_FILE: &str = "404.html";
/// Routed path used to render `404.html`.
const NOT_FOUND_PATH: &str = "/404.html";

#[derive(Error, Debug)]
pub enum GenerateError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("page path {0:?} cannot be written inside the output directory")]
    UnsafePath(String),
}

/// One written file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedPage {
    /// Page title from the manifest, or a label for synthetic pages.
    pub title: String,
    /// Routed path, e.g. `/about`.
    pub path: String,
    /// File relative to the output directory.
    pub file: PathBuf,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GenerateReport {
    pub pages: Vec<GeneratedPage>,
    /// Slugs of pages skipped because an earlier page already writes their
    /// output file.
    pub shadowed: Vec<String>,
}

/// Map a routed path to its file under the output directory.
pub fn output_file_for(path: &str) -> Result<PathBuf, GenerateError> {
    let mut file = PathBuf::new();
    for segment in path.split('/').filter(|s| !s.is_empty()) {
        if segment == "." || segment == ".." || segment.contains('\\') {
            return Err(GenerateError::UnsafePath(path.to_string()));
        }
        file.push(segment);
    }
    file.push("index.html");
    Ok(file)
}

pub fn generate(
    manifest: Arc<Manifest>,
    config: &SiteConfig,
    output_dir: &Path,
) -> Result<GenerateReport, GenerateError> {
    let mut report = GenerateReport::default();
    let mut seen = HashSet::new();
    let mut targets = Vec::new();

    // Distinct routes can share a file ("/about" and "/about/"); the first
    // page to claim a file keeps it.
    for page in manifest.pages() {
        let path = slug_to_path(&page.slug);
        let file = output_file_for(&path)?;
        if !seen.insert(file.clone()) {
            report.shadowed.push(page.slug.clone());
            continue;
        }
        targets.push(GeneratedPage {
            title: page.title.clone(),
            path,
            file,
        });
    }

    if targets.is_empty() {
        targets.push(GeneratedPage {
            title: "No pages".to_string(),
            path: "/".to_string(),
            file: PathBuf::from("index.html"),
        });
    } else {
        targets.push(GeneratedPage {
            title: "Not found".to_string(),
            path: NOT_FOUND_PATH.to_string(),
            file: PathBuf::from(NOT_FOUND_FILE),
        });
    }

    fs::create_dir_all(output_dir)?;

    // Rendering is pure; each page gets its own view.
    targets
        .par_iter()
        .map(|target| -> Result<(), GenerateError> {
            let view = View::preloaded(
                config.clone(),
                MemoryHistory::new(&target.path),
                Arc::clone(&manifest),
            );
            let html = view.render_document(Some(ROUTER_JS)).into_string();
            let dest = output_dir.join(&target.file);
            if let Some(parent) = dest.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::write(&dest, html)?;
            debug!(path = %target.path, file = %target.file.display(), "Generated page");
            Ok(())
        })
        .collect::<Result<Vec<()>, _>>()?;

    report.pages = targets;
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compose::{NO_PAGES_MESSAGE, NOT_FOUND_MESSAGE};
    use crate::test_helpers::{
        SAMPLE_MANIFEST, config_with_url, manifest_with_pages, page, section,
    };
    use tempfile::TempDir;

    fn sample() -> Arc<Manifest> {
        Arc::new(Manifest::from_json(SAMPLE_MANIFEST).unwrap())
    }

    #[test]
    fn output_file_mapping() {
        assert_eq!(output_file_for("/").unwrap(), PathBuf::from("index.html"));
        assert_eq!(
            output_file_for("/about").unwrap(),
            PathBuf::from("about/index.html")
        );
        assert_eq!(
            output_file_for("/docs/faq/").unwrap(),
            PathBuf::from("docs/faq/index.html")
        );
    }

    #[test]
    fn output_file_rejects_parent_segments() {
        assert!(matches!(
            output_file_for("/../etc"),
            Err(GenerateError::UnsafePath(_))
        ));
    }

    #[test]
    fn writes_one_file_per_page_plus_404() {
        let tmp = TempDir::new().unwrap();
        let report = generate(sample(), &config_with_url(), tmp.path()).unwrap();

        assert_eq!(report.pages.len(), 4);
        assert!(tmp.path().join("index.html").is_file());
        assert!(tmp.path().join("about/index.html").is_file());
        assert!(tmp.path().join("contact/index.html").is_file());
        assert!(tmp.path().join("404.html").is_file());
    }

    #[test]
    fn pages_render_their_own_content_and_current_nav() {
        let tmp = TempDir::new().unwrap();
        generate(sample(), &config_with_url(), tmp.path()).unwrap();

        let about = fs::read_to_string(tmp.path().join("about/index.html")).unwrap();
        assert!(about.contains("Our Story"));
        assert!(about.contains("Founded in 1999.<br>Still baking."));
        assert!(about.contains(r#"<li class="current"><a href="/about""#));
        assert!(about.contains("<title>Acme Bakery | Fresh Bread</title>"));
        assert!(about.contains("history.pushState"));

        let contact = fs::read_to_string(tmp.path().join("contact/index.html")).unwrap();
        assert!(contact.contains("Get in touch"));
        assert!(!contact.contains("Not rendered"));
    }

    #[test]
    fn not_found_page_keeps_chrome() {
        let tmp = TempDir::new().unwrap();
        generate(sample(), &config_with_url(), tmp.path()).unwrap();

        let html = fs::read_to_string(tmp.path().join("404.html")).unwrap();
        assert!(html.contains(NOT_FOUND_MESSAGE));
        assert!(html.contains(r#"<header class="site-header">"#));
        assert!(!html.contains("Welcome"));
    }

    #[test]
    fn empty_manifest_writes_only_index() {
        let tmp = TempDir::new().unwrap();
        let manifest = Arc::new(manifest_with_pages(vec![]));
        let report = generate(manifest, &config_with_url(), tmp.path()).unwrap();

        assert_eq!(report.pages.len(), 1);
        let html = fs::read_to_string(tmp.path().join("index.html")).unwrap();
        assert!(html.contains(NO_PAGES_MESSAGE));
        assert!(!tmp.path().join("404.html").exists());
    }

    #[test]
    fn duplicate_routes_keep_first_page() {
        let tmp = TempDir::new().unwrap();
        let manifest = Arc::new(manifest_with_pages(vec![
            page("about", "First", vec![]),
            page("/about", "Second", vec![]),
        ]));
        let report = generate(manifest, &config_with_url(), tmp.path()).unwrap();

        assert_eq!(report.shadowed, vec!["/about".to_string()]);
        let about = report.pages.iter().find(|p| p.path == "/about").unwrap();
        assert_eq!(about.title, "First");
    }

    #[test]
    fn trailing_slash_route_cannot_overwrite_earlier_page() {
        let tmp = TempDir::new().unwrap();
        let manifest = Arc::new(manifest_with_pages(vec![
            page("about", "First", vec![section("hero", Some("First heading"), None)]),
            page("about/", "Second", vec![section("hero", Some("Second heading"), None)]),
        ]));
        let report = generate(manifest, &config_with_url(), tmp.path()).unwrap();

        assert_eq!(report.shadowed, vec!["about/".to_string()]);
        let files: HashSet<&PathBuf> = report.pages.iter().map(|p| &p.file).collect();
        assert_eq!(files.len(), report.pages.len());

        let about = fs::read_to_string(tmp.path().join("about/index.html")).unwrap();
        assert!(about.contains("First heading"));
        assert!(!about.contains("Second heading"));
    }
}

//! Page resolution and composition.
//!
//! Given the manifest's page list and the current path, pick the page to show
//! and render its sections in stored order. Two informational outcomes exist
//! besides a match, and they are kept distinct:
//!
//! - [`Resolution::NoPages`]: the manifest defines no pages at all.
//! - [`Resolution::NotFound`]: pages exist but none routes to the path. The
//!   first page is carried as `fallback` for callers that want it, but the
//!   rendered body is the not-found message alone.

use crate::router::slug_to_path;
use crate::sections::render_section;
use crate::types::Page;
use maud::{Markup, html};

pub const NOT_FOUND_MESSAGE: &str = "Page not found";
pub const NO_PAGES_MESSAGE: &str = "No pages defined.";

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Resolution<'a> {
    Found(&'a Page),
    NotFound { fallback: &'a Page },
    NoPages,
}

/// Select the first page whose routed slug equals `current_path`.
pub fn resolve_page<'a>(pages: &'a [Page], current_path: &str) -> Resolution<'a> {
    let Some(first) = pages.first() else {
        return Resolution::NoPages;
    };
    match pages.iter().find(|p| slug_to_path(&p.slug) == current_path) {
        Some(page) => Resolution::Found(page),
        None => Resolution::NotFound { fallback: first },
    }
}

/// Render the body for a resolution.
pub fn render_page(resolution: &Resolution<'_>) -> Markup {
    match resolution {
        Resolution::Found(page) => render_sections(page),
        Resolution::NotFound { .. } => html! {
            div.page-status.not-found {
                h1 { (NOT_FOUND_MESSAGE) }
            }
        },
        Resolution::NoPages => html! {
            div.page-status.no-pages {
                p { (NO_PAGES_MESSAGE) }
            }
        },
    }
}

/// Sections in stored order, each in its own block. Unrecognized sections
/// leave no wrapper behind.
fn render_sections(page: &Page) -> Markup {
    html! {
        article.page data-slug=(page.slug) {
            @for section in &page.sections {
                @if let Some(markup) = render_section(section) {
                    div.page-section { (markup) }
                }
            }
        }
    }
}

//! Persistent chrome around the composed page: site name, navigation, and
//! footer.
//!
//! Every navigable element is an `<a>` whose `href` and `data-path` are the
//! link's slug run through [`slug_to_path`]. The client router script
//! intercepts clicks on `[data-path]` and turns them into history pushes; the
//! [`View`](crate::view::View) does the same in-process via `follow`.

use crate::router::slug_to_path;
use crate::types::{Footer, Manifest, NavLink};
use maud::{Markup, html};

/// The configured override if set, otherwise the manifest's business name.
pub fn effective_site_name<'a>(site_name: Option<&'a str>, manifest: &'a Manifest) -> &'a str {
    site_name.unwrap_or(&manifest.business_name)
}

/// Render header, page body, and footer.
pub fn render_shell(
    manifest: &Manifest,
    site_name: &str,
    current_path: &str,
    page_body: Markup,
) -> Markup {
    html! {
        header.site-header {
            a.site-name href="/" data-path="/" { (site_name) }
            @if let Some(cta) = &manifest.cta {
                p.site-cta { (cta) }
            }
            @if !manifest.content.nav.is_empty() {
                (render_nav(&manifest.content.nav, current_path))
            }
        }
        main.site-main {
            (page_body)
        }
        @if let Some(footer) = &manifest.content.footer {
            (render_footer(footer))
        }
    }
}

/// Top navigation. The link routing to `current_path` is marked current.
pub fn render_nav(links: &[NavLink], current_path: &str) -> Markup {
    html! {
        nav.site-nav {
            ul {
                @for link in links {
                    @let path = slug_to_path(&link.slug);
                    @let is_current = path == current_path;
                    li class=[is_current.then_some("current")] {
                        a href=(path) data-path=(path)
                            aria-current=[is_current.then_some("page")] { (link.label) }
                    }
                }
            }
        }
    }
}

fn render_footer(footer: &Footer) -> Markup {
    html! {
        footer.site-footer {
            @if let Some(text) = &footer.text {
                p.footer-text { (text) }
            }
            @if !footer.links.is_empty() {
                ul.footer-links {
                    @for link in &footer.links {
                        @let path = slug_to_path(&link.slug);
                        li { a href=(path) data-path=(path) { (link.label) } }
                    }
                }
            }
        }
    }
}

/// Fixed displays for the states that have no manifest to wrap.
pub fn render_status(class: &str, message: &str) -> Markup {
    html! {
        main.site-main {
            div class={ "app-status " (class) } {
                p { (message) }
            }
        }
    }
}

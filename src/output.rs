//! CLI output formatting.
//!
//! Each command has a `format_*` function (returns `Vec<String>`) for
//! testability and a `print_*` wrapper that writes to stdout. Format
//! functions are pure: no I/O, no side effects.
//!
//! # Output Format
//!
//! ## Check
//!
//! ```text
//! Acme Bakery (manifest 1017)
//!
//! Pages
//! 001 Home → /
//!     hero, image-block, testimonial
//! 002 About → /about
//!     text-block, profile-row
//! 003 Contact → /contact
//!     contact-form, unknown-future-type (not rendered), faq
//!
//! Navigation
//!     Home → /
//!     About → /about
//! ```
//!
//! ## Build
//!
//! ```text
//! 001 Home → index.html
//! 002 About → about/index.html
//!     Not found → 404.html
//!
//! Generated 2 pages
//! ```

use crate::generate::GenerateReport;
use crate::router::slug_to_path;
use crate::types::{Manifest, NavLink};

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

fn link_line(link: &NavLink) -> String {
    format!("    {} → {}", link.label, slug_to_path(&link.slug))
}

// ============================================================================
// check
// ============================================================================

/// Inventory of a loaded manifest: pages with their routes and section tags,
/// then navigation and footer links.
pub fn format_check_output(manifest: &Manifest) -> Vec<String> {
    let mut lines = vec![format!(
        "{} (manifest {})",
        manifest.business_name, manifest.id
    )];

    lines.push(String::new());
    lines.push("Pages".to_string());
    if manifest.pages().is_empty() {
        lines.push("    (none)".to_string());
    }
    for (i, page) in manifest.pages().iter().enumerate() {
        lines.push(format!(
            "{} {} → {}",
            format_index(i + 1),
            page.title,
            slug_to_path(&page.slug)
        ));
        if !page.sections.is_empty() {
            let tags: Vec<String> = page
                .sections
                .iter()
                .map(|s| {
                    if s.kind.is_known() {
                        s.kind.to_string()
                    } else {
                        format!("{} (not rendered)", s.kind)
                    }
                })
                .collect();
            lines.push(format!("    {}", tags.join(", ")));
        }
    }

    if !manifest.content.nav.is_empty() {
        lines.push(String::new());
        lines.push("Navigation".to_string());
        lines.extend(manifest.content.nav.iter().map(link_line));
    }

    if let Some(footer) = &manifest.content.footer
        && !footer.links.is_empty()
    {
        lines.push(String::new());
        lines.push("Footer".to_string());
        lines.extend(footer.links.iter().map(link_line));
    }

    lines
}

pub fn print_check_output(manifest: &Manifest) {
    for line in format_check_output(manifest) {
        println!("{}", line);
    }
}

// ============================================================================
// build
// ============================================================================

/// Files written by a build. Manifest pages are numbered; synthetic pages
/// (404, empty-site index) are indented without a number.
pub fn format_generate_output(manifest: &Manifest, report: &GenerateReport) -> Vec<String> {
    let mut lines = Vec::new();
    let mut position = 0;
    for page in &report.pages {
        let is_manifest_page = manifest
            .pages()
            .iter()
            .any(|p| slug_to_path(&p.slug) == page.path);
        if is_manifest_page {
            position += 1;
            lines.push(format!(
                "{} {} → {}",
                format_index(position),
                page.title,
                page.file.display()
            ));
        } else {
            lines.push(format!("    {} → {}", page.title, page.file.display()));
        }
    }
    for slug in &report.shadowed {
        lines.push(format!(
            "    skipped {} ({} shares an earlier page's file)",
            slug,
            slug_to_path(slug)
        ));
    }
    lines.push(String::new());
    let noun = if position == 1 { "page" } else { "pages" };
    lines.push(format!("Generated {} {}", position, noun));
    lines
}

pub fn print_generate_output(manifest: &Manifest, report: &GenerateReport) {
    for line in format_generate_output(manifest, report) {
        println!("{}", line);
    }
}

// ============================================================================
// Tests
// ============================================================================

//! # siteshell
//!
//! Render a small marketing site from a JSON site manifest: a header with
//! navigation, pages built from typed content sections, and a footer.
//!
//! # Architecture
//!
//! ```text
//! client      manifest URL  →  Manifest            (one fetch, no retry)
//! router      location      →  current path        (push / popstate)
//! compose     pages + path  →  Resolution → Markup (first match wins)
//! sections    Section       →  Option<Markup>      (unknown types render nothing)
//! shell       Manifest      →  header / nav / footer chrome
//! view        all of the above, owned by one event-driven view
//! ```
//!
//! Rendering is a pure function of the loaded manifest and the current path.
//! The only mutable state lives in [`view::View`]: the fetch state, the
//! router, and the document head.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`types`] | Manifest data model (`Manifest`, `NavLink`, `Footer`, `Page`, `Section`) |
//! | [`client`] | Manifest fetching over HTTP or from disk; `FetchState` |
//! | [`router`] | `slug_to_path`, the `History` trait, and the `Router` |
//! | [`sections`] | `SectionKind` and per-type rendering |
//! | [`compose`] | Active-page resolution and page body rendering |
//! | [`shell`] | Site name, navigation, footer |
//! | [`document`] | Document head (title, description meta) and the HTML skeleton |
//! | [`view`] | Event-driven view: load lifecycle, navigation, rendering |
//! | [`generate`] | Static export of every page to an output directory |
//! | [`config`] | Layered `siteshell.toml` + environment configuration |
//! | [`output`] | CLI output formatting |
//!
//! # Design Decisions
//!
//! ## Closed Section Enum
//!
//! The manifest's section `type` is an open string, but it is deserialized
//! straight into [`sections::SectionKind`], a closed enum with an `Unknown`
//! variant. Adding a section type means adding a variant, and the compiler
//! points at every `match` that must learn about it. Unknown tags degrade to
//! nothing so older renderers survive newer manifests.
//!
//! ## Generation-Stamped Loads
//!
//! The fetch runs off the view's thread and its result comes back over a
//! channel. Every load carries a ticket; results for an older ticket, or for
//! an unmounted view, are dropped instead of applied.
//!
//! ## Maud for HTML
//!
//! HTML is generated with [Maud](https://maud.lambda.xyz/). All interpolation
//! is auto-escaped, so manifest text can never inject markup.

pub mod client;
pub mod compose;
pub mod config;
pub mod document;
pub mod generate;
pub mod output;
pub mod router;
pub mod sections;
pub mod shell;
pub mod types;
pub mod view;

#[cfg(test)]
pub(crate) mod test_helpers;

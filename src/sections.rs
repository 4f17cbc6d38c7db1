//! Section dispatch: from a section's `type` tag to its markup.
//!
//! The tag is an open string in the manifest but a closed enum here. Known
//! tags get their own variant; anything else lands in
//! [`SectionKind::Unknown`] and renders as nothing. Unknown types are not
//! errors and are not logged, so a manifest written for a newer renderer
//! still produces a page.
//!
//! | Tag | Rendering |
//! |-----|-----------|
//! | `hero` | large heading + body, both default to empty |
//! | `text-block`, `content-block` | optional heading, optional body with line breaks kept |
//! | `image-block` | optional heading/body + placeholder visual |
//! | `profile-row`, `testimonial`, `faq`, `contact-form` | labeled block showing the raw tag |
//! | anything else | nothing |

use crate::types::Section;
use maud::{Markup, html};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum SectionKind {
    Hero,
    TextBlock,
    ContentBlock,
    ImageBlock,
    ProfileRow,
    Testimonial,
    Faq,
    ContactForm,
    Unknown(String),
}

impl SectionKind {
    /// Exact, case-sensitive match on the tag.
    pub fn from_tag(tag: &str) -> Self {
        match tag {
            "hero" => Self::Hero,
            "text-block" => Self::TextBlock,
            "content-block" => Self::ContentBlock,
            "image-block" => Self::ImageBlock,
            "profile-row" => Self::ProfileRow,
            "testimonial" => Self::Testimonial,
            "faq" => Self::Faq,
            "contact-form" => Self::ContactForm,
            other => Self::Unknown(other.to_string()),
        }
    }

    pub fn as_tag(&self) -> &str {
        match self {
            Self::Hero => "hero",
            Self::TextBlock => "text-block",
            Self::ContentBlock => "content-block",
            Self::ImageBlock => "image-block",
            Self::ProfileRow => "profile-row",
            Self::Testimonial => "testimonial",
            Self::Faq => "faq",
            Self::ContactForm => "contact-form",
            Self::Unknown(tag) => tag,
        }
    }

    pub fn is_known(&self) -> bool {
        !matches!(self, Self::Unknown(_))
    }
}

impl From<String> for SectionKind {
    fn from(tag: String) -> Self {
        Self::from_tag(&tag)
    }
}

impl From<SectionKind> for String {
    fn from(kind: SectionKind) -> Self {
        kind.as_tag().to_string()
    }
}

impl fmt::Display for SectionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_tag())
    }
}

/// Render one section, or `None` for an unrecognized type.
pub fn render_section(section: &Section) -> Option<Markup> {
    let heading = section.heading.as_deref();
    let body = section.body.as_deref();

    let markup = match &section.kind {
        SectionKind::Hero => html! {
            section.section.section-hero {
                h1.hero-heading { (heading.unwrap_or_default()) }
                p.hero-body { (body.unwrap_or_default()) }
            }
        },
        SectionKind::TextBlock | SectionKind::ContentBlock => html! {
            section.section.section-text data-type=(section.kind) {
                @if let Some(heading) = heading {
                    h2 { (heading) }
                }
                @if let Some(body) = body {
                    (multiline_body(body))
                }
            }
        },
        SectionKind::ImageBlock => html! {
            section.section.section-image {
                @if let Some(heading) = heading {
                    h2 { (heading) }
                }
                div.image-placeholder role="img" aria-label="Image placeholder" {}
                @if let Some(body) = body {
                    p { (body) }
                }
            }
        },
        SectionKind::ProfileRow
        | SectionKind::Testimonial
        | SectionKind::Faq
        | SectionKind::ContactForm => html! {
            section.section.section-generic data-type=(section.kind) {
                span.section-type { (section.kind) }
                @if let Some(heading) = heading {
                    h3 { (heading) }
                }
                @if let Some(body) = body {
                    p { (body) }
                }
            }
        },
        SectionKind::Unknown(_) => return None,
    };
    Some(markup)
}

/// Body text with each embedded newline kept as a `<br>`.
fn multiline_body(body: &str) -> Markup {
    html! {
        p.section-body {
            @for (i, line) in body.split('\n').enumerate() {
                @if i > 0 { br; }
                (line)
            }
        }
    }
}

//! Manifest types shared by the client, composer, and shell.
//!
//! The manifest is produced by an external system and is assumed to be
//! well-formed. Optional collections default to empty so a sparse manifest
//! still deserializes; required identity fields are not validated here.

use crate::sections::SectionKind;
use serde::{Deserialize, Serialize};

/// Root site manifest.
///
/// Immutable once fetched. A refetch replaces the whole value, it is never
/// patched in place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Manifest {
    /// Numeric identifier assigned by the manifest producer.
    pub id: u64,
    /// Business name, shown as the site name unless overridden by config.
    #[serde(default)]
    pub business_name: String,
    /// Document title. Falls back to the effective site name when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page_title: Option<String>,
    /// Content of the `description` meta element.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta_description: Option<String>,
    /// Call-to-action line shown in the header.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cta: Option<String>,
    #[serde(default)]
    pub content: SiteContent,
}

/// Navigation, footer, and pages.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SiteContent {
    #[serde(default)]
    pub nav: Vec<NavLink>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub footer: Option<Footer>,
    /// Ordered page list. Slugs are expected to be unique; lookup takes the first match.
    #[serde(default)]
    pub pages: Vec<Page>,
}

/// A link in the top navigation or the footer. The slug is the routing key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavLink {
    pub label: String,
    pub slug: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Footer {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub links: Vec<NavLink>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page {
    pub slug: String,
    pub title: String,
    #[serde(default)]
    pub sections: Vec<Section>,
}

/// A single tagged content block.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Section {
    #[serde(rename = "type")]
    pub kind: SectionKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub heading: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
}

impl Manifest {
    /// Parse a manifest from a JSON document.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn pages(&self) -> &[Page] {
        &self.content.pages
    }
}

//! The site data document.

use std::path::Path;

use serde::Deserialize;

use crate::entry::TimelineEntry;
use crate::publication::Publication;

/// The portfolio data document.
///
/// All fields are optional; a section whose field is missing or empty is
/// simply not rendered. The document is immutable once loaded.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct SiteData {
    /// Site owner's display name (hero, brand, footer).
    pub name: Option<String>,
    /// Hero tagline. May contain markup.
    pub tagline: Option<String>,
    /// Contact email address.
    pub email: Option<String>,
    /// Location line for the contact section.
    pub location: Option<String>,
    /// Home summary paragraph. May contain markup.
    pub summary: Option<String>,
    /// About page paragraph.
    pub about: Option<String>,
    /// Hero photo source path or URL.
    pub photo: Option<String>,
    /// Research interest keywords.
    #[serde(default)]
    pub interests: Vec<String>,
    /// Education entries, one free-text line each.
    #[serde(default)]
    pub education: Vec<String>,
    /// External profile links (e.g. scholar, code hosting).
    #[serde(default)]
    pub profiles: Vec<ProfileLink>,
    /// Featured press/outreach cards for the home page.
    #[serde(default)]
    pub featured: Vec<FeaturedCard>,
    /// Publication records, string or structured.
    #[serde(default)]
    pub publications: Vec<Publication>,
    /// Award timeline entries.
    #[serde(default)]
    pub awards: Vec<TimelineEntry>,
    /// Teaching timeline entries.
    #[serde(default)]
    pub teaching: Vec<TimelineEntry>,
    /// Talk timeline entries.
    #[serde(default)]
    pub talks: Vec<TimelineEntry>,
}

/// An external profile link shown with the hero contact row.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct ProfileLink {
    /// Visible link label.
    pub label: Option<String>,
    /// Link target.
    pub url: Option<String>,
    /// Icon image path, rendered before the label when present.
    pub icon: Option<String>,
}

/// A featured card on the home page.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct FeaturedCard {
    /// Card headline.
    pub title: Option<String>,
    /// Link target for the whole card.
    pub url: Option<String>,
    /// Source attribution line.
    pub source: Option<String>,
    /// Card image path or URL.
    pub image: Option<String>,
    /// Small kicker label above the title.
    pub kicker: Option<String>,
}

/// Error type for document loading.
#[derive(Debug, thiserror::Error)]
pub enum DataError {
    /// File could not be read.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// Document is not valid JSON or violates the (loose) schema.
    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),
}

impl SiteData {
    /// Parse a data document from a JSON string.
    ///
    /// # Errors
    ///
    /// Returns [`DataError::Parse`] if the string is not valid JSON.
    pub fn from_json_str(content: &str) -> Result<Self, DataError> {
        Ok(serde_json::from_str(content)?)
    }

    /// Load a data document from a file.
    ///
    /// # Errors
    ///
    /// Returns [`DataError::Io`] if the file cannot be read and
    /// [`DataError::Parse`] if its content is not valid JSON.
    pub fn load(path: &Path) -> Result<Self, DataError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json_str(&content)
    }
}

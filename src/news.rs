//! Defines the [`NewsRecord`], [`Section`], and [`Content`] types which hold
//! news items in memory between loading ([`crate::loader`]) and rendering
//! ([`crate::render`]).

use serde::Deserialize;

/// Represents a single news item parsed from one JSON file. Only the four
/// fields below are read; any other keys in the source document are ignored.
#[derive(Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct NewsRecord {
    /// The item's image URLs. Only the first one is rendered.
    pub images: Vec<String>,

    /// The headline.
    pub title: String,

    /// A short summary of the article.
    pub summary: String,

    /// The URL of the full article.
    pub actual_link: String,
}

impl NewsRecord {
    /// Returns the image that gets rendered for this record, if the record has
    /// any images at all.
    pub fn first_image(&self) -> Option<&str> {
        self.images.first().map(String::as_str)
    }
}

/// A named group of [`NewsRecord`]s. The name is taken from the subfolder the
/// records were loaded from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Section {
    /// The section heading, i.e. the subfolder's name.
    pub name: String,

    /// The section's records, in directory-listing order.
    pub records: Vec<NewsRecord>,
}

/// Selects how the data directory is laid out.
#[derive(Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Grouping {
    /// Every `.json` file directly inside the data directory is a record.
    Flat,

    /// Every immediate subdirectory of the data directory is a [`Section`]
    /// and its `.json` files are that section's records.
    Sectioned,
}

impl Default for Grouping {
    fn default() -> Self {
        Grouping::Flat
    }
}

/// The loaded contents of a data directory, in one of the two [`Grouping`]
/// shapes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Content {
    Flat(Vec<NewsRecord>),
    Sectioned(Vec<Section>),
}

impl Content {
    /// The total number of records, across all sections.
    pub fn record_count(&self) -> usize {
        match self {
            Content::Flat(records) => records.len(),
            Content::Sectioned(sections) => {
                sections.iter().map(|s| s.records.len()).sum()
            }
        }
    }
}

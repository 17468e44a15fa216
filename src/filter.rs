//! Sidebar filter state and the filter applier
//!
//! A [`FilterSelection`] captures the three sidebar controls for one render:
//! artist multi-select, album-type multi-select and the explicit-content
//! tri-state. [`apply`] turns a dataset plus a selection into a
//! [`FilteredDataset`], a borrowed view over the matching rows.
//!
//! Dimensions combine with AND, values within one multi-select combine with
//! OR. An empty multi-select or `All` places no constraint.

use crate::dataset::{Dataset, Row, TrackRecord};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Explicit-content selector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(into = "String", from = "ExplicitValue")]
pub enum ExplicitFilter {
    #[default]
    All,
    Only(bool),
}

impl ExplicitFilter {
    pub const OPTIONS: [ExplicitFilter; 3] = [
        ExplicitFilter::All,
        ExplicitFilter::Only(true),
        ExplicitFilter::Only(false),
    ];

    pub fn matches(&self, explicit: bool) -> bool {
        match self {
            ExplicitFilter::All => true,
            ExplicitFilter::Only(wanted) => *wanted == explicit,
        }
    }
}

impl fmt::Display for ExplicitFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExplicitFilter::All => write!(f, "All"),
            ExplicitFilter::Only(true) => write!(f, "True"),
            ExplicitFilter::Only(false) => write!(f, "False"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown explicit selector: {0:?}")]
pub struct UnknownExplicit(pub String);

impl FromStr for ExplicitFilter {
    type Err = UnknownExplicit;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "all" | "" => Ok(ExplicitFilter::All),
            "true" | "1" => Ok(ExplicitFilter::Only(true)),
            "false" | "0" => Ok(ExplicitFilter::Only(false)),
            _ => Err(UnknownExplicit(s.to_string())),
        }
    }
}

impl From<ExplicitFilter> for String {
    fn from(value: ExplicitFilter) -> Self {
        value.to_string()
    }
}

// Controls only ever offer the three known values; anything else means "All"
impl From<String> for ExplicitFilter {
    fn from(value: String) -> Self {
        value.parse().unwrap_or_default()
    }
}

/// Wire form of the selector: `"True"`-style text or a plain JSON bool
#[derive(Deserialize)]
#[serde(untagged)]
enum ExplicitValue {
    Flag(bool),
    Text(String),
}

impl From<ExplicitValue> for ExplicitFilter {
    fn from(value: ExplicitValue) -> Self {
        match value {
            ExplicitValue::Flag(flag) => ExplicitFilter::Only(flag),
            ExplicitValue::Text(text) => ExplicitFilter::from(text),
        }
    }
}

/// Current sidebar selection
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterSelection {
    pub artists: Vec<String>,
    pub album_types: Vec<String>,
    pub explicit: ExplicitFilter,
}

impl FilterSelection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_artists<I, S>(mut self, artists: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.artists = artists.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_album_types<I, S>(mut self, album_types: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.album_types = album_types.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_explicit(mut self, explicit: ExplicitFilter) -> Self {
        self.explicit = explicit;
        self
    }

    /// True when no control constrains the rows
    pub fn is_unconstrained(&self) -> bool {
        self.artists.is_empty() && self.album_types.is_empty() && self.explicit == ExplicitFilter::All
    }

    /// Parse `artist=..&album_type=..&explicit=..` query pairs.
    ///
    /// Repeated keys accumulate; unknown keys are ignored.
    pub fn from_query(query: &str) -> Result<Self, serde_urlencoded::de::Error> {
        let pairs: Vec<(String, String)> = serde_urlencoded::from_str(query)?;
        let mut selection = Self::default();

        for (key, value) in pairs {
            match key.as_str() {
                "artist" | "artists" => selection.artists.push(value),
                "album_type" | "album_types" => selection.album_types.push(value),
                "explicit" => selection.explicit = ExplicitFilter::from(value),
                _ => {}
            }
        }

        Ok(selection)
    }

    pub fn from_json(body: &str) -> serde_json::Result<Self> {
        serde_json::from_str(body)
    }

    /// Compiled form of the selection for row tests
    fn predicate(&self) -> Predicate<'_> {
        Predicate {
            artists: self.artists.iter().map(String::as_str).collect(),
            album_types: self.album_types.iter().map(String::as_str).collect(),
            explicit: self.explicit,
        }
    }
}

struct Predicate<'a> {
    artists: HashSet<&'a str>,
    album_types: HashSet<&'a str>,
    explicit: ExplicitFilter,
}

impl Predicate<'_> {
    fn matches(&self, track: &TrackRecord) -> bool {
        (self.artists.is_empty() || self.artists.contains(track.artist_name.as_str()))
            && (self.album_types.is_empty()
                || self.album_types.contains(track.album_type.as_str()))
            && self.explicit.matches(track.explicit)
    }
}

/// Rows of a [`Dataset`] that passed a selection
///
/// Holds indices into the borrowed dataset, always ascending, so the view keeps
/// the dataset's row order and schema.
#[derive(Debug, Clone)]
pub struct FilteredDataset<'a> {
    dataset: &'a Dataset,
    indices: Vec<usize>,
}

impl<'a> FilteredDataset<'a> {
    /// Unfiltered view over the whole dataset
    pub fn all(dataset: &'a Dataset) -> Self {
        Self {
            dataset,
            indices: (0..dataset.len()).collect(),
        }
    }

    /// Apply a further selection to this view
    pub fn refine(&self, selection: &FilterSelection) -> Self {
        let predicate = selection.predicate();
        let indices = self
            .indices
            .iter()
            .copied()
            .filter(|&i| predicate.matches(&self.dataset.rows()[i].track))
            .collect();
        Self {
            dataset: self.dataset,
            indices,
        }
    }

    pub fn dataset(&self) -> &'a Dataset {
        self.dataset
    }

    pub fn indices(&self) -> &[usize] {
        &self.indices
    }

    pub fn columns(&self) -> &'a [String] {
        self.dataset.columns()
    }

    pub fn len(&self) -> usize {
        self.indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    pub fn rows(&self) -> impl Iterator<Item = &'a Row> + '_ {
        let rows = self.dataset.rows();
        self.indices.iter().map(move |&i| &rows[i])
    }

    pub fn tracks(&self) -> impl Iterator<Item = &'a TrackRecord> + '_ {
        self.rows().map(|r| &r.track)
    }
}

/// Filter the dataset down to the rows matching `selection`
pub fn apply<'a>(dataset: &'a Dataset, selection: &FilterSelection) -> FilteredDataset<'a> {
    FilteredDataset::all(dataset).refine(selection)
}

/// Choices offered by the sidebar controls
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FilterOptions {
    pub artists: Vec<String>,
    pub album_types: Vec<String>,
    pub explicit: Vec<ExplicitFilter>,
}

impl FilterOptions {
    /// Distinct artists and album types in first-seen order
    pub fn from_dataset(dataset: &Dataset) -> Self {
        Self {
            artists: unique_in_order(dataset.tracks().map(|t| t.artist_name.as_str())),
            album_types: unique_in_order(dataset.tracks().map(|t| t.album_type.as_str())),
            explicit: ExplicitFilter::OPTIONS.to_vec(),
        }
    }
}

pub(crate) fn unique_in_order<'a, I>(values: I) -> Vec<String>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut seen = HashSet::new();
    values
        .into_iter()
        .filter(|v| seen.insert(*v))
        .map(str::to_string)
        .collect()
}

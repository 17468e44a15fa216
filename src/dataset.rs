//! Track dataset loading
//!
//! The dashboard works over a single pre-cleaned CSV of track metadata. The
//! file is read once, validated against the required schema and kept in
//! memory for the lifetime of the process.
//!
//! # Required columns
//!
//! | Column | Type |
//! |--------|------|
//! | `artist_name` | text |
//! | `album_type` | text |
//! | `explicit` | boolean (`True`/`False`, `true`/`false`, `1`/`0`) |
//! | `track_name` | text |
//! | `track_popularity` | number (0-100) |
//! | `artist_popularity` | number (0-100) |
//! | `track_duration_min` | number |
//!
//! Any other columns are carried along untouched so the preview table can
//! show the rows exactly as they appear in the file.

use once_cell::sync::OnceCell;
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info};

/// Path used when no `--data` override is given
pub const DEFAULT_DATA_PATH: &str = "spotify_data clean.csv";

pub const ARTIST_NAME: &str = "artist_name";
pub const ALBUM_TYPE: &str = "album_type";
pub const EXPLICIT: &str = "explicit";
pub const TRACK_NAME: &str = "track_name";
pub const TRACK_POPULARITY: &str = "track_popularity";
pub const ARTIST_POPULARITY: &str = "artist_popularity";
pub const TRACK_DURATION_MIN: &str = "track_duration_min";

pub const REQUIRED_COLUMNS: [&str; 7] = [
    ARTIST_NAME,
    ALBUM_TYPE,
    EXPLICIT,
    TRACK_NAME,
    TRACK_POPULARITY,
    ARTIST_POPULARITY,
    TRACK_DURATION_MIN,
];

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("dataset not found: {}", path.display())]
    NotFound { path: PathBuf },

    #[error("failed to read dataset: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("missing required column(s): {}", .0.join(", "))]
    MissingColumns(Vec<String>),

    #[error("line {line}: invalid value {value:?} in column '{column}'")]
    InvalidValue {
        line: u64,
        column: &'static str,
        value: String,
    },
}

/// One row of the dataset, typed
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrackRecord {
    pub artist_name: String,
    pub album_type: String,
    pub explicit: bool,
    pub track_name: String,
    pub track_popularity: f64,
    pub artist_popularity: f64,
    pub track_duration_min: f64,
}

/// A dataset row: the typed record plus the raw cells in file column order
#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    pub track: TrackRecord,
    pub cells: Vec<String>,
}

/// Immutable in-memory table of tracks
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dataset {
    columns: Vec<String>,
    rows: Vec<Row>,
}

/// Positions of the required columns within the header
struct ColumnIndex {
    artist_name: usize,
    album_type: usize,
    explicit: usize,
    track_name: usize,
    track_popularity: usize,
    artist_popularity: usize,
    track_duration_min: usize,
}

impl ColumnIndex {
    fn resolve(headers: &[String]) -> Result<Self, LoadError> {
        let find = |name: &str| headers.iter().position(|h| h == name);

        let missing: Vec<String> = REQUIRED_COLUMNS
            .iter()
            .filter(|c| find(c).is_none())
            .map(|c| c.to_string())
            .collect();
        if !missing.is_empty() {
            return Err(LoadError::MissingColumns(missing));
        }

        // All present, checked above
        let idx = |name: &str| find(name).unwrap_or_default();
        Ok(Self {
            artist_name: idx(ARTIST_NAME),
            album_type: idx(ALBUM_TYPE),
            explicit: idx(EXPLICIT),
            track_name: idx(TRACK_NAME),
            track_popularity: idx(TRACK_POPULARITY),
            artist_popularity: idx(ARTIST_POPULARITY),
            track_duration_min: idx(TRACK_DURATION_MIN),
        })
    }
}

impl Dataset {
    /// Read and validate a dataset from disk
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, LoadError> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(LoadError::NotFound {
                path: path.to_path_buf(),
            });
        }

        let file = std::fs::File::open(path)?;
        let dataset = Self::from_reader(file)?;
        info!(
            path = %path.display(),
            rows = dataset.len(),
            columns = dataset.columns.len(),
            "dataset loaded"
        );
        Ok(dataset)
    }

    /// Parse a dataset from any CSV source
    pub fn from_reader<R: std::io::Read>(reader: R) -> Result<Self, LoadError> {
        let mut rdr = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);

        let columns: Vec<String> = rdr.headers()?.iter().map(|h| h.to_string()).collect();
        let index = ColumnIndex::resolve(&columns)?;

        let mut rows = Vec::new();
        for record in rdr.records() {
            let record = record?;
            let line = record.position().map(|p| p.line()).unwrap_or_default();
            let cell = |i: usize| record.get(i).unwrap_or_default();

            let track = TrackRecord {
                artist_name: cell(index.artist_name).to_string(),
                album_type: cell(index.album_type).to_string(),
                explicit: parse_bool(cell(index.explicit), line)?,
                track_name: cell(index.track_name).to_string(),
                track_popularity: parse_number(
                    cell(index.track_popularity),
                    TRACK_POPULARITY,
                    line,
                )?,
                artist_popularity: parse_number(
                    cell(index.artist_popularity),
                    ARTIST_POPULARITY,
                    line,
                )?,
                track_duration_min: parse_number(
                    cell(index.track_duration_min),
                    TRACK_DURATION_MIN,
                    line,
                )?,
            };

            rows.push(Row {
                track,
                cells: record.iter().map(|c| c.to_string()).collect(),
            });
        }

        debug!(rows = rows.len(), "parsed dataset");
        Ok(Self { columns, rows })
    }

    /// Build a dataset directly from typed records (required columns only)
    pub fn from_tracks(tracks: Vec<TrackRecord>) -> Self {
        let columns = REQUIRED_COLUMNS.iter().map(|c| c.to_string()).collect();
        let rows = tracks
            .into_iter()
            .map(|track| Row {
                cells: vec![
                    track.artist_name.clone(),
                    track.album_type.clone(),
                    if track.explicit { "True" } else { "False" }.to_string(),
                    track.track_name.clone(),
                    track.track_popularity.to_string(),
                    track.artist_popularity.to_string(),
                    track.track_duration_min.to_string(),
                ],
                track,
            })
            .collect();
        Self { columns, rows }
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn tracks(&self) -> impl Iterator<Item = &TrackRecord> {
        self.rows.iter().map(|r| &r.track)
    }
}

fn parse_bool(value: &str, line: u64) -> Result<bool, LoadError> {
    match value.to_ascii_lowercase().as_str() {
        "true" | "1" => Ok(true),
        "false" | "0" => Ok(false),
        _ => Err(LoadError::InvalidValue {
            line,
            column: EXPLICIT,
            value: value.to_string(),
        }),
    }
}

fn parse_number(value: &str, column: &'static str, line: u64) -> Result<f64, LoadError> {
    value
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| LoadError::InvalidValue {
            line,
            column,
            value: value.to_string(),
        })
}

/// Load-once holder for the process-wide dataset
///
/// The first successful [`DatasetCache::get`] reads the file; every later
/// call hands back the same `Arc` without touching storage. Failed loads are
/// not remembered, so a retry after fixing the file works.
#[derive(Debug)]
pub struct DatasetCache {
    path: PathBuf,
    cell: OnceCell<Arc<Dataset>>,
}

impl DatasetCache {
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self {
            path: path.into(),
            cell: OnceCell::new(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn get(&self) -> Result<Arc<Dataset>, LoadError> {
        self.cell
            .get_or_try_init(|| Dataset::load(&self.path).map(Arc::new))
            .cloned()
    }

    pub fn is_loaded(&self) -> bool {
        self.cell.get().is_some()
    }
}

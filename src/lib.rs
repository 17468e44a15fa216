//! Trackboard - interactive music-track metadata dashboard
//!
//! Trackboard loads a pre-cleaned CSV of track metadata once, then serves a
//! single-page dashboard where the viewer narrows the rows down by artist,
//! album type and explicit content. Every change re-renders the whole page
//! from the filtered rows: four headline metrics, four charts and a preview
//! of the first 20 rows.
//!
//! # Quick Start
//!
//! ```no_run
//! use trackboard::{view, Dataset, ExplicitFilter, FilterSelection};
//!
//! let dataset = Dataset::load("spotify_data clean.csv")?;
//! let selection = FilterSelection::new()
//!     .with_album_types(["single"])
//!     .with_explicit(ExplicitFilter::Only(false));
//!
//! let vm = view::render(&dataset, &selection);
//! println!("{} clean singles", vm.summary.count);
//! # Ok::<(), trackboard::LoadError>(())
//! ```
//!
//! # Render model
//!
//! There is no hidden reactive state. A request turns into a
//! [`FilterSelection`] value, [`view::render`] turns the shared dataset plus
//! that selection into a [`ViewModel`], and the page draws it. The only thing
//! that outlives a request is the memoized [`Dataset`] inside a
//! [`DatasetCache`].
//!
//! # Modules
//!
//! - [`dataset`]: CSV loading, schema validation, load-once cache
//! - [`filter`]: sidebar selection and the filter applier
//! - [`metrics`]: count and mean aggregates
//! - [`charts`]: Vega-Lite chart descriptions
//! - [`preview`]: first-rows table
//! - [`page`]: static page shell and embedded UI
//! - [`view`]: the pure render function
//! - [`serve`]: HTTP server
//! - [`report`]: HTML/JSON snapshots

pub mod charts;
pub mod dataset;
pub mod filter;
pub mod metrics;
pub mod page;
pub mod preview;
pub mod report;
pub mod serve;
pub mod view;

pub use dataset::{Dataset, DatasetCache, LoadError, TrackRecord};
pub use filter::{ExplicitFilter, FilterOptions, FilterSelection, FilteredDataset};
pub use metrics::Summary;
pub use view::ViewModel;

#[cfg(test)]
mod tests {
    use super::*;

    // ==========================================================================
    // PUBLIC API TESTS
    // ==========================================================================
    //
    // These tests verify the public API surface is reachable from the root.
    // ==========================================================================

    #[test]
    fn test_public_exports() {
        let _: ExplicitFilter = ExplicitFilter::All;
        let _selection = FilterSelection::new();
        let _summary = Summary::default();
    }

    #[test]
    fn test_render_from_root_types() {
        let dataset = Dataset::from_tracks(vec![TrackRecord {
            artist_name: "A".into(),
            album_type: "single".into(),
            explicit: false,
            track_name: "t".into(),
            track_popularity: 10.0,
            artist_popularity: 20.0,
            track_duration_min: 3.0,
        }]);
        let vm: ViewModel = view::render(&dataset, &FilterSelection::new());
        assert_eq!(vm.summary.count, 1);
    }

    #[test]
    fn test_cache_accessible() {
        let cache = DatasetCache::new(dataset::DEFAULT_DATA_PATH);
        assert!(!cache.is_loaded());
    }
}

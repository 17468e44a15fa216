//! The whole dashboard as one value
//!
//! [`render`] is the single entry point a request goes through: filter the
//! dataset, then derive every panel from that one filtered view. It is a pure
//! function, and calling it twice with the same inputs gives the same output.

use crate::charts::{self, ChartSpec};
use crate::dataset::Dataset;
use crate::filter::{self, FilterOptions, FilterSelection};
use crate::metrics::{Metric, Summary};
use crate::page::PageShell;
use crate::preview::Preview;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ViewModel {
    pub page: PageShell,
    pub options: FilterOptions,
    pub selection: FilterSelection,
    pub summary: Summary,
    pub metrics: Vec<Metric>,
    pub charts: Vec<ChartSpec>,
    pub preview: Preview,
}

pub fn render(dataset: &Dataset, selection: &FilterSelection) -> ViewModel {
    let filtered = filter::apply(dataset, selection);
    let summary = Summary::from_view(&filtered);

    tracing::debug!(
        rows = filtered.len(),
        of = dataset.len(),
        artists = selection.artists.len(),
        album_types = selection.album_types.len(),
        explicit = %selection.explicit,
        "rendering view"
    );

    ViewModel {
        page: PageShell::default(),
        options: FilterOptions::from_dataset(dataset),
        selection: selection.clone(),
        metrics: summary.metrics(),
        summary,
        charts: charts::render_all(&filtered),
        preview: Preview::from_view(&filtered),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::tests::five_rows;
    use crate::filter::ExplicitFilter;

    #[test]
    fn test_render_unfiltered() {
        let ds = five_rows();
        let view = render(&ds, &FilterSelection::new());

        assert_eq!(view.summary.count, 5);
        assert_eq!(view.metrics.len(), 4);
        assert_eq!(view.charts.len(), 4);
        assert_eq!(view.preview.rows.len(), 5);
        assert_eq!(view.options.artists, vec!["A", "B", "C"]);
    }

    #[test]
    fn test_all_selector_matches_unfiltered_count() {
        let ds = five_rows();
        let sel = FilterSelection::new().with_explicit(ExplicitFilter::All);
        assert_eq!(render(&ds, &sel).summary.count, ds.len());
    }

    #[test]
    fn test_render_is_pure() {
        let ds = five_rows();
        let sel = FilterSelection::new().with_album_types(["single"]);
        assert_eq!(render(&ds, &sel), render(&ds, &sel));
    }

    #[test]
    fn test_panels_share_one_filtered_view() {
        let ds = five_rows();
        let sel = FilterSelection::new().with_artists(["B"]);
        let view = render(&ds, &sel);

        assert_eq!(view.summary.count, 2);
        assert_eq!(view.preview.total_rows, 2);
        let scatter = view.charts.iter().find(|c| c.id == "duration-scatter").unwrap();
        assert_eq!(scatter.spec["data"]["values"].as_array().unwrap().len(), 2);
        // Options always come from the full dataset
        assert_eq!(view.options.artists.len(), 3);
    }

    #[test]
    fn test_empty_selection_result_degrades() {
        let ds = five_rows();
        let sel = FilterSelection::new()
            .with_artists(["C"])
            .with_album_types(["album"]);
        let view = render(&ds, &sel);

        assert_eq!(view.summary.count, 0);
        assert_eq!(view.metrics[1].value, "N/A");
        assert!(view.preview.rows.is_empty());

        let json = serde_json::to_value(&view).unwrap();
        assert_eq!(json["selection"]["explicit"], "All");
        assert!(json["summary"]["avg_duration_min"].is_null());
    }
}

//! Headline metrics over the filtered rows
//!
//! Four numbers sit at the top of the dashboard: track count and the means of
//! track popularity, artist popularity and duration. Means are rounded to two
//! decimals. Over zero rows a mean is undefined, so it is `None` here,
//! `null` in JSON and "N/A" on the page.

use crate::filter::FilteredDataset;
use serde::Serialize;

/// Text shown in place of an undefined mean
pub const NOT_AVAILABLE: &str = "N/A";

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Summary {
    pub count: usize,
    pub avg_track_popularity: Option<f64>,
    pub avg_artist_popularity: Option<f64>,
    pub avg_duration_min: Option<f64>,
}

/// One labelled number as shown in the metrics row
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Metric {
    pub label: &'static str,
    pub value: String,
}

impl Summary {
    pub fn from_view(view: &FilteredDataset<'_>) -> Self {
        let mut track_pop = 0.0;
        let mut artist_pop = 0.0;
        let mut duration = 0.0;

        for t in view.tracks() {
            track_pop += t.track_popularity;
            artist_pop += t.artist_popularity;
            duration += t.track_duration_min;
        }

        let count = view.len();
        let mean = |sum: f64| {
            if count == 0 {
                None
            } else {
                Some(round2(sum / count as f64))
            }
        };

        Self {
            count,
            avg_track_popularity: mean(track_pop),
            avg_artist_popularity: mean(artist_pop),
            avg_duration_min: mean(duration),
        }
    }

    /// Format an average for display
    pub fn display_value(value: Option<f64>) -> String {
        match value {
            Some(v) => format!("{:.2}", v),
            None => NOT_AVAILABLE.to_string(),
        }
    }

    /// The metrics row, left to right
    pub fn metrics(&self) -> Vec<Metric> {
        vec![
            Metric {
                label: "Total Tracks",
                value: self.count.to_string(),
            },
            Metric {
                label: "Avg Track Popularity",
                value: Self::display_value(self.avg_track_popularity),
            },
            Metric {
                label: "Avg Artist Popularity",
                value: Self::display_value(self.avg_artist_popularity),
            },
            Metric {
                label: "Avg Duration (min)",
                value: Self::display_value(self.avg_duration_min),
            },
        ]
    }
}

pub(crate) fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::tests::five_rows;
    use crate::filter::{apply, FilterSelection};

    // ==========================================================================
    // SUMMARY TESTS
    // ==========================================================================

    #[test]
    fn test_summary_unfiltered() {
        let ds = five_rows();
        let summary = Summary::from_view(&apply(&ds, &FilterSelection::new()));

        assert_eq!(summary.count, 5);
        // (80 + 60 + 40 + 50 + 20) / 5
        assert_eq!(summary.avg_track_popularity, Some(50.0));
        // (90 + 90 + 70 + 70 + 30) / 5
        assert_eq!(summary.avg_artist_popularity, Some(70.0));
        // (3.5 + 4.0 + 2.5 + 5.0 + 3.0) / 5
        assert_eq!(summary.avg_duration_min, Some(3.6));
    }

    #[test]
    fn test_summary_matches_manual_mean() {
        let ds = five_rows();
        let view = apply(&ds, &FilterSelection::new().with_album_types(["single"]));
        let summary = Summary::from_view(&view);

        let rows: Vec<_> = view.tracks().collect();
        let manual = rows.iter().map(|t| t.track_popularity).sum::<f64>() / rows.len() as f64;

        assert_eq!(summary.count, rows.len());
        assert_eq!(summary.avg_track_popularity, Some(round2(manual)));
    }

    #[test]
    fn test_summary_rounds_to_two_decimals() {
        use crate::dataset::tests::track;
        let ds = crate::dataset::Dataset::from_tracks(vec![
            track("A", "single", false, 10.0, 1.0, 1.0),
            track("A", "single", false, 10.0, 1.0, 1.0),
            track("A", "single", false, 11.0, 2.0, 1.0),
        ]);
        let summary = Summary::from_view(&apply(&ds, &FilterSelection::new()));

        // 31 / 3 = 10.333..
        assert_eq!(summary.avg_track_popularity, Some(10.33));
        // 4 / 3 = 1.333..
        assert_eq!(summary.avg_artist_popularity, Some(1.33));
    }

    #[test]
    fn test_summary_zero_rows() {
        let ds = five_rows();
        let view = apply(&ds, &FilterSelection::new().with_artists(["Nobody"]));
        let summary = Summary::from_view(&view);

        assert_eq!(summary.count, 0);
        assert_eq!(summary.avg_track_popularity, None);
        assert_eq!(summary.avg_artist_popularity, None);
        assert_eq!(summary.avg_duration_min, None);

        let shown: Vec<String> = summary.metrics().into_iter().map(|m| m.value).collect();
        assert_eq!(shown, vec!["0", "N/A", "N/A", "N/A"]);

        let json = serde_json::to_value(&summary).unwrap();
        assert!(json["avg_track_popularity"].is_null());
    }

    #[test]
    fn test_metric_labels() {
        let labels: Vec<&str> = Summary::default().metrics().iter().map(|m| m.label).collect();
        assert_eq!(
            labels,
            vec![
                "Total Tracks",
                "Avg Track Popularity",
                "Avg Artist Popularity",
                "Avg Duration (min)"
            ]
        );
    }

    #[test]
    fn test_display_value() {
        assert_eq!(Summary::display_value(Some(3.6)), "3.60");
        assert_eq!(Summary::display_value(None), NOT_AVAILABLE);
    }
}

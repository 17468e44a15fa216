//! Track popularity histogram
//!
//! Bins are computed here rather than left to the chart runtime so the
//! counts are testable: 30 equal-width bins spanning the observed
//! `[min, max]` of track popularity. The maximum falls into the last bin.

use super::{base_spec, with_fields, ChartRenderer, ACCENT_COLOR};
use crate::filter::FilteredDataset;
use serde::Serialize;
use serde_json::{json, Value};

pub const BIN_COUNT: usize = 30;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Bin {
    pub start: f64,
    pub end: f64,
    pub count: usize,
}

/// Equal-width bins over the observed range of `values`.
///
/// No values gives no bins. When every value is identical there is nothing to
/// divide, so a single bin `[v, v + 1)` holds them all.
pub fn bin_values(values: &[f64], bins: usize) -> Vec<Bin> {
    if values.is_empty() || bins == 0 {
        return vec![];
    }

    let min = values.iter().copied().fold(f64::INFINITY, f64::min);
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);

    if max <= min {
        return vec![Bin {
            start: min,
            end: min + 1.0,
            count: values.len(),
        }];
    }

    let width = (max - min) / bins as f64;
    let mut out: Vec<Bin> = (0..bins)
        .map(|i| Bin {
            start: min + width * i as f64,
            end: if i + 1 == bins { max } else { min + width * (i + 1) as f64 },
            count: 0,
        })
        .collect();

    for &v in values {
        let idx = (((v - min) / width).floor() as usize).min(bins - 1);
        out[idx].count += 1;
    }

    out
}

pub struct PopularityHistogram;

impl ChartRenderer for PopularityHistogram {
    fn id(&self) -> &'static str {
        "popularity-histogram"
    }

    fn title(&self) -> &'static str {
        "Track Popularity Distribution"
    }

    fn spec(&self, view: &FilteredDataset<'_>) -> Value {
        let values: Vec<f64> = view.tracks().map(|t| t.track_popularity).collect();
        let rows: Vec<Value> = bin_values(&values, BIN_COUNT)
            .into_iter()
            .map(|b| json!({ "bin_start": b.start, "bin_end": b.end, "count": b.count }))
            .collect();

        with_fields(
            base_spec(rows),
            json!({
                "mark": { "type": "bar", "color": ACCENT_COLOR, "binSpacing": 1 },
                "encoding": {
                    "x": {
                        "field": "bin_start",
                        "type": "quantitative",
                        "bin": { "binned": true },
                        "title": "track_popularity"
                    },
                    "x2": { "field": "bin_end" },
                    "y": { "field": "count", "type": "quantitative", "title": "count" },
                    "tooltip": [
                        { "field": "bin_start", "type": "quantitative", "title": "from", "format": ".1f" },
                        { "field": "bin_end", "type": "quantitative", "title": "to", "format": ".1f" },
                        { "field": "count", "type": "quantitative" }
                    ]
                }
            }),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::tests::five_rows;
    use crate::filter::{apply, FilterSelection};

    #[test]
    fn test_bins_cover_range() {
        let values = vec![0.0, 30.0, 60.0, 90.0];
        let bins = bin_values(&values, BIN_COUNT);

        assert_eq!(bins.len(), BIN_COUNT);
        assert_eq!(bins[0].start, 0.0);
        assert_eq!(bins[BIN_COUNT - 1].end, 90.0);
        // Each bin is 3 wide
        assert!((bins[1].start - 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_max_goes_in_last_bin() {
        let bins = bin_values(&[0.0, 90.0], BIN_COUNT);
        assert_eq!(bins[0].count, 1);
        assert_eq!(bins[BIN_COUNT - 1].count, 1);
    }

    #[test]
    fn test_counts_sum_to_rows() {
        let values: Vec<f64> = (0..=100).map(|v| v as f64).collect();
        let bins = bin_values(&values, BIN_COUNT);
        assert_eq!(bins.iter().map(|b| b.count).sum::<usize>(), 101);
    }

    #[test]
    fn test_single_value_one_bin() {
        let bins = bin_values(&[42.0, 42.0, 42.0], BIN_COUNT);
        assert_eq!(bins, vec![Bin { start: 42.0, end: 43.0, count: 3 }]);
    }

    #[test]
    fn test_empty_has_no_bins() {
        assert!(bin_values(&[], BIN_COUNT).is_empty());
    }

    #[test]
    fn test_spec_uses_fixed_color() {
        let ds = five_rows();
        let spec = PopularityHistogram.spec(&apply(&ds, &FilterSelection::new()));

        assert_eq!(spec["mark"]["color"], ACCENT_COLOR);
        assert_eq!(spec["data"]["values"].as_array().unwrap().len(), BIN_COUNT);
    }
}

//! Track popularity distribution per album type
//!
//! The five-number summary is computed here (linear-interpolated quartiles,
//! Tukey whiskers at 1.5 IQR) and drawn as layered rule/bar/tick marks, with
//! the points beyond the whiskers as outliers.

use super::{base_spec, with_fields, ChartRenderer};
use crate::filter::{unique_in_order, FilteredDataset};
use serde::Serialize;
use serde_json::{json, Value};
use std::collections::HashMap;

const WHISKER_IQR: f64 = 1.5;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BoxStats {
    pub album_type: String,
    pub count: usize,
    pub lower_whisker: f64,
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
    pub upper_whisker: f64,
    pub outliers: Vec<f64>,
}

/// Quantile of sorted data, interpolating linearly between neighbours
pub fn quantile(sorted: &[f64], q: f64) -> Option<f64> {
    if sorted.is_empty() {
        return None;
    }
    let pos = q.clamp(0.0, 1.0) * (sorted.len() - 1) as f64;
    let lo = pos.floor() as usize;
    let hi = pos.ceil() as usize;
    let frac = pos - lo as f64;
    Some(sorted[lo] + (sorted[hi] - sorted[lo]) * frac)
}

impl BoxStats {
    pub fn from_values(album_type: &str, mut values: Vec<f64>) -> Option<Self> {
        values.sort_by(f64::total_cmp);
        let q1 = quantile(&values, 0.25)?;
        let median = quantile(&values, 0.5)?;
        let q3 = quantile(&values, 0.75)?;

        let iqr = q3 - q1;
        let low_fence = q1 - WHISKER_IQR * iqr;
        let high_fence = q3 + WHISKER_IQR * iqr;

        let inside = values.iter().copied().filter(|v| *v >= low_fence && *v <= high_fence);
        let lower_whisker = inside.clone().fold(f64::INFINITY, f64::min);
        let upper_whisker = inside.fold(f64::NEG_INFINITY, f64::max);

        let outliers = values
            .iter()
            .copied()
            .filter(|v| *v < low_fence || *v > high_fence)
            .collect();

        Some(Self {
            album_type: album_type.to_string(),
            count: values.len(),
            lower_whisker,
            q1,
            median,
            q3,
            upper_whisker,
            outliers,
        })
    }
}

/// One box per album type, in first-seen order
pub fn summarize(view: &FilteredDataset<'_>) -> Vec<BoxStats> {
    let order = unique_in_order(view.tracks().map(|t| t.album_type.as_str()));

    let mut groups: HashMap<&str, Vec<f64>> = HashMap::new();
    for t in view.tracks() {
        groups
            .entry(t.album_type.as_str())
            .or_default()
            .push(t.track_popularity);
    }

    order
        .iter()
        .filter_map(|name| {
            let values = groups.remove(name.as_str())?;
            BoxStats::from_values(name, values)
        })
        .collect()
}

pub struct AlbumTypeBoxPlot;

impl ChartRenderer for AlbumTypeBoxPlot {
    fn id(&self) -> &'static str {
        "album-type-box"
    }

    fn title(&self) -> &'static str {
        "Album Type vs Popularity"
    }

    fn spec(&self, view: &FilteredDataset<'_>) -> Value {
        let boxes = summarize(view);
        let order: Vec<&str> = boxes.iter().map(|b| b.album_type.as_str()).collect();

        let outliers: Vec<Value> = boxes
            .iter()
            .flat_map(|b| {
                b.outliers
                    .iter()
                    .map(move |v| json!({ "album_type": b.album_type, "track_popularity": v }))
            })
            .collect();

        let rows: Vec<Value> = boxes
            .iter()
            .map(|b| {
                json!({
                    "album_type": b.album_type,
                    "count": b.count,
                    "lower": b.lower_whisker,
                    "q1": b.q1,
                    "median": b.median,
                    "q3": b.q3,
                    "upper": b.upper_whisker,
                })
            })
            .collect();

        let x = json!({ "field": "album_type", "type": "nominal", "sort": order, "title": "album_type" });
        let color = json!({ "field": "album_type", "type": "nominal", "sort": order, "legend": { "title": "album_type" } });

        with_fields(
            base_spec(rows),
            json!({
                "encoding": { "x": x, "color": color },
                "layer": [
                    {
                        "mark": { "type": "rule" },
                        "encoding": {
                            "y": { "field": "lower", "type": "quantitative", "title": "track_popularity" },
                            "y2": { "field": "upper" }
                        }
                    },
                    {
                        "mark": { "type": "bar", "size": 28, "opacity": 0.6 },
                        "encoding": {
                            "y": { "field": "q1", "type": "quantitative" },
                            "y2": { "field": "q3" },
                            "tooltip": [
                                { "field": "album_type", "type": "nominal" },
                                { "field": "count", "type": "quantitative" },
                                { "field": "upper", "type": "quantitative", "title": "max" },
                                { "field": "q3", "type": "quantitative" },
                                { "field": "median", "type": "quantitative" },
                                { "field": "q1", "type": "quantitative" },
                                { "field": "lower", "type": "quantitative", "title": "min" }
                            ]
                        }
                    },
                    {
                        "mark": { "type": "tick", "color": "white", "size": 28 },
                        "encoding": {
                            "y": { "field": "median", "type": "quantitative" },
                            "color": { "value": "white" }
                        }
                    },
                    {
                        "data": { "values": outliers },
                        "mark": { "type": "point", "filled": true },
                        "encoding": {
                            "y": { "field": "track_popularity", "type": "quantitative" }
                        }
                    }
                ]
            }),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::tests::{five_rows, track};
    use crate::dataset::Dataset;
    use crate::filter::{apply, FilterSelection};

    #[test]
    fn test_quantile_interpolates() {
        let v = [1.0, 2.0, 3.0, 4.0];
        assert_eq!(quantile(&v, 0.0), Some(1.0));
        assert_eq!(quantile(&v, 0.25), Some(1.75));
        assert_eq!(quantile(&v, 0.5), Some(2.5));
        assert_eq!(quantile(&v, 0.75), Some(3.25));
        assert_eq!(quantile(&v, 1.0), Some(4.0));
        assert_eq!(quantile(&[], 0.5), None);
    }

    #[test]
    fn test_box_stats_with_outlier() {
        let stats = BoxStats::from_values("album", vec![10.0, 12.0, 11.0, 13.0, 100.0]).unwrap();

        assert_eq!(stats.count, 5);
        assert_eq!(stats.q1, 11.0);
        assert_eq!(stats.median, 12.0);
        assert_eq!(stats.q3, 13.0);
        assert_eq!(stats.lower_whisker, 10.0);
        assert_eq!(stats.upper_whisker, 13.0);
        assert_eq!(stats.outliers, vec![100.0]);
    }

    #[test]
    fn test_single_value_box() {
        let stats = BoxStats::from_values("single", vec![55.0]).unwrap();
        assert_eq!(stats.q1, 55.0);
        assert_eq!(stats.median, 55.0);
        assert_eq!(stats.q3, 55.0);
        assert_eq!(stats.lower_whisker, 55.0);
        assert_eq!(stats.upper_whisker, 55.0);
        assert!(stats.outliers.is_empty());
    }

    #[test]
    fn test_one_box_per_album_type_in_order() {
        let ds = Dataset::from_tracks(vec![
            track("A", "album", false, 10.0, 1.0, 1.0),
            track("B", "single", false, 20.0, 1.0, 1.0),
            track("C", "album", false, 30.0, 1.0, 1.0),
            track("D", "compilation", false, 40.0, 1.0, 1.0),
        ]);
        let boxes = summarize(&apply(&ds, &FilterSelection::new()));

        let names: Vec<&str> = boxes.iter().map(|b| b.album_type.as_str()).collect();
        assert_eq!(names, vec!["album", "single", "compilation"]);
        assert_eq!(boxes[0].count, 2);
        assert_eq!(boxes[0].median, 20.0);
    }

    #[test]
    fn test_empty_view_has_no_boxes() {
        let ds = five_rows();
        let view = apply(&ds, &FilterSelection::new().with_album_types(["ep"]));
        assert!(summarize(&view).is_empty());

        let spec = AlbumTypeBoxPlot.spec(&view);
        assert!(spec["data"]["values"].as_array().unwrap().is_empty());
    }

    #[test]
    fn test_spec_colored_by_album_type() {
        let ds = five_rows();
        let spec = AlbumTypeBoxPlot.spec(&apply(&ds, &FilterSelection::new()));

        assert_eq!(spec["encoding"]["color"]["field"], "album_type");
        assert_eq!(spec["encoding"]["x"]["sort"], json!(["single", "album"]));
        assert_eq!(spec["layer"].as_array().unwrap().len(), 4);
    }
}

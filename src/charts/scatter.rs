//! Track duration vs popularity scatter

use super::{base_spec, with_fields, ChartRenderer};
use crate::filter::FilteredDataset;
use serde_json::{json, Value};

pub struct DurationScatter;

impl ChartRenderer for DurationScatter {
    fn id(&self) -> &'static str {
        "duration-scatter"
    }

    fn title(&self) -> &'static str {
        "Track Duration vs Popularity"
    }

    fn spec(&self, view: &FilteredDataset<'_>) -> Value {
        // One point per row
        let points: Vec<Value> = view
            .tracks()
            .map(|t| {
                json!({
                    "track_name": t.track_name,
                    "artist_name": t.artist_name,
                    "album_type": t.album_type,
                    "track_duration_min": t.track_duration_min,
                    "track_popularity": t.track_popularity,
                    "artist_popularity": t.artist_popularity,
                })
            })
            .collect();

        with_fields(
            base_spec(points),
            json!({
                "mark": { "type": "circle", "opacity": 0.7 },
                "encoding": {
                    "x": { "field": "track_duration_min", "type": "quantitative", "scale": { "zero": false } },
                    "y": { "field": "track_popularity", "type": "quantitative" },
                    "size": { "field": "artist_popularity", "type": "quantitative" },
                    "color": { "field": "album_type", "type": "nominal" },
                    "tooltip": [
                        { "field": "track_name", "type": "nominal", "title": "track" },
                        { "field": "artist_name", "type": "nominal" },
                        { "field": "album_type", "type": "nominal" },
                        { "field": "track_duration_min", "type": "quantitative" },
                        { "field": "track_popularity", "type": "quantitative" },
                        { "field": "artist_popularity", "type": "quantitative" }
                    ]
                }
            }),
        )
    }
}

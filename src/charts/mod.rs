//! Chart renderers
//!
//! Every chart is a pure function of the filtered rows that yields a
//! declarative Vega-Lite (v5) description with its data inlined. The page
//! hands each description to `vega-embed`; nothing here draws pixels.
//!
//! - [`histogram`]: track popularity distribution, 30 equal-width bins
//! - [`top_artists`]: top 10 artists by mean artist popularity
//! - [`box_plot`]: track popularity per album type
//! - [`scatter`]: duration vs popularity, sized by artist popularity
//!
//! Renderers share no mutable state, so [`render_all`] runs them on the
//! rayon pool and reassembles the results in a fixed order.

pub mod box_plot;
pub mod histogram;
pub mod scatter;
pub mod top_artists;

use crate::filter::FilteredDataset;
use rayon::prelude::*;
use serde::Serialize;
use serde_json::{json, Value};

const VEGA_LITE_SCHEMA: &str = "https://vega.github.io/schema/vega-lite/v5.json";

/// Fixed accent color used by single-color charts
pub const ACCENT_COLOR: &str = "#1DB954";

/// A rendered chart, ready for the page
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartSpec {
    pub id: &'static str,
    pub title: &'static str,
    pub spec: Value,
}

/// One chart on the dashboard
pub trait ChartRenderer: Send + Sync {
    /// Stable identifier, used as the DOM id on the page
    fn id(&self) -> &'static str;

    /// Section heading shown above the chart
    fn title(&self) -> &'static str;

    /// Build the Vega-Lite description for these rows
    fn spec(&self, view: &FilteredDataset<'_>) -> Value;

    fn render(&self, view: &FilteredDataset<'_>) -> ChartSpec {
        ChartSpec {
            id: self.id(),
            title: self.title(),
            spec: self.spec(view),
        }
    }
}

/// The dashboard's charts in display order
pub fn renderers() -> Vec<Box<dyn ChartRenderer>> {
    vec![
        Box::new(histogram::PopularityHistogram),
        Box::new(top_artists::TopArtists),
        Box::new(box_plot::AlbumTypeBoxPlot),
        Box::new(scatter::DurationScatter),
    ]
}

/// Render every chart in parallel, keeping display order
pub fn render_all(view: &FilteredDataset<'_>) -> Vec<ChartSpec> {
    renderers().par_iter().map(|r| r.render(view)).collect()
}

/// Common top-level wrapper for every chart
pub(crate) fn base_spec(values: Vec<Value>) -> Value {
    json!({
        "$schema": VEGA_LITE_SCHEMA,
        "width": "container",
        "height": 360,
        "autosize": { "type": "fit", "contains": "padding" },
        "data": { "values": values },
    })
}

/// Merge `extra` keys into a base spec object
pub(crate) fn with_fields(mut spec: Value, extra: Value) -> Value {
    if let (Some(target), Value::Object(fields)) = (spec.as_object_mut(), extra) {
        for (k, v) in fields {
            target.insert(k, v);
        }
    }
    spec
}

//! Top artists by mean artist popularity

use super::{base_spec, with_fields, ChartRenderer};
use crate::filter::FilteredDataset;
use crate::metrics::round2;
use serde::Serialize;
use serde_json::{json, Value};
use std::collections::HashMap;

pub const TOP_N: usize = 10;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ArtistScore {
    pub artist_name: String,
    pub artist_popularity: f64,
}

/// Mean artist popularity per artist, best first.
///
/// Equal means are ordered by artist name so the ranking is reproducible.
pub fn rank(view: &FilteredDataset<'_>, limit: usize) -> Vec<ArtistScore> {
    let mut groups: HashMap<&str, (f64, usize)> = HashMap::new();
    for t in view.tracks() {
        let entry = groups.entry(t.artist_name.as_str()).or_insert((0.0, 0));
        entry.0 += t.artist_popularity;
        entry.1 += 1;
    }

    let mut scores: Vec<ArtistScore> = groups
        .into_iter()
        .map(|(name, (sum, n))| ArtistScore {
            artist_name: name.to_string(),
            artist_popularity: sum / n as f64,
        })
        .collect();

    scores.sort_by(|a, b| {
        b.artist_popularity
            .total_cmp(&a.artist_popularity)
            .then_with(|| a.artist_name.cmp(&b.artist_name))
    });
    scores.truncate(limit);
    scores
}

pub struct TopArtists;

impl ChartRenderer for TopArtists {
    fn id(&self) -> &'static str {
        "top-artists"
    }

    fn title(&self) -> &'static str {
        "Top Artists by Popularity"
    }

    fn spec(&self, view: &FilteredDataset<'_>) -> Value {
        let ranked = rank(view, TOP_N);
        let order: Vec<&str> = ranked.iter().map(|s| s.artist_name.as_str()).collect();
        let rows: Vec<Value> = ranked
            .iter()
            .map(|s| {
                json!({
                    "artist_name": s.artist_name,
                    "artist_popularity": round2(s.artist_popularity),
                })
            })
            .collect();

        with_fields(
            base_spec(rows),
            json!({
                "mark": "bar",
                "encoding": {
                    "x": { "field": "artist_popularity", "type": "quantitative" },
                    "y": {
                        "field": "artist_name",
                        "type": "nominal",
                        "sort": order
                    },
                    "color": {
                        "field": "artist_popularity",
                        "type": "quantitative",
                        "scale": { "scheme": "greens" }
                    },
                    "tooltip": [
                        { "field": "artist_name", "type": "nominal" },
                        { "field": "artist_popularity", "type": "quantitative" }
                    ]
                }
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

    fn many_artists() -> Dataset {
        let mut tracks = vec![];
        for i in 0..15 {
            let name = format!("Artist {:02}", i);
            tracks.push(track(&name, "single", false, 50.0, (i * 5) as f64, 3.0));
            tracks.push(track(&name, "album", false, 50.0, (i * 5 + 2) as f64, 3.0));
        }
        // Ties with Artist 14's mean (71.0)
        tracks.push(track("Aardvark", "single", false, 50.0, 71.0, 3.0));
        Dataset::from_tracks(tracks)
    }

    #[test]
    fn test_rank_means() {
        let ds = five_rows();
        let ranked = rank(&apply(&ds, &FilterSelection::new()), TOP_N);

        assert_eq!(ranked.len(), 3);
        assert_eq!(ranked[0], ArtistScore { artist_name: "A".into(), artist_popularity: 90.0 });
        assert_eq!(ranked[1].artist_name, "B");
        assert_eq!(ranked[2].artist_name, "C");
    }

    #[test]
    fn test_rank_at_most_ten_non_increasing() {
        let ds = many_artists();
        let ranked = rank(&apply(&ds, &FilterSelection::new()), TOP_N);

        assert_eq!(ranked.len(), TOP_N);
        for pair in ranked.windows(2) {
            assert!(
                pair[0].artist_popularity >= pair[1].artist_popularity,
                "{:?} before {:?}",
                pair[0],
                pair[1]
            );
        }
    }

    #[test]
    fn test_ties_broken_by_name() {
        let ds = many_artists();
        let ranked = rank(&apply(&ds, &FilterSelection::new()), TOP_N);

        assert_eq!(ranked[0].artist_name, "Aardvark");
        assert_eq!(ranked[1].artist_name, "Artist 14");
        assert_eq!(ranked[0].artist_popularity, ranked[1].artist_popularity);
    }

    #[test]
    fn test_rank_deterministic() {
        let ds = many_artists();
        let view = apply(&ds, &FilterSelection::new());
        let first = rank(&view, TOP_N);
        for _ in 0..20 {
            assert_eq!(rank(&view, TOP_N), first);
        }
    }

    #[test]
    fn test_rank_empty() {
        let ds = five_rows();
        let view = apply(&ds, &FilterSelection::new().with_artists(["Nobody"]));
        assert!(rank(&view, TOP_N).is_empty());
    }

    #[test]
    fn test_spec_horizontal_greens() {
        let ds = five_rows();
        let spec = TopArtists.spec(&apply(&ds, &FilterSelection::new()));

        assert_eq!(spec["encoding"]["y"]["field"], "artist_name");
        assert_eq!(spec["encoding"]["x"]["field"], "artist_popularity");
        assert_eq!(spec["encoding"]["color"]["scale"]["scheme"], "greens");
        assert_eq!(spec["encoding"]["y"]["sort"], json!(["A", "B", "C"]));
    }
}

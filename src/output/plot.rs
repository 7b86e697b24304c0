use serde::Serialize;

use crate::ranking::Ranking;

pub const MIN_MARKER_SIZE: f64 = 10.0;
pub const MAX_MARKER_SIZE: f64 = 1000.0;

/// One scatter point. `size` is the marker-size hint.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PlotPoint {
    pub x: f64,
    pub y: f64,
    pub size: f64,
}

/// The two scatter series of a ranking: frequency vs. final score and
/// reputation vs. final score.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlotSeries {
    pub frequency_vs_final: Vec<PlotPoint>,
    pub reputation_vs_final: Vec<PlotPoint>,
}

/// Marker size hint: total reviews clipped to `[10, 1000]`.
pub fn marker_size(total_reviews: f64) -> f64 {
    total_reviews.clamp(MIN_MARKER_SIZE, MAX_MARKER_SIZE)
}

pub fn plot_series(ranking: &Ranking) -> PlotSeries {
    let point = |x: f64, y: f64, reviews: f64| PlotPoint {
        x,
        y,
        size: marker_size(reviews),
    };
    PlotSeries {
        frequency_vs_final: ranking
            .entries
            .iter()
            .map(|e| point(e.frequency_score, e.final_score, e.total_reviews))
            .collect(),
        reputation_vs_final: ranking
            .entries
            .iter()
            .map(|e| point(e.reputation_score, e.final_score, e.total_reviews))
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::merge::ConsolidatedRecord;
    use crate::records::SourceInfo;

    fn entry(frequency: f64, reputation: f64, reviews: f64) -> ConsolidatedRecord {
        ConsolidatedRecord {
            canonical_key: "a.de".to_string(),
            website: None,
            phone: None,
            address: None,
            organization_names: vec![],
            name_conflict: false,
            present_in: Default::default(),
            record_count: 1,
            total_reviews: reviews,
            weighted_rating: None,
            frequency_score: frequency,
            reputation_score: reputation,
            final_score: 10.0 * frequency + 0.5 * reputation,
        }
    }

    #[test]
    fn test_marker_size_clipped() {
        assert_eq!(marker_size(0.0), 10.0);
        assert_eq!(marker_size(250.0), 250.0);
        assert_eq!(marker_size(50_000.0), 1000.0);
    }

    #[test]
    fn test_plot_series() {
        let ranking = Ranking {
            sources: vec![SourceInfo { label: "Datei 1".to_string(), weight: 1.0 }],
            entries: vec![entry(2.0, 8.0, 5.0), entry(1.0, 20.0, 2_000.0)],
        };
        let series = plot_series(&ranking);
        assert_eq!(series.frequency_vs_final[0], PlotPoint { x: 2.0, y: 24.0, size: 10.0 });
        assert_eq!(series.reputation_vs_final[1], PlotPoint { x: 20.0, y: 20.0, size: 1000.0 });
    }

    #[test]
    fn test_plot_series_json_shape() {
        let ranking = Ranking {
            sources: vec![],
            entries: vec![entry(1.0, 0.0, 10.0)],
        };
        let json = serde_json::to_value(plot_series(&ranking)).unwrap();
        assert_eq!(json["frequency_vs_final"][0]["x"], 1.0);
        assert_eq!(json["reputation_vs_final"][0]["size"], 10.0);
    }
}

//! Chart series for the overview page.
//!
//! Performance samples arrive as a flat list across leagues. Chart.js wants a
//! shared label axis and one same-length dataset per league, so each league's
//! values are aligned to the sorted week labels with `null` wherever that
//! league has no sample. Nulls render as gaps; zeros would draw a false dip.

use serde::Serialize;
use std::collections::BTreeSet;

use crate::api::PerformanceSample;

pub const PROFIT_SURFACE: &str = "profitChart";
pub const WIN_PCT_SURFACE: &str = "accuracyChart";

/// Distinct line colors, assigned to leagues in first-appearance order.
const SERIES_COLORS: [&str; 8] = [
    "#4e79a7", "#f28e2b", "#e15759", "#76b7b2", "#59a14f", "#edc948", "#b07aa1", "#ff9da7",
];

/// One named line in a chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Series {
    pub label: String,
    pub data: Vec<Option<f64>>,
    #[serde(rename = "borderColor")]
    pub border_color: &'static str,
    pub tension: f64,
    pub fill: bool,
}

/// A line chart bound to one drawing surface (a `<canvas>` id).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LineChart {
    pub surface: &'static str,
    pub title: &'static str,
    pub labels: Vec<String>,
    pub datasets: Vec<Series>,
}

/// Both overview charts, sharing one label axis.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PerformanceCharts {
    pub profit: LineChart,
    pub win_pct: LineChart,
}

pub fn series_color(index: usize) -> &'static str {
    SERIES_COLORS[index % SERIES_COLORS.len()]
}

/// A sample with both its league and week present.
struct Row<'a> {
    league: &'a str,
    week: &'a str,
    sample: &'a PerformanceSample,
}

fn usable_rows(samples: &[PerformanceSample]) -> Vec<Row<'_>> {
    samples
        .iter()
        .filter_map(|sample| {
            Some(Row {
                league: sample.league_id()?,
                week: sample.week_label()?,
                sample,
            })
        })
        .collect()
}

/// Distinct week labels, ascending.
pub fn week_labels(samples: &[PerformanceSample]) -> Vec<String> {
    usable_rows(samples)
        .iter()
        .map(|r| r.week.to_string())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Distinct league ids in the order they first appear.
pub fn leagues_present(samples: &[PerformanceSample]) -> Vec<&str> {
    let mut leagues: Vec<&str> = Vec::new();
    for row in usable_rows(samples) {
        if !leagues.contains(&row.league) {
            leagues.push(row.league);
        }
    }
    leagues
}

fn aligned_series(
    rows: &[Row<'_>],
    labels: &[String],
    leagues: &[&str],
    metric: impl Fn(&PerformanceSample) -> Option<f64>,
    factor: f64,
) -> Vec<Series> {
    leagues
        .iter()
        .enumerate()
        .map(|(i, league)| {
            let data = labels
                .iter()
                .map(|label| {
                    // First row for (league, week) wins.
                    rows.iter()
                        .find(|r| r.league == *league && r.week == label.as_str())
                        .and_then(|r| metric(r.sample))
                        .map(|v| v * factor)
                })
                .collect();
            Series {
                label: league.to_string(),
                data,
                border_color: series_color(i),
                tension: 0.1,
                fill: false,
            }
        })
        .collect()
}

/// Build the cumulative-profit and weekly win-percentage charts, or `None`
/// when no sample carries both a league and a week.
///
/// Profit passes through unscaled; win percentage is a fraction in the API and
/// is multiplied by 100 for display.
pub fn build_performance_charts(samples: &[PerformanceSample]) -> Option<PerformanceCharts> {
    let rows = usable_rows(samples);
    if rows.is_empty() {
        return None;
    }
    let labels = week_labels(samples);
    let leagues = leagues_present(samples);

    Some(PerformanceCharts {
        profit: LineChart {
            surface: PROFIT_SURFACE,
            title: "Cumulative Moneyline Profit (Units)",
            labels: labels.clone(),
            datasets: aligned_series(&rows, &labels, &leagues, |s| s.cumulative_win_profit, 1.0),
        },
        win_pct: LineChart {
            surface: WIN_PCT_SURFACE,
            title: "Weekly Moneyline Win Percentage",
            datasets: aligned_series(&rows, &labels, &leagues, |s| s.weekly_win_pct, 100.0),
            labels,
        },
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn sample(league: &str, week: &str, profit: f64, win_pct: f64) -> PerformanceSample {
        PerformanceSample {
            league: Some(league.into()),
            game_week_start: Some(format!("{}T00:00:00", week)),
            cumulative_win_profit: Some(profit),
            weekly_win_pct: Some(win_pct),
        }
    }

    fn build(samples: &[PerformanceSample]) -> PerformanceCharts {
        build_performance_charts(samples).expect("usable samples")
    }

    #[test]
    fn test_labels_sorted_and_deduplicated() {
        let samples = vec![
            sample("nba", "2024-11-04", 1.0, 0.5),
            sample("nfl", "2024-09-09", 2.0, 0.6),
            sample("nba", "2024-09-09", 0.5, 0.4),
            sample("nfl", "2024-11-04", 3.0, 0.7),
        ];
        assert_eq!(week_labels(&samples), vec!["2024-09-09", "2024-11-04"]);
        assert_eq!(leagues_present(&samples), vec!["nba", "nfl"]);
    }

    #[test]
    fn test_missing_weeks_are_null_not_zero() {
        let samples = vec![
            sample("nfl", "2024-09-09", 2.0, 0.6),
            sample("nfl", "2024-09-16", 1.0, 0.4),
            sample("cfb", "2024-09-16", -0.5, 0.5),
        ];
        let charts = build(&samples);
        let cfb = &charts.profit.datasets[1];
        assert_eq!(cfb.label, "cfb");
        assert_eq!(cfb.data[0], None);
        assert_eq!(cfb.data[1], Some(-0.5));
        assert_eq!(charts.win_pct.datasets[1].data[0], None);
    }

    #[test]
    fn test_win_pct_scaled_profit_unscaled() {
        let samples = vec![sample("nba", "2024-10-21", 3.25, 0.575)];
        let charts = build(&samples);
        assert_relative_eq!(charts.profit.datasets[0].data[0].unwrap(), 3.25, epsilon = 1e-12);
        assert_relative_eq!(charts.win_pct.datasets[0].data[0].unwrap(), 57.5, epsilon = 1e-9);
    }

    #[test]
    fn test_null_source_value_stays_null() {
        let mut s = sample("mbb", "2024-12-02", 0.0, 0.0);
        s.weekly_win_pct = None;
        let charts = build(&[s]);
        assert_eq!(charts.win_pct.datasets[0].data, vec![None]);
        assert_eq!(charts.profit.datasets[0].data, vec![Some(0.0)]);
    }

    #[test]
    fn test_each_league_gets_distinct_color_and_surfaces() {
        let samples = vec![
            sample("nfl", "2024-09-09", 1.0, 0.5),
            sample("nba", "2024-09-09", 1.0, 0.5),
            sample("cfb", "2024-09-09", 1.0, 0.5),
            sample("mbb", "2024-09-09", 1.0, 0.5),
        ];
        let charts = build(&samples);
        let colors: BTreeSet<_> = charts.profit.datasets.iter().map(|s| s.border_color).collect();
        assert_eq!(colors.len(), 4);
        assert_eq!(charts.profit.surface, PROFIT_SURFACE);
        assert_eq!(charts.win_pct.surface, WIN_PCT_SURFACE);
        assert_eq!(charts.profit.labels, charts.win_pct.labels);
    }

    #[test]
    fn test_series_serialize_gaps_as_json_null() {
        let samples = vec![
            sample("nfl", "2024-09-09", 1.0, 0.5),
            sample("nba", "2024-09-16", 2.0, 0.5),
        ];
        let charts = build(&samples);
        let json = serde_json::to_value(&charts.profit).unwrap();
        assert_eq!(json["datasets"][0]["data"], serde_json::json!([1.0, null]));
        assert_eq!(json["datasets"][0]["borderColor"], "#4e79a7");
    }

    #[test]
    fn test_first_sample_wins_on_duplicate_week() {
        let samples = vec![
            sample("nfl", "2024-09-09", 1.0, 0.5),
            sample("nfl", "2024-09-09", 9.0, 0.9),
            sample("nfl", "2024-09-16", 2.0, 0.6),
        ];
        let charts = build(&samples);
        assert_eq!(charts.profit.labels, vec!["2024-09-09", "2024-09-16"]);
        assert_eq!(charts.profit.datasets.len(), 1);
        assert_eq!(charts.profit.datasets[0].data, vec![Some(1.0), Some(2.0)]);
        assert_relative_eq!(charts.win_pct.datasets[0].data[0].unwrap(), 50.0, epsilon = 1e-9);
    }

    #[test]
    fn test_rows_missing_league_or_week_are_skipped() {
        let samples = vec![
            PerformanceSample {
                league: None,
                game_week_start: Some("2024-09-02T00:00:00".into()),
                cumulative_win_profit: Some(5.0),
                weekly_win_pct: Some(0.5),
            },
            PerformanceSample {
                league: Some("nba".into()),
                game_week_start: None,
                cumulative_win_profit: Some(5.0),
                weekly_win_pct: Some(0.5),
            },
            sample("nfl", "2024-09-09", 1.0, 0.5),
        ];
        let charts = build(&samples);
        assert_eq!(charts.profit.labels, vec!["2024-09-09"]);
        assert_eq!(leagues_present(&samples), vec!["nfl"]);
    }

    #[test]
    fn test_no_usable_rows_means_no_charts() {
        let bad = PerformanceSample {
            league: Some("nfl".into()),
            ..Default::default()
        };
        assert!(build_performance_charts(&[bad]).is_none());
        assert!(build_performance_charts(&[]).is_none());
    }
}

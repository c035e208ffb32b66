use serde::{Deserialize, Serialize};
use std::fmt;

/// Historical model accuracy for one league (percent scale, 0–100)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AccuracySummary {
    #[serde(default)]
    pub moneyline_accuracy: Option<f64>,
    #[serde(default)]
    pub ats_accuracy: Option<f64>,
    #[serde(default)]
    pub total_accuracy: Option<f64>,
}

/// One week of aggregated results for a league, from `/dashboard/performance`
///
/// Rows missing a league or week are kept through decoding so one bad row
/// doesn't sink the whole list; the chart builder skips them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PerformanceSample {
    pub league: Option<String>,
    /// ISO date-time, e.g. "2024-09-05T00:00:00"
    pub game_week_start: Option<String>,
    pub cumulative_win_profit: Option<f64>,
    /// Fraction of moneyline picks won that week (0.0–1.0)
    pub weekly_win_pct: Option<f64>,
}

impl PerformanceSample {
    /// Non-empty league id.
    pub fn league_id(&self) -> Option<&str> {
        self.league.as_deref().map(str::trim).filter(|l| !l.is_empty())
    }

    /// Date part of `game_week_start` (everything before the `T`).
    pub fn week_label(&self) -> Option<&str> {
        let start = self.game_week_start.as_deref()?;
        start.split('T').next().map(str::trim).filter(|d| !d.is_empty())
    }
}

/// A value the API sends either as a JSON number or as preformatted text
/// (odds like "+150", probabilities like "62.5%").
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Stat {
    Number(f64),
    Text(String),
}

impl fmt::Display for Stat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stat::Number(n) if n.is_finite() && n.fract() == 0.0 && n.abs() < 1e15 => {
                write!(f, "{}", *n as i64)
            }
            Stat::Number(n) => write!(f, "{}", n),
            Stat::Text(s) => f.write_str(s),
        }
    }
}

/// Model output for one upcoming matchup, from `/games/{league}`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GamePrediction {
    pub away_team: Option<String>,
    pub home_team: Option<String>,
    pub away_team_name: Option<String>,
    pub home_team_name: Option<String>,
    pub gameday: Option<String>,
    pub gameday_formatted: Option<String>,
    pub away_sim_points: Option<f64>,
    pub home_sim_points: Option<f64>,
    pub away_ml: Option<Stat>,
    pub home_ml: Option<Stat>,
    pub away_spread: Option<Stat>,
    pub home_spread: Option<Stat>,
    pub total_over: Option<Stat>,
    pub total_under: Option<Stat>,
    pub pred_winner: Option<String>,
    pub pred_wp: Option<Stat>,
    pub pred_cover_team: Option<String>,
    pub pred_ats_prob: Option<Stat>,
    pub pred_total_name: Option<String>,
    pub pred_ou_prob: Option<Stat>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_game_decodes_mixed_types_and_nulls() {
        let raw = serde_json::json!({
            "away_team": "KC",
            "home_team": "BAL",
            "away_ml": -150,
            "home_ml": "+130",
            "away_spread": null,
            "pred_wp": 0.62,
            "unexpected_column": true
        });
        let game: GamePrediction = serde_json::from_value(raw).unwrap();
        assert_eq!(game.away_ml, Some(Stat::Number(-150.0)));
        assert_eq!(game.home_ml, Some(Stat::Text("+130".into())));
        assert_eq!(game.away_spread, None);
        assert_eq!(game.total_over, None);
    }

    #[test]
    fn test_stat_display_drops_integer_fraction() {
        assert_eq!(Stat::Number(-150.0).to_string(), "-150");
        assert_eq!(Stat::Number(-3.5).to_string(), "-3.5");
        assert_eq!(Stat::Text("62%".into()).to_string(), "62%");
    }

    #[test]
    fn test_accuracy_accepts_empty_object() {
        let summary: AccuracySummary = serde_json::from_str("{}").unwrap();
        assert_eq!(summary, AccuracySummary::default());
    }

    #[test]
    fn test_week_label_strips_time() {
        let sample = PerformanceSample {
            league: Some("nfl".into()),
            game_week_start: Some("2024-09-05T00:00:00".into()),
            ..Default::default()
        };
        assert_eq!(sample.week_label(), Some("2024-09-05"));
        assert_eq!(sample.league_id(), Some("nfl"));
    }

    #[test]
    fn test_performance_row_with_nulls_still_decodes() {
        let raw = serde_json::json!([
            { "league": "nfl", "game_week_start": "2024-09-09T00:00:00",
              "cumulative_win_profit": 1.0, "weekly_win_pct": 0.5 },
            { "league": null, "game_week_start": "2024-09-09T00:00:00" },
            { "league": "nba", "game_week_start": null }
        ]);
        let samples: Vec<PerformanceSample> = serde_json::from_value(raw).unwrap();
        assert_eq!(samples.len(), 3);
        assert_eq!(samples[1].league_id(), None);
        assert_eq!(samples[2].week_label(), None);
    }
}

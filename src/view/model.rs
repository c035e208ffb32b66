//! View models: API records turned into display-ready strings.
//!
//! All defaulting and placeholder substitution happens here so the HTML layer
//! only lays out text it is given.

use chrono::NaiveDate;

use crate::api::{AccuracySummary, GamePrediction, Stat};
use crate::league::League;

/// Shown in place of any missing game field.
pub const PLACEHOLDER: &str = "N/A";

/// One league's column in the accuracy section.
#[derive(Debug, Clone, PartialEq)]
pub struct AccuracyColumn {
    pub league: League,
    pub winner: f64,
    pub spread: f64,
    pub total: f64,
}

impl AccuracyColumn {
    /// Missing figures (or a missing summary) count as 0.0.
    pub fn new(league: League, summary: Option<&AccuracySummary>) -> Self {
        let figure = |f: fn(&AccuracySummary) -> Option<f64>| summary.and_then(f).unwrap_or(0.0);
        AccuracyColumn {
            league,
            winner: figure(|s| s.moneyline_accuracy),
            spread: figure(|s| s.ats_accuracy),
            total: figure(|s| s.total_accuracy),
        }
    }
}

/// Per-team block of a game card.
#[derive(Debug, Clone, PartialEq)]
pub struct TeamLine {
    pub team: String,
    pub projected_score: String,
    pub moneyline: String,
    pub spread_label: &'static str,
    pub spread: String,
    pub total_label: &'static str,
    pub total: String,
}

/// A prediction with its probability, e.g. "Winner: KC | 0.62 Win Probability".
#[derive(Debug, Clone, PartialEq)]
pub struct PickLine {
    pub kind: &'static str,
    pub label: &'static str,
    pub pick: String,
    pub probability: String,
    pub probability_label: &'static str,
}

#[derive(Debug, Clone, PartialEq)]
pub struct GameCard {
    pub title: String,
    pub gameday: String,
    pub away: TeamLine,
    pub home: TeamLine,
    pub picks: [PickLine; 3],
}

fn text(value: &Option<String>) -> String {
    match value.as_deref() {
        Some(s) if !s.trim().is_empty() => s.to_string(),
        _ => PLACEHOLDER.to_string(),
    }
}

fn stat(value: &Option<Stat>) -> String {
    match value {
        Some(Stat::Text(s)) if s.trim().is_empty() => PLACEHOLDER.to_string(),
        Some(v) => v.to_string(),
        None => PLACEHOLDER.to_string(),
    }
}

fn points(value: Option<f64>) -> String {
    format!("{:.1}", value.unwrap_or(0.0))
}

/// "2024-09-08T17:00:00" → "Sunday, September 08". Unparseable input is returned as given.
pub fn format_gameday(raw: &str) -> String {
    let date_part = raw.split('T').next().unwrap_or(raw);
    match NaiveDate::parse_from_str(date_part.trim(), "%Y-%m-%d") {
        Ok(date) => date.format("%A, %B %d").to_string(),
        Err(_) => raw.to_string(),
    }
}

fn gameday(game: &GamePrediction) -> String {
    match (&game.gameday_formatted, &game.gameday) {
        (Some(formatted), _) if !formatted.trim().is_empty() => formatted.clone(),
        (_, Some(raw)) if !raw.trim().is_empty() => format_gameday(raw),
        _ => PLACEHOLDER.to_string(),
    }
}

impl From<&GamePrediction> for GameCard {
    fn from(game: &GamePrediction) -> Self {
        GameCard {
            title: format!("{} @ {}", text(&game.away_team_name), text(&game.home_team_name)),
            gameday: gameday(game),
            away: TeamLine {
                team: text(&game.away_team),
                projected_score: points(game.away_sim_points),
                moneyline: stat(&game.away_ml),
                spread_label: "Away Spread",
                spread: stat(&game.away_spread),
                total_label: "Total Under",
                total: stat(&game.total_under),
            },
            home: TeamLine {
                team: text(&game.home_team),
                projected_score: points(game.home_sim_points),
                moneyline: stat(&game.home_ml),
                spread_label: "Home Spread",
                spread: stat(&game.home_spread),
                total_label: "Total Over",
                total: stat(&game.total_over),
            },
            picks: [
                PickLine {
                    kind: "winner",
                    label: "Winner",
                    pick: text(&game.pred_winner),
                    probability: stat(&game.pred_wp),
                    probability_label: "Win Probability",
                },
                PickLine {
                    kind: "cover",
                    label: "Cover",
                    pick: text(&game.pred_cover_team),
                    probability: stat(&game.pred_ats_prob),
                    probability_label: "Cover Probability",
                },
                PickLine {
                    kind: "total",
                    label: "Total",
                    pick: text(&game.pred_total_name),
                    probability: stat(&game.pred_ou_prob),
                    probability_label: "O/U Probability",
                },
            ],
        }
    }
}

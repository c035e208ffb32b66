//! Markup for the content region. Every string coming from the API goes
//! through [`escape`].

use std::fmt::Write;

use super::charts::PerformanceCharts;
use super::model::{AccuracyColumn, GameCard, TeamLine};
use crate::league::{Category, League};

pub fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            c => out.push(c),
        }
    }
    out
}

pub fn loading(category: Category) -> String {
    format!(
        r#"<p class="loading">Loading {} Data...</p>"#,
        escape(category.display_name())
    )
}

pub fn predictions_error(league: League, reason: &str) -> String {
    format!(
        r#"<p class="error">Error loading {} games: {}</p>"#,
        escape(league.display_name()),
        escape(reason)
    )
}

pub fn no_predictions(league: League) -> String {
    format!(
        r#"<p class="info">No predictions available for {}.</p>"#,
        escape(league.display_name())
    )
}

pub fn no_history() -> String {
    r#"<p class="info">No historical performance data available.</p>"#.to_string()
}

pub fn accuracy_section(columns: &[AccuracyColumn]) -> String {
    let mut html = String::from(r#"<h2>Overall Model Accuracy</h2><div class="accuracy-grid">"#);
    for col in columns {
        let _ = write!(
            html,
            r#"<div class="accuracy-col"><h6>{}</h6><div class="metric-container">
<div class="metric">Winner Accuracy <strong>{:.1}%</strong></div>
<div class="metric">Spread Accuracy <strong>{:.1}%</strong></div>
<div class="metric">Total Accuracy <strong>{:.1}%</strong></div>
</div></div>"#,
            escape(col.league.display_name()),
            col.winner,
            col.spread,
            col.total
        );
    }
    html.push_str("</div><hr>");
    html
}

/// Chart canvases, or the no-data message when there is nothing to draw.
pub fn chart_section(charts: Option<&PerformanceCharts>) -> String {
    let mut html = String::from("<h2>Historical Model Performance: Accuracy and Profit</h2>");
    match charts {
        Some(charts) => {
            for (i, chart) in [&charts.profit, &charts.win_pct].into_iter().enumerate() {
                if i > 0 {
                    html.push_str("<hr>");
                }
                let _ = write!(
                    html,
                    r#"<div class="chart-container"><h5>{}</h5><canvas id="{}"></canvas></div>"#,
                    escape(chart.title),
                    chart.surface
                );
            }
        }
        None => {
            html.push_str(r#"<div class="chart-container">"#);
            html.push_str(&no_history());
            html.push_str("</div>");
        }
    }
    html
}

fn team_block(html: &mut String, team: &TeamLine) {
    let _ = write!(
        html,
        r#"<div class="team-metrics"><h5>{}</h5>
<div class="metric">Projected Score <strong>{}</strong></div>
<div class="metric">Moneyline Odds <strong>{}</strong></div>
<div class="metric">{} <strong>{}</strong></div>
<div class="metric">{} <strong>{}</strong></div>
</div>"#,
        escape(&team.team),
        escape(&team.projected_score),
        escape(&team.moneyline),
        team.spread_label,
        escape(&team.spread),
        team.total_label,
        escape(&team.total)
    );
}

fn game_card(html: &mut String, card: &GameCard) {
    let _ = write!(
        html,
        r#"<div class="game-card"><h3 class="card-title">{}</h3><p class="gameday">Gameday: <strong>{}</strong></p><div class="scores-metrics-grid">"#,
        escape(&card.title),
        escape(&card.gameday)
    );
    team_block(html, &card.away);
    team_block(html, &card.home);
    html.push_str(r#"</div><div class="predictions">"#);
    for pick in &card.picks {
        let _ = write!(
            html,
            r#"<p class="prediction-result {}">{}: <strong>{}</strong> | {} {}</p>"#,
            pick.kind,
            pick.label,
            escape(&pick.pick),
            escape(&pick.probability),
            pick.probability_label
        );
    }
    html.push_str("</div></div>");
}

/// Cards for one league; the no-predictions message when `cards` is empty.
pub fn predictions(league: League, cards: &[GameCard]) -> String {
    if cards.is_empty() {
        return no_predictions(league);
    }
    let mut html = format!(
        r#"<h2>{} Game Predictions</h2><hr><div class="game-cards-container">"#,
        escape(league.display_name())
    );
    for card in cards {
        game_card(&mut html, card);
    }
    html.push_str("</div>");
    html
}

/// Embed chart payload JSON so the shell page can draw on first load.
pub fn chart_payload_script(charts: &PerformanceCharts) -> String {
    let json = serde_json::to_string(charts)
        .unwrap_or_else(|_| "null".to_string())
        .replace("</", "<\\/");
    format!(r#"<script type="application/json" id="chart-data">{}</script>"#, json)
}

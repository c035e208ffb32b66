//! View controller: owns the active tab and the content region.
//!
//! Every navigation bumps the content generation and publishes a loading
//! snapshot, then renders in the background. A render only lands if its
//! generation is still current, so a slow response for an old tab never
//! replaces a newer one. In-flight requests are not cancelled.

use futures_util::future::join_all;
use serde::Serialize;
use std::sync::Arc;
use tokio::sync::watch;
use tracing::{debug, info, warn};

use crate::api::PredictionsApi;
use crate::league::{Category, League};
use crate::view::{build_performance_charts, html, AccuracyColumn, GameCard, PerformanceCharts};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    Idle,
    Loading,
    Rendered,
    Empty,
    Error,
}

/// What the content region currently shows.
#[derive(Debug, Clone, Serialize)]
pub struct ContentSnapshot {
    pub generation: u64,
    /// The active tab. Exactly one category is active at a time.
    pub category: Category,
    pub phase: Phase,
    pub html: String,
    /// Series for the overview charts; `None` means draw nothing.
    pub charts: Option<PerformanceCharts>,
}

impl ContentSnapshot {
    fn loading(generation: u64, category: Category) -> Self {
        ContentSnapshot {
            generation,
            category,
            phase: Phase::Loading,
            html: html::loading(category),
            charts: None,
        }
    }

    pub fn is_settled(&self) -> bool {
        self.phase != Phase::Loading
    }
}

struct Rendered {
    phase: Phase,
    html: String,
    charts: Option<PerformanceCharts>,
}

#[derive(Clone)]
pub struct ViewController {
    api: Arc<dyn PredictionsApi>,
    content: Arc<watch::Sender<ContentSnapshot>>,
}

impl ViewController {
    pub fn new(api: Arc<dyn PredictionsApi>) -> Self {
        let (content, _) = watch::channel(ContentSnapshot {
            generation: 0,
            category: Category::Home,
            phase: Phase::Idle,
            html: String::new(),
            charts: None,
        });
        ViewController {
            api,
            content: Arc::new(content),
        }
    }

    /// Current content region.
    pub fn snapshot(&self) -> ContentSnapshot {
        self.content.borrow().clone()
    }

    pub fn active(&self) -> Category {
        self.content.borrow().category
    }

    /// Make `category` the active tab and start loading it in the background.
    /// Returns the loading snapshot published for this navigation.
    pub fn select(&self, category: Category) -> ContentSnapshot {
        let loading = self.begin(category);
        let generation = loading.generation;
        let this = self.clone();
        tokio::spawn(async move {
            this.finish(generation, category).await;
        });
        loading
    }

    /// Load `category` and wait for it to render.
    pub async fn load(&self, category: Category) -> ContentSnapshot {
        let generation = self.begin(category).generation;
        self.finish(generation, category).await
    }

    /// Wait until content for `generation` has settled. Returns at once with
    /// the current snapshot if `generation` is not the one being loaded
    /// (superseded, or never issued).
    pub async fn wait_settled(&self, generation: u64) -> ContentSnapshot {
        let mut rx = self.content.subscribe();
        let settled = rx
            .wait_for(|s| s.generation != generation || s.is_settled())
            .await
            .map(|s| s.clone());
        settled.unwrap_or_else(|_| self.snapshot())
    }

    /// Publish the loading snapshot for a new navigation and return it.
    fn begin(&self, category: Category) -> ContentSnapshot {
        let mut loading = ContentSnapshot::loading(0, category);
        self.content.send_modify(|current| {
            loading.generation = current.generation + 1;
            *current = loading.clone();
        });
        debug!("Loading {} (generation {})", category, loading.generation);
        loading
    }

    async fn finish(&self, generation: u64, category: Category) -> ContentSnapshot {
        let rendered = match category {
            Category::Home => self.render_overview().await,
            Category::League(league) => self.render_predictions(league).await,
        };
        let snapshot = ContentSnapshot {
            generation,
            category,
            phase: rendered.phase,
            html: rendered.html,
            charts: rendered.charts,
        };

        let applied = self.content.send_if_modified(|current| {
            if current.generation != generation {
                return false;
            }
            *current = snapshot.clone();
            true
        });
        if applied {
            info!("Rendered {} ({:?}, generation {})", category, snapshot.phase, generation);
        } else {
            debug!(
                "Discarded stale {} render (generation {}, current {})",
                category,
                generation,
                self.content.borrow().generation
            );
        }
        snapshot
    }

    /// Accuracy for every league (fetched concurrently, each failure
    /// degrading only its own column), then the performance charts.
    async fn render_overview(&self) -> Rendered {
        let api = &self.api;
        let fetches = League::ALL.into_iter().map(|league| async move {
            let summary = match api.accuracy(league).await {
                Ok(summary) => Some(summary),
                Err(e) => {
                    warn!("No accuracy data for {}: {}", league.code(), e);
                    None
                }
            };
            AccuracyColumn::new(league, summary.as_ref())
        });
        let columns = join_all(fetches).await;

        let samples = match api.performance().await {
            Ok(samples) => samples,
            Err(e) => {
                warn!("No performance history: {}", e);
                Vec::new()
            }
        };
        let charts = build_performance_charts(&samples);

        let mut body = html::accuracy_section(&columns);
        body.push_str(&html::chart_section(charts.as_ref()));
        Rendered {
            phase: Phase::Rendered,
            html: body,
            charts,
        }
    }

    async fn render_predictions(&self, league: League) -> Rendered {
        match self.api.games(league).await {
            Err(e) => {
                warn!("Failed to load {} games: {}", league.code(), e);
                Rendered {
                    phase: Phase::Error,
                    html: html::predictions_error(league, &e.to_string()),
                    charts: None,
                }
            }
            Ok(games) if games.is_empty() => Rendered {
                phase: Phase::Empty,
                html: html::no_predictions(league),
                charts: None,
            },
            Ok(games) => {
                let cards: Vec<GameCard> = games.iter().map(GameCard::from).collect();
                Rendered {
                    phase: Phase::Rendered,
                    html: html::predictions(league, &cards),
                    charts: None,
                }
            }
        }
    }
}

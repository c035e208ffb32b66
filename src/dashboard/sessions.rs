//! One view controller per open page.
//!
//! Each page load gets its own controller so tab selection and content never
//! leak between viewers. Ids start at the process start time in milliseconds
//! so a page left open across a restart can't land on someone else's view.

use chrono::Utc;
use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};
use tracing::debug;

use crate::api::PredictionsApi;
use crate::controller::ViewController;

/// Oldest sessions are dropped beyond this many.
pub const MAX_SESSIONS: usize = 512;

pub struct Sessions {
    api: Arc<dyn PredictionsApi>,
    inner: Mutex<SessionsInner>,
}

struct SessionsInner {
    next_id: u64,
    views: BTreeMap<u64, ViewController>,
}

impl Sessions {
    pub fn new(api: Arc<dyn PredictionsApi>) -> Self {
        Sessions {
            api,
            inner: Mutex::new(SessionsInner {
                next_id: Utc::now().timestamp_millis().max(0) as u64,
                views: BTreeMap::new(),
            }),
        }
    }

    /// Start a fresh view and return its id.
    pub fn open(&self) -> (u64, ViewController) {
        let controller = ViewController::new(Arc::clone(&self.api));
        let mut inner = self.inner.lock().unwrap_or_else(|e| e.into_inner());
        let id = inner.next_id;
        inner.next_id += 1;
        inner.views.insert(id, controller.clone());
        while inner.views.len() > MAX_SESSIONS {
            if let Some((evicted, _)) = inner.views.pop_first() {
                debug!("Evicted view session {}", evicted);
            }
        }
        debug!("Opened view session {} ({} open)", id, inner.views.len());
        (id, controller)
    }

    pub fn get(&self, id: u64) -> Option<ViewController> {
        let inner = self.inner.lock().unwrap_or_else(|e| e.into_inner());
        inner.views.get(&id).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{AccuracySummary, ApiError, GamePrediction, PerformanceSample};
    use crate::league::{Category, League};
    use async_trait::async_trait;

    struct EmptyApi;

    #[async_trait]
    impl PredictionsApi for EmptyApi {
        async fn accuracy(&self, _league: League) -> Result<AccuracySummary, ApiError> {
            Ok(AccuracySummary::default())
        }

        async fn performance(&self) -> Result<Vec<PerformanceSample>, ApiError> {
            Ok(vec![])
        }

        async fn games(&self, _league: League) -> Result<Vec<GamePrediction>, ApiError> {
            Ok(vec![])
        }
    }

    #[tokio::test]
    async fn test_sessions_have_independent_views() {
        let sessions = Sessions::new(Arc::new(EmptyApi));
        let (a, view_a) = sessions.open();
        let (b, view_b) = sessions.open();
        assert_ne!(a, b);

        view_a.select(Category::League(League::Nba));
        view_b.select(Category::League(League::Nfl));

        assert_eq!(sessions.get(a).unwrap().active(), Category::League(League::Nba));
        assert_eq!(sessions.get(b).unwrap().active(), Category::League(League::Nfl));
        assert!(sessions.get(b + 1).is_none());
    }

    #[test]
    fn test_oldest_session_evicted_past_limit() {
        let sessions = Sessions::new(Arc::new(EmptyApi));
        let (first, _) = sessions.open();
        let mut last = first;
        for _ in 0..MAX_SESSIONS {
            last = sessions.open().0;
        }
        assert!(sessions.get(first).is_none());
        assert!(sessions.get(first + 1).is_some());
        assert!(sessions.get(last).is_some());
    }
}

//! Per-session state, passed `&mut` through every handler.
//!
//! Lives for one user session and is never persisted; losing it on restart is
//! accepted behavior.

use crate::geo::types::{Place, RouteSet};
use crate::traffic::synthetic::HeatmapCache;
use crate::traffic::types::TrafficLabel;

/// Which view the UI is showing; the orchestrator announces switches, the
/// caller performs them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Page {
    #[default]
    Dashboard,
    Analysis,
    RoutePlanning,
    Heatmap,
    Chat,
}

/// Result of the most recent image analysis.
#[derive(Debug, Clone)]
pub struct AnalysisResult {
    pub label: TrafficLabel,
    pub confidence: f64,
    pub vehicle_count: u32,
    pub clear_time_min: u32,
}

/// A planned trip: the resolved destination plus the fetched routes.
#[derive(Debug, Clone)]
pub struct PlannedTrip {
    pub destination: Place,
    pub routes: RouteSet,
}

#[derive(Debug, Default)]
pub struct SessionState {
    pub user: Option<String>,
    pub page: Page,
    pub analysis: Option<AnalysisResult>,
    pub location: Option<Place>,
    pub trip: Option<PlannedTrip>,
    pub heatmap: Option<HeatmapCache>,
}

impl SessionState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn for_user(user: impl Into<String>) -> Self {
        Self {
            user: Some(user.into()),
            ..Self::default()
        }
    }

    /// Record a completed analysis, replacing any previous one.
    pub fn record_analysis(&mut self, analysis: AnalysisResult) {
        self.analysis = Some(analysis);
    }

    /// Drop everything but the user; used on logout-and-back-in.
    pub fn reset(&mut self) {
        let user = self.user.take();
        *self = Self {
            user,
            ..Self::default()
        };
    }
}

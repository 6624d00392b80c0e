//! Grounding-context composition.
//!
//! Turns a classified intent into the text block that accompanies the user's
//! message: action intents get an acknowledgment instruction, query intents
//! get synthetic data plus a phrasing instruction, general conversation gets
//! the session's current state.

use crate::assistant::intent::{Intent, IntentMatch};
use crate::config::Config;
use crate::session::SessionState;
use crate::traffic::synthetic::{
    self, HistoricalSummary, TrafficPrediction, TrafficSnapshot,
};
use chrono::{DateTime, Local, Weekday};
use std::fmt::Write as _;

/// Action the caller should perform after showing the reply. The composer
/// only announces; executing (fetching routes, switching views) is the
/// caller's job.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TriggeredAction {
    Analyze,
    Route { destination: Option<String> },
    Heatmap,
}

/// Grounding context plus the action it announces, ready for the provider.
#[derive(Debug, Clone)]
pub struct ComposedPrompt {
    pub context: String,
    pub action: Option<TriggeredAction>,
}

/// Horizon for chat-initiated predictions, matching the dashboard default.
const PREDICTION_MINUTES_AHEAD: u32 = 15;

pub fn compose(
    matched: &IntentMatch,
    session: &SessionState,
    now: DateTime<Local>,
    config: &Config,
) -> ComposedPrompt {
    let mut context = String::new();
    let mut action = None;

    match matched.intent {
        Intent::AnalyzeTraffic => {
            action = Some(TriggeredAction::Analyze);
            context.push_str(
                "User wants to trigger traffic analysis. Acknowledge and indicate the analysis \
                 will start.",
            );
        }
        Intent::PlanRoute => {
            let destination = matched.slots.destination.clone();
            match &destination {
                Some(dest) => {
                    let _ = write!(
                        context,
                        "User wants to plan a route to {dest}. Acknowledge and indicate route \
                         planning will start."
                    );
                }
                None => context.push_str(
                    "User wants to plan a route but didn't specify destination. Ask for the \
                     destination.",
                ),
            }
            action = Some(TriggeredAction::Route { destination });
        }
        Intent::ShowHeatmap => {
            action = Some(TriggeredAction::Heatmap);
            context.push_str(
                "User wants to see the heat map. Acknowledge and indicate the heatmap will be \
                 shown.",
            );
        }
        Intent::RedZones => {
            let zones = synthetic::red_zones(now, &config.thresholds, &config.peak_hours);
            if zones.is_empty() {
                context.push_str("Current red (high traffic) zones data: none right now.\n");
            } else {
                context.push_str("Current red (high traffic) zones data:\n");
                for zone in &zones {
                    let _ = writeln!(
                        context,
                        "- {}: {} vehicles, {} min delay",
                        zone.location, zone.vehicle_count, zone.delay_minutes
                    );
                }
            }
            context.push_str("Provide information about current red zones based on this data.");
        }
        Intent::TrafficStatus => match matched.slots.location.as_deref() {
            Some(location) => {
                let snap =
                    synthetic::snapshot(location, now, &config.thresholds, &config.peak_hours);
                let _ = writeln!(
                    context,
                    "Current traffic data for {location}: {}",
                    describe_snapshot(&snap)
                );
                context.push_str(
                    "Provide a helpful response about traffic conditions using this data.",
                );
            }
            None => context.push_str(
                "User asked about traffic but didn't specify location. Ask which location they \
                 want to know about.",
            ),
        },
        Intent::Prediction => match matched.slots.location.as_deref() {
            Some(location) => {
                let prediction = synthetic::prediction(
                    location,
                    now,
                    PREDICTION_MINUTES_AHEAD,
                    &config.thresholds,
                    &config.peak_hours,
                );
                let _ = writeln!(
                    context,
                    "Traffic prediction for {location}: {}",
                    describe_prediction(&prediction)
                );
                context.push_str(
                    "Provide a helpful prediction response and suggest if they should avoid or \
                     use alternate routes.",
                );
            }
            None => context.push_str(
                "User asked for prediction but didn't specify location. Ask which location they \
                 want predictions for.",
            ),
        },
        Intent::Historical => {
            let day = matched.slots.day.unwrap_or(Weekday::Mon);
            let summary = synthetic::historical_summary("General Mumbai", day);
            let _ = writeln!(
                context,
                "Historical traffic data: {}",
                describe_historical(&summary)
            );
            context
                .push_str("Provide a summary of historical traffic patterns based on this data.");
        }
        Intent::General => {
            if let Some(analysis) = &session.analysis {
                let _ = writeln!(
                    context,
                    "Current analysis results (if relevant):\n\
                     - Traffic Type: {}\n\
                     - Vehicle Count: {}\n\
                     - Confidence: {:.1}%\n\
                     - Clear Time: {} minutes",
                    analysis.label,
                    analysis.vehicle_count,
                    analysis.confidence * 100.0,
                    analysis.clear_time_min
                );
            }
            if let Some(location) = &session.location {
                let _ = write!(
                    context,
                    "\nUser's current location: Lat {}, Lon {}",
                    location.coords.lat, location.coords.lon
                );
            }
        }
    }

    ComposedPrompt { context, action }
}

fn describe_snapshot(snap: &TrafficSnapshot) -> String {
    let anomaly = snap
        .anomaly
        .map_or_else(|| "none".to_string(), |a| a.to_string());
    format!(
        "{} vehicles, {} density, about {} min delay, anomaly: {anomaly}, peak hour: {}, as of {}",
        snap.vehicle_count, snap.density, snap.delay_minutes, snap.is_peak_hour, snap.timestamp
    )
}

fn describe_prediction(prediction: &TrafficPrediction) -> String {
    format!(
        "currently {} density, trend {}, expected {} in {} minutes",
        prediction.current_density,
        prediction.trend,
        prediction.expected_density,
        prediction.minutes_ahead
    )
}

fn describe_historical(summary: &HistoricalSummary) -> String {
    format!(
        "{} on {}: morning peak {}, evening peak {}, busiest hour {}, average {} vehicles at \
         peak / {} off-peak, recommended travel times: {}",
        summary.location,
        summary.day,
        summary.morning_peak,
        summary.evening_peak,
        summary.busiest_hour,
        summary.average_peak_vehicles,
        summary.average_off_peak_vehicles,
        summary.recommended_travel_times.join(", ")
    )
}

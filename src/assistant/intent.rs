//! Rule-based intent router.
//!
//! Classification walks an ordered rule table: action triggers first, then
//! informational queries, then the general-conversation fallthrough. The
//! table is plain data so routing is testable without any model call.

use crate::util::text::title_case;
use crate::util::time::find_day_mention;
use chrono::Weekday;
use regex::Regex;
use std::sync::LazyLock;
use strum::Display;

/// Closed set of things a chat message can ask for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum Intent {
    /// Trigger an image analysis run.
    AnalyzeTraffic,
    /// Trigger route planning, optionally with a destination slot.
    PlanRoute,
    /// Switch to the heat-map view.
    ShowHeatmap,
    /// Which zones are currently congested.
    RedZones,
    /// Current conditions at a named location.
    TrafficStatus,
    /// Near-future conditions at a named location.
    Prediction,
    /// Typical patterns for a day of the week.
    Historical,
    /// Anything else: general conversation.
    General,
}

impl Intent {
    /// Action intents make the caller do something; query intents only
    /// shape the grounding context.
    pub fn is_action(&self) -> bool {
        matches!(
            self,
            Intent::AnalyzeTraffic | Intent::PlanRoute | Intent::ShowHeatmap
        )
    }
}

/// Slot values extracted alongside the intent.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Slots {
    pub destination: Option<String>,
    pub location: Option<String>,
    pub day: Option<Weekday>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct IntentMatch {
    pub intent: Intent,
    pub slots: Slots,
}

// ─── Rule table ─────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy)]
enum SlotExtractor {
    None,
    RouteDestination,
    TrafficLocation,
    PredictionLocation,
    HistoricalDay,
}

struct IntentRule {
    intent: Intent,
    triggers: &'static [&'static str],
    extractor: SlotExtractor,
}

/// Ordered by priority: earlier rules win when phrases overlap.
static RULES: &[IntentRule] = &[
    IntentRule {
        intent: Intent::AnalyzeTraffic,
        triggers: &[
            "analyze traffic",
            "run analysis",
            "execute traffic analysis",
            "analyze now",
        ],
        extractor: SlotExtractor::None,
    },
    IntentRule {
        intent: Intent::PlanRoute,
        triggers: &[
            "plan route",
            "take me to",
            "navigate to",
            "go to",
            "route to",
            "directions to",
            "how do i get to",
            "how to get to",
            "how to reach",
            "shortest route to",
            "fastest route to",
            "best route to",
            "way to",
            "i want to go to",
            "i need to go to",
            "i want to reach",
            "bring me to",
            "drive me to",
            "travel to",
            "get me to",
            "find route to",
            "show route to",
            "path to",
            "road to",
            "distance to",
            "commute to",
        ],
        extractor: SlotExtractor::RouteDestination,
    },
    IntentRule {
        intent: Intent::ShowHeatmap,
        triggers: &["heat map", "heatmap", "show heatmap"],
        extractor: SlotExtractor::None,
    },
    IntentRule {
        intent: Intent::RedZones,
        triggers: &[
            "red zone",
            "red zones",
            "congested areas",
            "high traffic areas",
        ],
        extractor: SlotExtractor::None,
    },
    IntentRule {
        intent: Intent::TrafficStatus,
        triggers: &[
            "traffic at",
            "traffic in",
            "traffic density",
            "current traffic",
            "status at",
            "status in",
            "how is traffic",
        ],
        extractor: SlotExtractor::TrafficLocation,
    },
    IntentRule {
        intent: Intent::Prediction,
        triggers: &[
            "will be congested",
            "prediction",
            "predict",
            "going to be busy",
            "will there be traffic",
        ],
        extractor: SlotExtractor::PredictionLocation,
    },
    IntentRule {
        intent: Intent::Historical,
        triggers: &[
            "peak hours",
            "last monday",
            "last week",
            "historical",
            "busiest time",
            "best time to travel",
        ],
        extractor: SlotExtractor::HistoricalDay,
    },
];

/// One extraction pattern per route-trigger phrasing; the first capture wins.
static DESTINATION_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        "take me to",
        "navigate to",
        "go to",
        "route to",
        "directions to",
        "plan route to",
        "how do i get to",
        "how to get to",
        "how to reach",
        "shortest route to",
        "fastest route to",
        "best route to",
        "way to",
        "i want to go to",
        "i need to go to",
        "i want to reach",
        "bring me to",
        "drive me to",
        "travel to",
        "get me to",
        "find route to",
        "show route to",
        "path to",
        "road to",
        "distance to",
        "commute to",
    ]
    .iter()
    .map(|phrase| Regex::new(&format!("{phrase} (.+)")).expect("static pattern compiles"))
    .collect()
});

/// Places the status query recognizes, lowercased.
static TRAFFIC_GAZETTEER: &[&str] = &[
    "ghatkopar",
    "dadar",
    "andheri",
    "bandra",
    "kurla",
    "kanjurmarg",
    "vidya vihar",
    "mulund",
    "thane",
    "powai",
    "bkc",
    "worli",
    "lower parel",
    "cst",
    "churchgate",
    "marine drive",
    "borivali",
    "malad",
    "goregaon",
    "jogeshwari",
    "santacruz",
    "vile parle",
    "mumbai airport",
    "chembur",
];

/// Smaller set with enough history for predictions.
static PREDICTION_GAZETTEER: &[&str] = &[
    "ghatkopar",
    "dadar",
    "andheri",
    "bandra",
    "kurla",
    "kanjurmarg",
    "vidya vihar",
    "mulund",
    "thane",
    "powai",
    "bkc",
    "worli",
];

// ─── Classification ─────────────────────────────────────────────────────────

/// Classify a raw utterance. Never fails: anything unmatched is `General`.
pub fn classify(utterance: &str) -> IntentMatch {
    let lower = utterance.to_lowercase();

    for rule in RULES {
        if rule.triggers.iter().any(|phrase| lower.contains(phrase)) {
            return IntentMatch {
                intent: rule.intent,
                slots: extract_slots(rule.extractor, &lower),
            };
        }
    }

    IntentMatch {
        intent: Intent::General,
        slots: Slots::default(),
    }
}

fn extract_slots(extractor: SlotExtractor, lower: &str) -> Slots {
    match extractor {
        SlotExtractor::None => Slots::default(),
        SlotExtractor::RouteDestination => Slots {
            destination: extract_destination(lower),
            ..Slots::default()
        },
        SlotExtractor::TrafficLocation => Slots {
            location: match_gazetteer(lower, TRAFFIC_GAZETTEER),
            ..Slots::default()
        },
        SlotExtractor::PredictionLocation => Slots {
            location: match_gazetteer(lower, PREDICTION_GAZETTEER),
            ..Slots::default()
        },
        SlotExtractor::HistoricalDay => Slots {
            // Historical queries always carry a day, defaulting to Monday.
            day: Some(find_day_mention(lower).unwrap_or(Weekday::Mon)),
            ..Slots::default()
        },
    }
}

fn extract_destination(lower: &str) -> Option<String> {
    for pattern in DESTINATION_PATTERNS.iter() {
        if let Some(captures) = pattern.captures(lower) {
            let destination = captures[1].trim().trim_end_matches(['?', '.', ',', '!']).trim();
            if !destination.is_empty() {
                return Some(destination.to_string());
            }
        }
    }
    None
}

fn match_gazetteer(lower: &str, gazetteer: &[&str]) -> Option<String> {
    gazetteer
        .iter()
        .find(|place| lower.contains(*place))
        .map(|place| title_case(place))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn route_with_destination() {
        let matched = classify("Take me to Bandra");
        assert_eq!(matched.intent, Intent::PlanRoute);
        assert_eq!(matched.slots.destination.as_deref(), Some("bandra"));
    }

    #[test]
    fn route_without_destination() {
        let matched = classify("Take me to");
        assert_eq!(matched.intent, Intent::PlanRoute);
        assert_eq!(matched.slots.destination, None);
    }

    #[test]
    fn route_strips_trailing_punctuation() {
        let matched = classify("how do i get to Mumbai Airport?");
        assert_eq!(matched.intent, Intent::PlanRoute);
        assert_eq!(matched.slots.destination.as_deref(), Some("mumbai airport"));
    }

    #[test]
    fn traffic_status_with_gazetteer_location() {
        let matched = classify("What's the traffic at Dadar?");
        assert_eq!(matched.intent, Intent::TrafficStatus);
        assert_eq!(matched.slots.location.as_deref(), Some("Dadar"));
    }

    #[test]
    fn traffic_status_without_known_location() {
        let matched = classify("how is traffic today");
        assert_eq!(matched.intent, Intent::TrafficStatus);
        assert_eq!(matched.slots.location, None);
    }

    #[test]
    fn unclassifiable_is_general() {
        let matched = classify("tell me a joke");
        assert_eq!(matched.intent, Intent::General);
        assert_eq!(matched.slots, Slots::default());
    }

    #[test]
    fn action_triggers_win_over_queries() {
        // "analyze traffic" (action) and "traffic at" would both match; the
        // action rule is first.
        let matched = classify("analyze traffic at dadar please");
        assert_eq!(matched.intent, Intent::AnalyzeTraffic);
    }

    #[test]
    fn route_wins_over_traffic_status() {
        let matched = classify("take me to dadar if the traffic at kurla is bad");
        assert_eq!(matched.intent, Intent::PlanRoute);
        assert!(matched.slots.destination.is_some());
    }

    #[test]
    fn heatmap_variants() {
        assert_eq!(classify("show heatmap").intent, Intent::ShowHeatmap);
        assert_eq!(classify("open the heat map").intent, Intent::ShowHeatmap);
    }

    #[test]
    fn red_zones_before_traffic_status() {
        let matched = classify("any red zones with high traffic at the moment");
        assert_eq!(matched.intent, Intent::RedZones);
    }

    #[test]
    fn prediction_with_location() {
        let matched = classify("will there be traffic near Powai soon");
        assert_eq!(matched.intent, Intent::Prediction);
        assert_eq!(matched.slots.location.as_deref(), Some("Powai"));
    }

    #[test]
    fn historical_day_defaults_to_monday() {
        let matched = classify("what are the peak hours");
        assert_eq!(matched.intent, Intent::Historical);
        assert_eq!(matched.slots.day, Some(Weekday::Mon));

        let matched = classify("busiest time on friday");
        assert_eq!(matched.slots.day, Some(Weekday::Fri));
    }

    #[test]
    fn intent_action_flag() {
        assert!(Intent::PlanRoute.is_action());
        assert!(!Intent::TrafficStatus.is_action());
        assert!(!Intent::General.is_action());
    }
}

//! Dialogue orchestration: classify, ground, call the model, keep history,
//! raise proactive alerts. Actions are announced to the caller, never
//! executed here.

use crate::assistant::announcer::{Announcer, NoopAnnouncer};
use crate::assistant::composer::{self, TriggeredAction};
use crate::assistant::intent;
use crate::assistant::persona::SYSTEM_CONTEXT;
use crate::config::Config;
use crate::providers::Provider;
use crate::session::SessionState;
use crate::util::text::truncate_with_ellipsis;
use chrono::{DateTime, Local, Timelike};
use std::fmt::Write as _;
use std::sync::Arc;

/// History is bounded: everything past the cap is dropped oldest-first, and
/// only the tail window is echoed into outgoing prompts.
const HISTORY_CAP: usize = 20;
const HISTORY_PROMPT_WINDOW: usize = 6;

/// Morning and evening stretches where a planned route warrants a
/// congestion heads-up.
const RUSH_ADVISORY_HOURS: [u32; 4] = [7, 8, 16, 17];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    User,
    Assistant,
}

#[derive(Debug, Clone)]
pub struct ChatTurn {
    pub role: Role,
    pub text: String,
    pub timestamp: DateTime<Local>,
}

/// What one exchange produced: the reply to show and the action (if any)
/// the caller should now perform.
#[derive(Debug, Clone)]
pub struct ChatOutcome {
    pub reply: String,
    pub action: Option<TriggeredAction>,
}

pub struct Orchestrator {
    provider: Arc<dyn Provider>,
    announcer: Arc<dyn Announcer>,
    config: Config,
    history: Vec<ChatTurn>,
}

impl Orchestrator {
    pub fn new(provider: Arc<dyn Provider>, config: Config) -> Self {
        Self {
            provider,
            announcer: Arc::new(NoopAnnouncer),
            config,
            history: Vec::new(),
        }
    }

    pub fn with_announcer(mut self, announcer: Arc<dyn Announcer>) -> Self {
        self.announcer = announcer;
        self
    }

    /// Handle one user message against the current session.
    pub async fn respond(&mut self, utterance: &str, session: &SessionState) -> ChatOutcome {
        self.respond_at(utterance, session, Local::now()).await
    }

    /// Clock-injected variant of [`respond`](Self::respond); everything
    /// downstream derives buckets and peak flags from `now`.
    pub async fn respond_at(
        &mut self,
        utterance: &str,
        session: &SessionState,
        now: DateTime<Local>,
    ) -> ChatOutcome {
        let matched = intent::classify(utterance);
        tracing::debug!(
            intent = %matched.intent,
            is_action = matched.intent.is_action(),
            "classified chat message"
        );

        let composed = composer::compose(&matched, session, now, &self.config);

        let mut message = composed.context;
        let history_block = self.history_window();
        if !history_block.is_empty() {
            let _ = write!(message, "\n\nRecent conversation:\n{history_block}");
        }
        let _ = write!(
            message,
            "\n\nUser message: {utterance}\n\nProvide a helpful, concise response:"
        );

        let reply = match self.provider.generate(Some(SYSTEM_CONTEXT), &message).await {
            Ok(text) => text,
            Err(e) => {
                tracing::warn!(provider = self.provider.name(), error = %e, "provider call failed");
                format!(
                    "I'm having trouble connecting to my AI service right now. Error: {}. \
                     Please try again in a moment.",
                    truncate_with_ellipsis(&e.to_string(), 100)
                )
            }
        };

        self.push_turn(Role::User, utterance, now);
        self.push_turn(Role::Assistant, &reply, now);

        ChatOutcome {
            reply,
            action: composed.action,
        }
    }

    /// Proactive alert for the current session, highest severity first; at
    /// most one per call.
    pub fn check_alerts(&self, session: &SessionState, now: DateTime<Local>) -> Option<String> {
        if let Some(analysis) = &session.analysis {
            if analysis.label.is_critical() {
                return Some(format!(
                    "ALERT: {} detected in your analyzed image! Consider alternate routes \
                     immediately.",
                    analysis.label
                ));
            }
            if analysis.vehicle_count > self.config.thresholds.medium {
                return Some(format!(
                    "Traffic Advisory: High congestion detected ({} vehicles). Estimated \
                     delay: {} minutes.",
                    analysis.vehicle_count, analysis.clear_time_min
                ));
            }
        }

        if session.trip.is_some() && RUSH_ADVISORY_HOURS.contains(&now.hour()) {
            return Some(
                "Prediction: Based on current trends, your route may experience increased \
                 congestion in 15-20 minutes."
                    .to_string(),
            );
        }

        None
    }

    /// Best-effort voice output; implementations swallow their own failures.
    pub fn announce(&self, text: &str) {
        self.announcer.announce(text);
    }

    pub fn history(&self) -> &[ChatTurn] {
        &self.history
    }

    pub fn clear_history(&mut self) {
        self.history.clear();
    }

    fn push_turn(&mut self, role: Role, text: &str, now: DateTime<Local>) {
        self.history.push(ChatTurn {
            role,
            text: text.to_string(),
            timestamp: now,
        });
        if self.history.len() > HISTORY_CAP {
            let excess = self.history.len() - HISTORY_CAP;
            self.history.drain(..excess);
        }
    }

    fn history_window(&self) -> String {
        let start = self.history.len().saturating_sub(HISTORY_PROMPT_WINDOW);
        let mut block = String::new();
        for turn in &self.history[start..] {
            let label = match turn.role {
                Role::User => "User",
                Role::Assistant => "Assistant",
            };
            let _ = writeln!(block, "{label}: {}", turn.text);
        }
        block
    }
}

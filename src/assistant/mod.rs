pub mod announcer;
pub mod composer;
pub mod intent;
pub mod orchestrator;
pub mod persona;

pub use announcer::{Announcer, LogAnnouncer, NoopAnnouncer};
pub use composer::{ComposedPrompt, TriggeredAction};
pub use intent::{Intent, IntentMatch, Slots, classify};
pub use orchestrator::{ChatOutcome, ChatTurn, Orchestrator, Role};

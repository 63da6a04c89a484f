//! # Application State
//!
//! Core conversation state for Wellcheck. Domain logic only, no terminal
//! types. Presentation state lives in the `tui` module.
//!
//! ```text
//! App
//! ├── messages: MessageStore         // ordered chat log
//! ├── mood: MoodTrend                // last 7 mood samples
//! ├── resources: ResourcePanel       // current support resources
//! ├── orchestrator: OrchestratorState
//! ├── recording: bool                // voice-check modal visible
//! ├── latest_turn: Option<TurnId>    // most recently submitted turn
//! ├── cancel_stale_follow_ups: bool  // drop follow-ups from older turns
//! └── status_message: String         // title bar text
//! ```
//!
//! State changes only happen through `update(state, action)` in action.rs.

use std::fmt;

use crate::core::config::ResolvedConfig;
use crate::core::messages::{MessageId, MessageStore};
use crate::core::mood::MoodTrend;
use crate::core::resources::ResourcePanel;

/// Identifies one submit → response cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TurnId(pub u64);

impl fmt::Display for TurnId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "turn#{}", self.0)
    }
}

/// Whether an analysis request is outstanding. At most one ever is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OrchestratorState {
    #[default]
    Idle,
    Pending {
        turn: TurnId,
        /// Typing indicator appended for this turn.
        indicator: MessageId,
    },
}

impl OrchestratorState {
    pub fn is_pending(&self) -> bool {
        matches!(self, OrchestratorState::Pending { .. })
    }
}

pub struct App {
    pub messages: MessageStore,
    pub mood: MoodTrend,
    pub resources: ResourcePanel,
    pub orchestrator: OrchestratorState,
    pub recording: bool,
    pub latest_turn: Option<TurnId>,
    next_turn: u64,
    pub cancel_stale_follow_ups: bool,
    pub status_message: String,
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}

impl App {
    pub fn new() -> Self {
        Self {
            messages: MessageStore::new(),
            mood: MoodTrend::seeded(),
            resources: ResourcePanel::new(),
            orchestrator: OrchestratorState::Idle,
            recording: false,
            latest_turn: None,
            next_turn: 1,
            cancel_stale_follow_ups: true,
            status_message: String::from("Welcome to Wellcheck"),
        }
    }

    pub fn from_config(config: &ResolvedConfig) -> Self {
        Self {
            cancel_stale_follow_ups: config.cancel_stale_follow_ups,
            ..Self::new()
        }
    }

    /// Allocates the id for a new turn and records it as the latest.
    pub fn begin_turn(&mut self) -> TurnId {
        let turn = TurnId(self.next_turn);
        self.next_turn += 1;
        self.latest_turn = Some(turn);
        turn
    }

    pub fn is_waiting(&self) -> bool {
        self.orchestrator.is_pending()
    }
}

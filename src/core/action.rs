//! # Actions
//!
//! Everything that can happen in Wellcheck becomes an `Action`.
//! User presses Enter? That's `Action::Submit(text)`.
//! The analysis service answers? That's `Action::AnalysisCompleted { .. }`.
//!
//! The `update()` function takes the current state and an action, mutates the
//! state, and returns an [`Effect`] describing any I/O the caller must perform.
//! No side effects here. I/O happens in the dispatcher.
//!
//! ```text
//! State + Action  →  update()  →  New State + Effect
//! ```

use log::{debug, info, warn};

use crate::analysis::{AnalysisError, AnalysisResponse};
use crate::core::messages::Sender;
use crate::core::mood::{MoodTag, direct_mood_to_sample, label_to_sample};
use crate::core::resources::CRISIS_RESOURCES;
use crate::core::state::{App, OrchestratorState, TurnId};

/// Shown when an analysis request fails for any reason.
pub const FALLBACK_REPLY: &str = "I'm having trouble understanding. Could you try again?";

/// Appended alongside the crisis resources.
pub const REASSURANCE_REPLY: &str =
    "These resources are available if you need immediate help. You're not alone.";

/// Canned result of the voice check.
pub const AUDIO_REPLY: &str =
    "I detected some stress in your voice. Would you like to try a breathing exercise?";

/// One of these is offered after a low-risk reply.
pub const FOLLOW_UP_PROMPTS: [&str; 3] = [
    "Would you like to explore this feeling further?",
    "Is there anything else you'd like to share?",
    "How has this been affecting your daily life?",
];

#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// User submitted text from the input box.
    Submit(String),
    /// The analysis request for `turn` finished.
    AnalysisCompleted {
        turn: TurnId,
        outcome: Result<AnalysisResponse, AnalysisError>,
    },
    /// The delayed follow-up for `turn` fired.
    FollowUpDue { turn: TurnId, prompt: String },
    /// Emoji quick-reaction.
    MoodReaction(MoodTag),
    /// Emergency button.
    Escalate,
    StartRecording,
    StopRecording,
    /// The delayed voice-check reply fired.
    AudioReplyDue,
    Quit,
}

/// I/O requested by `update()`. Carried out by the dispatcher.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    None,
    SpawnAnalysis { turn: TurnId, text: String },
    ScheduleFollowUp { turn: TurnId },
    ScheduleAudioReply,
    Quit,
}

pub fn update(app: &mut App, action: Action) -> Effect {
    match action {
        Action::Submit(text) => submit(app, text),
        Action::AnalysisCompleted { turn, outcome } => complete(app, turn, outcome),
        Action::FollowUpDue { turn, prompt } => {
            if app.cancel_stale_follow_ups && app.latest_turn != Some(turn) {
                debug!("Dropping follow-up for stale {}", turn);
                return Effect::None;
            }
            app.messages.append(Sender::Bot, prompt);
            Effect::None
        }
        Action::MoodReaction(tag) => {
            info!("Mood reaction: {}", tag);
            app.messages.append(Sender::Bot, tag.reply());
            app.mood.push(direct_mood_to_sample(tag.as_str()));
            Effect::None
        }
        Action::Escalate => {
            info!("Escalation triggered (waiting={})", app.is_waiting());
            app.resources.set_resources(CRISIS_RESOURCES);
            app.messages.append(Sender::Bot, REASSURANCE_REPLY);
            Effect::None
        }
        Action::StartRecording => {
            if !app.recording {
                info!("Recording modal opened");
                app.recording = true;
            }
            Effect::None
        }
        Action::StopRecording => {
            info!("Recording modal closed (was open: {})", app.recording);
            app.recording = false;
            Effect::ScheduleAudioReply
        }
        Action::AudioReplyDue => {
            app.messages.append(Sender::Bot, AUDIO_REPLY);
            Effect::None
        }
        Action::Quit => Effect::Quit,
    }
}

fn submit(app: &mut App, text: String) -> Effect {
    let text = text.trim();
    if text.is_empty() {
        return Effect::None;
    }
    if app.is_waiting() {
        debug!("Submit dropped: a request is already in flight");
        return Effect::None;
    }

    app.messages.append(Sender::User, text);
    let indicator = app.messages.append(Sender::Typing, "");
    let turn = app.begin_turn();
    app.orchestrator = OrchestratorState::Pending { turn, indicator };
    app.status_message = String::from("Thinking...");
    info!("Submit accepted for {} ({} chars)", turn, text.len());

    Effect::SpawnAnalysis {
        turn,
        text: text.to_string(),
    }
}

fn complete(
    app: &mut App,
    turn: TurnId,
    outcome: Result<AnalysisResponse, AnalysisError>,
) -> Effect {
    let indicator = match app.orchestrator {
        OrchestratorState::Pending {
            turn: pending,
            indicator,
        } if pending == turn => indicator,
        other => {
            warn!("Discarding stale completion for {} (state: {:?})", turn, other);
            return Effect::None;
        }
    };

    app.messages.remove_transient(indicator);
    app.orchestrator = OrchestratorState::Idle;

    match outcome {
        Ok(response) => {
            app.messages.append(Sender::Bot, response.response.as_str());
            app.resources.set_resources(response.resources.iter().cloned());
            app.mood.push(label_to_sample(&response.emotion.label));
            app.status_message = format!("Mood: {}", response.emotion.label);
            if response.is_low_risk() {
                Effect::ScheduleFollowUp { turn }
            } else {
                Effect::None
            }
        }
        Err(e) => {
            warn!("Analysis failed for {}: {}", turn, e);
            app.messages.append(Sender::Bot, FALLBACK_REPLY);
            app.status_message = String::from("Connection problem");
            Effect::None
        }
    }
}

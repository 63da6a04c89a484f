//! # Effect Dispatcher
//!
//! Carries out the [`Effect`]s returned by `core::action::update`. This is
//! the only place that starts network requests or timers. Everything it
//! starts reports back by sending an [`Action`] on the channel returned from
//! [`Dispatcher::new`]; the event loop feeds those actions into `update()`.
//!
//! ```text
//! Action ─► update(&mut App) ─► Effect ─► Dispatcher ─► tokio task
//!   ▲                                                      │
//!   └──────────────────── mpsc channel ◄───────────────────┘
//! ```

use std::sync::Arc;
use std::time::Duration;

use log::{info, warn};
use rand::seq::IndexedRandom;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};

use crate::analysis::AnalysisService;
use crate::core::action::{Action, Effect, FOLLOW_UP_PROMPTS, update};
use crate::core::config::ResolvedConfig;
use crate::core::state::{App, TurnId};
use crate::scheduler::{Scheduler, TaskKey};

pub struct Dispatcher {
    service: Arc<dyn AnalysisService>,
    scheduler: Scheduler,
    tx: UnboundedSender<Action>,
    follow_up_delay: Duration,
    audio_reply_delay: Duration,
    cancel_stale_follow_ups: bool,
}

impl Dispatcher {
    pub fn new(
        service: Arc<dyn AnalysisService>,
        config: &ResolvedConfig,
    ) -> (Self, UnboundedReceiver<Action>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let dispatcher = Self {
            service,
            scheduler: Scheduler::new(),
            tx,
            follow_up_delay: config.follow_up_delay,
            audio_reply_delay: config.audio_reply_delay,
            cancel_stale_follow_ups: config.cancel_stale_follow_ups,
        };
        (dispatcher, rx)
    }

    /// Applies `action` to `app` and carries out the resulting effect.
    /// Returns the effect so the caller can react to `Effect::Quit`.
    pub fn dispatch(&mut self, app: &mut App, action: Action) -> Effect {
        let effect = update(app, action);
        self.execute(effect.clone());
        effect
    }

    pub fn execute(&mut self, effect: Effect) {
        match effect {
            Effect::None | Effect::Quit => {}
            Effect::SpawnAnalysis { turn, text } => self.spawn_analysis(turn, text),
            Effect::ScheduleFollowUp { turn } => {
                let prompt = FOLLOW_UP_PROMPTS
                    .choose(&mut rand::rng())
                    .copied()
                    .unwrap_or(FOLLOW_UP_PROMPTS[0]);
                self.scheduler.schedule(
                    TaskKey::FollowUp(turn),
                    self.follow_up_delay,
                    Action::FollowUpDue {
                        turn,
                        prompt: prompt.to_string(),
                    },
                    self.tx.clone(),
                );
            }
            Effect::ScheduleAudioReply => {
                let key = self.scheduler.next_audio_key();
                self.scheduler.schedule(
                    key,
                    self.audio_reply_delay,
                    Action::AudioReplyDue,
                    self.tx.clone(),
                );
            }
        }
    }

    /// Delayed tasks that have not fired yet.
    pub fn pending_tasks(&self) -> usize {
        self.scheduler.pending()
    }

    fn spawn_analysis(&mut self, turn: TurnId, text: String) {
        if self.cancel_stale_follow_ups {
            self.scheduler.cancel_follow_ups_before(turn);
        }

        info!("Spawning analysis request for {} via {}", turn, self.service.name());
        let service = self.service.clone();
        let tx = self.tx.clone();
        tokio::spawn(async move {
            let outcome = service.analyze_text(&text).await;
            if tx.send(Action::AnalysisCompleted { turn, outcome }).is_err() {
                warn!("Failed to deliver completion for {}: receiver dropped", turn);
            }
        });
    }
}

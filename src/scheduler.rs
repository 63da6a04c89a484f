//! Delayed actions with handles.
//!
//! Each scheduled task sleeps, then sends one [`Action`] back to the event
//! loop. Tasks are keyed so a later turn can abort follow-ups that an earlier
//! turn scheduled.

use std::collections::HashMap;
use std::time::Duration;

use log::{debug, warn};
use tokio::sync::mpsc::UnboundedSender;
use tokio::task::AbortHandle;

use crate::core::action::Action;
use crate::core::state::TurnId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TaskKey {
    FollowUp(TurnId),
    AudioReply(u64),
}

#[derive(Default)]
pub struct Scheduler {
    tasks: HashMap<TaskKey, AbortHandle>,
    next_audio: u64,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sends `action` on `tx` after `delay`. Rescheduling an existing key aborts the old task.
    pub fn schedule(
        &mut self,
        key: TaskKey,
        delay: Duration,
        action: Action,
        tx: UnboundedSender<Action>,
    ) {
        self.prune();
        debug!("Scheduling {:?} in {}ms", key, delay.as_millis());
        let handle = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            debug!("Firing {:?}", key);
            if tx.send(action).is_err() {
                warn!("Failed to deliver {:?}: receiver dropped", key);
            }
        });
        if let Some(previous) = self.tasks.insert(key, handle.abort_handle()) {
            previous.abort();
        }
    }

    /// Fresh key for a voice-check reply. Replies never replace each other.
    pub fn next_audio_key(&mut self) -> TaskKey {
        self.next_audio += 1;
        TaskKey::AudioReply(self.next_audio)
    }

    pub fn cancel(&mut self, key: TaskKey) -> bool {
        match self.tasks.remove(&key) {
            Some(handle) => {
                let was_running = !handle.is_finished();
                handle.abort();
                was_running
            }
            None => false,
        }
    }

    /// Aborts every follow-up scheduled by a turn older than `turn`.
    /// Returns how many were still waiting.
    pub fn cancel_follow_ups_before(&mut self, turn: TurnId) -> usize {
        let stale: Vec<TaskKey> = self
            .tasks
            .keys()
            .filter(|key| matches!(key, TaskKey::FollowUp(t) if *t < turn))
            .copied()
            .collect();
        let cancelled = stale.into_iter().filter(|key| self.cancel(*key)).count();
        if cancelled > 0 {
            debug!("Cancelled {} stale follow-up(s) before {}", cancelled, turn);
        }
        cancelled
    }

    /// Number of tasks that have not fired yet.
    pub fn pending(&self) -> usize {
        self.tasks.values().filter(|h| !h.is_finished()).count()
    }

    fn prune(&mut self) {
        self.tasks.retain(|_, handle| !handle.is_finished());
    }
}

impl Drop for Scheduler {
    fn drop(&mut self) {
        for handle in self.tasks.values() {
            handle.abort();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::sync::mpsc;
    use tokio::time::Instant;

    #[tokio::test(start_paused = true)]
    async fn test_fires_after_delay() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut scheduler = Scheduler::new();
        let start = Instant::now();

        scheduler.schedule(
            TaskKey::AudioReply(1),
            Duration::from_millis(1000),
            Action::AudioReplyDue,
            tx,
        );

        assert_eq!(rx.recv().await, Some(Action::AudioReplyDue));
        assert!(start.elapsed() >= Duration::from_millis(1000));
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_prevents_delivery() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut scheduler = Scheduler::new();
        let key = TaskKey::FollowUp(TurnId(1));

        scheduler.schedule(key, Duration::from_millis(1500), Action::AudioReplyDue, tx);
        assert_eq!(scheduler.pending(), 1);
        assert!(scheduler.cancel(key));
        assert!(!scheduler.cancel(key));

        let waited = tokio::time::timeout(Duration::from_secs(5), rx.recv()).await;
        // Sender dropped with the aborted task, so the channel closes empty
        assert!(matches!(waited, Ok(None)));
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_follow_ups_before_keeps_newer_and_audio() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut scheduler = Scheduler::new();
        let delay = Duration::from_millis(1500);

        scheduler.schedule(TaskKey::FollowUp(TurnId(1)), delay, Action::Escalate, tx.clone());
        scheduler.schedule(TaskKey::FollowUp(TurnId(2)), delay, Action::Quit, tx.clone());
        let audio = scheduler.next_audio_key();
        scheduler.schedule(audio, delay, Action::AudioReplyDue, tx);

        assert_eq!(scheduler.cancel_follow_ups_before(TurnId(2)), 1);
        assert_eq!(scheduler.pending(), 2);

        let mut fired = vec![rx.recv().await.unwrap(), rx.recv().await.unwrap()];
        fired.sort_by_key(|a| format!("{a:?}"));
        assert_eq!(fired, vec![Action::AudioReplyDue, Action::Quit]);
        assert_eq!(rx.recv().await, None);
    }

    #[tokio::test(start_paused = true)]
    async fn test_reschedule_same_key_replaces() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut scheduler = Scheduler::new();
        let key = TaskKey::FollowUp(TurnId(3));

        scheduler.schedule(key, Duration::from_millis(100), Action::Escalate, tx.clone());
        scheduler.schedule(key, Duration::from_millis(100), Action::Quit, tx);

        assert_eq!(rx.recv().await, Some(Action::Quit));
        assert_eq!(rx.recv().await, None);
    }

    #[test]
    fn test_audio_keys_are_distinct() {
        let mut scheduler = Scheduler::new();
        assert_ne!(scheduler.next_audio_key(), scheduler.next_audio_key());
    }
}

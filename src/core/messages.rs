//! # Message Store
//!
//! Append-only, ordered log of chat turns.
//!
//! ```text
//! MessageStore
//! ├── messages: Vec<Message>   // insertion order, oldest first
//! ├── next_id: u64             // ids are never reused
//! └── revision: u64            // bumped on every append (scroll-to-latest signal)
//! ```
//!
//! The only mutation besides `append` is `remove_transient`, which drops a
//! typing indicator before the permanent reply for that turn lands.
//! Nothing is ever reordered or edited.

use chrono::{DateTime, Local};
use log::warn;

/// Stable identifier handed out by [`MessageStore::append`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MessageId(u64);

impl MessageId {
    pub fn value(self) -> u64 {
        self.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sender {
    User,
    Bot,
    /// Typing indicator. Removed before the reply for its turn is appended.
    Typing,
}

impl Sender {
    pub fn is_transient(self) -> bool {
        matches!(self, Sender::Typing)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Message {
    pub id: MessageId,
    pub sender: Sender,
    pub text: String,
    pub sent_at: DateTime<Local>,
}

#[derive(Debug, Default)]
pub struct MessageStore {
    messages: Vec<Message>,
    next_id: u64,
    revision: u64,
}

impl MessageStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a message at the end of the visible order and returns its id.
    pub fn append(&mut self, sender: Sender, text: impl Into<String>) -> MessageId {
        let id = MessageId(self.next_id);
        self.next_id += 1;
        self.messages.push(Message {
            id,
            sender,
            text: text.into(),
            sent_at: Local::now(),
        });
        self.revision += 1;
        id
    }

    /// Removes a transient message. Unknown ids and permanent messages are ignored.
    ///
    /// Returns `true` if something was removed.
    pub fn remove_transient(&mut self, id: MessageId) -> bool {
        match self.messages.iter().position(|m| m.id == id) {
            Some(idx) if self.messages[idx].sender.is_transient() => {
                self.messages.remove(idx);
                true
            }
            Some(_) => {
                warn!("Refusing to remove permanent message {:?}", id);
                false
            }
            None => false,
        }
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn last(&self) -> Option<&Message> {
        self.messages.last()
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// Incremented on every append. Views re-pin to the latest message when it changes.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Number of messages currently held from the given sender.
    pub fn count_from(&self, sender: Sender) -> usize {
        self.messages.iter().filter(|m| m.sender == sender).count()
    }
}

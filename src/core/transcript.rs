//! # Transcript
//!
//! The ordered, append-only list of chat messages.
//!
//! Entries never change once appended. The only way to take one out again is
//! through the [`MessageHandle`] that `append` returned, which is how the
//! "analyzing" placeholder gets retracted before the real answer lands.

use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    User,
    Bot,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatMessage {
    pub text: String,
    pub sender: Sender,
}

/// Identifies one appended entry.
///
/// Not `Clone`: [`MessageHandle::remove`] consumes it, so a handle can
/// retract its entry at most once.
#[derive(Debug, PartialEq, Eq)]
pub struct MessageHandle(u64);

impl MessageHandle {
    /// Retracts the entry from `transcript`.
    /// Returns `false` if it was already gone.
    pub fn remove(self, transcript: &mut Transcript) -> bool {
        transcript.retract(self.0)
    }

    pub fn id(&self) -> u64 {
        self.0
    }
}

#[derive(Debug, Clone)]
struct Entry {
    id: u64,
    message: ChatMessage,
}

#[derive(Debug, Clone, Default)]
pub struct Transcript {
    entries: Vec<Entry>,
    next_id: u64,
    /// Bumped on every append/retract; views re-pin to the newest entry when it changes.
    revision: u64,
}

impl Transcript {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a message as the last entry.
    pub fn append(&mut self, text: impl Into<String>, sender: Sender) -> MessageHandle {
        let id = self.next_id;
        self.next_id += 1;
        self.entries.push(Entry {
            id,
            message: ChatMessage {
                text: text.into(),
                sender,
            },
        });
        self.revision += 1;
        MessageHandle(id)
    }

    fn retract(&mut self, id: u64) -> bool {
        match self.entries.iter().position(|entry| entry.id == id) {
            Some(index) => {
                self.entries.remove(index);
                self.revision += 1;
                true
            }
            None => false,
        }
    }

    pub fn messages(&self) -> impl DoubleEndedIterator<Item = &ChatMessage> + ExactSizeIterator {
        self.entries.iter().map(|entry| &entry.message)
    }

    pub fn last(&self) -> Option<&ChatMessage> {
        self.entries.last().map(|entry| &entry.message)
    }

    /// Current index of the entry behind `handle`, if it is still present.
    pub fn position(&self, handle: &MessageHandle) -> Option<usize> {
        self.entries.iter().position(|entry| entry.id == handle.0)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }
}

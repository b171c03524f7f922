//! Chat transcript
//!
//! An append-only log of everything shown to the user: their messages, bot
//! replies and system notices (provisioning errors, recognizer warnings).
//! The [`Transcript`] is owned by a single controller; everyone else reads
//! it through [`Transcript::snapshot`] or follows it through
//! [`Transcript::subscribe`].

use std::fmt;

use chrono::{DateTime, Utc};
use crossbeam_channel::{Receiver, Sender, unbounded};
use serde::Serialize;

use crate::provision::{ProvisionIssue, ProvisionObserver};

/// Who a transcript entry came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Author {
    User,
    Bot,
    System,
}

impl fmt::Display for Author {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Author::User => "you",
            Author::Bot => "bot",
            Author::System => "system",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TranscriptEntry {
    /// Position in the transcript, starting at 0
    pub seq: u64,
    pub author: Author,
    pub text: String,
    pub at: DateTime<Utc>,
}

/// Append-only message log with change notification
#[derive(Debug, Default)]
pub struct Transcript {
    entries: Vec<TranscriptEntry>,
    subscribers: Vec<Sender<TranscriptEntry>>,
}

impl Transcript {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a user message. Blank text is not appended.
    pub fn push_user(&mut self, text: &str) -> Option<u64> {
        if text.trim().is_empty() {
            return None;
        }
        Some(self.push(Author::User, text))
    }

    pub fn push_bot(&mut self, text: &str) -> u64 {
        self.push(Author::Bot, text)
    }

    pub fn push_system(&mut self, text: &str) -> u64 {
        self.push(Author::System, text)
    }

    fn push(&mut self, author: Author, text: &str) -> u64 {
        let entry = TranscriptEntry {
            seq: self.entries.len() as u64,
            author,
            text: text.to_string(),
            at: Utc::now(),
        };
        let seq = entry.seq;
        // Dropped receivers fail the send and are pruned here
        self.subscribers.retain(|tx| tx.send(entry.clone()).is_ok());
        self.entries.push(entry);
        seq
    }

    /// Copy of every entry appended so far
    pub fn snapshot(&self) -> Vec<TranscriptEntry> {
        self.entries.clone()
    }

    /// Receive every entry appended after this call, in order
    pub fn subscribe(&mut self) -> Receiver<TranscriptEntry> {
        let (tx, rx) = unbounded();
        self.subscribers.push(tx);
        rx
    }
}

/// Provisioning observer that posts issues as system messages
pub struct TranscriptObserver<'t> {
    transcript: &'t mut Transcript,
}

impl<'t> TranscriptObserver<'t> {
    pub fn new(transcript: &'t mut Transcript) -> Self {
        Self { transcript }
    }
}

impl ProvisionObserver for TranscriptObserver<'_> {
    fn issue(&mut self, issue: &ProvisionIssue) {
        self.transcript.push_system(&issue.to_string());
    }
}

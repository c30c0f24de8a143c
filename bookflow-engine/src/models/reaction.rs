//! Per-series reaction tracking and classification
//!
//! Reactions are upserted keyed by item identity and kept in insertion
//! order. The aggregate set classifies into a small number of downstream
//! signals that pick the encouragement narrative shown before
//! recommendations.

use bookflow_common::EngineConfig;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// A reader's recorded opinion about a previously-read item
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ReactionResponse {
    Love,
    Like,
    StopReading,
    Disliked,
}

impl ReactionResponse {
    /// Whether this response counts against the reader's current taste match
    pub fn is_negative(&self) -> bool {
        matches!(self, ReactionResponse::StopReading | ReactionResponse::Disliked)
    }
}

/// One recorded reaction
///
/// `has_read` may be true with `response` still unset, but only transiently
/// while the user is mid-choice; stage validation requires the response
/// before advancing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReactionEntry {
    pub has_read: bool,
    pub response: Option<ReactionResponse>,
}

/// Aggregate classification of the visible reaction set
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ReadingSignal {
    /// No visible item was read
    NewReader,
    /// At least one item read, every read item disliked or abandoned
    MismatchedTaste,
    /// Anything else
    Mixed,
}

impl ReadingSignal {
    /// Auto-advance delay before recommendations, if this signal gates one
    ///
    /// The new-reader and mismatched-taste narratives advance on a short
    /// timer instead of an explicit user action; the mixed narrative waits
    /// for the user.
    pub fn auto_advance_after(&self, config: &EngineConfig) -> Option<Duration> {
        match self {
            ReadingSignal::NewReader | ReadingSignal::MismatchedTaste => {
                Some(Duration::from_millis(config.auto_advance_ms))
            }
            ReadingSignal::Mixed => None,
        }
    }
}

/// Ordered mapping from item id to reaction, insertion order preserved
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReactionSet {
    entries: Vec<(String, ReactionEntry)>,
}

impl ReactionSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create or update the entry for `item_id`
    ///
    /// `has_read` is always overwritten; `response` is overwritten only when
    /// a new one is supplied, so marking an item unread never erases a
    /// previously recorded response.
    pub fn upsert(&mut self, item_id: &str, has_read: bool, response: Option<ReactionResponse>) {
        if let Some((_, entry)) = self.entries.iter_mut().find(|(id, _)| id == item_id) {
            entry.has_read = has_read;
            if response.is_some() {
                entry.response = response;
            }
        } else {
            self.entries
                .push((item_id.to_string(), ReactionEntry { has_read, response }));
        }
    }

    /// Look up the entry for an item, if the user has expressed a choice
    pub fn get(&self, item_id: &str) -> Option<&ReactionEntry> {
        self.entries
            .iter()
            .find(|(id, _)| id == item_id)
            .map(|(_, entry)| entry)
    }

    /// Iterate entries in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &ReactionEntry)> {
        self.entries.iter().map(|(id, entry)| (id.as_str(), entry))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Drop all recorded reactions
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Classify the reaction set over the currently visible items
    ///
    /// Items without an entry count as not read. Read items with no response
    /// yet are neither positive nor negative, so they break a
    /// mismatched-taste run down to mixed.
    pub fn classify(&self, visible_item_ids: &[String]) -> ReadingSignal {
        let read_entries: Vec<&ReactionEntry> = visible_item_ids
            .iter()
            .filter_map(|id| self.get(id))
            .filter(|entry| entry.has_read)
            .collect();

        if read_entries.is_empty() {
            return ReadingSignal::NewReader;
        }

        let all_negative = read_entries
            .iter()
            .all(|entry| entry.response.map(|r| r.is_negative()).unwrap_or(false));

        if all_negative {
            ReadingSignal::MismatchedTaste
        } else {
            ReadingSignal::Mixed
        }
    }
}

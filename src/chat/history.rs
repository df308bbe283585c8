//! Per-player conversation history.
//!
//! [`ConversationStore`] maps player name to a bounded [`History`]. Each
//! history sits behind its own async mutex so a chat request can hold it
//! across the backend call: requests for the same player are serialized,
//! requests for different players are not.

use std::collections::VecDeque;
use std::sync::Arc;

use dashmap::DashMap;
use tokio::sync::Mutex;

use super::types::Turn;

/// Maximum number of turns kept per player.
pub const HISTORY_LIMIT: usize = 20;

/// Number of most recent turns rendered into the prompt.
pub const PROMPT_HISTORY_TURNS: usize = 5;

/// Bounded, oldest-first turn buffer.
#[derive(Debug, Clone)]
pub struct History {
    turns: VecDeque<Turn>,
    limit: usize,
}

impl History {
    pub fn new(limit: usize) -> Self {
        Self {
            turns: VecDeque::with_capacity(limit + 2),
            limit,
        }
    }

    /// Record one player/AI exchange, then drop the oldest turns beyond the limit.
    pub fn push_exchange(&mut self, player: Turn, ai: Turn) {
        self.turns.push_back(player);
        self.turns.push_back(ai);
        while self.turns.len() > self.limit {
            self.turns.pop_front();
        }
    }

    /// The last `n` turns, oldest first.
    pub fn recent(&self, n: usize) -> impl Iterator<Item = &Turn> {
        self.turns.iter().skip(self.turns.len().saturating_sub(n))
    }

    pub fn iter(&self) -> impl Iterator<Item = &Turn> {
        self.turns.iter()
    }

    pub fn len(&self) -> usize {
        self.turns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }
}

impl Default for History {
    fn default() -> Self {
        Self::new(HISTORY_LIMIT)
    }
}

/// Shared handle to one player's history.
pub type HistorySlot = Arc<Mutex<History>>;

/// Process-wide conversation store.
#[derive(Debug)]
pub struct ConversationStore {
    histories: DashMap<String, HistorySlot>,
    limit: usize,
}

impl ConversationStore {
    pub fn new(limit: usize) -> Self {
        Self {
            histories: DashMap::new(),
            limit,
        }
    }

    /// Get the history slot for `player`, creating an empty one on first use.
    pub fn slot(&self, player: &str) -> HistorySlot {
        if let Some(existing) = self.histories.get(player) {
            return existing.value().clone();
        }
        self.histories
            .entry(player.to_string())
            .or_insert_with(|| Arc::new(Mutex::new(History::new(self.limit))))
            .value()
            .clone()
    }

    /// Remove `player`'s history. Returns whether an entry existed.
    pub fn remove(&self, player: &str) -> bool {
        self.histories.remove(player).is_some()
    }

    /// Number of players with a history.
    pub fn len(&self) -> usize {
        self.histories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.histories.is_empty()
    }

    /// Player names with a history, sorted.
    pub fn players(&self) -> Vec<String> {
        let mut players: Vec<String> = self.histories.iter().map(|e| e.key().clone()).collect();
        players.sort();
        players
    }

    /// Copy of `player`'s turns, oldest first.
    pub async fn snapshot(&self, player: &str) -> Option<Vec<Turn>> {
        let slot = self.histories.get(player).map(|e| e.value().clone())?;
        let history = slot.lock().await;
        Some(history.iter().cloned().collect())
    }
}

impl Default for ConversationStore {
    fn default() -> Self {
        Self::new(HISTORY_LIMIT)
    }
}

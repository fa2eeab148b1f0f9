//! Append-only move ledger.
//!
//! Every transition appends one entry (the bot's turn appends two: its draw
//! and its discard). Entries record only the move payload, never a copy of
//! the game state; the ledger is read-only input for the analysis and
//! statistics collaborators.
//!
//! Backed by `im::Vector`, so cloning a log for a consumer is O(1)
//! structural sharing rather than a deep copy.

use im::Vector;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use time::OffsetDateTime;

use crate::core::{CardId, DrawSource, Seat};
use crate::melds::MeldKind;

/// The payload of one recorded move.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "lowercase")]
pub enum MoveAction {
    Draw { source: DrawSource, card: CardId },
    Discard { card: CardId },
    Meld { cards: SmallVec<[CardId; 4]>, kind: MeldKind },
    Declare,
}

/// One ledger entry.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub seat: Seat,
    #[serde(flatten)]
    pub action: MoveAction,
    pub at: OffsetDateTime,
}

/// The append-only ledger itself.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct MoveLog {
    entries: Vector<HistoryEntry>,
}

impl MoveLog {
    /// Create an empty log.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a move. There is deliberately no way to remove or rewrite an
    /// entry.
    pub fn push(&mut self, seat: Seat, action: MoveAction) {
        self.entries.push_back(HistoryEntry {
            seat,
            action,
            at: OffsetDateTime::now_utc(),
        });
    }

    /// Number of recorded moves.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether nothing has been recorded yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The most recent move.
    #[must_use]
    pub fn last(&self) -> Option<&HistoryEntry> {
        self.entries.last()
    }

    /// Iterate over all entries, oldest first.
    pub fn iter(&self) -> impl Iterator<Item = &HistoryEntry> {
        self.entries.iter()
    }

    /// Entries made from a given seat.
    pub fn by_seat(&self, seat: Seat) -> impl Iterator<Item = &HistoryEntry> {
        self.entries.iter().filter(move |entry| entry.seat == seat)
    }
}

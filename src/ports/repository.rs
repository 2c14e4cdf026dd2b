//! Repository port for persisted session state.
//!
//! A session persists three independently versioned pieces (history, stats,
//! model parameters). The repository only moves opaque bytes; encoding and
//! version checks live in [`crate::session::snapshot`].

use std::fmt;

use crate::Result;

/// One independently persisted piece of session state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StatePiece {
    History,
    Stats,
    Model,
}

impl StatePiece {
    pub const ALL: [StatePiece; 3] = [StatePiece::History, StatePiece::Stats, StatePiece::Model];

    /// Stable storage key for the piece.
    pub fn key(self) -> &'static str {
        match self {
            StatePiece::History => "history",
            StatePiece::Stats => "stats",
            StatePiece::Model => "model",
        }
    }
}

impl fmt::Display for StatePiece {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Port for persisting and loading session state pieces.
///
/// # Examples
///
/// ```
/// use roshambo::adapters::InMemoryRepository;
/// use roshambo::ports::{StatePiece, StateRepository};
///
/// let repo = InMemoryRepository::new();
/// repo.write(StatePiece::Stats, b"blob")?;
/// assert_eq!(repo.read(StatePiece::Stats)?, Some(b"blob".to_vec()));
/// assert_eq!(repo.read(StatePiece::Model)?, None);
/// # Ok::<(), roshambo::Error>(())
/// ```
pub trait StateRepository {
    /// Replace the stored bytes of a piece.
    ///
    /// Implementations must never leave a half-written piece behind: a reader
    /// sees either the previous bytes or the new ones.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage cannot be written.
    fn write(&self, piece: StatePiece, bytes: &[u8]) -> Result<()>;

    /// Read the stored bytes of a piece, or `None` if it was never written.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage exists but cannot be read.
    fn read(&self, piece: StatePiece) -> Result<Option<Vec<u8>>>;
}

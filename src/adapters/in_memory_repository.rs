//! In-memory state repository for testing.
//!
//! This adapter provides a pure in-memory implementation of StateRepository,
//! enabling fast tests without any file system I/O.

use std::{
    collections::HashMap,
    sync::{Arc, Mutex, MutexGuard, PoisonError},
};

use crate::{
    Result,
    ports::{StatePiece, StateRepository},
};

/// In-memory repository for testing.
///
/// Stores state pieces in a shared HashMap, avoiding file system I/O
/// entirely.
///
/// # Examples
///
/// ```
/// use roshambo::adapters::InMemoryRepository;
/// use roshambo::ports::{StatePiece, StateRepository};
///
/// let repo = InMemoryRepository::new();
/// repo.write(StatePiece::History, &[1, 2, 3])?;
/// assert!(repo.contains(StatePiece::History));
/// # Ok::<(), roshambo::Error>(())
/// ```
///
/// # Thread Safety
///
/// This repository is thread-safe and can be safely cloned and shared across
/// threads. All clones share the same underlying storage.
#[derive(Clone, Default)]
pub struct InMemoryRepository {
    storage: Arc<Mutex<HashMap<StatePiece, Vec<u8>>>>,
}

impl InMemoryRepository {
    /// Create a new empty in-memory repository.
    pub fn new() -> Self {
        Self::default()
    }

    fn storage(&self) -> MutexGuard<'_, HashMap<StatePiece, Vec<u8>>> {
        self.storage.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Number of pieces currently stored.
    pub fn count(&self) -> usize {
        self.storage().len()
    }

    /// Clear all stored pieces.
    pub fn clear(&self) {
        self.storage().clear();
    }

    pub fn contains(&self, piece: StatePiece) -> bool {
        self.storage().contains_key(&piece)
    }

    /// Overwrite a piece with arbitrary bytes, bypassing encoding.
    ///
    /// Lets tests simulate a corrupted or truncated save.
    pub fn corrupt(&self, piece: StatePiece, bytes: &[u8]) {
        self.storage().insert(piece, bytes.to_vec());
    }

    /// Drop one stored piece.
    pub fn remove(&self, piece: StatePiece) {
        self.storage().remove(&piece);
    }
}

impl StateRepository for InMemoryRepository {
    fn write(&self, piece: StatePiece, bytes: &[u8]) -> Result<()> {
        self.storage().insert(piece, bytes.to_vec());
        Ok(())
    }

    fn read(&self, piece: StatePiece) -> Result<Option<Vec<u8>>> {
        Ok(self.storage().get(&piece).cloned())
    }
}

//! Persisted pieces of session state
//!
//! History, statistics and model parameters are saved as three separate
//! MessagePack blobs, each carrying its own format version so a damaged or
//! outdated piece can be discarded without losing the others.

use serde::{Deserialize, Serialize, de::DeserializeOwned};
use tracing::warn;

use crate::{
    Error, Result,
    ports::{ModelState, StatePiece, StateRepository},
    rps::{HistoryLog, Round},
    session::stats::SessionStats,
};

/// A persisted piece with a format version.
pub trait Versioned: Serialize + DeserializeOwned {
    const PIECE: StatePiece;
    const VERSION: u32;

    fn version(&self) -> u32;

    /// Encode as MessagePack.
    fn to_bytes(&self) -> Result<Vec<u8>> {
        rmp_serde::to_vec(self).map_err(|e| Error::SerializationContext {
            operation: format!("serialize {} to MessagePack", Self::PIECE),
            message: e.to_string(),
        })
    }

    /// Decode MessagePack and check the format version.
    fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let value: Self =
            rmp_serde::from_slice(bytes).map_err(|e| Error::SerializationContext {
                operation: format!("deserialize {} from MessagePack", Self::PIECE),
                message: e.to_string(),
            })?;
        if value.version() != Self::VERSION {
            return Err(Error::UnsupportedVersion {
                piece: Self::PIECE.to_string(),
                found: value.version(),
                expected: Self::VERSION,
            });
        }
        Ok(value)
    }
}

/// Read and decode a piece from a repository; `None` if it was never saved.
pub fn read_piece<T: Versioned>(repository: &dyn StateRepository) -> Result<Option<T>> {
    repository
        .read(T::PIECE)?
        .map(|bytes| T::from_bytes(&bytes))
        .transpose()
}

/// Read a piece that may be damaged.
///
/// An unreadable, undecodable or outdated piece is logged, appended to
/// `failures` and treated as absent, so the caller falls back to the default.
pub fn load_piece<T: Versioned>(
    repository: &dyn StateRepository,
    failures: &mut Vec<Error>,
) -> Option<T> {
    match read_piece::<T>(repository) {
        Ok(value) => value,
        Err(err) => {
            warn!(piece = %T::PIECE, error = %err, "discarding unreadable saved state");
            failures.push(err);
            None
        }
    }
}

/// Encode and store a piece.
pub fn write_piece<T: Versioned>(repository: &dyn StateRepository, value: &T) -> Result<()> {
    repository.write(T::PIECE, &value.to_bytes()?)
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavedHistory {
    pub version: u32,
    pub rounds: Vec<Round>,
}

impl SavedHistory {
    pub fn new(history: &HistoryLog) -> Self {
        Self {
            version: Self::VERSION,
            rounds: history.rounds().to_vec(),
        }
    }

    pub fn into_log(self) -> HistoryLog {
        HistoryLog::from_rounds(self.rounds)
    }
}

impl Versioned for SavedHistory {
    const PIECE: StatePiece = StatePiece::History;
    const VERSION: u32 = 1;

    fn version(&self) -> u32 {
        self.version
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavedStats {
    pub version: u32,
    pub stats: SessionStats,
}

impl SavedStats {
    pub fn new(stats: &SessionStats) -> Self {
        Self {
            version: Self::VERSION,
            stats: stats.clone(),
        }
    }
}

impl Versioned for SavedStats {
    const PIECE: StatePiece = StatePiece::Stats;
    const VERSION: u32 = 1;

    fn version(&self) -> u32 {
        self.version
    }
}

/// Model parameters, tagged with the retrain counter they were saved at.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavedModel {
    pub version: u32,
    pub retrain_count: u64,
    pub state: ModelState,
}

impl SavedModel {
    pub fn new(state: ModelState, retrain_count: u64) -> Self {
        Self {
            version: Self::VERSION,
            retrain_count,
            state,
        }
    }
}

impl Versioned for SavedModel {
    const PIECE: StatePiece = StatePiece::Model;
    const VERSION: u32 = 1;

    fn version(&self) -> u32 {
        self.version
    }
}

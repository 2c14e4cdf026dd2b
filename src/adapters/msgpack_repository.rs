//! Directory-backed implementation of the state repository.
//!
//! Each piece is stored as `<piece>.msgpack` inside a state directory. Writes
//! go to a temporary file in the same directory which is then renamed over
//! the target, so an interrupted save leaves the previous piece intact.

use std::{
    fs,
    io::{ErrorKind, Write},
    path::{Path, PathBuf},
};

use tempfile::NamedTempFile;

use crate::{
    Result,
    error::Error,
    ports::{StatePiece, StateRepository},
};

/// MessagePack state directory.
///
/// The repository stores whatever bytes it is given; the pieces a session
/// hands it are MessagePack encoded.
///
/// # Examples
///
/// ```no_run
/// use roshambo::adapters::MsgPackRepository;
/// use roshambo::ports::{StatePiece, StateRepository};
///
/// let repo = MsgPackRepository::new("game-state");
/// repo.write(StatePiece::Stats, &[0x90])?;
/// let bytes = repo.read(StatePiece::Stats)?;
/// # Ok::<(), roshambo::Error>(())
/// ```
#[derive(Debug, Clone)]
pub struct MsgPackRepository {
    dir: PathBuf,
}

impl MsgPackRepository {
    /// Create a repository rooted at `dir`. The directory is created on the
    /// first write.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// File a piece is stored in.
    pub fn path_for(&self, piece: StatePiece) -> PathBuf {
        self.dir.join(format!("{}.msgpack", piece.key()))
    }
}

impl StateRepository for MsgPackRepository {
    fn write(&self, piece: StatePiece, bytes: &[u8]) -> Result<()> {
        fs::create_dir_all(&self.dir).map_err(|source| Error::Io {
            operation: format!("create state directory {:?}", self.dir),
            source,
        })?;

        let target = self.path_for(piece);
        let mut file = NamedTempFile::new_in(&self.dir).map_err(|source| Error::Io {
            operation: format!("create temporary file in {:?}", self.dir),
            source,
        })?;
        file.write_all(bytes)
            .and_then(|()| file.as_file().sync_all())
            .map_err(|source| Error::Io {
                operation: format!("write {piece} state"),
                source,
            })?;
        file.persist(&target).map_err(|e| Error::Io {
            operation: format!("replace {target:?}"),
            source: e.error,
        })?;

        Ok(())
    }

    fn read(&self, piece: StatePiece) -> Result<Option<Vec<u8>>> {
        let path = self.path_for(piece);
        match fs::read(&path) {
            Ok(bytes) => Ok(Some(bytes)),
            Err(source) if source.kind() == ErrorKind::NotFound => Ok(None),
            Err(source) => Err(Error::Io {
                operation: format!("read file {path:?}"),
                source,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;

    #[test]
    fn test_write_read_roundtrip() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let repo = MsgPackRepository::new(temp_dir.path());

        repo.write(StatePiece::History, b"\x92\x01\x02").unwrap();
        assert_eq!(
            repo.read(StatePiece::History).unwrap(),
            Some(b"\x92\x01\x02".to_vec())
        );
        assert!(temp_dir.path().join("history.msgpack").exists());
    }

    #[test]
    fn test_missing_piece_is_none() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let repo = MsgPackRepository::new(temp_dir.path());
        assert_eq!(repo.read(StatePiece::Model).unwrap(), None);
    }

    #[test]
    fn test_creates_nested_directory() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let repo = MsgPackRepository::new(temp_dir.path().join("a").join("b"));
        repo.write(StatePiece::Stats, b"x").unwrap();
        assert!(repo.path_for(StatePiece::Stats).exists());
    }

    #[test]
    fn test_overwrite_leaves_no_temporary_files() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let repo = MsgPackRepository::new(temp_dir.path());

        repo.write(StatePiece::Model, b"first").unwrap();
        repo.write(StatePiece::Model, b"second").unwrap();

        assert_eq!(
            repo.read(StatePiece::Model).unwrap(),
            Some(b"second".to_vec())
        );
        let entries = fs::read_dir(temp_dir.path()).unwrap().count();
        assert_eq!(entries, 1);
    }

    #[test]
    fn test_write_to_invalid_path_returns_error() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let blocker = temp_dir.path().join("not-a-dir");
        fs::write(&blocker, b"file").unwrap();

        let repo = MsgPackRepository::new(&blocker);
        let err = repo.write(StatePiece::Stats, b"x").unwrap_err();
        assert!(err.is_persistence());
    }
}

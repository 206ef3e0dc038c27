//! Local persistence for task boards.
//!
//! Each board is one pretty-printed JSON file under the storage root:
//!
//! ```text
//! <root>/<uuid>.json
//! ```

use std::{fs, io, path::PathBuf};

use tracing::{debug, warn};
use uuid::Uuid;

use crate::model::Board;

/// Errors that can occur during storage operations.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("board not found: {0}")]
    BoardNotFound(Uuid),

    #[error("board already exists: {0}")]
    BoardAlreadyExists(Uuid),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = core::result::Result<T, StorageError>;

/// Local file-based storage for boards.
pub struct Storage {
    root: PathBuf,
}

impl Storage {
    /// Creates a new storage instance rooted at the given directory.
    ///
    /// The directory is created if it doesn't exist.
    pub fn new(root: impl Into<PathBuf>) -> Result<Self> {
        let root = root.into();
        fs::create_dir_all(&root)?;
        Ok(Self { root })
    }

    /// Returns the default storage root: `~/.huddle/boards/`.
    pub fn default_root() -> Option<PathBuf> {
        dirs::home_dir().map(|h| h.join(".huddle").join("boards"))
    }

    /// Writes a new board to disk.
    pub fn create_board(&self, board: &Board) -> Result<()> {
        let path = self.board_path(board.id);
        if path.exists() {
            return Err(StorageError::BoardAlreadyExists(board.id));
        }
        fs::write(&path, serde_json::to_string_pretty(board)?)?;
        debug!(path = %path.display(), "created board");
        Ok(())
    }

    /// Overwrites an existing board.
    pub fn update_board(&self, board: &Board) -> Result<()> {
        let path = self.board_path(board.id);
        if !path.exists() {
            return Err(StorageError::BoardNotFound(board.id));
        }
        fs::write(&path, serde_json::to_string_pretty(board)?)?;
        debug!(path = %path.display(), "updated board");
        Ok(())
    }

    pub fn load_board(&self, id: Uuid) -> Result<Board> {
        let path = self.board_path(id);
        if !path.exists() {
            return Err(StorageError::BoardNotFound(id));
        }
        let json = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&json)?)
    }

    /// Lists all boards, oldest first.
    ///
    /// Unreadable or malformed files are skipped.
    pub fn list_boards(&self) -> Result<Vec<Board>> {
        let mut boards = Vec::new();
        let entries = match fs::read_dir(&self.root) {
            Ok(e) => e,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(boards),
            Err(e) => return Err(e.into()),
        };
        for entry in entries {
            let path = entry?.path();
            if path.extension().and_then(|e| e.to_str()) != Some("json") {
                continue;
            }
            let Ok(json) = fs::read_to_string(&path) else {
                continue;
            };
            match serde_json::from_str::<Board>(&json) {
                Ok(board) => boards.push(board),
                Err(e) => warn!(path = %path.display(), error = %e, "skipping malformed board"),
            }
        }
        boards.sort_by(|a, b| a.created_at.cmp(&b.created_at));
        Ok(boards)
    }

    fn board_path(&self, id: Uuid) -> PathBuf {
        self.root.join(format!("{id}.json"))
    }
}

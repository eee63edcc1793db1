//! Durable pool storage.
//!
//! The pool is one JSON document, rewritten in full after every mutation.
//! Write-through is the only discipline: callers mutate the in-memory
//! [`Pool`] and immediately save.

use crate::error::{Error, Result};
use crate::pool::Pool;
use std::path::{Path, PathBuf};

/// Whole-document JSON store for the pool.
#[derive(Debug, Clone)]
pub struct JsonStore {
    path: PathBuf,
}

impl JsonStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the pool, or start an empty one when no document exists yet.
    pub fn load(&self) -> Result<Pool> {
        if !self.path.exists() {
            tracing::debug!(path = %self.path.display(), "no pool document yet, starting empty");
            return Ok(Pool::default());
        }
        let content = std::fs::read_to_string(&self.path)?;
        serde_json::from_str(&content).map_err(|e| {
            Error::store(format!(
                "pool document at {} is unreadable: {e}",
                self.path.display()
            ))
        })
    }

    /// Overwrite the pool document.
    pub fn save(&self, pool: &Pool) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(pool)?;
        std::fs::write(&self.path, content)?;
        tracing::debug!(path = %self.path.display(), "pool document saved");
        Ok(())
    }
}

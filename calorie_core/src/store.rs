//! Key-value store backends.
//!
//! All persisted state lives in a small string-keyed store. `FileStore`
//! keeps one file per key with file locking and atomic replacement;
//! `MemoryStore` is a HashMap-backed substitute for tests and headless use.

use crate::{Error, Result};
use fs2::FileExt;
use std::collections::HashMap;
use std::fs::File;
use std::io::{Read, Write};
use std::path::PathBuf;
use tempfile::NamedTempFile;

/// Synchronous string-keyed store the gateway persists through
pub trait KeyValueStore {
    /// Fetch a record, `None` when the key was never written
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Overwrite a record
    fn set(&mut self, key: &str, value: &str) -> Result<()>;

    /// Delete a record; deleting an absent key is not an error
    fn remove(&mut self, key: &str) -> Result<()>;
}

/// File-backed store keeping one file per key under a data directory
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    /// Create a store rooted at the given directory
    ///
    /// The directory is created lazily on first write.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn record_path(&self, key: &str) -> PathBuf {
        self.dir.join(key)
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let path = self.record_path(key);
        if !path.exists() {
            return Ok(None);
        }

        let file = File::open(&path)?;

        // Shared lock for reading
        file.lock_shared()?;

        let mut contents = String::new();
        let mut reader = std::io::BufReader::new(&file);
        let read = reader.read_to_string(&mut contents);
        file.unlock()?;
        read?;

        tracing::debug!("Read record {:?} from {:?}", key, path);
        Ok(Some(contents))
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        std::fs::create_dir_all(&self.dir)?;

        // Unique temp file in the same directory for atomic rename
        let temp = NamedTempFile::new_in(&self.dir)?;

        // Exclusive lock on the temp file to serialize concurrent writers
        temp.as_file().lock_exclusive()?;

        {
            let mut writer = std::io::BufWriter::new(temp.as_file());
            writer.write_all(value.as_bytes())?;
            writer.flush()?;
        }

        temp.as_file().sync_all()?;
        temp.as_file().unlock()?;

        // Atomically replace the old record
        temp.persist(self.record_path(key))
            .map_err(|e| Error::Io(e.error))?;

        tracing::debug!("Wrote record {:?}", key);
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        let path = self.record_path(key);
        if path.exists() {
            std::fs::remove_file(&path)?;
            tracing::debug!("Removed record {:?}", key);
        }
        Ok(())
    }
}

/// In-memory store for tests and ephemeral trackers
#[derive(Debug, Default)]
pub struct MemoryStore {
    records: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.records.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.records.insert(key.into(), value.into());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        self.records.remove(key);
        Ok(())
    }
}

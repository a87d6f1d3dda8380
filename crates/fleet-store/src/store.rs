//! # Flat-File Store
//!
//! An ordered in-memory collection keyed by id, mirrored to a
//! comma-separated file after every mutation.
//!
//! ## Write Path
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     save / update / delete_by_id                        │
//! │                                                                         │
//! │  poisoned? ──yes──► StoreError::Poisoned                               │
//! │      │ no                                                               │
//! │      ▼                                                                  │
//! │  apply change in memory                                                │
//! │      │                                                                  │
//! │      ▼                                                                  │
//! │  write header + every row to  vehicles.csv.tmp                         │
//! │  fsync, rename over           vehicles.csv                             │
//! │      │                                                                  │
//! │      ├── ok  ──► Ok(..)         disk == memory (new)                   │
//! │      └── err ──► undo change    disk == memory (old), StoreError::Io   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Load Path
//! A missing file is an empty store. The first line is the header. Every
//! other non-blank line is parsed on its own; a line that fails to parse,
//! or repeats an id seen earlier, is logged and dropped while the rest
//! still load.

use chrono::NaiveDate;
use std::collections::HashSet;
use std::fmt::Debug;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use thiserror::Error;
use tokio::io::AsyncWriteExt;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use crate::error::{StoreError, StoreResult};

// =============================================================================
// Record Trait
// =============================================================================

/// Why a single stored line could not be turned into a record.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LineError {
    #[error("expected {expected} columns, found {found}")]
    ColumnCount { expected: &'static str, found: usize },

    #[error("invalid {column} '{value}': {reason}")]
    InvalidField {
        column: &'static str,
        value: String,
        reason: String,
    },
}

impl LineError {
    pub fn invalid(column: &'static str, value: &str, reason: impl ToString) -> Self {
        LineError::InvalidField {
            column,
            value: value.to_string(),
            reason: reason.to_string(),
        }
    }
}

/// A type that can live in a [`FlatFileStore`].
pub trait Record: Clone + Debug + Send + Sync + 'static {
    /// Entity name used in errors and logs ("Asset", "Rental").
    const ENTITY: &'static str;

    /// First line of the file.
    const HEADER: &'static str;

    /// Unique key of this record.
    fn id(&self) -> &str;

    /// Renders one row, without a trailing newline.
    fn to_line(&self) -> String;

    /// Parses one row. `today` is available for rows that need to infer
    /// time-dependent state.
    fn parse_line(line: &str, today: NaiveDate) -> Result<Self, LineError>;
}

/// A store shared between services.
pub type SharedStore<T> = Arc<Mutex<FlatFileStore<T>>>;

// =============================================================================
// Flat-File Store
// =============================================================================

/// In-memory records plus the file that mirrors them.
#[derive(Debug)]
pub struct FlatFileStore<T: Record> {
    path: PathBuf,
    records: Vec<T>,
    skipped_lines: usize,
    poisoned: bool,
}

impl<T: Record> FlatFileStore<T> {
    /// An empty store that will write to `path`. Nothing touches the disk
    /// until the first mutation.
    pub fn empty(path: impl Into<PathBuf>) -> Self {
        FlatFileStore {
            path: path.into(),
            records: Vec::new(),
            skipped_lines: 0,
            poisoned: false,
        }
    }

    /// Loads every record from `path`.
    ///
    /// ## Errors
    /// [`StoreError::Io`] if the file exists but cannot be read. Bad lines
    /// are not errors; see [`skipped_lines`](Self::skipped_lines).
    pub async fn load(path: impl Into<PathBuf>, today: NaiveDate) -> StoreResult<Self> {
        let path = path.into();

        let contents = match tokio::fs::read(&path).await {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                info!(path = %path.display(), entity = T::ENTITY, "No data file yet, starting empty");
                return Ok(Self::empty(path));
            }
            Err(e) => return Err(StoreError::io(&path, e)),
        };

        let mut store = Self::empty(path);
        store.ingest(&contents, today);

        info!(
            path = %store.path.display(),
            entity = T::ENTITY,
            loaded = store.records.len(),
            skipped = store.skipped_lines,
            "Loaded records"
        );
        Ok(store)
    }

    /// Lines are decoded one at a time so a stray non-UTF-8 byte costs only
    /// the line it sits on.
    fn ingest(&mut self, contents: &[u8], today: NaiveDate) {
        let mut seen = HashSet::new();
        if contents.is_empty() {
            return;
        }

        for (index, raw) in contents.split(|b| *b == b'\n').enumerate() {
            let line_number = index + 1;
            let raw = raw.strip_suffix(b"\r").unwrap_or(raw);

            let line = match std::str::from_utf8(raw) {
                Ok(line) => line,
                Err(e) => {
                    warn!(
                        path = %self.path.display(),
                        line = line_number,
                        error = %e,
                        "Skipping line that is not valid UTF-8"
                    );
                    if index > 0 {
                        self.skipped_lines += 1;
                    }
                    continue;
                }
            };

            if index == 0 {
                if line.trim() != T::HEADER {
                    warn!(
                        path = %self.path.display(),
                        header = %line,
                        "Unexpected header line, skipping it anyway"
                    );
                }
                continue;
            }

            if line.trim().is_empty() {
                continue;
            }

            match T::parse_line(line, today) {
                Ok(record) => {
                    if seen.insert(record.id().to_string()) {
                        self.records.push(record);
                    } else {
                        warn!(
                            path = %self.path.display(),
                            line = line_number,
                            id = %record.id(),
                            "Skipping line with duplicate id"
                        );
                        self.skipped_lines += 1;
                    }
                }
                Err(e) => {
                    warn!(
                        path = %self.path.display(),
                        line = line_number,
                        error = %e,
                        "Skipping unparseable line"
                    );
                    self.skipped_lines += 1;
                }
            }
        }
    }

    // =========================================================================
    // Queries
    // =========================================================================

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Lines dropped during the last load.
    pub fn skipped_lines(&self) -> usize {
        self.skipped_lines
    }

    pub fn count(&self) -> usize {
        self.records.len()
    }

    /// Borrowed view in file order.
    pub fn records(&self) -> &[T] {
        &self.records
    }

    /// Owned copy of every record in file order.
    pub fn find_all(&self) -> Vec<T> {
        self.records.clone()
    }

    pub fn find_by_id(&self, id: &str) -> Option<T> {
        self.records.iter().find(|r| r.id() == id).cloned()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.position(id).is_some()
    }

    fn position(&self, id: &str) -> Option<usize> {
        self.records.iter().position(|r| r.id() == id)
    }

    // =========================================================================
    // Mutations
    // =========================================================================

    pub fn is_poisoned(&self) -> bool {
        self.poisoned
    }

    /// Refuses every later mutation. Used when a multi-step operation could
    /// not undo its first step.
    pub fn poison(&mut self) {
        warn!(path = %self.path.display(), "Store poisoned");
        self.poisoned = true;
    }

    fn ensure_writable(&self) -> StoreResult<()> {
        if self.poisoned {
            return Err(StoreError::Poisoned {
                path: self.path.clone(),
            });
        }
        Ok(())
    }

    /// Appends a new record and rewrites the file.
    ///
    /// ## Errors
    /// - [`StoreError::Duplicate`] if the id is taken
    /// - [`StoreError::Io`] if the rewrite fails (the record is not kept)
    pub async fn save(&mut self, record: T) -> StoreResult<()> {
        self.ensure_writable()?;
        if self.contains(record.id()) {
            return Err(StoreError::duplicate(T::ENTITY, record.id()));
        }

        let id = record.id().to_string();
        self.records.push(record);

        if let Err(e) = self.persist().await {
            self.records.pop();
            return Err(e);
        }

        debug!(entity = T::ENTITY, id = %id, "Saved record");
        Ok(())
    }

    /// Replaces the record with the same id and rewrites the file.
    ///
    /// ## Errors
    /// - [`StoreError::NotFound`] if no record has that id
    /// - [`StoreError::Io`] if the rewrite fails (the old record is kept)
    pub async fn update(&mut self, record: T) -> StoreResult<()> {
        self.ensure_writable()?;
        let index = self
            .position(record.id())
            .ok_or_else(|| StoreError::not_found(T::ENTITY, record.id()))?;

        let previous = std::mem::replace(&mut self.records[index], record);

        if let Err(e) = self.persist().await {
            self.records[index] = previous;
            return Err(e);
        }

        debug!(entity = T::ENTITY, id = %self.records[index].id(), "Updated record");
        Ok(())
    }

    /// Removes the record with `id`. Returns whether anything was removed;
    /// the file is only rewritten when it was.
    pub async fn delete_by_id(&mut self, id: &str) -> StoreResult<bool> {
        self.ensure_writable()?;
        let Some(index) = self.position(id) else {
            return Ok(false);
        };

        let removed = self.records.remove(index);

        if let Err(e) = self.persist().await {
            self.records.insert(index, removed);
            return Err(e);
        }

        debug!(entity = T::ENTITY, id = %id, "Deleted record");
        Ok(true)
    }

    /// Renders the full file contents.
    fn render(&self) -> String {
        let mut out = String::with_capacity(64 * (self.records.len() + 1));
        out.push_str(T::HEADER);
        out.push('\n');
        for record in &self.records {
            out.push_str(&record.to_line());
            out.push('\n');
        }
        out
    }

    /// Writes a sibling temp file and renames it over the target.
    async fn persist(&self) -> StoreResult<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent)
                    .await
                    .map_err(|e| StoreError::io(parent, e))?;
            }
        }

        let tmp = self.temp_path();
        let contents = self.render();

        if let Err(e) = write_synced(&tmp, contents.as_bytes()).await {
            let _ = tokio::fs::remove_file(&tmp).await;
            return Err(StoreError::io(&tmp, e));
        }

        if let Err(e) = tokio::fs::rename(&tmp, &self.path).await {
            let _ = tokio::fs::remove_file(&tmp).await;
            return Err(StoreError::io(&self.path, e));
        }

        Ok(())
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

async fn write_synced(path: &Path, bytes: &[u8]) -> std::io::Result<()> {
    let mut file = tokio::fs::File::create(path).await?;
    file.write_all(bytes).await?;
    file.sync_all().await?;
    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    struct Note {
        id: String,
        text: String,
    }

    impl Note {
        fn new(id: &str, text: &str) -> Self {
            Note {
                id: id.to_string(),
                text: text.to_string(),
            }
        }
    }

    impl Record for Note {
        const ENTITY: &'static str = "Note";
        const HEADER: &'static str = "ID,Text";

        fn id(&self) -> &str {
            &self.id
        }

        fn to_line(&self) -> String {
            format!("{},{}", self.id, self.text)
        }

        fn parse_line(line: &str, _today: NaiveDate) -> Result<Self, LineError> {
            let cols: Vec<&str> = line.split(',').collect();
            if cols.len() != 2 {
                return Err(LineError::ColumnCount {
                    expected: "2",
                    found: cols.len(),
                });
            }
            Ok(Note::new(cols[0], cols[1]))
        }
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()
    }

    #[tokio::test]
    async fn test_missing_file_loads_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("notes.csv");

        let store = FlatFileStore::<Note>::load(&path, today()).await.unwrap();
        assert_eq!(store.count(), 0);
        assert!(!path.exists());
    }

    #[tokio::test]
    async fn test_save_writes_header_and_rows() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sub").join("notes.csv");

        let mut store = FlatFileStore::<Note>::empty(&path);
        store.save(Note::new("N1", "hello")).await.unwrap();
        store.save(Note::new("N2", "world")).await.unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        assert_eq!(contents, "ID,Text\nN1,hello\nN2,world\n");
        assert!(!dir.path().join("sub").join("notes.csv.tmp").exists());
    }

    #[tokio::test]
    async fn test_duplicate_save_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = FlatFileStore::<Note>::empty(dir.path().join("notes.csv"));
        store.save(Note::new("N1", "a")).await.unwrap();

        let err = store.save(Note::new("N1", "b")).await.unwrap_err();
        assert!(matches!(err, StoreError::Duplicate { .. }));
        assert_eq!(store.count(), 1);
        assert_eq!(store.find_by_id("N1").unwrap().text, "a");
    }

    #[tokio::test]
    async fn test_update_and_delete() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("notes.csv");
        let mut store = FlatFileStore::<Note>::empty(&path);
        store.save(Note::new("N1", "a")).await.unwrap();
        store.save(Note::new("N2", "b")).await.unwrap();

        store.update(Note::new("N1", "changed")).await.unwrap();
        assert!(matches!(
            store.update(Note::new("N9", "x")).await,
            Err(StoreError::NotFound { .. })
        ));

        assert!(store.delete_by_id("N2").await.unwrap());
        assert!(!store.delete_by_id("N2").await.unwrap());

        let reloaded = FlatFileStore::<Note>::load(&path, today()).await.unwrap();
        assert_eq!(reloaded.find_all(), vec![Note::new("N1", "changed")]);
    }

    #[tokio::test]
    async fn test_corrupt_and_duplicate_lines_are_skipped() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("notes.csv");
        std::fs::write(
            &path,
            "ID,Text\nN1,first\nthis line is broken\n\nN2,second\nN1,again\nN3,a,b\n",
        )
        .unwrap();

        let store = FlatFileStore::<Note>::load(&path, today()).await.unwrap();
        assert_eq!(store.count(), 2);
        assert_eq!(store.skipped_lines(), 3);
        assert_eq!(store.find_by_id("N1").unwrap().text, "first");
        assert!(store.find_by_id("N2").is_some());
    }

    #[tokio::test]
    async fn test_invalid_utf8_line_is_skipped() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("notes.csv");
        let mut bytes = b"ID,Text\r\nN1,first\r\nN2,".to_vec();
        bytes.extend_from_slice(&[0xFF, 0xFE]);
        bytes.extend_from_slice(b"\nN3,third\n");
        std::fs::write(&path, bytes).unwrap();

        let store = FlatFileStore::<Note>::load(&path, today()).await.unwrap();
        assert_eq!(store.skipped_lines(), 1);
        assert_eq!(store.find_by_id("N1").unwrap().text, "first");
        assert!(store.find_by_id("N2").is_none());
        assert_eq!(store.find_by_id("N3").unwrap().text, "third");
    }

    #[tokio::test]
    async fn test_failed_rewrite_rolls_back_memory() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("not-a-dir");
        std::fs::write(&blocker, "plain file").unwrap();

        // Parent of the target is a regular file, so every rewrite fails.
        let mut store = FlatFileStore::<Note>::empty(blocker.join("notes.csv"));
        let err = store.save(Note::new("N1", "a")).await.unwrap_err();
        assert!(matches!(err, StoreError::Io { .. }));
        assert_eq!(store.count(), 0);
    }

    #[tokio::test]
    async fn test_failed_update_keeps_previous_record() {
        let dir = tempfile::tempdir().unwrap();
        let data_dir = dir.path().join("data");
        let path = data_dir.join("notes.csv");

        let mut store = FlatFileStore::<Note>::empty(&path);
        store.save(Note::new("N1", "a")).await.unwrap();

        std::fs::remove_dir_all(&data_dir).unwrap();
        std::fs::write(&data_dir, "now a file").unwrap();

        assert!(store.update(Note::new("N1", "b")).await.is_err());
        assert_eq!(store.find_by_id("N1").unwrap().text, "a");

        assert!(store.delete_by_id("N1").await.is_err());
        assert_eq!(store.count(), 1);
    }

    #[tokio::test]
    async fn test_poisoned_store_rejects_mutations() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = FlatFileStore::<Note>::empty(dir.path().join("notes.csv"));
        store.save(Note::new("N1", "a")).await.unwrap();

        store.poison();
        assert!(store.is_poisoned());
        assert!(matches!(
            store.save(Note::new("N2", "b")).await,
            Err(StoreError::Poisoned { .. })
        ));
        assert!(matches!(
            store.delete_by_id("N1").await,
            Err(StoreError::Poisoned { .. })
        ));
        assert_eq!(store.find_all().len(), 1);
    }
}

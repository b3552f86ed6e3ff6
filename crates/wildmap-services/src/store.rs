//! Flat-file annotation storage.
//!
//! Each kind lives in its own pretty-printed JSON array inside the data
//! directory. Every mutation reads the whole collection, appends, and
//! rewrites the whole file.

use parking_lot::Mutex;
use std::path::{Path, PathBuf};

use crate::annotation::{Annotation, AnnotationKind};
use crate::backend::{AnnotationBackend, StoreError, StoreResult};

/// JSON-file annotation store.
///
/// Appends to the same collection are serialized by a per-kind lock, and
/// the rewritten file is moved into place with a rename. Separate processes
/// sharing one data directory are not coordinated.
pub struct JsonFileStore {
    data_dir: PathBuf,
    write_locks: [Mutex<()>; 2],
}

impl JsonFileStore {
    /// Open a store rooted at `data_dir`, creating the directory if needed.
    pub fn open<P: AsRef<Path>>(data_dir: P) -> StoreResult<Self> {
        let data_dir = data_dir.as_ref().to_path_buf();
        std::fs::create_dir_all(&data_dir).map_err(|e| {
            StoreError::storage(format!(
                "Failed to create data directory {}: {}",
                data_dir.display(),
                e
            ))
        })?;

        tracing::info!("Annotation store at {}", data_dir.display());
        Ok(Self {
            data_dir,
            write_locks: [Mutex::new(()), Mutex::new(())],
        })
    }

    /// Path of the collection file for `kind`.
    pub fn path_for(&self, kind: AnnotationKind) -> PathBuf {
        self.data_dir.join(kind.file_name())
    }

    fn read_collection(&self, kind: AnnotationKind) -> StoreResult<Vec<Annotation>> {
        let path = self.path_for(kind);
        let contents = match std::fs::read_to_string(&path) {
            Ok(c) => c,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!("{} missing, treating as empty", path.display());
                return Ok(Vec::new());
            }
            Err(e) => {
                return Err(StoreError::storage(format!(
                    "Failed to read {}: {}",
                    path.display(),
                    e
                )))
            }
        };

        if contents.trim().is_empty() {
            return Ok(Vec::new());
        }

        serde_json::from_str(&contents).map_err(|e| StoreError::Corrupt {
            file: kind.file_name().to_string(),
            message: e.to_string(),
        })
    }

    fn write_collection(&self, kind: AnnotationKind, records: &[Annotation]) -> StoreResult<()> {
        let path = self.path_for(kind);
        let tmp = path.with_extension("json.tmp");

        let body = serde_json::to_string_pretty(records)
            .map_err(|e| StoreError::storage(format!("Failed to serialize {kind}: {e}")))?;

        std::fs::write(&tmp, body).map_err(|e| {
            StoreError::storage(format!("Failed to write {}: {}", tmp.display(), e))
        })?;
        std::fs::rename(&tmp, &path).map_err(|e| {
            StoreError::storage(format!("Failed to replace {}: {}", path.display(), e))
        })?;

        Ok(())
    }
}

impl AnnotationBackend for JsonFileStore {
    fn load_all(&self, kind: AnnotationKind) -> StoreResult<Vec<Annotation>> {
        self.read_collection(kind)
    }

    fn append_and_save(&self, kind: AnnotationKind, record: Annotation) -> StoreResult<usize> {
        let _guard = self.write_locks[kind.index()].lock();

        let mut records = self.read_collection(kind)?;
        records.push(record);
        self.write_collection(kind, &records)?;

        tracing::debug!("Appended {} entry, collection size {}", kind, records.len());
        Ok(records.len())
    }
}

//! Key-value persistence backends
//!
//! Progress is stored as flat keys: `level_{n}_unlocked` (bool),
//! `level_{n}_score` and `level_{n}_stars` (ints). Reads never fail; a missing
//! or mistyped key reads as absent. Writes go through immediately.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde_json::Value;
use tracing::debug;

use crate::error::StoreError;

pub fn unlocked_key(level: u32) -> String {
    format!("level_{}_unlocked", level)
}

pub fn score_key(level: u32) -> String {
    format!("level_{}_score", level)
}

pub fn stars_key(level: u32) -> String {
    format!("level_{}_stars", level)
}

/// A value stored under a progress key
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProgressValue {
    Bool(bool),
    Int(i64),
}

impl From<ProgressValue> for Value {
    fn from(value: ProgressValue) -> Self {
        match value {
            ProgressValue::Bool(b) => Value::from(b),
            ProgressValue::Int(i) => Value::from(i),
        }
    }
}

/// Storage the progress store reads at load time and writes through to
pub trait ProgressBackend {
    fn get_bool(&self, key: &str) -> Option<bool>;
    fn get_int(&self, key: &str) -> Option<i64>;

    /// Write every entry as one commit: either all of them land or none do
    fn put_many(&mut self, entries: &[(String, ProgressValue)]) -> Result<(), StoreError>;

    /// Remove every key
    fn clear(&mut self) -> Result<(), StoreError>;

    fn put_bool(&mut self, key: &str, value: bool) -> Result<(), StoreError> {
        self.put_many(&[(key.to_string(), ProgressValue::Bool(value))])
    }

    fn put_int(&mut self, key: &str, value: i64) -> Result<(), StoreError> {
        self.put_many(&[(key.to_string(), ProgressValue::Int(value))])
    }
}

fn apply(values: &mut BTreeMap<String, Value>, entries: &[(String, ProgressValue)]) {
    for (key, value) in entries {
        values.insert(key.clone(), Value::from(*value));
    }
}

/// In-process backend; counts writes
#[derive(Debug, Clone, Default)]
pub struct MemoryBackend {
    values: BTreeMap<String, Value>,
    writes: usize,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of successful commits (`put_*`, `put_many` and `clear` calls)
    pub fn write_count(&self) -> usize {
        self.writes
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl ProgressBackend for MemoryBackend {
    fn get_bool(&self, key: &str) -> Option<bool> {
        self.values.get(key).and_then(Value::as_bool)
    }

    fn get_int(&self, key: &str) -> Option<i64> {
        self.values.get(key).and_then(Value::as_i64)
    }

    fn put_many(&mut self, entries: &[(String, ProgressValue)]) -> Result<(), StoreError> {
        apply(&mut self.values, entries);
        self.writes += 1;
        Ok(())
    }

    fn clear(&mut self) -> Result<(), StoreError> {
        self.values.clear();
        self.writes += 1;
        Ok(())
    }
}

/// Flat JSON object on disk, rewritten on every put
///
/// Each write goes to a sibling temp file that is then renamed over the
/// target, so a crash mid-write leaves the previous file intact. The
/// in-memory map only takes a change once its file write has succeeded.
#[derive(Debug, Clone)]
pub struct JsonFileBackend {
    path: PathBuf,
    values: BTreeMap<String, Value>,
}

impl JsonFileBackend {
    /// Open `path`, treating a missing file as empty progress
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();
        let values = match fs::read(&path) {
            Ok(bytes) => serde_json::from_slice(&bytes).map_err(|source| StoreError::Json {
                path: path.clone(),
                source,
            })?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => BTreeMap::new(),
            Err(source) => return Err(StoreError::Io { path, source }),
        };
        debug!(path = %path.display(), keys = values.len(), "progress file opened");
        Ok(Self { path, values })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn persist(&self, values: &BTreeMap<String, Value>) -> Result<(), StoreError> {
        let io_err = |source| StoreError::Io {
            path: self.path.clone(),
            source,
        };

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(io_err)?;
        }

        let bytes = serde_json::to_vec_pretty(values).map_err(|source| StoreError::Json {
            path: self.path.clone(),
            source,
        })?;
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, bytes).map_err(io_err)?;
        fs::rename(&tmp, &self.path).map_err(io_err)?;
        Ok(())
    }
}

impl ProgressBackend for JsonFileBackend {
    fn get_bool(&self, key: &str) -> Option<bool> {
        self.values.get(key).and_then(Value::as_bool)
    }

    fn get_int(&self, key: &str) -> Option<i64> {
        self.values.get(key).and_then(Value::as_i64)
    }

    fn put_many(&mut self, entries: &[(String, ProgressValue)]) -> Result<(), StoreError> {
        let mut next = self.values.clone();
        apply(&mut next, entries);
        self.persist(&next)?;
        self.values = next;
        Ok(())
    }

    fn clear(&mut self) -> Result<(), StoreError> {
        self.persist(&BTreeMap::new())?;
        self.values.clear();
        Ok(())
    }
}

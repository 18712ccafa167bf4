//! User dictionary with most-recently-used ordering.
//!
//! BTreeMap-based so prefix scans over keys are ordered range walks. Uses
//! `RwLock` for interior mutability so that `add`/`delete` can be called while
//! sessions hold a shared reference.

pub mod wal;

use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::ops::Bound;
use std::path::Path;
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use serde::{Deserialize, Serialize};

use crate::okuri::split_okuri_key;

pub use wal::{open_with_wal, UserDictWal, WalOp};

const MAGIC: &[u8; 4] = b"KKUD";
const VERSION: u8 = 1;

pub struct UserDictionary {
    entries: RwLock<BTreeMap<String, Vec<String>>>,
}

impl UserDictionary {
    pub fn new() -> Self {
        Self {
            entries: RwLock::new(BTreeMap::new()),
        }
    }

    fn read(&self) -> RwLockReadGuard<'_, BTreeMap<String, Vec<String>>> {
        self.entries.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, BTreeMap<String, Vec<String>>> {
        self.entries.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Record `surface` under `key` and move it to the front.
    ///
    /// Returns `true` if the list changed (new surface, or an existing one
    /// that was not already first).
    pub fn add(&self, key: &str, surface: &str) -> bool {
        let mut map = self.write();
        let list = map.entry(key.to_string()).or_default();
        match list.iter().position(|s| s == surface) {
            Some(0) => false,
            Some(pos) => {
                let s = list.remove(pos);
                list.insert(0, s);
                true
            }
            None => {
                list.insert(0, surface.to_string());
                true
            }
        }
    }

    /// Remove `surface` from `key`. Returns `true` if removed, `false` if
    /// the key or surface was not found. Drops the key once its list empties.
    pub fn delete(&self, key: &str, surface: &str) -> bool {
        let mut map = self.write();
        let Some(list) = map.get_mut(key) else {
            return false;
        };
        let before = list.len();
        list.retain(|s| s != surface);
        let removed = list.len() < before;
        if list.is_empty() {
            map.remove(key);
        }
        removed
    }

    pub fn lookup(&self, key: &str) -> Option<Vec<String>> {
        self.read().get(key).cloned()
    }

    /// Every key whose reading component (okuri letter stripped) starts with
    /// `prefix`, in key order.
    pub fn keys_with_prefix(&self, prefix: &str) -> Vec<String> {
        self.read()
            .range::<str, _>((Bound::Included(prefix), Bound::Unbounded))
            .map(|(k, _)| k)
            .take_while(|k| k.starts_with(prefix))
            .filter(|k| split_okuri_key(k).0.starts_with(prefix))
            .cloned()
            .collect()
    }

    /// List all entries as (key, surface) pairs, in key order then MRU order.
    pub fn list(&self) -> Vec<(String, String)> {
        self.read()
            .iter()
            .flat_map(|(k, surfaces)| surfaces.iter().map(move |s| (k.clone(), s.clone())))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }

    /// Serialize to bytes (KKUD format).
    pub fn to_bytes(&self) -> Result<Vec<u8>, io::Error> {
        let map = self.read();
        let records: Vec<UserEntryRecord> = map
            .iter()
            .map(|(key, surfaces)| UserEntryRecord {
                key: key.clone(),
                surfaces: surfaces.clone(),
            })
            .collect();

        let body = bincode::serialize(&records).map_err(io::Error::other)?;
        let mut buf = Vec::with_capacity(5 + body.len());
        buf.extend_from_slice(MAGIC);
        buf.push(VERSION);
        buf.extend_from_slice(&body);
        Ok(buf)
    }

    /// Deserialize from bytes (KKUD format).
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, io::Error> {
        if bytes.len() < 5 {
            return Err(io::Error::new(io::ErrorKind::InvalidData, "too short"));
        }
        if &bytes[0..4] != MAGIC {
            return Err(io::Error::new(io::ErrorKind::InvalidData, "bad magic"));
        }
        if bytes[4] != VERSION {
            return Err(io::Error::new(
                io::ErrorKind::InvalidData,
                "unsupported version",
            ));
        }
        let records: Vec<UserEntryRecord> = bincode::deserialize(&bytes[5..])
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;

        let mut map: BTreeMap<String, Vec<String>> = BTreeMap::new();
        for rec in records {
            if !rec.surfaces.is_empty() {
                map.insert(rec.key, rec.surfaces);
            }
        }
        Ok(Self {
            entries: RwLock::new(map),
        })
    }

    /// Atomic write: write to .tmp then rename.
    pub fn save(&self, path: &Path) -> Result<(), io::Error> {
        let bytes = self.to_bytes()?;
        let tmp = path.with_extension("tmp");
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&tmp, &bytes)?;
        fs::rename(&tmp, path)?;
        Ok(())
    }

    /// Open from file, returning an empty UserDictionary if the file doesn't exist.
    pub fn open(path: &Path) -> Result<Self, io::Error> {
        match fs::read(path) {
            Ok(bytes) => Self::from_bytes(&bytes),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(Self::new()),
            Err(e) => Err(e),
        }
    }

    /// Apply a journaled operation.
    pub fn apply(&self, op: &WalOp) {
        match op {
            WalOp::Add { key, surface } => {
                self.add(key, surface);
            }
            WalOp::Delete { key, surface } => {
                self.delete(key, surface);
            }
        }
    }
}

impl Default for UserDictionary {
    fn default() -> Self {
        Self::new()
    }
}

/// One persisted key with its surfaces in MRU order.
#[derive(Serialize, Deserialize)]
struct UserEntryRecord {
    key: String,
    surfaces: Vec<String>,
}

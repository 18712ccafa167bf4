use std::io;
use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

use tracing::debug;

use super::{DictionaryStore, MainDictionary, StoreError};
use crate::user_dict::{open_with_wal, UserDictWal, UserDictionary, WalOp};

/// `DictionaryStore` over a shared main dictionary and a user dictionary,
/// optionally persisted through a checkpoint file plus write-ahead log.
///
/// Every write is journaled before it is applied, so a failed journal write
/// leaves the in-memory dictionary untouched. `commit` checkpoints the full
/// user dictionary and truncates the log.
pub struct LocalStore {
    main: Arc<MainDictionary>,
    user: UserDictionary,
    wal: Option<Mutex<UserDictWal>>,
    dirty: AtomicBool,
}

impl LocalStore {
    /// A store with no durable backing; `commit` is a no-op.
    pub fn in_memory(main: Arc<MainDictionary>, user: UserDictionary) -> Self {
        Self {
            main,
            user,
            wal: None,
            dirty: AtomicBool::new(false),
        }
    }

    /// Open the user dictionary at `user_path`, replaying any journal left
    /// by an unclean shutdown.
    pub fn open(main: Arc<MainDictionary>, user_path: &Path) -> Result<Self, StoreError> {
        let (user, wal) = open_with_wal(user_path).map_err(|e| match e.kind() {
            io::ErrorKind::InvalidData => {
                StoreError::Corrupt(format!("{}: {e}", user_path.display()))
            }
            _ => StoreError::Unavailable(e),
        })?;
        let replayed = wal.entry_count();
        if replayed > 0 {
            debug!(replayed, path = %user_path.display(), "replayed user dictionary journal");
        }
        Ok(Self {
            main,
            user,
            wal: Some(Mutex::new(wal)),
            dirty: AtomicBool::new(replayed > 0),
        })
    }

    pub fn main_dict(&self) -> &MainDictionary {
        &self.main
    }

    pub fn user_dict(&self) -> &UserDictionary {
        &self.user
    }

    /// Whether there are writes not yet checkpointed.
    pub fn is_dirty(&self) -> bool {
        self.dirty.load(Ordering::Relaxed)
    }

    /// Journal `op`, apply it, and compact the journal once it grows past
    /// its threshold.
    fn write_through(&self, op: &WalOp) -> Result<(), StoreError> {
        let Some(wal) = &self.wal else {
            self.user.apply(op);
            return Ok(());
        };
        let mut wal = wal.lock().unwrap_or_else(PoisonError::into_inner);
        wal.append(op)?;
        self.user.apply(op);
        self.dirty.store(true, Ordering::Relaxed);
        if wal.needs_compact() {
            debug!(entries = wal.entry_count(), "compacting user dictionary journal");
            wal.checkpoint(&self.user)?;
            self.dirty.store(false, Ordering::Relaxed);
        }
        Ok(())
    }
}

impl DictionaryStore for LocalStore {
    fn search_main(&self, key: &str) -> Result<Option<Vec<String>>, StoreError> {
        Ok(self.main.lookup(key).map(<[String]>::to_vec))
    }

    fn search_user(&self, key: &str) -> Result<Option<Vec<String>>, StoreError> {
        Ok(self.user.lookup(key))
    }

    fn add(&self, key: &str, surface: &str) -> Result<(), StoreError> {
        let op = WalOp::Add {
            key: key.to_string(),
            surface: surface.to_string(),
        };
        self.write_through(&op)
    }

    fn delete(&self, key: &str, surface: &str) -> Result<bool, StoreError> {
        let present = self
            .user
            .lookup(key)
            .is_some_and(|list| list.iter().any(|s| s == surface));
        if !present {
            return Ok(false);
        }
        let op = WalOp::Delete {
            key: key.to_string(),
            surface: surface.to_string(),
        };
        self.write_through(&op)?;
        Ok(true)
    }

    fn keys_with_prefix(&self, prefix: &str) -> Result<Vec<String>, StoreError> {
        Ok(self.user.keys_with_prefix(prefix))
    }

    fn commit(&self) -> Result<(), StoreError> {
        let Some(wal) = &self.wal else {
            return Ok(());
        };
        if !self.is_dirty() {
            return Ok(());
        }
        let mut wal = wal.lock().unwrap_or_else(PoisonError::into_inner);
        wal.checkpoint(&self.user)?;
        self.dirty.store(false, Ordering::Relaxed);
        debug!(path = %wal.checkpoint_path().display(), "user dictionary checkpointed");
        Ok(())
    }
}

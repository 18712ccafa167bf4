
use std::cell::RefCell;
use std::io;
use std::sync::Arc;

use crate::dict::{DictionaryStore, LocalStore, MainDictionary, StoreError};
use crate::user_dict::UserDictionary;

use super::Candidate;

fn entries(pairs: &[(&str, &[&str])]) -> Vec<(String, Vec<String>)> {
    pairs
        .iter()
        .map(|(k, vs)| (k.to_string(), vs.iter().map(|v| v.to_string()).collect()))
        .collect()
}

/// A store over the given main entries and user entries. User surfaces are
/// listed most recent first.
pub(super) fn store(main: &[(&str, &[&str])], user: &[(&str, &[&str])]) -> LocalStore {
    let user_dict = UserDictionary::new();
    for (key, surfaces) in user {
        for surface in surfaces.iter().rev() {
            user_dict.add(key, surface);
        }
    }
    LocalStore::in_memory(
        Arc::new(MainDictionary::from_entries(entries(main))),
        user_dict,
    )
}

pub(super) fn displays(candidates: &[Candidate]) -> Vec<&str> {
    candidates.iter().map(|c| c.display.as_str()).collect()
}

/// Records every search issued against the wrapped store, tagged with the
/// dictionary searched.
pub(super) struct RecordingStore<S> {
    pub inner: S,
    pub queries: RefCell<Vec<String>>,
}

impl<S> RecordingStore<S> {
    pub fn new(inner: S) -> Self {
        Self {
            inner,
            queries: RefCell::new(Vec::new()),
        }
    }
}

impl<S: DictionaryStore> DictionaryStore for RecordingStore<S> {
    fn search_main(&self, key: &str) -> Result<Option<Vec<String>>, StoreError> {
        self.queries.borrow_mut().push(format!("main:{key}"));
        self.inner.search_main(key)
    }

    fn search_user(&self, key: &str) -> Result<Option<Vec<String>>, StoreError> {
        self.queries.borrow_mut().push(format!("user:{key}"));
        self.inner.search_user(key)
    }

    fn add(&self, key: &str, surface: &str) -> Result<(), StoreError> {
        self.inner.add(key, surface)
    }

    fn delete(&self, key: &str, surface: &str) -> Result<bool, StoreError> {
        self.inner.delete(key, surface)
    }

    fn keys_with_prefix(&self, prefix: &str) -> Result<Vec<String>, StoreError> {
        self.inner.keys_with_prefix(prefix)
    }

    fn commit(&self) -> Result<(), StoreError> {
        self.inner.commit()
    }
}

/// A store whose backing storage is gone.
pub(super) struct BrokenStore;

fn unavailable() -> StoreError {
    StoreError::Unavailable(io::Error::new(io::ErrorKind::NotFound, "gone"))
}

impl DictionaryStore for BrokenStore {
    fn search_main(&self, _key: &str) -> Result<Option<Vec<String>>, StoreError> {
        Err(unavailable())
    }

    fn search_user(&self, _key: &str) -> Result<Option<Vec<String>>, StoreError> {
        Err(unavailable())
    }

    fn add(&self, _key: &str, _surface: &str) -> Result<(), StoreError> {
        Err(unavailable())
    }

    fn delete(&self, _key: &str, _surface: &str) -> Result<bool, StoreError> {
        Err(unavailable())
    }

    fn keys_with_prefix(&self, _prefix: &str) -> Result<Vec<String>, StoreError> {
        Err(unavailable())
    }

    fn commit(&self) -> Result<(), StoreError> {
        Err(unavailable())
    }
}

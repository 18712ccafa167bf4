//! Dictionary storage.
//!
//! `MainDictionary` is the read-only bundled dictionary, `UserDictionary`
//! (in `crate::user_dict`) the learned one. Both map a reading, optionally
//! suffixed with an okuri letter, to an ordered list of surfaces.
//! `DictionaryStore` is the seam the converter and sessions talk to.

mod main_dict;
mod store;

pub use main_dict::MainDictionary;
pub use store::LocalStore;

use std::io;

/// Error type for main-dictionary binary I/O.
#[derive(Debug, thiserror::Error)]
pub enum DictError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("invalid header (too short)")]
    InvalidHeader,

    #[error("invalid magic bytes (expected KKMD)")]
    InvalidMagic,

    #[error("unsupported version: {0}")]
    UnsupportedVersion(u8),

    #[error("serialization error: {0}")]
    Serialize(bincode::Error),

    #[error("deserialization error: {0}")]
    Deserialize(bincode::Error),
}

/// Failure of the backing store itself.
///
/// A missing key is never an error: lookups return `Ok(None)`.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("dictionary store unavailable: {0}")]
    Unavailable(#[from] io::Error),

    #[error("dictionary store corrupt: {0}")]
    Corrupt(String),
}

impl From<DictError> for StoreError {
    fn from(e: DictError) -> Self {
        match e {
            DictError::Io(e) => StoreError::Unavailable(e),
            other => StoreError::Corrupt(other.to_string()),
        }
    }
}

/// Two keyed stores: the read-only main dictionary and the read-write user
/// dictionary.
///
/// Keys are readings or okuri keys (`"たべr"`); values are surface lists in
/// most-recently-used order.
pub trait DictionaryStore {
    /// Look up `key` in the bundled dictionary.
    fn search_main(&self, key: &str) -> Result<Option<Vec<String>>, StoreError>;

    /// Look up `key` in the user dictionary.
    fn search_user(&self, key: &str) -> Result<Option<Vec<String>>, StoreError>;

    /// Record `surface` under `key`, moving it to the front of the list.
    fn add(&self, key: &str, surface: &str) -> Result<(), StoreError>;

    /// Remove `surface` from `key`. Returns whether anything was removed.
    fn delete(&self, key: &str, surface: &str) -> Result<bool, StoreError>;

    /// Every user key whose reading component starts with `prefix`.
    fn keys_with_prefix(&self, prefix: &str) -> Result<Vec<String>, StoreError>;

    /// Flush pending writes to durable storage. Idempotent.
    fn commit(&self) -> Result<(), StoreError>;
}

impl<T: DictionaryStore + ?Sized> DictionaryStore for &T {
    fn search_main(&self, key: &str) -> Result<Option<Vec<String>>, StoreError> {
        (**self).search_main(key)
    }

    fn search_user(&self, key: &str) -> Result<Option<Vec<String>>, StoreError> {
        (**self).search_user(key)
    }

    fn add(&self, key: &str, surface: &str) -> Result<(), StoreError> {
        (**self).add(key, surface)
    }

    fn delete(&self, key: &str, surface: &str) -> Result<bool, StoreError> {
        (**self).delete(key, surface)
    }

    fn keys_with_prefix(&self, prefix: &str) -> Result<Vec<String>, StoreError> {
        (**self).keys_with_prefix(prefix)
    }

    fn commit(&self) -> Result<(), StoreError> {
        (**self).commit()
    }
}

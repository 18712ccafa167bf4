use std::collections::BTreeMap;
use std::fs::{self, File};
use std::ops::Bound;
use std::path::Path;

use memmap2::Mmap;

use super::DictError;

const MAGIC: &[u8; 4] = b"KKMD";
const VERSION: u8 = 1;
const HEADER_SIZE: usize = 5; // 4 bytes magic + 1 byte version

/// The bundled, read-only dictionary.
///
/// Keys are readings or okuri keys; each maps to its surfaces in priority
/// order, without duplicates.
#[derive(Debug)]
pub struct MainDictionary {
    entries: BTreeMap<String, Vec<String>>,
}

impl MainDictionary {
    /// Build from `(key, surfaces)` pairs. Repeated keys are merged and
    /// repeated surfaces dropped, keeping the first occurrence.
    pub fn from_entries(entries: impl IntoIterator<Item = (String, Vec<String>)>) -> Self {
        let mut map: BTreeMap<String, Vec<String>> = BTreeMap::new();
        for (key, surfaces) in entries {
            let list = map.entry(key).or_default();
            for s in surfaces {
                if !s.is_empty() && !list.contains(&s) {
                    list.push(s);
                }
            }
        }
        map.retain(|_, v| !v.is_empty());
        Self { entries: map }
    }

    pub fn empty() -> Self {
        Self {
            entries: BTreeMap::new(),
        }
    }

    pub fn to_bytes(&self) -> Result<Vec<u8>, DictError> {
        let body = bincode::serialize(&self.entries).map_err(DictError::Serialize)?;
        let mut buf = Vec::with_capacity(HEADER_SIZE + body.len());
        buf.extend_from_slice(MAGIC);
        buf.push(VERSION);
        buf.extend_from_slice(&body);
        Ok(buf)
    }

    pub fn from_bytes(data: &[u8]) -> Result<Self, DictError> {
        if data.len() < HEADER_SIZE {
            return Err(DictError::InvalidHeader);
        }
        if &data[..4] != MAGIC {
            return Err(DictError::InvalidMagic);
        }
        if data[4] != VERSION {
            return Err(DictError::UnsupportedVersion(data[4]));
        }
        let entries: BTreeMap<String, Vec<String>> =
            bincode::deserialize(&data[HEADER_SIZE..]).map_err(DictError::Deserialize)?;
        Ok(Self { entries })
    }

    /// Open a dictionary file, using mmap to avoid doubling peak memory.
    pub fn open(path: &Path) -> Result<Self, DictError> {
        let file = File::open(path)?;
        // SAFETY: The file is opened read-only and the mapping is immutable.
        // The Mmap is dropped after deserialization completes below.
        let mmap = unsafe { Mmap::map(&file)? };
        Self::from_bytes(&mmap)
    }

    pub fn save(&self, path: &Path) -> Result<(), DictError> {
        Ok(fs::write(path, self.to_bytes()?)?)
    }

    pub fn lookup(&self, key: &str) -> Option<&[String]> {
        self.entries.get(key).map(Vec::as_slice)
    }

    /// Entries whose key starts with `prefix`, in key order.
    pub fn predict(&self, prefix: &str, max_results: usize) -> Vec<(&str, &[String])> {
        self.entries
            .range::<str, _>((Bound::Included(prefix), Bound::Unbounded))
            .take_while(|(k, _)| k.starts_with(prefix))
            .take(max_results)
            .map(|(k, v)| (k.as_str(), v.as_slice()))
            .collect()
    }

    /// Iterate over all `(key, surfaces)` pairs in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_slice()))
    }

    /// Returns (key_count, surface_count).
    pub fn stats(&self) -> (usize, usize) {
        let surfaces = self.entries.values().map(Vec::len).sum();
        (self.entries.len(), surfaces)
    }
}

impl Default for MainDictionary {
    fn default() -> Self {
        Self::empty()
    }
}

//! Write-Ahead Log for UserDictionary persistence.
//!
//! Each learned word appends a small frame instead of serializing the whole
//! dictionary. A checkpoint writes the full state and truncates the WAL.

use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::UserDictionary;

const COMPACT_THRESHOLD: usize = 1000;

/// A single WAL entry; mirrors the mutating calls on `UserDictionary`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum WalOp {
    Add { key: String, surface: String },
    Delete { key: String, surface: String },
}

/// WAL state that lives alongside a checkpoint file.
pub struct UserDictWal {
    /// Path to the checkpoint file (`user_dict.kkud`).
    checkpoint_path: PathBuf,
    /// Path to the WAL file (`user_dict.kkud.wal`).
    wal_path: PathBuf,
    /// Kept open in append mode to avoid repeated open/close per entry.
    file: Option<File>,
    /// Number of entries in the current WAL (since last checkpoint).
    entry_count: usize,
}

impl UserDictWal {
    /// Create a new WAL handle for the given checkpoint path.
    pub fn new(checkpoint_path: &Path) -> Self {
        let wal_path = checkpoint_path.with_extension("kkud.wal");
        Self {
            checkpoint_path: checkpoint_path.to_path_buf(),
            wal_path,
            file: None,
            entry_count: 0,
        }
    }

    /// Replay the WAL into the given dictionary.
    /// Returns the number of entries replayed. Replay stops at the first
    /// truncated or corrupt frame.
    pub fn replay(&mut self, dict: &UserDictionary) -> io::Result<usize> {
        let data = match fs::read(&self.wal_path) {
            Ok(d) => d,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                self.entry_count = 0;
                return Ok(0);
            }
            Err(e) => return Err(e),
        };

        let mut count = 0;
        let mut pos = 0;
        while pos + 8 <= data.len() {
            let length = read_u32(&data[pos..pos + 4]) as usize;
            let expected_crc = read_u32(&data[pos + 4..pos + 8]);

            if length == 0 || pos + 8 + length > data.len() {
                break; // truncated frame
            }

            let payload = &data[pos + 8..pos + 8 + length];
            if crc32fast::hash(payload) != expected_crc {
                break; // corrupt frame
            }

            match bincode::deserialize::<WalOp>(payload) {
                Ok(op) => {
                    dict.apply(&op);
                    count += 1;
                }
                Err(_) => break, // corrupt payload
            }

            pos += 8 + length;
        }

        self.entry_count = count;
        Ok(count)
    }

    /// Append an entry to the WAL file.
    pub fn append(&mut self, op: &WalOp) -> io::Result<()> {
        let payload = bincode::serialize(op).map_err(io::Error::other)?;
        let length = u32::try_from(payload.len()).map_err(io::Error::other)?;
        let crc = crc32fast::hash(&payload);

        let file = self.open_file()?;
        file.write_all(&length.to_le_bytes())?;
        file.write_all(&crc.to_le_bytes())?;
        file.write_all(&payload)?;

        self.entry_count += 1;
        Ok(())
    }

    /// Get or lazily open the WAL file handle.
    fn open_file(&mut self) -> io::Result<&mut File> {
        if self.file.is_none() {
            if let Some(parent) = self.wal_path.parent() {
                fs::create_dir_all(parent)?;
            }
            let f = OpenOptions::new()
                .create(true)
                .append(true)
                .open(&self.wal_path)?;
            self.file = Some(f);
        }
        self.file
            .as_mut()
            .ok_or_else(|| io::Error::other("WAL file handle not open"))
    }

    /// Whether the WAL has reached the compaction threshold.
    pub fn needs_compact(&self) -> bool {
        self.entry_count >= COMPACT_THRESHOLD
    }

    /// Write a full checkpoint of `dict` and truncate the WAL.
    pub fn checkpoint(&mut self, dict: &UserDictionary) -> io::Result<()> {
        dict.save(&self.checkpoint_path)?;
        self.truncate_wal()
    }

    /// Truncate the WAL file and reset entry count.
    /// Call after a checkpoint has been written.
    pub fn truncate_wal(&mut self) -> io::Result<()> {
        self.file = None;
        File::create(&self.wal_path)?;
        self.entry_count = 0;
        Ok(())
    }

    /// Current WAL entry count.
    pub fn entry_count(&self) -> usize {
        self.entry_count
    }

    /// Path to the checkpoint file.
    pub fn checkpoint_path(&self) -> &Path {
        &self.checkpoint_path
    }

    /// Path to the WAL file (for testing).
    pub fn wal_path(&self) -> &Path {
        &self.wal_path
    }
}

fn read_u32(bytes: &[u8]) -> u32 {
    let mut buf = [0u8; 4];
    buf.copy_from_slice(bytes);
    u32::from_le_bytes(buf)
}

/// Convenience: open checkpoint + replay WAL in one call.
pub fn open_with_wal(checkpoint_path: &Path) -> io::Result<(UserDictionary, UserDictWal)> {
    let dict = UserDictionary::open(checkpoint_path)?;
    let mut wal = UserDictWal::new(checkpoint_path);
    wal.replay(&dict)?;
    Ok((dict, wal))
}

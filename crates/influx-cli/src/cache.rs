//! Session-scoped memo of loaded tables.
//!
//! Entries are keyed by the SHA-256 digest of the file contents, so the same
//! upload under a different name is a hit and an edited file is a miss.

use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use influx_ingest::{IngestError, RawTable, read_csv_bytes, read_file_bytes};
use sha2::Digest;
use tracing::debug;

pub fn sha256_hex(bytes: &[u8]) -> String {
    let digest = sha2::Sha256::digest(bytes);
    hex::encode(digest)
}

#[derive(Debug, Default)]
pub struct LoadCache {
    entries: HashMap<String, Arc<RawTable>>,
    hits: usize,
    misses: usize,
}

impl LoadCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reads `path` and returns its table, parsing only on a miss.
    pub fn load_path(&mut self, path: &Path) -> Result<Arc<RawTable>, IngestError> {
        let bytes = read_file_bytes(path)?;
        self.load_bytes(&bytes, path)
    }

    /// Returns the table for `bytes`. `path` is only used in error messages.
    pub fn load_bytes(&mut self, bytes: &[u8], path: &Path) -> Result<Arc<RawTable>, IngestError> {
        let key = sha256_hex(bytes);
        if let Some(frame) = self.entries.get(&key) {
            self.hits += 1;
            debug!(digest = %key, "load cache hit");
            return Ok(Arc::clone(frame));
        }
        let frame = Arc::new(read_csv_bytes(bytes, path)?);
        self.misses += 1;
        debug!(digest = %key, "load cache miss");
        self.entries.insert(key, Arc::clone(&frame));
        Ok(frame)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn hits(&self) -> usize {
        self.hits
    }

    pub fn misses(&self) -> usize {
        self.misses
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn digest_is_lowercase_hex() {
        assert_eq!(
            sha256_hex(b"abc"),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }

    #[test]
    fn failed_loads_are_not_cached() {
        let mut cache = LoadCache::new();
        assert!(cache.load_bytes(b"", Path::new("empty.csv")).is_err());
        assert!(cache.is_empty());
        assert_eq!(cache.misses(), 0);
    }
}

//! Byte caches layered in front of avatar synthesis
//!
//! A cache stores encoded output keyed by identifier and is transparent:
//! for a deterministic producer, going through any tier combination yields
//! the same bytes as calling the producer directly. Tiers share one trait
//! so they compose freely; [`ComposeCache`] chains them so a hit at tier k
//! is served without touching later tiers, and a full miss is produced once
//! and stored on the way back out.

use crate::error::{AvatarError, Result};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use xxhash_rust::xxh3::xxh3_64;

/// Default entry capacity for [`LruCache`]
pub const DEFAULT_LRU_CAPACITY: usize = 50;

/// Byte cache keyed by avatar identifier
pub trait Cache: Send + Sync {
    /// Returns the cached bytes for `id`, invoking `create` and storing the
    /// result on a miss.
    ///
    /// # Errors
    ///
    /// Propagates failures from `create` and from the cache's own storage.
    fn get_or_create(
        &self,
        id: &str,
        create: &mut dyn FnMut() -> Result<Vec<u8>>,
    ) -> Result<Vec<u8>>;
}

/// Unbounded in-memory cache
#[derive(Default)]
pub struct MemoryCache {
    entries: Mutex<HashMap<String, Vec<u8>>>,
}

impl MemoryCache {
    /// Empty in-memory cache
    pub fn new() -> Self {
        Self::default()
    }
}

impl Cache for MemoryCache {
    fn get_or_create(
        &self,
        id: &str,
        create: &mut dyn FnMut() -> Result<Vec<u8>>,
    ) -> Result<Vec<u8>> {
        let mut entries = self.entries.lock().map_err(poisoned)?;
        if let Some(bytes) = entries.get(id) {
            return Ok(bytes.clone());
        }
        let bytes = create()?;
        entries.insert(id.to_owned(), bytes.clone());
        Ok(bytes)
    }
}

struct LruEntry {
    bytes: Vec<u8>,
    stamp: u64,
}

/// In-memory cache bounded to a fixed number of entries
///
/// Eviction is least-recently-used via a monotonic access stamp. Capacity
/// is small, so the linear eviction scan is not worth a linked structure.
pub struct LruCache {
    capacity: usize,
    state: Mutex<LruState>,
}

#[derive(Default)]
struct LruState {
    entries: HashMap<String, LruEntry>,
    clock: u64,
}

impl LruCache {
    /// LRU cache holding at most `capacity` entries (minimum one)
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity: capacity.max(1),
            state: Mutex::new(LruState::default()),
        }
    }
}

impl Default for LruCache {
    fn default() -> Self {
        Self::new(DEFAULT_LRU_CAPACITY)
    }
}

impl Cache for LruCache {
    fn get_or_create(
        &self,
        id: &str,
        create: &mut dyn FnMut() -> Result<Vec<u8>>,
    ) -> Result<Vec<u8>> {
        let mut state = self.state.lock().map_err(poisoned)?;
        state.clock += 1;
        let clock = state.clock;

        if let Some(entry) = state.entries.get_mut(id) {
            entry.stamp = clock;
            return Ok(entry.bytes.clone());
        }

        let bytes = create()?;
        if state.entries.len() >= self.capacity {
            let oldest = state
                .entries
                .iter()
                .min_by_key(|(_, entry)| entry.stamp)
                .map(|(key, _)| key.clone());
            if let Some(key) = oldest {
                state.entries.remove(&key);
            }
        }
        state.entries.insert(
            id.to_owned(),
            LruEntry {
                bytes: bytes.clone(),
                stamp: clock,
            },
        );
        Ok(bytes)
    }
}

/// On-disk cache storing one file per identifier
///
/// Identifiers are arbitrary strings, so filenames are a 64-bit hash of the
/// id rather than the id itself. Writes go through a temporary file and a
/// rename so a crash never leaves a truncated entry.
pub struct FolderCache {
    location: PathBuf,
}

impl FolderCache {
    /// Folder cache rooted at `location`, creating the directory if needed
    ///
    /// # Errors
    ///
    /// Returns `CacheIo` if the directory cannot be created.
    pub fn new(location: &Path) -> Result<Self> {
        std::fs::create_dir_all(location).map_err(|source| AvatarError::CacheIo {
            path: location.to_path_buf(),
            operation: "create cache directory",
            source,
        })?;
        Ok(Self {
            location: location.to_path_buf(),
        })
    }

    fn entry_path(&self, id: &str) -> PathBuf {
        self.location.join(format!("{:016x}.png", xxh3_64(id.as_bytes())))
    }
}

impl Cache for FolderCache {
    fn get_or_create(
        &self,
        id: &str,
        create: &mut dyn FnMut() -> Result<Vec<u8>>,
    ) -> Result<Vec<u8>> {
        let path = self.entry_path(id);
        match std::fs::read(&path) {
            Ok(bytes) => return Ok(bytes),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {}
            Err(source) => {
                return Err(AvatarError::CacheIo {
                    path,
                    operation: "read cache entry",
                    source,
                });
            }
        }

        let bytes = create()?;
        let tmp = path.with_extension("tmp");
        std::fs::write(&tmp, &bytes).map_err(|source| AvatarError::CacheIo {
            path: tmp.clone(),
            operation: "write cache entry",
            source,
        })?;
        std::fs::rename(&tmp, &path).map_err(|source| AvatarError::CacheIo {
            path,
            operation: "publish cache entry",
            source,
        })?;
        Ok(bytes)
    }
}

/// Chain of cache tiers consulted in order
///
/// A hit at tier k returns immediately; earlier tiers are not backfilled.
/// On a full miss the producer runs once and each tier stores the bytes as
/// the recursion unwinds.
pub struct ComposeCache {
    tiers: Vec<Box<dyn Cache>>,
}

impl ComposeCache {
    /// Compose the given tiers, first consulted first
    pub fn new(tiers: Vec<Box<dyn Cache>>) -> Self {
        Self { tiers }
    }
}

fn walk(
    tiers: &[Box<dyn Cache>],
    id: &str,
    create: &mut dyn FnMut() -> Result<Vec<u8>>,
) -> Result<Vec<u8>> {
    match tiers.split_first() {
        None => create(),
        Some((first, rest)) => first.get_or_create(id, &mut || walk(rest, id, create)),
    }
}

impl Cache for ComposeCache {
    fn get_or_create(
        &self,
        id: &str,
        create: &mut dyn FnMut() -> Result<Vec<u8>>,
    ) -> Result<Vec<u8>> {
        walk(&self.tiers, id, create)
    }
}

fn poisoned<T>(_: std::sync::PoisonError<T>) -> AvatarError {
    AvatarError::Surface {
        operation: "lock cache",
        reason: "cache mutex poisoned by a panicking thread".to_owned(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_cache_invokes_producer_once() {
        let cache = MemoryCache::new();
        let mut calls = 0;
        let mut create = || {
            calls += 1;
            Ok(vec![1, 2, 3])
        };
        assert_eq!(cache.get_or_create("a", &mut create).unwrap(), vec![1, 2, 3]);
        assert_eq!(cache.get_or_create("a", &mut create).unwrap(), vec![1, 2, 3]);
        assert_eq!(calls, 1);
    }

    #[test]
    fn memory_cache_does_not_store_failures() {
        let cache = MemoryCache::new();
        let mut failing = || {
            Err(AvatarError::Surface {
                operation: "test",
                reason: "boom".to_owned(),
            })
        };
        assert!(cache.get_or_create("a", &mut failing).is_err());
        let mut create = || Ok(vec![9]);
        assert_eq!(cache.get_or_create("a", &mut create).unwrap(), vec![9]);
    }

    #[test]
    fn lru_evicts_least_recently_used() {
        let cache = LruCache::new(2);
        let mut calls = 0;
        let mut create = || {
            calls += 1;
            Ok(vec![calls])
        };
        cache.get_or_create("a", &mut create).unwrap(); // a=1
        cache.get_or_create("b", &mut create).unwrap(); // b=2
        cache.get_or_create("a", &mut create).unwrap(); // touch a
        cache.get_or_create("c", &mut create).unwrap(); // evicts b
        assert_eq!(cache.get_or_create("a", &mut create).unwrap(), vec![1]);
        assert_eq!(cache.get_or_create("b", &mut create).unwrap(), vec![4]);
    }

    #[test]
    fn folder_cache_round_trips_through_disk() {
        let dir = tempfile::tempdir().unwrap();
        let cache = FolderCache::new(dir.path()).unwrap();
        let calls = std::cell::Cell::new(0);
        let mut create = || {
            calls.set(calls.get() + 1);
            Ok(b"png bytes".to_vec())
        };
        assert_eq!(cache.get_or_create("id", &mut create).unwrap(), b"png bytes");
        assert_eq!(cache.get_or_create("id", &mut create).unwrap(), b"png bytes");
        assert_eq!(calls.get(), 1);

        // A second instance over the same directory sees the entry
        let reopened = FolderCache::new(dir.path()).unwrap();
        assert_eq!(reopened.get_or_create("id", &mut create).unwrap(), b"png bytes");
        assert_eq!(calls.get(), 1);
    }

    #[test]
    fn folder_cache_distinguishes_ids() {
        let dir = tempfile::tempdir().unwrap();
        let cache = FolderCache::new(dir.path()).unwrap();
        let mut one = || Ok(vec![1]);
        let mut two = || Ok(vec![2]);
        assert_eq!(cache.get_or_create("alice", &mut one).unwrap(), vec![1]);
        assert_eq!(cache.get_or_create("bob", &mut two).unwrap(), vec![2]);
        assert_eq!(cache.get_or_create("alice", &mut two).unwrap(), vec![1]);
    }

    #[test]
    fn compose_serves_from_the_first_tier_that_hits() {
        let first = MemoryCache::new();
        let mut seed = || Ok(vec![7]);
        first.get_or_create("id", &mut seed).unwrap();

        let compose = ComposeCache::new(vec![
            Box::new(first),
            Box::new(MemoryCache::new()),
        ]);
        let mut never = || -> Result<Vec<u8>> { panic!("producer must not run on a hit") };
        assert_eq!(compose.get_or_create("id", &mut never).unwrap(), vec![7]);
    }

    #[test]
    fn compose_miss_fills_every_tier() {
        let dir = tempfile::tempdir().unwrap();
        let compose = ComposeCache::new(vec![
            Box::new(MemoryCache::new()),
            Box::new(FolderCache::new(dir.path()).unwrap()),
        ]);
        let mut calls = 0;
        let mut create = || {
            calls += 1;
            Ok(vec![5])
        };
        assert_eq!(compose.get_or_create("id", &mut create).unwrap(), vec![5]);
        assert_eq!(calls, 1);

        // Both tiers now hold the entry independently
        let folder = FolderCache::new(dir.path()).unwrap();
        let mut never = || -> Result<Vec<u8>> { panic!("entry should already be on disk") };
        assert_eq!(folder.get_or_create("id", &mut never).unwrap(), vec![5]);
    }

    #[test]
    fn empty_compose_is_pass_through() {
        let compose = ComposeCache::new(Vec::new());
        let mut calls = 0;
        let mut create = || {
            calls += 1;
            Ok(vec![3])
        };
        assert_eq!(compose.get_or_create("id", &mut create).unwrap(), vec![3]);
        assert_eq!(compose.get_or_create("id", &mut create).unwrap(), vec![3]);
        assert_eq!(calls, 2);
    }
}

//! Cache tiers wired into the full synthesis pipeline

use avagen::avatar::{AvatarBuilder, Options};
use avagen::builder::Identicon;
use avagen::cache::{Cache, ComposeCache, FolderCache, LruCache, MemoryCache};
use std::sync::{Arc, Mutex};

/// Wraps a cache and records every id that reaches it
struct Spy {
    inner: Box<dyn Cache>,
    seen: Arc<Mutex<Vec<String>>>,
}

impl Spy {
    fn new(inner: Box<dyn Cache>) -> (Self, Arc<Mutex<Vec<String>>>) {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let spy = Self {
            inner,
            seen: Arc::clone(&seen),
        };
        (spy, seen)
    }
}

impl Cache for Spy {
    fn get_or_create(
        &self,
        id: &str,
        create: &mut dyn FnMut() -> avagen::Result<Vec<u8>>,
    ) -> avagen::Result<Vec<u8>> {
        if let Ok(mut seen) = self.seen.lock() {
            seen.push(id.to_owned());
        }
        self.inner.get_or_create(id, create)
    }
}

#[test]
fn folder_cache_survives_builder_restarts() {
    let dir = tempfile::tempdir().unwrap();

    let first = AvatarBuilder::with_options(
        Box::new(Identicon::default()),
        64,
        64,
        Options::with_cache(Box::new(FolderCache::new(dir.path()).unwrap())),
    );
    let bytes = first.create("alice").unwrap();
    drop(first);

    // A fresh builder over the same directory serves the stored entry
    let second = AvatarBuilder::with_options(
        Box::new(Identicon::default()),
        64,
        64,
        Options::with_cache(Box::new(FolderCache::new(dir.path()).unwrap())),
    );
    assert_eq!(second.create("alice").unwrap(), bytes);

    // Exactly one file on disk for the one id
    let entries = std::fs::read_dir(dir.path()).unwrap().count();
    assert_eq!(entries, 1);
}

#[test]
fn compose_hit_in_first_tier_skips_later_tiers() {
    let front = MemoryCache::new();
    let mut seed = || -> avagen::Result<Vec<u8>> { Ok(vec![42]) };
    front.get_or_create("warm", &mut seed).unwrap();

    let (spy, seen) = Spy::new(Box::new(MemoryCache::new()));
    let compose = ComposeCache::new(vec![Box::new(front), Box::new(spy)]);
    let mut never = || -> avagen::Result<Vec<u8>> { panic!("warm id must hit the front tier") };
    assert_eq!(compose.get_or_create("warm", &mut never).unwrap(), vec![42]);
    assert!(seen.lock().unwrap().is_empty());
}

#[test]
fn compose_miss_reaches_the_last_tier_once() {
    let (spy, seen) = Spy::new(Box::new(MemoryCache::new()));
    let compose = ComposeCache::new(vec![Box::new(LruCache::new(4)), Box::new(spy)]);

    let builder = AvatarBuilder::with_options(
        Box::new(Identicon::default()),
        32,
        32,
        Options::with_cache(Box::new(compose)),
    );
    let first = builder.create("alice").unwrap();
    let second = builder.create("alice").unwrap();
    assert_eq!(first, second);

    // Second call hit the LRU front, so the back tier saw the id only once
    assert_eq!(seen.lock().unwrap().as_slice(), ["alice"]);
}

#[test]
fn lru_eviction_does_not_change_output() {
    let builder = AvatarBuilder::with_options(
        Box::new(Identicon::default()),
        32,
        32,
        Options::with_cache(Box::new(LruCache::new(1))),
    );
    let alice = builder.create("alice").unwrap();
    builder.create("bob").unwrap(); // evicts alice
    assert_eq!(builder.create("alice").unwrap(), alice);
}

#[test]
fn default_options_cache_is_transparent() {
    let cached = AvatarBuilder::new(Box::new(Identicon::default()), 32, 32);
    let uncached = AvatarBuilder::with_options(
        Box::new(Identicon::default()),
        32,
        32,
        Options::uncached(),
    );
    assert_eq!(cached.create("dave").unwrap(), uncached.create("dave").unwrap());
}

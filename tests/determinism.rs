//! End-to-end determinism: one identifier, one byte sequence

use avagen::avatar::{
    AvatarBuilder, Options, github_builder, identicon_builder, square_builder, triangle_builder,
};
use avagen::builder::Identicon;
use avagen::cache::{ComposeCache, FolderCache, LruCache, MemoryCache};

#[test]
fn identicon_same_id_is_byte_identical() {
    let builder = identicon_builder();
    let first = builder.create("alice").unwrap();
    let second = builder.create("alice").unwrap();
    assert_eq!(first, second);
}

#[test]
fn distinct_ids_produce_distinct_avatars() {
    let builder = identicon_builder();
    let alice = builder.create("alice").unwrap();
    let bob = builder.create("bob").unwrap();
    assert_ne!(alice, bob);
}

#[test]
fn repeated_calls_interleaved_with_other_ids_stay_stable() {
    let builder = identicon_builder();
    let baseline = builder.create("alice").unwrap();
    for filler in ["bob", "carol", "dave"] {
        builder.create(filler).unwrap();
        assert_eq!(builder.create("alice").unwrap(), baseline);
    }
}

#[test]
fn every_procedural_style_is_deterministic() {
    let builders = [
        identicon_builder(),
        square_builder(3).unwrap(),
        triangle_builder(3).unwrap(),
        github_builder(5).unwrap(),
    ];
    for builder in builders {
        assert_eq!(builder.create("carol").unwrap(), builder.create("carol").unwrap());
    }
}

#[test]
fn caches_are_transparent() {
    let uncached = AvatarBuilder::with_options(
        Box::new(Identicon::default()),
        64,
        64,
        Options::uncached(),
    );
    let expected = uncached.create("alice").unwrap();

    let dir = tempfile::tempdir().unwrap();
    let tiers: Vec<(&str, Box<dyn avagen::Cache>)> = vec![
        ("memory", Box::new(MemoryCache::new())),
        ("lru", Box::new(LruCache::new(2))),
        ("folder", Box::new(FolderCache::new(dir.path()).unwrap())),
        (
            "compose",
            Box::new(ComposeCache::new(vec![
                Box::new(LruCache::new(2)),
                Box::new(MemoryCache::new()),
            ])),
        ),
    ];
    for (name, cache) in tiers {
        let cached = AvatarBuilder::with_options(
            Box::new(Identicon::default()),
            64,
            64,
            Options::with_cache(cache),
        );
        // First call fills the cache, second is served from it
        assert_eq!(cached.create("alice").unwrap(), expected, "{name} first call");
        assert_eq!(cached.create("alice").unwrap(), expected, "{name} second call");
    }
}

#[test]
fn output_parses_as_png_with_requested_dimensions() {
    let builder = identicon_builder();
    let bytes = builder.create("alice").unwrap();
    let decoded = image::load_from_memory(&bytes).unwrap();
    assert_eq!((decoded.width(), decoded.height()), (256, 256));
}

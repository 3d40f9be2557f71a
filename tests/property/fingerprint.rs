//! Fingerprint determinism and sensitivity

use proptest::prelude::*;
use snapdiff::tree::hasher;
use snapdiff::types::Fingerprint;
use std::fs;
use tempfile::TempDir;

proptest! {
    #[test]
    fn prop_streaming_matches_in_memory(content in prop::collection::vec(any::<u8>(), 0..200_000)) {
        let temp_dir = TempDir::new().unwrap();
        let file = temp_dir.path().join("f");
        fs::write(&file, &content).unwrap();

        let streamed = hasher::fingerprint(&file).unwrap();
        prop_assert_eq!(streamed, Fingerprint::of_bytes(&content));
        prop_assert_eq!(streamed, hasher::fingerprint(&file).unwrap());
    }

    #[test]
    fn prop_single_byte_flip_changes_fingerprint(
        content in prop::collection::vec(any::<u8>(), 1..4096),
        index in any::<prop::sample::Index>(),
        flip in 1u8..=255,
    ) {
        let mut changed = content.clone();
        let i = index.index(changed.len());
        changed[i] ^= flip;

        prop_assert_ne!(Fingerprint::of_bytes(&content), Fingerprint::of_bytes(&changed));
    }

    #[test]
    fn prop_hex_round_trip(content in prop::collection::vec(any::<u8>(), 0..64)) {
        let fp = Fingerprint::of_bytes(&content);
        let hex = fp.to_hex();
        prop_assert_eq!(hex.len(), 32);
        prop_assert_eq!(Fingerprint::from_hex(&hex).unwrap(), fp);
    }
}

//! Property-Based Tests for Cache Module
//!
//! Uses proptest to check the digest and round-trip laws of the cache service.

use proptest::prelude::*;
use std::collections::HashSet;
use std::sync::Arc;

use crate::cache::{CacheEntry, CacheService};
use crate::digest::{digest, is_digest};
use crate::error::CacheError;
use crate::store::MemoryStore;

// == Strategies ==
/// Arbitrary messages, including empty and non-ASCII text
fn message_strategy() -> impl Strategy<Value = String> {
    any::<String>()
}

/// Digest-shaped keys that were never written
fn digest_strategy() -> impl Strategy<Value = String> {
    "[0-9a-f]{64}".prop_map(|s| s)
}

fn healthy_service() -> CacheService {
    CacheService::new(Arc::new(MemoryStore::new()))
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    // Storing a message and fetching its digest returns the message.
    #[test]
    fn prop_roundtrip(message in message_strategy()) {
        let service = healthy_service();

        let fetched = tokio_test::block_on(async {
            let digest = service.put(message.clone()).await.unwrap();
            service.get(&digest).await.unwrap()
        });

        prop_assert_eq!(fetched, message);
    }

    // Digest is deterministic and always 64 lowercase hex characters.
    #[test]
    fn prop_digest_deterministic(message in message_strategy()) {
        let first = digest(&message);
        prop_assert_eq!(&first, &digest(&message));
        prop_assert!(is_digest(&first));
    }

    // A retrieved message hashes back to the digest it was fetched by.
    #[test]
    fn prop_content_addressing(message in message_strategy()) {
        let service = healthy_service();

        let (digest, fetched) = tokio_test::block_on(async {
            let digest = service.put(message).await.unwrap();
            let fetched = service.get(&digest).await.unwrap();
            (digest, fetched)
        });

        prop_assert!(CacheEntry::new(digest, fetched).is_consistent());
    }

    // Distinct messages never share a digest.
    #[test]
    fn prop_distinct_messages_distinct_digests(
        messages in prop::collection::hash_set(message_strategy(), 1..200)
    ) {
        let digests: HashSet<String> = messages.iter().map(digest).collect();
        prop_assert_eq!(digests.len(), messages.len());
    }

    // Fetching a digest that was never written is NotFound, not a backend error.
    #[test]
    fn prop_unwritten_digest_not_found(
        stored in message_strategy(),
        unwritten in digest_strategy()
    ) {
        prop_assume!(unwritten != digest(&stored));
        let service = healthy_service();

        let result = tokio_test::block_on(async {
            service.put(stored).await.unwrap();
            service.get(&unwritten).await
        });

        prop_assert_eq!(result, Err(CacheError::NotFound(unwritten)));
    }
}

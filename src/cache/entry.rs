//! Cache Entry Module
//!
//! The (digest, message) pair persisted in the store.

use crate::digest::digest;

// == Cache Entry ==
/// A message together with the digest it is stored under.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheEntry {
    /// Store key, the hex SHA-256 of `message`
    pub digest: String,
    /// The stored message
    pub message: String,
}

impl CacheEntry {
    // == Constructors ==
    /// Creates the entry for a new message, computing its digest.
    pub fn from_message(message: impl Into<String>) -> Self {
        let message = message.into();
        Self {
            digest: digest(&message),
            message,
        }
    }

    /// Pairs a digest with a message read back from the store.
    pub fn new(digest: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            digest: digest.into(),
            message: message.into(),
        }
    }

    // == Content Addressing ==
    /// Returns true if the message hashes back to the digest it is stored under.
    pub fn is_consistent(&self) -> bool {
        digest(&self.message) == self.digest
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_message_computes_digest() {
        let entry = CacheEntry::from_message("hello");

        assert_eq!(entry.message, "hello");
        assert_eq!(
            entry.digest,
            "2cf24dba5fb0a30e26e83b2ac5b9e29e1b161e5c1fa7425e73043362938b9824"
        );
        assert!(entry.is_consistent());
    }

    #[test]
    fn test_equal_messages_make_equal_entries() {
        assert_eq!(
            CacheEntry::from_message("same"),
            CacheEntry::from_message("same".to_string())
        );
    }

    #[test]
    fn test_mismatched_entry_is_inconsistent() {
        let entry = CacheEntry::new(digest("hello"), "goodbye");
        assert!(!entry.is_consistent());
    }
}

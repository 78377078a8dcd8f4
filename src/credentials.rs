//! API key rotation.
//!
//! The rotator advances to the next key each time a catalog request fails and
//! wraps back to the first key after the last one. Clones share the same index,
//! so every handle to one client observes the same "current" key, while two
//! rotators built separately never affect each other.
//!
//! Callers rotate away from the key they actually used. When several requests
//! fail on the same key at once, only the first failure moves the index.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use crate::config::ConfigError;

#[derive(Debug, Clone)]
pub struct CredentialRotator {
    keys: Arc<[String]>,
    index: Arc<AtomicUsize>,
}

impl CredentialRotator {
    pub fn new(keys: Vec<String>) -> Result<Self, ConfigError> {
        if keys.is_empty() {
            return Err(ConfigError::NoApiKeys);
        }
        Ok(Self {
            keys: keys.into(),
            index: Arc::new(AtomicUsize::new(0)),
        })
    }

    pub fn current(&self) -> &str {
        self.key(self.current_index())
    }

    pub fn current_index(&self) -> usize {
        self.index.load(Ordering::SeqCst) % self.keys.len()
    }

    pub fn key(&self, index: usize) -> &str {
        self.keys.get(index % self.keys.len()).map_or("", String::as_str)
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    /// Moves past the key at `observed`, wrapping at the end of the list.
    ///
    /// Returns `false` without changing anything when the index has already
    /// moved on from `observed`.
    pub fn rotate_from(&self, observed: usize) -> bool {
        let len = self.keys.len();
        let observed = observed % len;
        self.index
            .compare_exchange(observed, (observed + 1) % len, Ordering::SeqCst, Ordering::SeqCst)
            .is_ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rotator(keys: &[&str]) -> CredentialRotator {
        CredentialRotator::new(keys.iter().map(|k| String::from(*k)).collect()).unwrap()
    }

    fn fail_current(rotator: &CredentialRotator) -> bool {
        rotator.rotate_from(rotator.current_index())
    }

    #[test]
    fn test_empty_keys_rejected() {
        // Arrange & Act
        let result = CredentialRotator::new(Vec::new());

        // Assert
        assert_eq!(result.unwrap_err(), ConfigError::NoApiKeys);
    }

    #[test]
    fn test_starts_at_first_key() {
        // Arrange & Act
        let rotator = rotator(&["a", "b"]);

        // Assert
        assert_eq!(rotator.current(), "a");
        assert_eq!(rotator.current_index(), 0);
    }

    #[test]
    fn test_rotate_advances_without_skipping() {
        // Arrange
        let rotator = rotator(&["a", "b", "c"]);

        // Act & Assert
        fail_current(&rotator);
        assert_eq!(rotator.current(), "b");
        fail_current(&rotator);
        assert_eq!(rotator.current(), "c");
        fail_current(&rotator);
        assert_eq!(rotator.current(), "a");
    }

    #[test]
    fn test_n_rotations_return_to_start() {
        for n in 1..=7 {
            // Arrange
            let keys: Vec<String> = (0..n).map(|i| format!("key-{i}")).collect();
            let rotator = CredentialRotator::new(keys).unwrap();
            let original = rotator.current().to_string();

            // Act
            for _ in 0..n {
                fail_current(&rotator);
            }

            // Assert
            assert_eq!(rotator.current(), original, "cycle length {n}");
        }
    }

    #[test]
    fn test_single_key_always_current() {
        // Arrange
        let rotator = rotator(&["only"]);

        // Act
        fail_current(&rotator);
        fail_current(&rotator);

        // Assert
        assert_eq!(rotator.current(), "only");
    }

    #[test]
    fn test_clones_share_index() {
        // Arrange
        let rotator = rotator(&["a", "b"]);
        let handle = rotator.clone();

        // Act
        fail_current(&handle);

        // Assert
        assert_eq!(rotator.current(), "b");
    }

    #[test]
    fn test_independent_rotators_do_not_share_index() {
        // Arrange
        let first = rotator(&["a", "b"]);
        let second = rotator(&["a", "b"]);

        // Act
        fail_current(&first);

        // Assert
        assert_eq!(first.current(), "b");
        assert_eq!(second.current(), "a");
    }

    #[test]
    fn test_concurrent_rotation_stays_in_range() {
        // Arrange
        let rotator = rotator(&["a", "b", "c"]);

        // Act
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let r = rotator.clone();
                std::thread::spawn(move || {
                    for _ in 0..100 {
                        fail_current(&r);
                    }
                })
            })
            .collect();
        for h in handles {
            h.join().unwrap();
        }

        // Assert
        assert!(rotator.current_index() < rotator.len());
    }

    #[test]
    fn test_simultaneous_failures_on_one_key_rotate_once() {
        // Arrange
        let rotator = rotator(&["broken", "working"]);
        let first_seen = rotator.current_index();
        let second_seen = rotator.current_index();

        // Act
        let first = rotator.rotate_from(first_seen);
        let second = rotator.rotate_from(second_seen);

        // Assert
        assert!(first);
        assert!(!second);
        assert_eq!(rotator.current(), "working");
    }

    #[test]
    fn test_key_lookup_wraps() {
        // Arrange
        let rotator = rotator(&["a", "b"]);

        // Act & Assert
        assert_eq!(rotator.key(1), "b");
        assert_eq!(rotator.key(2), "a");
    }
}

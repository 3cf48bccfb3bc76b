//! # Composable Todo Testing
//!
//! Testing utilities and helpers for the composable todo architecture.
//!
//! This crate provides:
//! - [`ReducerTest`]: Given-When-Then builder for pure reducer tests
//! - [`RecordingObserver`]: captures every state a store notifies
//! - Assertion helpers for effects
//!
//! ## Example
//!
//! ```ignore
//! use composable_todo_testing::RecordingObserver;
//!
//! #[tokio::test]
//! async fn renders_after_each_send() {
//!     let store = Store::new(AppState::default(), AppReducer::new(), env);
//!     let recorder = RecordingObserver::new();
//!     store.subscribe(recorder.callback());
//!
//!     store.send(action).await?;
//!
//!     assert_eq!(recorder.count(), 1);
//! }
//! ```

use std::sync::{Arc, Mutex, PoisonError};


/// Mock implementations used by store tests
pub mod mocks {
    use super::{Arc, Mutex, PoisonError};

    /// Observer that records a clone of every state it is called with
    ///
    /// Clones share the same recording, so one handle can be moved into a
    /// store subscription while the test keeps another.
    ///
    /// # Example
    ///
    /// ```
    /// use composable_todo_testing::RecordingObserver;
    ///
    /// let recorder = RecordingObserver::<Vec<u8>>::new();
    /// let callback = recorder.callback();
    ///
    /// callback(&vec![1]);
    /// callback(&vec![1, 2]);
    ///
    /// assert_eq!(recorder.snapshots(), vec![vec![1], vec![1, 2]]);
    /// assert_eq!(recorder.last(), Some(vec![1, 2]));
    /// ```
    #[derive(Debug)]
    pub struct RecordingObserver<S> {
        seen: Arc<Mutex<Vec<S>>>,
    }

    impl<S> Clone for RecordingObserver<S> {
        fn clone(&self) -> Self {
            Self {
                seen: Arc::clone(&self.seen),
            }
        }
    }

    impl<S> Default for RecordingObserver<S> {
        fn default() -> Self {
            Self {
                seen: Arc::new(Mutex::new(Vec::new())),
            }
        }
    }

    impl<S: Clone + Send + 'static> RecordingObserver<S> {
        /// Create an empty recorder
        #[must_use]
        pub fn new() -> Self {
            Self::default()
        }

        /// A callback suitable for `Store::subscribe`
        #[must_use]
        pub fn callback(&self) -> impl Fn(&S) + Send + Sync + 'static {
            let seen = Arc::clone(&self.seen);
            move |state: &S| {
                seen.lock()
                    .unwrap_or_else(PoisonError::into_inner)
                    .push(state.clone());
            }
        }

        /// Every recorded state, oldest first
        #[must_use]
        pub fn snapshots(&self) -> Vec<S> {
            self.seen
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .clone()
        }

        /// The most recently recorded state
        #[must_use]
        pub fn last(&self) -> Option<S> {
            self.seen
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .last()
                .cloned()
        }

        /// Number of notifications received
        #[must_use]
        pub fn count(&self) -> usize {
            self.seen
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .len()
        }
    }
}

// Re-export commonly used items
pub use mocks::RecordingObserver;
pub use reducer_test::{assertions, ReducerTest};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clones_share_one_recording() {
        let recorder = RecordingObserver::<u32>::new();
        let handle = recorder.clone();

        let callback = handle.callback();
        callback(&5);

        assert_eq!(recorder.count(), 1);
        assert_eq!(recorder.last(), Some(5));
    }

    #[test]
    fn empty_recorder() {
        let recorder = RecordingObserver::<String>::new();
        assert_eq!(recorder.count(), 0);
        assert!(recorder.last().is_none());
        assert!(recorder.snapshots().is_empty());
    }
}

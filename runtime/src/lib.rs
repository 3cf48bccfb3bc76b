//! # Composable Todo Runtime
//!
//! Runtime implementation for the composable todo architecture.
//!
//! This crate provides the [`Store`], which owns application state,
//! runs the reducer for every dispatched action, drains the feedback
//! actions described by effects, and notifies observers once the state
//! has settled.
//!
//! ## Core Components
//!
//! - **Store**: Owns state and serializes every transition behind one lock
//! - **Observers**: Callbacks fired once per `send`, after all transitions
//! - **Action broadcast**: Async stream of every action the reducer processed
//!
//! ## Example
//!
//! ```ignore
//! use composable_todo_runtime::Store;
//!
//! let store = Store::new(initial_state, my_reducer, environment);
//!
//! let _subscription = store.subscribe(|state| redraw(state));
//!
//! // Send an action
//! store.send(Action::DoSomething).await?;
//!
//! // Read state
//! let value = store.state(|s| s.some_field.clone()).await;
//! ```

use std::time::Duration;

/// The Store runtime
pub mod store;

pub use error::StoreError;
pub use store::{Store, SubscriptionId};

/// Error types for the Store runtime
pub mod error {
    use thiserror::Error;

    /// Errors that can occur during Store operations
    ///
    /// Reducers themselves are total; these errors only describe the
    /// runtime refusing to keep draining effects.
    #[derive(Error, Debug, Clone, PartialEq, Eq)]
    pub enum StoreError {
        /// A single `send` produced more feedback actions than allowed
        ///
        /// Transitions applied before the limit was hit remain applied, and
        /// observers are still notified with the resulting state.
        #[error("Effect feedback exceeded {limit} actions in a single send")]
        FeedbackLimitExceeded {
            /// The configured maximum number of feedback actions
            limit: usize,
        },
    }
}

/// Configuration for Store instances
///
/// # Example
///
/// ```
/// use composable_todo_runtime::StoreConfig;
///
/// let config = StoreConfig::default()
///     .with_broadcast_capacity(64)
///     .with_max_feedback_actions(8);
///
/// assert_eq!(config.broadcast_capacity, 64);
/// assert_eq!(config.max_feedback_actions, 8);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    /// Buffer size of the action broadcast channel
    ///
    /// Slow receivers lag (and skip) once this many actions are unread.
    pub broadcast_capacity: usize,
    /// Maximum number of feedback actions a single `send` may produce
    pub max_feedback_actions: usize,
    /// Reducer runs slower than this are logged at `warn`
    pub slow_reducer_threshold: Duration,
}

impl StoreConfig {
    /// Set the action broadcast capacity
    ///
    /// A capacity of zero is raised to one when the store is built.
    #[must_use]
    pub const fn with_broadcast_capacity(mut self, capacity: usize) -> Self {
        self.broadcast_capacity = capacity;
        self
    }

    /// Set the maximum number of feedback actions per `send`
    #[must_use]
    pub const fn with_max_feedback_actions(mut self, limit: usize) -> Self {
        self.max_feedback_actions = limit;
        self
    }

    /// Set the slow reducer warning threshold
    #[must_use]
    pub const fn with_slow_reducer_threshold(mut self, threshold: Duration) -> Self {
        self.slow_reducer_threshold = threshold;
        self
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            broadcast_capacity: 16,
            max_feedback_actions: 64,
            slow_reducer_threshold: Duration::from_millis(10),
        }
    }
}

//! The Store - runtime coordinator for a reducer.

use crate::{StoreConfig, StoreError};
use composable_todo_core::reducer::Reducer;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex, PoisonError};
use tokio::sync::{broadcast, RwLock};

/// Callback invoked with the settled state after every `send`.
type Observer<S> = Arc<dyn Fn(&S) + Send + Sync>;

/// Handle returned by [`Store::subscribe`], used to unsubscribe later.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

impl std::fmt::Display for SubscriptionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "subscription-{}", self.0)
    }
}

struct Observers<S> {
    next_id: u64,
    entries: Vec<(SubscriptionId, Observer<S>)>,
}

impl<S> Default for Observers<S> {
    fn default() -> Self {
        Self {
            next_id: 0,
            entries: Vec::new(),
        }
    }
}

/// The Store - runtime coordinator for a reducer
///
/// The Store manages:
/// 1. State (behind a `RwLock`; every transition takes the write lock)
/// 2. Reducer (business logic)
/// 3. Environment (injected dependencies)
/// 4. Effect draining (feedback actions are reduced inside the same `send`)
/// 5. Observers (notified once per `send` with the settled state)
///
/// Cloning a Store yields another handle to the same state.
///
/// # Type Parameters
///
/// - `S`: State type
/// - `A`: Action type
/// - `E`: Environment type
/// - `R`: Reducer implementation
pub struct Store<S, A, E, R>
where
    R: Reducer<State = S, Action = A, Environment = E>,
{
    state: Arc<RwLock<S>>,
    reducer: Arc<R>,
    environment: Arc<E>,
    config: StoreConfig,
    observers: Arc<Mutex<Observers<S>>>,
    /// Every action the reducer processes, including feedback actions.
    action_broadcast: broadcast::Sender<A>,
}

impl<S, A, E, R> Store<S, A, E, R>
where
    R: Reducer<State = S, Action = A, Environment = E> + Send + Sync + 'static,
    A: Clone + Send + std::fmt::Debug + 'static,
    S: Send + Sync + 'static,
    E: Send + Sync + 'static,
{
    /// Create a new store with initial state, reducer, and environment
    ///
    /// Uses [`StoreConfig::default`].
    #[must_use]
    pub fn new(initial_state: S, reducer: R, environment: E) -> Self {
        Self::with_config(initial_state, reducer, environment, StoreConfig::default())
    }

    /// Create a new Store with custom configuration
    #[must_use]
    pub fn with_config(initial_state: S, reducer: R, environment: E, config: StoreConfig) -> Self {
        let (action_broadcast, _) = broadcast::channel(config.broadcast_capacity.max(1));

        Self {
            state: Arc::new(RwLock::new(initial_state)),
            reducer: Arc::new(reducer),
            environment: Arc::new(environment),
            config,
            observers: Arc::new(Mutex::new(Observers::default())),
            action_broadcast,
        }
    }

    /// The configuration this store was built with
    #[must_use]
    pub const fn config(&self) -> &StoreConfig {
        &self.config
    }

    /// Send an action to the store
    ///
    /// The action is reduced under the state write lock. Feedback actions
    /// described by the returned effects are reduced next, in order, before
    /// the lock is released, so no other `send` can interleave. Observers are
    /// then called once with the settled state.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::FeedbackLimitExceeded`] if the effects of this
    /// `send` produce more than `max_feedback_actions` follow-up actions.
    /// Remaining feedback is dropped; applied transitions are kept.
    #[tracing::instrument(skip(self, action), name = "store_send")]
    pub async fn send(&self, action: A) -> Result<(), StoreError> {
        let mut state = self.state.write().await;
        tracing::trace!("Acquired write lock on state");

        let mut queue = VecDeque::from([action]);
        let mut feedback_count = 0usize;
        let mut outcome = Ok(());

        while let Some(action) = queue.pop_front() {
            metrics::counter!("store.actions.total").increment(1);
            tracing::debug!(?action, "Reducing action");

            let observed = action.clone();
            let start = std::time::Instant::now();
            let effects = self.reducer.reduce(&mut *state, action, &self.environment);
            let duration = start.elapsed();
            metrics::histogram!("store.reducer.duration_seconds").record(duration.as_secs_f64());
            if duration > self.config.slow_reducer_threshold {
                tracing::warn!(?duration, "Slow reducer execution");
            }

            // No receivers is fine; the broadcast is best-effort.
            let _ = self.action_broadcast.send(observed);

            let mut produced = Vec::new();
            for effect in effects {
                effect.into_actions(&mut produced);
            }
            if produced.is_empty() {
                continue;
            }

            feedback_count += produced.len();
            if feedback_count > self.config.max_feedback_actions {
                let limit = self.config.max_feedback_actions;
                tracing::warn!(limit, dropped = queue.len() + produced.len(), "Feedback limit exceeded");
                metrics::counter!("store.feedback.limit_exceeded").increment(1);
                outcome = Err(StoreError::FeedbackLimitExceeded { limit });
                break;
            }

            tracing::trace!("Queued {} feedback actions", produced.len());
            metrics::counter!("store.feedback.total").increment(produced.len() as u64);
            queue.extend(produced);
        }

        let state = state.downgrade();
        self.notify(&*state);

        outcome
    }

    /// Read current state via a closure
    ///
    /// ```ignore
    /// let count = store.state(|s| s.items.len()).await;
    /// ```
    pub async fn state<F, T>(&self, f: F) -> T
    where
        F: FnOnce(&S) -> T,
    {
        let state = self.state.read().await;
        f(&*state)
    }

    /// Register an observer called with the settled state after every `send`
    ///
    /// Observers run synchronously, in registration order, while a read lock
    /// on the state is held. They must not block.
    pub fn subscribe<F>(&self, observer: F) -> SubscriptionId
    where
        F: Fn(&S) + Send + Sync + 'static,
    {
        let mut observers = self.observers.lock().unwrap_or_else(PoisonError::into_inner);
        let id = SubscriptionId(observers.next_id);
        observers.next_id += 1;
        observers.entries.push((id, Arc::new(observer)));
        tracing::debug!(%id, "Observer subscribed");
        id
    }

    /// Remove an observer
    ///
    /// Returns `false` if the subscription was unknown (already removed).
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut observers = self.observers.lock().unwrap_or_else(PoisonError::into_inner);
        let before = observers.entries.len();
        observers.entries.retain(|(entry, _)| *entry != id);
        let removed = observers.entries.len() != before;
        if removed {
            tracing::debug!(%id, "Observer unsubscribed");
        }
        removed
    }

    /// Number of registered observers
    #[must_use]
    pub fn observer_count(&self) -> usize {
        self.observers
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .entries
            .len()
    }

    /// Subscribe to every action the reducer processes
    ///
    /// The initial action of each `send` and all of its feedback actions are
    /// delivered in the order they were reduced. Receivers that fall more
    /// than `broadcast_capacity` actions behind observe a lag error.
    #[must_use]
    pub fn subscribe_actions(&self) -> broadcast::Receiver<A> {
        self.action_broadcast.subscribe()
    }

    fn notify(&self, state: &S) {
        // Snapshot the list so observers may (un)subscribe without deadlocking.
        let observers: Vec<Observer<S>> = self
            .observers
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .entries
            .iter()
            .map(|(_, observer)| Arc::clone(observer))
            .collect();

        for observer in &observers {
            observer(state);
        }
        metrics::counter!("store.observers.notified").increment(observers.len() as u64);
    }
}

impl<S, A, E, R> Clone for Store<S, A, E, R>
where
    R: Reducer<State = S, Action = A, Environment = E>,
{
    fn clone(&self) -> Self {
        Self {
            state: Arc::clone(&self.state),
            reducer: Arc::clone(&self.reducer),
            environment: Arc::clone(&self.environment),
            config: self.config.clone(),
            observers: Arc::clone(&self.observers),
            action_broadcast: self.action_broadcast.clone(),
        }
    }
}

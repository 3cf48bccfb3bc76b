//! The application context: one store, explicitly constructed and shared.

use crate::config::TodoConfig;
use crate::reducer::{app_reducer, AppReducer, TodoEnvironment};
use crate::types::{AppAction, AppState, TodoAction, TodoList, TodoState};
use composable_todo_runtime::{Store, StoreError, SubscriptionId};

/// The concrete store type for the todo application
pub type TodoStore = Store<AppState, AppAction, TodoEnvironment, AppReducer>;

/// Handle to the todo application
///
/// Owns the store; clones share it. This is the only place state lives.
#[derive(Clone)]
pub struct TodoApp {
    store: TodoStore,
}

impl TodoApp {
    /// Build an application with an empty list
    #[must_use]
    pub fn new(config: &TodoConfig) -> Self {
        Self::with_state(config, TodoState::new())
    }

    /// Build an application starting from `todos`
    #[must_use]
    pub fn with_state(config: &TodoConfig, todos: TodoState) -> Self {
        let store = Store::with_config(
            AppState { todos },
            app_reducer(),
            TodoEnvironment::new(config.id_strategy),
            config.store_config(),
        );
        tracing::debug!(id_strategy = %config.id_strategy, "Todo store ready");
        Self { store }
    }

    /// Dispatch an intent and wait for it (and its follow-ups) to apply
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] only if effect feedback runs away; list
    /// transitions themselves never fail.
    pub async fn dispatch(&self, action: TodoAction) -> Result<(), StoreError> {
        self.store.send(AppAction::Todo(action)).await
    }

    /// Snapshot of the current list
    ///
    /// The snapshot is unaffected by later dispatches.
    pub async fn read(&self) -> TodoList {
        self.store.state(|s| s.todos.items.clone()).await
    }

    /// Call `observer` with the list after every dispatch
    pub fn on_change<F>(&self, observer: F) -> SubscriptionId
    where
        F: Fn(&TodoList) + Send + Sync + 'static,
    {
        self.store.subscribe(move |state: &AppState| observer(&state.todos.items))
    }

    /// Stop calling an observer registered with [`TodoApp::on_change`]
    pub fn remove_observer(&self, id: SubscriptionId) -> bool {
        self.store.unsubscribe(id)
    }

    /// The underlying store
    #[must_use]
    pub const fn store(&self) -> &TodoStore {
        &self.store
    }
}

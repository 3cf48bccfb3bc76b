//! Reducer logic for the todo list.
//!
//! `Add` and `Delete` are the two list transitions. `Create` only picks an
//! id and feeds an `Add` back through the store, so the list changes in
//! exactly one place.

use crate::config::ConfigError;
use crate::types::{AppAction, AppState, TodoAction, TodoId, TodoItem, TodoState};
use composable_todo_core::{
    composition::{scope, Scoped},
    effect::Effect,
    reducer::Reducer,
    smallvec, SmallVec,
};

/// How `Create` picks the id of a new todo
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum IdStrategy {
    /// Monotonic counter kept in state; ids are never reused
    #[default]
    Sequential,
    /// One more than the largest id in the list, or 0 when empty
    ///
    /// Reuses ids once the newest items are deleted.
    MaxPlusOne,
}

impl IdStrategy {
    /// The id a `Create` would use against `state`
    ///
    /// `None` when no unused id is left past the current high-water mark.
    #[must_use]
    pub fn next_id(self, state: &TodoState) -> Option<TodoId> {
        match self {
            Self::Sequential => state.next_id,
            Self::MaxPlusOne => state
                .items
                .max_id()
                .map_or(Some(TodoId::default()), TodoId::successor),
        }
    }
}

impl std::fmt::Display for IdStrategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Sequential => write!(f, "sequential"),
            Self::MaxPlusOne => write!(f, "max-plus-one"),
        }
    }
}

impl std::str::FromStr for IdStrategy {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "sequential" | "counter" => Ok(Self::Sequential),
            "max-plus-one" | "max_plus_one" | "max+1" => Ok(Self::MaxPlusOne),
            other => Err(ConfigError::InvalidIdStrategy(other.to_string())),
        }
    }
}

/// Environment dependencies for the todo reducer
#[derive(Clone, Debug, Default)]
pub struct TodoEnvironment {
    /// Id allocation used by `Create`
    pub id_strategy: IdStrategy,
}

impl TodoEnvironment {
    /// Creates a new `TodoEnvironment`
    #[must_use]
    pub const fn new(id_strategy: IdStrategy) -> Self {
        Self { id_strategy }
    }
}

/// Reducer for the todo list
#[derive(Clone, Debug, Default)]
pub struct TodoReducer;

impl TodoReducer {
    /// Creates a new `TodoReducer`
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Reducer for TodoReducer {
    type State = TodoState;
    type Action = TodoAction;
    type Environment = TodoEnvironment;

    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        env: &Self::Environment,
    ) -> SmallVec<[Effect<Self::Action>; 4]> {
        match action {
            TodoAction::Add { item } => {
                state.next_id = state
                    .next_id
                    .zip(item.id.successor())
                    .map(|(next, after)| next.max(after));
                state.items = state.items.add(item);
                SmallVec::new()
            },

            TodoAction::Delete { id } => {
                state.items = state.items.delete(id);
                SmallVec::new()
            },

            TodoAction::Create { content } => {
                let Some(id) = env.id_strategy.next_id(state) else {
                    tracing::warn!(strategy = %env.id_strategy, "No todo ids left, dropping Create");
                    return SmallVec::new();
                };
                smallvec![Effect::Send(TodoAction::Add {
                    item: TodoItem::new(id, content),
                })]
            },
        }
    }
}

/// Root reducer: the todo reducer mounted on [`AppState::todos`]
pub type AppReducer = Scoped<AppState, TodoState, AppAction, TodoAction, TodoEnvironment, TodoReducer>;

/// Builds the root reducer
#[must_use]
pub fn app_reducer() -> AppReducer {
    scope(
        TodoReducer::new(),
        |app: &mut AppState| &mut app.todos,
        AppAction::into_todo,
        AppAction::Todo,
    )
}

//! Single-list todo application built on the composable todo store.
//!
//! The list lives in one [`Store`](composable_todo_runtime::Store) owned by
//! a [`TodoApp`]. The view dispatches intents, the reducer replaces the list,
//! and an observer re-renders after every dispatch.
//!
//! - `Add { item }` appends the item as given (no id checks)
//! - `Delete { id }` drops every item with that id (missing id is a no-op)
//! - `Create { content }` lets the store pick the id, then adds
//!
//! # Quick Start
//!
//! ```no_run
//! use todo::{render, TodoAction, TodoApp, TodoConfig, TodoId};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let app = TodoApp::new(&TodoConfig::default());
//! app.on_change(|items| print!("{}", render(items)));
//!
//! app.dispatch(TodoAction::Create { content: "buy milk".to_string() }).await?;
//! app.dispatch(TodoAction::Create { content: "walk dog".to_string() }).await?;
//! app.dispatch(TodoAction::Delete { id: TodoId::new(0) }).await?;
//!
//! let items = app.read().await;
//! assert_eq!(items.len(), 1);
//! # Ok(())
//! # }
//! ```

pub mod app;
pub mod config;
pub mod reducer;
pub mod types;
pub mod view;

// Re-export commonly used types
pub use app::{TodoApp, TodoStore};
pub use config::{ConfigError, TodoConfig};
pub use reducer::{app_reducer, AppReducer, IdStrategy, TodoEnvironment, TodoReducer};
pub use types::{AppAction, AppState, TodoAction, TodoId, TodoItem, TodoList, TodoState};
pub use view::{render, Command, CommandError, HELP};

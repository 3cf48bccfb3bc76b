//! Domain types for the todo list.
//!
//! The list is the only piece of domain state. It is never edited in place:
//! every transition builds a new [`TodoList`] and swaps it in, so a snapshot
//! handed to a renderer stays exactly as it was read.

use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Identifier of a todo item
///
/// Ids are plain integers chosen either by the caller (`Add`) or by the
/// reducer's id strategy (`Create`).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TodoId(u64);

impl TodoId {
    /// Creates a `TodoId` from its integer value
    #[must_use]
    pub const fn new(value: u64) -> Self {
        Self(value)
    }

    /// Returns the integer value
    #[must_use]
    pub const fn value(self) -> u64 {
        self.0
    }

    /// The id after this one, or `None` after `u64::MAX`
    #[must_use]
    pub const fn successor(self) -> Option<Self> {
        match self.0.checked_add(1) {
            Some(next) => Some(Self(next)),
            None => None,
        }
    }
}

impl std::fmt::Display for TodoId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for TodoId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse().map(Self)
    }
}

/// A single todo item
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TodoItem {
    /// Identifier, unique within the list when ids come from the store
    pub id: TodoId,
    /// Text of the todo (may be empty)
    pub content: String,
}

impl TodoItem {
    /// Creates a new todo item
    #[must_use]
    pub fn new(id: TodoId, content: impl Into<String>) -> Self {
        Self {
            id,
            content: content.into(),
        }
    }
}

/// Ordered, immutable list of todo items
///
/// Cloning is O(1): clones share the same backing slice. `add` and `delete`
/// return a new list and leave `self` untouched.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TodoList(Arc<[TodoItem]>);

impl TodoList {
    /// Creates an empty list
    #[must_use]
    pub fn new() -> Self {
        Self(Arc::from(Vec::new()))
    }

    /// Returns a new list with `item` appended at the end
    ///
    /// Ids are not checked; appending a duplicate id is allowed.
    #[must_use]
    pub fn add(&self, item: TodoItem) -> Self {
        let mut items = Vec::with_capacity(self.0.len() + 1);
        items.extend_from_slice(&self.0);
        items.push(item);
        Self(items.into())
    }

    /// Returns a new list without the items whose id is `id`
    ///
    /// Remaining items keep their relative order. When nothing matches, the
    /// result shares storage with `self`.
    #[must_use]
    pub fn delete(&self, id: TodoId) -> Self {
        if !self.contains(id) {
            return self.clone();
        }
        self.0.iter().filter(|item| item.id != id).cloned().collect()
    }

    /// Number of items
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the list has no items
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterates items in list order
    pub fn iter(&self) -> std::slice::Iter<'_, TodoItem> {
        self.0.iter()
    }

    /// The items as a slice
    #[must_use]
    pub fn as_slice(&self) -> &[TodoItem] {
        &self.0
    }

    /// First item with the given id
    #[must_use]
    pub fn get(&self, id: TodoId) -> Option<&TodoItem> {
        self.0.iter().find(|item| item.id == id)
    }

    /// Whether any item has the given id
    #[must_use]
    pub fn contains(&self, id: TodoId) -> bool {
        self.0.iter().any(|item| item.id == id)
    }

    /// The most recently appended item
    #[must_use]
    pub fn last(&self) -> Option<&TodoItem> {
        self.0.last()
    }

    /// Largest id in the list
    #[must_use]
    pub fn max_id(&self) -> Option<TodoId> {
        self.0.iter().map(|item| item.id).max()
    }

    /// Whether both lists share the same backing storage
    #[must_use]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl Default for TodoList {
    fn default() -> Self {
        Self::new()
    }
}

impl From<Vec<TodoItem>> for TodoList {
    fn from(items: Vec<TodoItem>) -> Self {
        Self(items.into())
    }
}

impl FromIterator<TodoItem> for TodoList {
    fn from_iter<I: IntoIterator<Item = TodoItem>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a TodoList {
    type Item = &'a TodoItem;
    type IntoIter = std::slice::Iter<'a, TodoItem>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// State of the todo feature
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TodoState {
    /// Current items, in insertion order
    pub items: TodoList,
    /// Next id handed out by the sequential id strategy
    ///
    /// Never decreases, so ids are not reused after deletions. `None` once
    /// `u64::MAX` has been used: the id space is spent.
    pub next_id: Option<TodoId>,
}

impl Default for TodoState {
    fn default() -> Self {
        Self {
            items: TodoList::new(),
            next_id: Some(TodoId::default()),
        }
    }
}

impl TodoState {
    /// Creates a new empty todo state
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a state holding `items`, with the id counter placed after them
    #[must_use]
    pub fn with_items(items: TodoList) -> Self {
        let next_id = items.max_id().map_or(Some(TodoId::default()), TodoId::successor);
        Self { items, next_id }
    }

    /// Returns the number of todos
    #[must_use]
    pub fn count(&self) -> usize {
        self.items.len()
    }
}

/// Intents accepted by the todo reducer
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TodoAction {
    /// Append `item` to the end of the list, exactly as given
    Add {
        /// The item to append
        item: TodoItem,
    },

    /// Remove every item whose id is `id`; a no-op when none match
    Delete {
        /// Id to remove
        id: TodoId,
    },

    /// Allocate an id for `content` and follow up with `Add`
    Create {
        /// Text of the new todo
        content: String,
    },
}

/// Application-wide state
///
/// Features are mounted on their own field; todos are the only one today.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppState {
    /// The todo list feature
    pub todos: TodoState,
}

/// Application-wide actions
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum AppAction {
    /// An action for the todo list feature
    Todo(TodoAction),
}

impl AppAction {
    /// The todo action carried by this action, if any
    #[must_use]
    #[allow(clippy::unnecessary_wraps)] // Signature required by `scope`
    pub fn into_todo(self) -> Option<TodoAction> {
        match self {
            Self::Todo(action) => Some(action),
        }
    }
}

impl From<TodoAction> for AppAction {
    fn from(action: TodoAction) -> Self {
        Self::Todo(action)
    }
}

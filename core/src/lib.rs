//! # Composable Todo Core
//!
//! Core traits and types for the composable todo store.
//!
//! This crate provides the pure half of the architecture: reducers describe
//! state transitions, effects describe follow-up work, and the composition
//! helpers mount a feature reducer inside a larger application state.
//! Nothing here performs I/O or owns state; the runtime crate does that.
//!
//! ## Core Concepts
//!
//! - **State**: Domain state owned by a store
//! - **Action**: All possible inputs to a reducer (intents and their follow-ups)
//! - **Reducer**: Pure function `(State, Action, Environment) → (State, Effects)`
//! - **Effect**: Description of follow-up work (never executed here)
//! - **Environment**: Injected dependencies and settings
//!
//! ## Example
//!
//! ```
//! use composable_todo_core::{effect::Effect, reducer::Reducer, smallvec, SmallVec};
//!
//! #[derive(Clone, Debug, Default)]
//! struct Tally {
//!     seen: Vec<String>,
//! }
//!
//! enum TallyAction {
//!     Record(String),
//! }
//!
//! struct TallyReducer;
//!
//! impl Reducer for TallyReducer {
//!     type State = Tally;
//!     type Action = TallyAction;
//!     type Environment = ();
//!
//!     fn reduce(
//!         &self,
//!         state: &mut Tally,
//!         action: TallyAction,
//!         _env: &(),
//!     ) -> SmallVec<[Effect<TallyAction>; 4]> {
//!         match action {
//!             TallyAction::Record(word) => state.seen.push(word),
//!         }
//!         smallvec![Effect::None]
//!     }
//! }
//!
//! let mut state = Tally::default();
//! let _ = TallyReducer.reduce(&mut state, TallyAction::Record("milk".into()), &());
//! assert_eq!(state.seen, vec!["milk".to_string()]);
//! ```

pub use smallvec::{smallvec, SmallVec};

/// Effect descriptions returned by reducers
pub mod effect;

/// The reducer trait
pub mod reducer;

/// Reducer composition (scoping and combining)
pub mod composition;

pub use effect::Effect;
pub use reducer::Reducer;

/// Effects returned from a single reduction.
///
/// Most transitions return zero or one effect, so four inline slots avoid
/// heap allocation in the common case.
pub type Effects<Action> = SmallVec<[Effect<Action>; 4]>;

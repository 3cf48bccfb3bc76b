//! The `Reducer` trait.
//!
//! Reducers are pure functions: `(State, Action, Environment) → (State, Effects)`.
//! They hold all business logic, are deterministic, and are tested without
//! a runtime.

use crate::effect::Effect;
use smallvec::SmallVec;

/// The Reducer trait - core abstraction for state transitions
///
/// # Type Parameters
///
/// - `State`: The domain state this reducer operates on
/// - `Action`: The action type this reducer processes
/// - `Environment`: The injected dependencies this reducer needs
///
/// # Example
///
/// ```
/// use composable_todo_core::{effect::Effect, reducer::Reducer, SmallVec};
///
/// struct Appender;
///
/// impl Reducer for Appender {
///     type State = Vec<u64>;
///     type Action = u64;
///     type Environment = ();
///
///     fn reduce(
///         &self,
///         state: &mut Vec<u64>,
///         action: u64,
///         _env: &(),
///     ) -> SmallVec<[Effect<u64>; 4]> {
///         state.push(action);
///         SmallVec::new()
///     }
/// }
///
/// let mut state = Vec::new();
/// let effects = Appender.reduce(&mut state, 7, &());
/// assert!(effects.is_empty());
/// assert_eq!(state, vec![7]);
/// ```
pub trait Reducer {
    /// The state type this reducer operates on
    type State;

    /// The action type this reducer processes
    type Action;

    /// The environment type with injected dependencies
    type Environment;

    /// Reduce an action into state changes and effects
    ///
    /// Implementations update `state` in place and return descriptions of any
    /// follow-up work. They must not perform I/O themselves.
    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        env: &Self::Environment,
    ) -> SmallVec<[Effect<Self::Action>; 4]>;
}

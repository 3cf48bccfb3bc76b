//! Reducer composition.
//!
//! A feature reducer is written against its own small state and action
//! types. [`scope`] mounts it on one field of a larger application state,
//! so the application can grow more features without the feature knowing.
//!
//! # Example
//!
//! ```
//! use composable_todo_core::{composition::scope, effect::Effect, reducer::Reducer, smallvec, SmallVec};
//!
//! #[derive(Clone, Debug, Default)]
//! struct Words {
//!     list: Vec<String>,
//! }
//!
//! enum WordAction {
//!     Push(String),
//! }
//!
//! struct WordReducer;
//!
//! impl Reducer for WordReducer {
//!     type State = Words;
//!     type Action = WordAction;
//!     type Environment = ();
//!
//!     fn reduce(&self, state: &mut Words, action: WordAction, _env: &()) -> SmallVec<[Effect<WordAction>; 4]> {
//!         let WordAction::Push(word) = action;
//!         state.list.push(word);
//!         smallvec![Effect::None]
//!     }
//! }
//!
//! #[derive(Default)]
//! struct App {
//!     words: Words,
//!     title: String,
//! }
//!
//! enum AppAction {
//!     Words(WordAction),
//!     Rename(String),
//! }
//!
//! let root = scope(
//!     WordReducer,
//!     |app: &mut App| &mut app.words,
//!     |action: AppAction| match action {
//!         AppAction::Words(inner) => Some(inner),
//!         AppAction::Rename(_) => None,
//!     },
//!     AppAction::Words,
//! );
//!
//! let mut app = App::default();
//! let _ = root.reduce(&mut app, AppAction::Words(WordAction::Push("milk".into())), &());
//! assert_eq!(app.words.list, vec!["milk".to_string()]);
//! ```

use crate::effect::Effect;
use crate::reducer::Reducer;
use smallvec::SmallVec;
use std::marker::PhantomData;

/// Mount a child reducer on part of a parent state.
///
/// - `lens` borrows the child state out of the parent state.
/// - `extract` pulls the child action out of a parent action, or returns
///   `None` when the parent action is not meant for this child.
/// - `embed` wraps child actions produced by child effects back into the
///   parent action type.
///
/// Parent actions that `extract` rejects leave state untouched and produce
/// no effects.
pub fn scope<P, C, PA, CA, E, R>(
    reducer: R,
    lens: fn(&mut P) -> &mut C,
    extract: fn(PA) -> Option<CA>,
    embed: fn(CA) -> PA,
) -> Scoped<P, C, PA, CA, E, R>
where
    R: Reducer<State = C, Action = CA, Environment = E>,
{
    Scoped {
        reducer,
        lens,
        extract,
        embed,
        _phantom: PhantomData,
    }
}

/// A child reducer mounted on part of a parent state.
///
/// Created by [`scope`].
pub struct Scoped<P, C, PA, CA, E, R>
where
    R: Reducer<State = C, Action = CA, Environment = E>,
{
    reducer: R,
    lens: fn(&mut P) -> &mut C,
    extract: fn(PA) -> Option<CA>,
    embed: fn(CA) -> PA,
    _phantom: PhantomData<fn(E)>,
}

impl<P, C, PA, CA, E, R> Clone for Scoped<P, C, PA, CA, E, R>
where
    R: Reducer<State = C, Action = CA, Environment = E> + Clone,
{
    fn clone(&self) -> Self {
        Self {
            reducer: self.reducer.clone(),
            lens: self.lens,
            extract: self.extract,
            embed: self.embed,
            _phantom: PhantomData,
        }
    }
}

impl<P, C, PA, CA, E, R> std::fmt::Debug for Scoped<P, C, PA, CA, E, R>
where
    R: Reducer<State = C, Action = CA, Environment = E> + std::fmt::Debug,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Scoped")
            .field("reducer", &self.reducer)
            .finish_non_exhaustive()
    }
}

impl<P, C, PA, CA, E, R> Reducer for Scoped<P, C, PA, CA, E, R>
where
    R: Reducer<State = C, Action = CA, Environment = E>,
{
    type State = P;
    type Action = PA;
    type Environment = E;

    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        env: &Self::Environment,
    ) -> SmallVec<[Effect<Self::Action>; 4]> {
        let Some(child_action) = (self.extract)(action) else {
            return SmallVec::new();
        };

        let child_state = (self.lens)(state);
        self.reducer
            .reduce(child_state, child_action, env)
            .into_iter()
            .map(|effect| effect.map(&self.embed))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::smallvec;

    #[derive(Clone, Debug, Default, PartialEq)]
    struct Counter {
        value: i32,
    }

    #[derive(Clone, Debug, PartialEq)]
    enum CounterAction {
        Add(i32),
        AddTwice(i32),
    }

    #[derive(Clone, Debug)]
    struct CounterReducer;

    impl Reducer for CounterReducer {
        type State = Counter;
        type Action = CounterAction;
        type Environment = ();

        fn reduce(
            &self,
            state: &mut Self::State,
            action: Self::Action,
            _env: &Self::Environment,
        ) -> SmallVec<[Effect<Self::Action>; 4]> {
            match action {
                CounterAction::Add(n) => {
                    state.value += n;
                    smallvec![Effect::None]
                },
                CounterAction::AddTwice(n) => smallvec![Effect::chain(vec![
                    Effect::Send(CounterAction::Add(n)),
                    Effect::Send(CounterAction::Add(n)),
                ])],
            }
        }
    }

    #[derive(Debug, Default)]
    struct Parent {
        counter: Counter,
        label: String,
    }

    #[derive(Clone, Debug, PartialEq)]
    enum ParentAction {
        Counter(CounterAction),
        Relabel(String),
    }

    fn mounted() -> Scoped<Parent, Counter, ParentAction, CounterAction, (), CounterReducer> {
        scope(
            CounterReducer,
            |parent: &mut Parent| &mut parent.counter,
            |action: ParentAction| match action {
                ParentAction::Counter(inner) => Some(inner),
                ParentAction::Relabel(_) => None,
            },
            ParentAction::Counter,
        )
    }

    #[test]
    fn scoped_reducer_updates_only_its_field() {
        let root = mounted();
        let mut state = Parent {
            counter: Counter { value: 5 },
            label: "kept".to_string(),
        };

        let _ = root.reduce(&mut state, ParentAction::Counter(CounterAction::Add(3)), &());

        assert_eq!(state.counter.value, 8);
        assert_eq!(state.label, "kept");
    }

    #[test]
    fn foreign_actions_are_ignored() {
        let root = mounted();
        let mut state = Parent::default();

        let effects = root.reduce(&mut state, ParentAction::Relabel("x".to_string()), &());

        assert!(effects.is_empty());
        assert_eq!(state.counter, Counter::default());
        assert!(state.label.is_empty());
    }

    #[test]
    fn child_effects_are_embedded_into_parent_actions() {
        let root = mounted();
        let mut state = Parent::default();

        let effects = root.reduce(&mut state, ParentAction::Counter(CounterAction::AddTwice(2)), &());

        assert_eq!(effects.len(), 1);
        assert_eq!(
            effects[0],
            Effect::chain(vec![
                Effect::Send(ParentAction::Counter(CounterAction::Add(2))),
                Effect::Send(ParentAction::Counter(CounterAction::Add(2))),
            ])
        );
        assert_eq!(state.counter.value, 0);
    }
}

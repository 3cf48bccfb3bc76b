//! Effect descriptions.
//!
//! Effects are NOT executed by reducers. They are values describing what the
//! store should do after a transition has been applied. The store drains them
//! synchronously, inside the same `send`, before observers are notified.

/// Effect type - describes follow-up work for the store
///
/// # Type Parameters
///
/// - `Action`: The action type that effects can feed back into the reducer
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Effect<Action> {
    /// No-op effect
    None,

    /// Feed an action back into the reducer once the current transition completes
    Send(Action),

    /// Run effects one after another, in order
    Sequential(Vec<Effect<Action>>),
}

impl<Action> Effect<Action> {
    /// Chain effects to run sequentially
    #[must_use]
    pub const fn chain(effects: Vec<Effect<Action>>) -> Effect<Action> {
        Effect::Sequential(effects)
    }

    /// Returns `true` if this effect does nothing when executed.
    ///
    /// An empty `Sequential` counts as a no-op.
    #[must_use]
    pub fn is_none(&self) -> bool {
        match self {
            Effect::None => true,
            Effect::Send(_) => false,
            Effect::Sequential(effects) => effects.iter().all(Effect::is_none),
        }
    }

    /// Convert the action type carried by this effect.
    ///
    /// Used when a child reducer is mounted inside a parent: child effects
    /// are re-embedded into the parent action type.
    ///
    /// # Example
    ///
    /// ```
    /// use composable_todo_core::effect::Effect;
    ///
    /// let child: Effect<u8> = Effect::Send(3);
    /// let parent: Effect<u32> = child.map(&|n| u32::from(n) * 10);
    /// assert_eq!(parent, Effect::Send(30));
    /// ```
    #[must_use]
    pub fn map<B, F>(self, f: &F) -> Effect<B>
    where
        F: Fn(Action) -> B,
    {
        match self {
            Effect::None => Effect::None,
            Effect::Send(action) => Effect::Send(f(action)),
            Effect::Sequential(effects) => {
                Effect::Sequential(effects.into_iter().map(|e| e.map(f)).collect())
            },
        }
    }

    /// Flatten this effect into the ordered list of actions it feeds back.
    ///
    /// `None` contributes nothing; `Sequential` contributes its children in order.
    pub fn into_actions(self, out: &mut Vec<Action>) {
        match self {
            Effect::None => {},
            Effect::Send(action) => out.push(action),
            Effect::Sequential(effects) => {
                for effect in effects {
                    effect.into_actions(out);
                }
            },
        }
    }
}

//! Integration tests for Store action broadcasting and observers
//!
//! Tests the observation features a view layer relies on: the async action
//! stream and the synchronous settled-state callbacks.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)] // Test code can use unwrap/expect/panic

use composable_todo_core::{effect::Effect, reducer::Reducer, smallvec, SmallVec};
use composable_todo_runtime::{Store, StoreConfig, StoreError};
use composable_todo_testing::RecordingObserver;
use tokio::sync::broadcast::error::{RecvError, TryRecvError};

// ============================================================================
// Test Fixtures
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
enum TestAction {
    /// Append a word
    Append(String),
    /// Append a word, then its reverse as feedback
    Mirror(String),
    /// Emit `n` nested feedback steps
    Countdown(u32),
}

#[derive(Debug, Clone, Default, PartialEq)]
struct TestState {
    words: Vec<String>,
}

struct TestReducer;

impl Reducer for TestReducer {
    type State = TestState;
    type Action = TestAction;
    type Environment = ();

    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        _env: &Self::Environment,
    ) -> SmallVec<[Effect<Self::Action>; 4]> {
        match action {
            TestAction::Append(word) => {
                state.words.push(word);
                smallvec![Effect::None]
            },
            TestAction::Mirror(word) => {
                let reversed: String = word.chars().rev().collect();
                state.words.push(word);
                smallvec![Effect::Send(TestAction::Append(reversed))]
            },
            TestAction::Countdown(0) => SmallVec::new(),
            TestAction::Countdown(n) => {
                state.words.push(n.to_string());
                smallvec![Effect::Send(TestAction::Countdown(n - 1))]
            },
        }
    }
}

fn store() -> Store<TestState, TestAction, (), TestReducer> {
    Store::new(TestState::default(), TestReducer, ())
}

// ============================================================================
// Tests
// ============================================================================

/// Every reduced action is broadcast, feedback included, in reduction order
#[tokio::test]
async fn test_action_stream_includes_feedback_in_order() {
    let store = store();
    let mut rx = store.subscribe_actions();

    store.send(TestAction::Mirror("ab".to_string())).await.unwrap();

    assert_eq!(rx.recv().await.unwrap(), TestAction::Mirror("ab".to_string()));
    assert_eq!(rx.recv().await.unwrap(), TestAction::Append("ba".to_string()));
    assert!(matches!(rx.try_recv(), Err(TryRecvError::Empty)));
}

/// Sending with nobody listening is not an error
#[tokio::test]
async fn test_send_without_receivers() {
    let store = store();

    store.send(TestAction::Append("solo".to_string())).await.unwrap();

    assert_eq!(store.state(|s| s.words.clone()).await, vec!["solo".to_string()]);
}

/// Multiple receivers each see the full stream
#[tokio::test]
async fn test_multiple_action_receivers() {
    let store = store();
    let mut first = store.subscribe_actions();
    let mut second = store.subscribe_actions();

    store.send(TestAction::Append("x".to_string())).await.unwrap();

    assert_eq!(first.recv().await.unwrap(), TestAction::Append("x".to_string()));
    assert_eq!(second.recv().await.unwrap(), TestAction::Append("x".to_string()));
}

/// Receivers that fall behind the configured capacity observe a lag
#[tokio::test]
async fn test_slow_receiver_lags() {
    let config = StoreConfig::default().with_broadcast_capacity(2);
    let store = Store::with_config(TestState::default(), TestReducer, (), config);
    let mut rx = store.subscribe_actions();

    for word in ["a", "b", "c", "d"] {
        store.send(TestAction::Append(word.to_string())).await.unwrap();
    }

    assert!(matches!(rx.recv().await, Err(RecvError::Lagged(2))));
    assert_eq!(rx.recv().await.unwrap(), TestAction::Append("c".to_string()));
}

/// Observers see one settled state per send
#[tokio::test]
async fn test_observer_sees_settled_state() {
    let store = store();
    let recorder = RecordingObserver::<TestState>::new();
    store.subscribe(recorder.callback());

    store.send(TestAction::Countdown(3)).await.unwrap();
    store.send(TestAction::Append("done".to_string())).await.unwrap();

    let words: Vec<Vec<String>> = recorder.snapshots().into_iter().map(|s| s.words).collect();
    assert_eq!(
        words,
        vec![
            vec!["3".to_string(), "2".to_string(), "1".to_string()],
            vec!["3".to_string(), "2".to_string(), "1".to_string(), "done".to_string()],
        ]
    );
}

/// Hitting the feedback limit keeps applied transitions and still notifies
#[tokio::test]
async fn test_feedback_limit_keeps_partial_progress() {
    let config = StoreConfig::default().with_max_feedback_actions(2);
    let store = Store::with_config(TestState::default(), TestReducer, (), config);
    let recorder = RecordingObserver::<TestState>::new();
    store.subscribe(recorder.callback());

    let result = store.send(TestAction::Countdown(5)).await;

    assert_eq!(result, Err(StoreError::FeedbackLimitExceeded { limit: 2 }));
    let expected = vec!["5".to_string(), "4".to_string(), "3".to_string()];
    assert_eq!(store.state(|s| s.words.clone()).await, expected);
    assert_eq!(recorder.count(), 1);
    assert_eq!(recorder.last().unwrap().words, expected);
}

/// Several observers are called in registration order
#[tokio::test]
async fn test_observers_called_in_registration_order() {
    let store = store();
    let order = RecordingObserver::<&'static str>::new();
    let first = order.callback();
    let second = order.callback();
    store.subscribe(move |_: &TestState| first(&"first"));
    store.subscribe(move |_: &TestState| second(&"second"));

    store.send(TestAction::Append("x".to_string())).await.unwrap();

    assert_eq!(order.snapshots(), vec!["first", "second"]);
    assert_eq!(store.observer_count(), 2);
}

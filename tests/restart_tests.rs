//! Restart and cancellation tests.
//!
//! Dealing a new board while a pair is still resolving must revoke the old
//! session's deferred steps, so nothing from the old board touches the new one.

use std::time::Duration;

use memory_match::core::{symbols, CardIndex, CardState, EngineConfig};
use memory_match::engine::{MatchEngine, SelectOutcome};
use memory_match::events::GameEvent;

fn ms(n: u64) -> Duration {
    Duration::from_millis(n)
}

fn c(i: usize) -> CardIndex {
    CardIndex::new(i)
}

/// Route engine logs to the test harness (`RUST_LOG=memory_match=trace`).
fn init_logging() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// A pending mismatch never fires against the replacement board.
#[test]
fn test_restart_cancels_pending_mismatch() {
    init_logging();
    let mut engine = MatchEngine::new(EngineConfig::default()).unwrap();
    engine.start_game(symbols(["A", "B", "A", "B"])).unwrap();
    engine.select_card(c(0)).unwrap();
    engine.select_card(c(1)).unwrap();
    assert_eq!(engine.scheduler().len(), 1);

    engine.start_game(symbols(["X", "Y", "Y", "X"])).unwrap();
    assert!(engine.is_idle());
    engine.sink_mut().clear();

    // New board: flip the same positions, then let plenty of time pass.
    engine.select_card(c(0)).unwrap();
    engine.advance(ms(5_000));

    let session = engine.session().unwrap();
    assert_eq!(session.card(c(0)).unwrap().state, CardState::Revealed);
    assert_eq!(session.card(c(1)).unwrap().state, CardState::Hidden);
    assert_eq!(session.moves(), 0);
    assert!(!session.input_locked());
    assert_eq!(engine.sink().events(), &[GameEvent::CardRevealed { index: c(0) }]);
}

/// A pending match never fires, and its win never gets announced.
#[test]
fn test_restart_cancels_pending_match_and_win() {
    init_logging();
    let mut engine = MatchEngine::new(EngineConfig::default()).unwrap();
    engine.start_game(symbols(["A", "A"])).unwrap();
    engine.select_card(c(0)).unwrap();
    engine.select_card(c(1)).unwrap();

    engine.start_game(symbols(["A", "B", "A", "B"])).unwrap();
    engine.advance(ms(5_000));

    assert!(!engine.is_won());
    let session = engine.session().unwrap();
    assert_eq!(session.matched_pairs(), 0);
    assert!(session.board().iter().all(|card| card.state == CardState::Hidden));
    assert!(!engine
        .sink()
        .events()
        .iter()
        .any(|e| matches!(e, GameEvent::PairMatched { .. } | GameEvent::GameWon { .. })));
}

/// Restarting between the last match and the win announcement drops the win.
#[test]
fn test_restart_cancels_pending_win() {
    init_logging();
    let mut engine = MatchEngine::new(EngineConfig::default()).unwrap();
    engine.start_game(symbols(["A", "A"])).unwrap();
    engine.select_card(c(0)).unwrap();
    engine.select_card(c(1)).unwrap();
    engine.advance(ms(500));
    assert_eq!(engine.scheduler().len(), 1);

    engine.start_game(symbols(["A", "A"])).unwrap();
    engine.advance(ms(5_000));

    assert!(!engine.is_won());
    assert_eq!(engine.sink().count(|e| matches!(e, GameEvent::GameWon { .. })), 0);
}

/// Every restart is a fresh session with fresh counters.
#[test]
fn test_restart_resets_counters() {
    let mut engine = MatchEngine::new(EngineConfig::default()).unwrap();
    let first = engine.start_game(symbols(["A", "B", "A", "B"])).unwrap();
    engine.select_card(c(0)).unwrap();
    engine.select_card(c(2)).unwrap();
    engine.run_until_idle();
    assert_eq!(engine.session().unwrap().moves(), 1);

    let second = engine.start_game(symbols(["A", "B", "A", "B"])).unwrap();
    assert_ne!(first, second);

    let session = engine.session().unwrap();
    assert_eq!(session.moves(), 0);
    assert_eq!(session.matched_pairs(), 0);
    assert_eq!(engine.select_card(c(0)), Ok(SelectOutcome::FirstFlip));
}

/// Restarting mid-turn (one card up) leaves no pending selection behind.
#[test]
fn test_restart_clears_half_turn() {
    let mut engine = MatchEngine::new(EngineConfig::default()).unwrap();
    engine.start_game(symbols(["A", "B", "A", "B"])).unwrap();
    engine.select_card(c(0)).unwrap();

    engine.start_game(symbols(["A", "B", "A", "B"])).unwrap();
    assert!(engine.session().unwrap().pending().is_empty());
    assert_eq!(engine.select_card(c(1)), Ok(SelectOutcome::FirstFlip));
}

/// Independent engines do not share state.
#[test]
fn test_engines_are_independent() {
    let mut a = MatchEngine::new(EngineConfig::default()).unwrap();
    let mut b = MatchEngine::new(EngineConfig::default()).unwrap();
    a.start_game(symbols(["A", "A"])).unwrap();
    b.start_game(symbols(["A", "A"])).unwrap();

    a.select_card(c(0)).unwrap();
    a.select_card(c(1)).unwrap();
    a.run_until_idle();

    assert!(a.is_won());
    assert!(!b.is_won());
    assert_eq!(b.session().unwrap().moves(), 0);
}

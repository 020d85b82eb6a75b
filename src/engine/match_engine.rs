//! The match engine: flip/match state machine with timed resolution.
//!
//! ## Turn protocol
//!
//! 1. First flip: the card turns Revealed and becomes the pending selection.
//! 2. Second flip: the card turns Revealed, input locks, the move counter
//!    increments and a resolution is scheduled. The lock is set before
//!    anything is deferred, so a third flip can never slip in.
//! 3. Resolution fires after `match_delay` (pair: both Matched) or
//!    `mismatch_delay` (miss: both Hidden). Either way the pending pair is
//!    cleared and input unlocks.
//! 4. When the last pair locks in, `GameWon` follows after `win_delay`.
//!
//! Dealing a new board cancels whatever the previous session left scheduled.
//!
//! With several players, only the player whose turn it is may flip
//! (`select_card_as`); anyone else is ignored like any other input race.

use std::time::Duration;

use tracing::{debug, trace, warn};

use super::session::{GameSession, SessionId, SessionPhase, SessionSnapshot};
use crate::core::{CardIndex, CardState, EngineConfig, EngineError, PlayerId, Symbol};
use crate::deck::{Deck, DeckProvider, DeckRequest};
use crate::events::{EventLog, EventSink, GameEvent};
use crate::schedule::{ScheduledEntry, ScheduledTask, Scheduler};

/// Why a selection was ignored.
///
/// These are expected input races in a live UI, not errors.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum IgnoreReason {
    /// A pair is being resolved.
    InputLocked,
    /// The card is already face up this turn.
    AlreadyRevealed,
    /// The card has already been paired.
    AlreadyMatched,
    /// Another player holds the turn.
    NotYourTurn,
    /// Every pair has been found.
    GameOver,
}

/// Result of `select_card`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SelectOutcome {
    /// Nothing changed.
    Ignored(IgnoreReason),
    /// First card of a turn is face up.
    FirstFlip,
    /// Second card is face up; the attempt counts as move `moves`.
    PairFlipped { moves: u32 },
}

impl SelectOutcome {
    /// Check if the selection changed any state.
    #[must_use]
    pub fn is_accepted(&self) -> bool {
        !matches!(self, SelectOutcome::Ignored(_))
    }
}

/// Owner of the game session.
///
/// Generic over the sink receiving notifications; defaults to an
/// [`EventLog`] that hosts can drain.
///
/// ```
/// use std::time::Duration;
/// use memory_match::core::{symbols, CardIndex};
/// use memory_match::engine::MatchEngine;
/// use memory_match::events::GameEvent;
///
/// let mut engine: MatchEngine = MatchEngine::default();
/// engine.start_game(symbols(["A", "B", "A", "B"])).unwrap();
///
/// engine.select_card(CardIndex::new(0)).unwrap();
/// engine.select_card(CardIndex::new(2)).unwrap();
/// engine.advance(Duration::from_millis(500));
///
/// let snapshot = engine.snapshot().unwrap();
/// assert_eq!(snapshot.matched_pairs, 1);
/// assert!(engine
///     .sink()
///     .events()
///     .contains(&GameEvent::ScoreUpdated { moves: 1, matched_pairs: 1 }));
/// ```
#[derive(Debug)]
pub struct MatchEngine<S: EventSink = EventLog> {
    config: EngineConfig,
    sink: S,
    session: Option<GameSession>,
    scheduler: Scheduler,
    next_session: u64,
}

impl Default for MatchEngine<EventLog> {
    fn default() -> Self {
        Self {
            config: EngineConfig::default(),
            sink: EventLog::new(),
            session: None,
            scheduler: Scheduler::new(),
            next_session: 1,
        }
    }
}

impl MatchEngine<EventLog> {
    /// Create an engine that records events in an [`EventLog`].
    pub fn new(config: EngineConfig) -> Result<Self, EngineError> {
        Self::with_sink(config, EventLog::new())
    }
}

impl<S: EventSink> MatchEngine<S> {
    /// Create an engine delivering events to `sink`.
    pub fn with_sink(config: EngineConfig, sink: S) -> Result<Self, EngineError> {
        config.validate()?;
        Ok(Self {
            config,
            sink,
            session: None,
            scheduler: Scheduler::new(),
            next_session: 1,
        })
    }

    // === Accessors ===

    /// Engine configuration.
    #[must_use]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// The notification sink.
    #[must_use]
    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Mutable access to the sink (e.g. to drain an [`EventLog`]).
    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    /// Consume the engine and return its sink.
    pub fn into_sink(self) -> S {
        self.sink
    }

    /// The live session, if a game has been started.
    #[must_use]
    pub fn session(&self) -> Option<&GameSession> {
        self.session.as_ref()
    }

    /// Renderer-safe view of the live session.
    #[must_use]
    pub fn snapshot(&self) -> Option<SessionSnapshot> {
        self.session.as_ref().map(GameSession::snapshot)
    }

    /// Check if the live session has been won.
    #[must_use]
    pub fn is_won(&self) -> bool {
        self.session
            .as_ref()
            .is_some_and(|s| s.phase == SessionPhase::Won)
    }

    /// Current virtual time.
    #[must_use]
    pub fn now(&self) -> Duration {
        self.scheduler.now()
    }

    /// Time remaining until the next deferred step, if any.
    #[must_use]
    pub fn time_until_next(&self) -> Option<Duration> {
        self.scheduler.time_until_next()
    }

    /// Check if no deferred step is outstanding.
    #[must_use]
    pub fn is_idle(&self) -> bool {
        self.scheduler.is_idle()
    }

    /// The deferred-step queue.
    #[must_use]
    pub fn scheduler(&self) -> &Scheduler {
        &self.scheduler
    }

    // === Operations ===

    /// Deal a new board from `symbols`.
    ///
    /// The deck is validated first; if it is rejected the current session,
    /// if any, is left untouched. Otherwise the current session is discarded
    /// along with every timer it scheduled.
    pub fn start_game(&mut self, symbols: Vec<Symbol>) -> Result<SessionId, EngineError> {
        let deck = Deck::new(symbols).map_err(|err| {
            warn!(%err, "rejected deck");
            EngineError::InvalidDeck(err)
        })?;

        if let Some(old) = self.session.take() {
            let cancelled = self.scheduler.cancel_session(old.id);
            debug!(session = %old.id, cancelled, "discarded session");
        }

        let id = SessionId::new(self.next_session);
        self.next_session += 1;

        let session = GameSession::new(id, deck, self.config.player_count);
        debug!(
            session = %id,
            cards = session.board_size(),
            pairs = session.total_pairs(),
            players = self.config.player_count,
            "started game"
        );

        let cards = session.board.clone();
        self.session = Some(session);
        notify(&mut self.sink, GameEvent::BoardReset { cards });
        Ok(id)
    }

    /// Ask `provider` for a deck and deal it.
    ///
    /// Provider failures surface unchanged; no session is created.
    pub fn start_game_from<P>(
        &mut self,
        provider: &mut P,
        request: &DeckRequest,
    ) -> Result<SessionId, EngineError>
    where
        P: DeckProvider + ?Sized,
    {
        let symbols = provider.provide_deck(request).map_err(|err| {
            warn!(%err, theme = %request.theme, "deck provider failed");
            EngineError::ProviderUnavailable(err)
        })?;
        self.start_game(symbols)
    }

    /// Flip the card at `index` on behalf of whoever holds the turn.
    ///
    /// Errors are reserved for integration mistakes (no game started, index
    /// off the board). Flipping while locked, flipping a face-up card or
    /// flipping after the last pair is found is silently ignored.
    pub fn select_card(&mut self, index: CardIndex) -> Result<SelectOutcome, EngineError> {
        self.flip(None, index)
    }

    /// Flip the card at `index` on behalf of `player`.
    ///
    /// A flip from a player who does not hold the turn is ignored with
    /// [`IgnoreReason::NotYourTurn`]. A player outside the table is an
    /// integration error.
    pub fn select_card_as(
        &mut self,
        player: PlayerId,
        index: CardIndex,
    ) -> Result<SelectOutcome, EngineError> {
        self.flip(Some(player), index)
    }

    fn flip(
        &mut self,
        player: Option<PlayerId>,
        index: CardIndex,
    ) -> Result<SelectOutcome, EngineError> {
        let session = self.session.as_mut().ok_or(EngineError::NoActiveSession)?;

        let board_size = session.board_size();
        let Some(card) = session.card(index) else {
            return Err(EngineError::IndexOutOfRange { index, board_size });
        };
        if let Some(player) = player {
            let player_count = self.config.player_count;
            if player.index() >= player_count {
                return Err(EngineError::UnknownPlayer { player, player_count });
            }
        }

        let ignored = if session.all_pairs_found() {
            Some(IgnoreReason::GameOver)
        } else if session.input_locked {
            Some(IgnoreReason::InputLocked)
        } else if player.is_some_and(|p| p != session.current_player) {
            Some(IgnoreReason::NotYourTurn)
        } else {
            match card.state {
                CardState::Hidden => None,
                CardState::Revealed => Some(IgnoreReason::AlreadyRevealed),
                CardState::Matched => Some(IgnoreReason::AlreadyMatched),
            }
        };
        if let Some(reason) = ignored {
            trace!(%index, ?player, ?reason, "ignored selection");
            return Ok(SelectOutcome::Ignored(reason));
        }

        session.set_state(index, CardState::Revealed);
        session.pending.push(index);
        debug!(session = %session.id, %index, player = %session.current_player, "revealed card");
        notify(&mut self.sink, GameEvent::CardRevealed { index });

        let Some((first, second)) = session.pending.pair() else {
            return Ok(SelectOutcome::FirstFlip);
        };

        // Lock before deferring anything.
        session.input_locked = true;
        session.moves += 1;
        let moves = session.moves;
        notify(&mut self.sink, GameEvent::MoveRecorded { moves });

        let is_match = match (session.card(first), session.card(second)) {
            (Some(a), Some(b)) => a.pairs_with(b),
            _ => false,
        };
        let (delay, task) = if is_match {
            (self.config.match_delay(), ScheduledTask::ResolveMatch { first, second })
        } else {
            (self.config.mismatch_delay(), ScheduledTask::ResolveMismatch { first, second })
        };
        debug!(session = %session.id, moves, %first, %second, is_match, "pair flipped");

        session.timer = Some(self.scheduler.schedule(session.id, delay, task));
        Ok(SelectOutcome::PairFlipped { moves })
    }

    /// Advance the virtual clock by `elapsed`, firing every deferred step
    /// that falls due. Returns the number of steps fired.
    pub fn advance(&mut self, elapsed: Duration) -> usize {
        let until = self.scheduler.now().saturating_add(elapsed);
        let mut fired = 0;
        while let Some(entry) = self.scheduler.pop_due(until) {
            self.fire(entry);
            fired += 1;
        }
        self.scheduler.advance_clock(until);
        fired
    }

    /// Fire deferred steps until none remain, advancing the clock to each
    /// deadline in turn. Returns the number of steps fired.
    pub fn run_until_idle(&mut self) -> usize {
        let mut fired = 0;
        while let Some(wait) = self.scheduler.time_until_next() {
            fired += self.advance(wait);
        }
        fired
    }

    fn fire(&mut self, entry: ScheduledEntry) {
        let Some(session) = self.session.as_mut().filter(|s| s.id == entry.session) else {
            trace!(id = %entry.id, session = %entry.session, "dropped stale timer");
            return;
        };
        session.timer = None;

        match entry.task {
            ScheduledTask::ResolveMatch { first, second } => {
                session.set_state(first, CardState::Matched);
                session.set_state(second, CardState::Matched);
                session.matched_pairs += 1;
                let player = session.current_player;
                session.scores[player] += 1;
                session.pending.clear();
                session.input_locked = false;

                debug!(
                    session = %session.id,
                    %first,
                    %second,
                    matched = session.matched_pairs,
                    total = session.total_pairs,
                    "pair matched"
                );
                notify(&mut self.sink, GameEvent::PairMatched { first, second });
                notify(&mut self.sink, GameEvent::ScoreUpdated {
                    moves: session.moves,
                    matched_pairs: session.matched_pairs,
                });
                if self.config.player_count > 1 {
                    notify(&mut self.sink, GameEvent::PlayerScored {
                        player,
                        score: session.scores[player],
                    });
                }

                if session.all_pairs_found() {
                    session.timer = Some(self.scheduler.schedule(
                        session.id,
                        self.config.win_delay(),
                        ScheduledTask::AnnounceWin,
                    ));
                }
            }
            ScheduledTask::ResolveMismatch { first, second } => {
                session.set_state(first, CardState::Hidden);
                session.set_state(second, CardState::Hidden);
                session.pending.clear();
                session.input_locked = false;

                debug!(session = %session.id, %first, %second, "pair missed");
                notify(&mut self.sink, GameEvent::CardsHidden { first, second });

                if self.config.player_count > 1 {
                    session.current_player = session.current_player.next(self.config.player_count);
                    notify(&mut self.sink, GameEvent::TurnPassed {
                        player: session.current_player,
                    });
                }
            }
            ScheduledTask::AnnounceWin => {
                session.phase = SessionPhase::Won;
                debug!(session = %session.id, moves = session.moves, "game won");
                notify(&mut self.sink, GameEvent::GameWon { moves: session.moves });
            }
        }
    }
}

/// Deliver one event to the sink.
fn notify<S: EventSink>(sink: &mut S, event: GameEvent) {
    trace!(kind = event.kind(), "notify");
    sink.notify(&event);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::symbols;

    fn engine() -> MatchEngine {
        let mut engine: MatchEngine = MatchEngine::default();
        engine.start_game(symbols(["A", "B", "A", "B"])).unwrap();
        engine.sink_mut().clear();
        engine
    }

    #[test]
    fn test_select_before_start() {
        let mut engine: MatchEngine = MatchEngine::default();
        assert_eq!(engine.select_card(CardIndex::new(0)), Err(EngineError::NoActiveSession));
    }

    #[test]
    fn test_out_of_range() {
        let mut engine = engine();
        assert_eq!(
            engine.select_card(CardIndex::new(4)),
            Err(EngineError::IndexOutOfRange {
                index: CardIndex::new(4),
                board_size: 4,
            })
        );
        assert!(engine.sink().is_empty());
    }

    #[test]
    fn test_first_flip_does_not_lock() {
        let mut engine = engine();
        assert_eq!(engine.select_card(CardIndex::new(1)), Ok(SelectOutcome::FirstFlip));

        let session = engine.session().unwrap();
        assert!(!session.input_locked());
        assert_eq!(session.moves(), 0);
        assert_eq!(session.pending().indices(), &[CardIndex::new(1)]);
    }

    #[test]
    fn test_second_flip_locks_synchronously() {
        let mut engine = engine();
        engine.select_card(CardIndex::new(0)).unwrap();
        assert_eq!(engine.select_card(CardIndex::new(1)), Ok(SelectOutcome::PairFlipped { moves: 1 }));

        let session = engine.session().unwrap();
        assert!(session.input_locked());
        assert_eq!(session.moves(), 1);
        assert_eq!(engine.scheduler().len(), 1);
        assert_eq!(session.pending_timer(), Some(engine.scheduler().entries()[0].id));
    }

    #[test]
    fn test_reselecting_revealed_card_is_silent() {
        let mut engine = engine();
        engine.select_card(CardIndex::new(0)).unwrap();
        let events_before = engine.sink().len();

        assert_eq!(
            engine.select_card(CardIndex::new(0)),
            Ok(SelectOutcome::Ignored(IgnoreReason::AlreadyRevealed))
        );
        assert_eq!(engine.sink().len(), events_before);
        assert_eq!(engine.session().unwrap().pending().len(), 1);
    }

    #[test]
    fn test_stale_timer_is_dropped() {
        let mut engine = engine();
        let stale = ScheduledEntry {
            id: crate::schedule::TimerId::new(99),
            session: SessionId::new(999),
            due: Duration::ZERO,
            task: ScheduledTask::AnnounceWin,
        };
        engine.fire(stale);
        assert!(!engine.is_won());
        assert!(engine.sink().is_empty());
    }

    #[test]
    fn test_rejects_invalid_config() {
        let err = MatchEngine::new(EngineConfig::new().with_player_count(0)).unwrap_err();
        assert!(matches!(err, EngineError::Config(_)));
    }

    #[test]
    fn test_outcome_is_accepted() {
        assert!(SelectOutcome::FirstFlip.is_accepted());
        assert!(SelectOutcome::PairFlipped { moves: 1 }.is_accepted());
        assert!(!SelectOutcome::Ignored(IgnoreReason::InputLocked).is_accepted());
    }
}

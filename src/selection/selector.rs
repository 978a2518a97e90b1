//! Two-phase move selection.
//!
//! Turns position picks into a validated move:
//!
//! ```text
//! SelectFrom --origin ok--> SelectTo --legal pick--> ReadyToMove
//!                              ^                          |
//!                              +------- make_move --------+
//! ```
//!
//! Each player has exactly one token, so `SelectFrom` resolves itself
//! during construction and is not user-facing. A rejected pick sets the
//! invalid-selection flag and leaves the phase alone so the caller can
//! retry.
//!
//! The selector does not own the engine. Every operation that needs the
//! board takes it as an argument, so the session stays the single owner.

use tracing::{debug, error, info, warn};

use super::phase::{ListenerId, Phase, PhaseListeners};
use crate::core::{MoveRecord, Position};
use crate::error::GameError;
use crate::rules::RulesEngine;

/// Move-selection state machine.
#[derive(Debug)]
pub struct MoveSelector {
    phase: Phase,
    from: Option<Position>,
    to: Option<Position>,
    invalid_selection: bool,
    listeners: PhaseListeners,
}

impl MoveSelector {
    /// Create a selector and resolve the origin from `engine`.
    ///
    /// With a movable token on the board the selector starts in `SelectTo`.
    pub fn new<E: RulesEngine + ?Sized>(engine: &E) -> Self {
        let mut selector = Self {
            phase: Phase::SelectFrom,
            from: None,
            to: None,
            invalid_selection: false,
            listeners: PhaseListeners::new(),
        };
        info!(phase = ?selector.phase, "Initializing move selector");
        selector.select_from(engine);
        selector.invalid_selection = false;
        selector.from = engine.find_current_player_position();
        selector
    }

    // === Queries ===

    /// Current phase.
    #[must_use]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// True iff a legal destination has been picked.
    #[must_use]
    pub fn is_ready_to_move(&self) -> bool {
        self.phase == Phase::ReadyToMove
    }

    /// True iff the last pick was rejected.
    #[must_use]
    pub fn is_invalid_selection(&self) -> bool {
        self.invalid_selection
    }

    /// The confirmed origin.
    ///
    /// Fails in `SelectFrom`, where no origin has been confirmed yet.
    pub fn from(&self) -> Result<Position, GameError> {
        match (self.phase, self.from) {
            (Phase::SelectFrom, _) | (_, None) => {
                error!(phase = ?self.phase, "Attempt to get 'from' position before it is confirmed");
                Err(GameError::InvalidState {
                    operation: "get 'from' position",
                    phase: self.phase,
                })
            }
            (_, Some(from)) => Ok(from),
        }
    }

    /// The picked destination. Only available in `ReadyToMove`.
    pub fn to(&self) -> Result<Position, GameError> {
        match (self.phase, self.to) {
            (Phase::ReadyToMove, Some(to)) => Ok(to),
            _ => {
                error!(phase = ?self.phase, "Attempt to get 'to' position outside READY_TO_MOVE");
                Err(GameError::InvalidState {
                    operation: "get 'to' position",
                    phase: self.phase,
                })
            }
        }
    }

    // === Selection ===

    /// Feed one position pick into the state machine.
    ///
    /// In `SelectFrom` the position is ignored and the origin is resolved
    /// from the engine. In `SelectTo` the position is validated as the
    /// destination. Calling this in `ReadyToMove` is a contract violation.
    pub fn select<E: RulesEngine + ?Sized>(
        &mut self,
        engine: &E,
        position: Position,
    ) -> Result<(), GameError> {
        info!(%position, phase = ?self.phase, "Selecting position");
        match self.phase {
            Phase::SelectFrom => self.select_from(engine),
            Phase::SelectTo => self.select_to(engine, position),
            Phase::ReadyToMove => {
                error!("Illegal state: already in READY_TO_MOVE phase");
                return Err(GameError::InvalidState {
                    operation: "select a position",
                    phase: self.phase,
                });
            }
        }
        Ok(())
    }

    fn select_from<E: RulesEngine + ?Sized>(&mut self, engine: &E) {
        let position = engine.find_current_player_position();
        if engine.is_legal_to_move_from() {
            self.from = position;
            self.invalid_selection = false;
            self.set_phase(Phase::SelectTo);
            debug!(from = ?self.from, "'From' position confirmed");
        } else {
            self.invalid_selection = true;
            warn!(from = ?position, "Invalid 'from' position selection");
        }
    }

    fn select_to<E: RulesEngine + ?Sized>(&mut self, engine: &E, position: Position) {
        if engine.is_legal_move(position) {
            self.to = Some(position);
            self.invalid_selection = false;
            self.set_phase(Phase::ReadyToMove);
            debug!(to = %position, "'To' position confirmed");
        } else {
            self.invalid_selection = true;
            warn!(to = %position, "Invalid 'to' position selection");
        }
    }

    /// Execute the selected move on `engine`, then start the next cycle.
    pub fn make_move<E: RulesEngine + ?Sized>(
        &mut self,
        engine: &mut E,
    ) -> Result<Option<MoveRecord>, GameError> {
        let to = match (self.phase, self.to) {
            (Phase::ReadyToMove, Some(to)) => to,
            _ => {
                error!(phase = ?self.phase, "Attempt to make a move outside READY_TO_MOVE");
                return Err(GameError::InvalidState {
                    operation: "make a move",
                    phase: self.phase,
                });
            }
        };
        info!(from = ?self.from, %to, "Making selected move");
        let record = engine.make_move(to);
        self.reset(&*engine);
        Ok(record)
    }

    /// Start a fresh cycle for the player now to move.
    ///
    /// The origin is taken from the engine without re-validation and the
    /// phase goes straight to `SelectTo`.
    pub fn reset<E: RulesEngine + ?Sized>(&mut self, engine: &E) {
        self.from = engine.find_current_player_position();
        self.to = None;
        self.invalid_selection = false;
        self.set_phase(Phase::SelectTo);
        debug!(from = ?self.from, "Move selector reset");
    }

    // === Listeners ===

    /// Register a callback receiving `(old, new)` on every phase change.
    pub fn subscribe(&mut self, listener: impl FnMut(Phase, Phase) + 'static) -> ListenerId {
        self.listeners.subscribe(listener)
    }

    /// Remove a phase-change callback.
    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        self.listeners.unsubscribe(id)
    }

    fn set_phase(&mut self, new: Phase) {
        let old = self.phase;
        if old == new {
            return;
        }
        self.phase = new;
        info!(?old, ?new, "Phase changed");
        self.listeners.notify(old, new);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Player, Square};
    use crate::engine::BoardEngine;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn p(row: i32, col: i32) -> Position {
        Position::new(row, col)
    }

    #[test]
    fn test_new_selector_skips_select_from() {
        let engine = BoardEngine::default();
        let selector = MoveSelector::new(&engine);

        assert_eq!(selector.phase(), Phase::SelectTo);
        assert!(!selector.is_invalid_selection());
        assert_eq!(selector.from(), Ok(p(2, 0)));
    }

    #[test]
    fn test_new_selector_without_token_stays_in_select_from() {
        let mut engine = BoardEngine::default();
        engine.set_square(p(2, 0), Square::Empty);

        let mut selector = MoveSelector::new(&engine);
        assert_eq!(selector.phase(), Phase::SelectFrom);
        assert!(selector.from().is_err());

        selector.select(&engine, p(1, 1)).unwrap();
        assert_eq!(selector.phase(), Phase::SelectFrom);
        assert!(selector.is_invalid_selection());
    }

    #[test]
    fn test_select_from_resolves_once_token_present() {
        let mut engine = BoardEngine::default();
        engine.set_square(p(2, 0), Square::Empty);
        let mut selector = MoveSelector::new(&engine);

        engine.set_square(p(2, 0), Square::TokenA);
        selector.select(&engine, p(5, 5)).unwrap();

        assert_eq!(selector.phase(), Phase::SelectTo);
        assert!(!selector.is_invalid_selection());
        assert_eq!(selector.from(), Ok(p(2, 0)));
    }

    #[test]
    fn test_illegal_pick_keeps_phase() {
        let engine = BoardEngine::default();
        let mut selector = MoveSelector::new(&engine);

        selector.select(&engine, p(1, -1)).unwrap();

        assert_eq!(selector.phase(), Phase::SelectTo);
        assert!(selector.is_invalid_selection());
        assert!(selector.to().is_err());
    }

    #[test]
    fn test_selecting_own_token_is_rejected() {
        let engine = BoardEngine::default();
        let mut selector = MoveSelector::new(&engine);

        selector.select(&engine, p(2, 0)).unwrap();

        assert_eq!(selector.phase(), Phase::SelectTo);
        assert!(selector.is_invalid_selection());
    }

    #[test]
    fn test_legal_pick_then_retry_clears_flag() {
        let engine = BoardEngine::default();
        let mut selector = MoveSelector::new(&engine);

        selector.select(&engine, p(0, 0)).unwrap();
        assert!(selector.is_invalid_selection());

        selector.select(&engine, p(3, 1)).unwrap();
        assert!(selector.is_ready_to_move());
        assert!(!selector.is_invalid_selection());
        assert_eq!(selector.to(), Ok(p(3, 1)));
    }

    #[test]
    fn test_select_when_ready_is_error() {
        let engine = BoardEngine::default();
        let mut selector = MoveSelector::new(&engine);
        selector.select(&engine, p(1, 1)).unwrap();

        let err = selector.select(&engine, p(1, 0)).unwrap_err();
        assert_eq!(
            err,
            GameError::InvalidState {
                operation: "select a position",
                phase: Phase::ReadyToMove
            }
        );
    }

    #[test]
    fn test_make_move_requires_ready() {
        let mut engine = BoardEngine::default();
        let mut selector = MoveSelector::new(&engine);
        assert!(selector.make_move(&mut engine).is_err());
        assert_eq!(engine.current_player(), Player::Player1);
    }

    #[test]
    fn test_make_move_starts_next_cycle() {
        let mut engine = BoardEngine::default();
        let mut selector = MoveSelector::new(&engine);

        selector.select(&engine, p(1, 1)).unwrap();
        let record = selector.make_move(&mut engine).unwrap().unwrap();

        assert_eq!(record.to, p(1, 1));
        assert_eq!(engine.get_square(p(2, 0)), Ok(Square::Empty));
        assert_eq!(engine.get_square(p(1, 1)), Ok(Square::TokenA));
        assert_eq!(selector.phase(), Phase::SelectTo);
        assert_eq!(selector.from(), Ok(p(3, 7)));
        assert!(selector.to().is_err());
    }

    #[test]
    fn test_reset_forces_select_to() {
        let engine = BoardEngine::default();
        let mut selector = MoveSelector::new(&engine);
        selector.select(&engine, p(1, 1)).unwrap();

        selector.reset(&engine);

        assert_eq!(selector.phase(), Phase::SelectTo);
        assert!(selector.to().is_err());
    }

    #[test]
    fn test_listeners_see_transitions() {
        let mut engine = BoardEngine::default();
        let mut selector = MoveSelector::new(&engine);
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        selector.subscribe(move |old, new| sink.borrow_mut().push((old, new)));

        selector.select(&engine, p(0, 0)).unwrap();
        selector.select(&engine, p(1, 1)).unwrap();
        selector.make_move(&mut engine).unwrap();

        assert_eq!(
            *seen.borrow(),
            vec![
                (Phase::SelectTo, Phase::ReadyToMove),
                (Phase::ReadyToMove, Phase::SelectTo),
            ]
        );
    }
}

//! The board engine: state, legality, move execution, blocking, game end.

use im::Vector;
use smallvec::SmallVec;
use tracing::{debug, error, info, warn};

use crate::core::{
    Board, GameConfig, GameRng, MoveRecord, Player, Position, Square, KING_DIRECTIONS,
};
use crate::error::GameError;
use crate::rules::{GameResult, GameStatus, RulesEngine};

/// Owns the board and the turn, and enforces the rules.
///
/// ## Invariants
///
/// - Exactly one `TokenA` and one `TokenB` are on the board. Moves relocate
///   a token, they never create or destroy one.
/// - Blocked squares stay blocked until `reset`.
/// - Every successful move blocks exactly one previously empty square
///   (unless none is left) and hands the turn to the opponent.
///
/// The engine is not synchronized. `is_legal_move` followed by `make_move`
/// is not transactional; callers sharing an engine across threads must
/// serialize access themselves.
#[derive(Clone, Debug)]
pub struct BoardEngine {
    pub(crate) config: GameConfig,
    pub(crate) board: Board,
    pub(crate) current_player: Player,
    pub(crate) rng: GameRng,
    pub(crate) history: Vector<MoveRecord>,
}

impl Default for BoardEngine {
    /// The 6×8 reference game with seed 42.
    fn default() -> Self {
        Self::from_valid_config(GameConfig::default())
    }
}

impl BoardEngine {
    /// Create an engine in the initial layout.
    pub fn new(config: GameConfig) -> Result<Self, GameError> {
        config.validate()?;
        Ok(Self::from_valid_config(config))
    }

    fn from_valid_config(config: GameConfig) -> Self {
        debug!(rows = config.rows, cols = config.cols, seed = config.seed, "Initializing board engine");
        let mut engine = Self {
            board: Board::new(config.rows, config.cols),
            current_player: Player::Player1,
            rng: GameRng::new(config.seed),
            history: Vector::new(),
            config,
        };
        engine.place_initial_tokens();
        engine
    }

    fn place_initial_tokens(&mut self) {
        self.board.clear();
        for player in Player::ALL {
            self.board
                .set(self.config.start_position(player), player.token());
        }
    }

    /// Restore the initial layout with `Player1` to move.
    ///
    /// The RNG keeps running, so a new game blocks different squares.
    pub fn reset(&mut self) {
        info!("Resetting game state");
        self.current_player = Player::Player1;
        self.history.clear();
        self.place_initial_tokens();
    }

    // === Accessors ===

    /// Configuration this engine was built with.
    #[must_use]
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Current board.
    #[must_use]
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Number of rows.
    #[must_use]
    pub fn rows(&self) -> usize {
        self.board.rows()
    }

    /// Number of columns.
    #[must_use]
    pub fn cols(&self) -> usize {
        self.board.cols()
    }

    /// The player to move.
    #[must_use]
    pub fn current_player(&self) -> Player {
        self.current_player
    }

    /// Moves executed since the last reset, oldest first.
    #[must_use]
    pub fn history(&self) -> &Vector<MoveRecord> {
        &self.history
    }

    // === Board Queries ===

    /// Bounds check against the board dimensions.
    #[must_use]
    pub fn is_on_board(&self, row: i32, col: i32) -> bool {
        self.board.is_on_board(row, col)
    }

    /// Bounds check on an optional position. `None` is never on the board.
    #[must_use]
    pub fn is_position_on_board(&self, position: impl Into<Option<Position>>) -> bool {
        position
            .into()
            .is_some_and(|p| self.board.contains(p))
    }

    /// The square at `position`.
    pub fn get_square(&self, position: Position) -> Result<Square, GameError> {
        self.board.get(position).ok_or_else(|| {
            error!(%position, "Attempted to get square at out of bounds position");
            GameError::OutOfBounds { position }
        })
    }

    /// Overwrite the square at `position`.
    ///
    /// Callers only pass on-board positions; an off-board write is dropped.
    pub fn set_square(&mut self, position: Position, square: Square) {
        debug!(%position, ?square, "Setting square");
        if self.board.set(position, square).is_none() {
            warn!(%position, "Ignoring write to out of bounds position");
        }
    }

    /// A uniformly random on-board position.
    pub fn generate_random_position(&mut self) -> Position {
        let row = self.rng.gen_range(0..self.rows() as i32);
        let col = self.rng.gen_range(0..self.cols() as i32);
        Position::new(row, col)
    }

    /// Cell holding the current player's token.
    #[must_use]
    pub fn find_current_player_position(&self) -> Option<Position> {
        let position = self.board.find(self.current_player.token());
        if position.is_none() {
            warn!(player = %self.current_player, "Current player position not found");
        }
        position
    }

    /// On-board and `Empty`.
    #[must_use]
    pub fn is_empty(&self, position: Position) -> bool {
        self.board.get(position) == Some(Square::Empty)
    }

    /// Holds `Blocked`. Off-board positions are not blocked.
    #[must_use]
    pub fn is_blocked(&self, position: Position) -> bool {
        self.board.get(position) == Some(Square::Blocked)
    }

    // === Legality ===

    /// True iff `to` is one of the eight neighbors of the current token.
    #[must_use]
    pub fn is_king_move(&self, to: Position) -> bool {
        let Some(from) = self.find_current_player_position() else {
            return false;
        };
        let king_move = from.is_king_step_to(to);
        debug!(%from, %to, king_move, "Checked king move");
        king_move
    }

    /// The current token exists, is on the board and is not blocked.
    #[must_use]
    pub fn is_legal_to_move_from(&self) -> bool {
        let from = self.find_current_player_position();
        let legal = from.is_some_and(|p| {
            self.board.contains(p) && !self.is_empty(p) && !self.is_blocked(p)
        });
        debug!(from = ?from, legal, "Checked move origin");
        legal
    }

    /// True iff the current player may move to `to`.
    #[must_use]
    pub fn is_legal_move(&self, to: Position) -> bool {
        let legal = self.is_legal_to_move_from()
            && self.board.contains(to)
            && self.is_empty(to)
            && self.is_king_move(to)
            && !self.is_blocked(to);
        debug!(%to, legal, "Checked move");
        legal
    }

    /// All legal destinations for the current player.
    #[must_use]
    pub fn legal_moves(&self) -> SmallVec<[Position; 8]> {
        RulesEngine::legal_moves(self)
    }

    // === Mutation ===

    /// Move the current token to `to`, block a random empty square and pass
    /// the turn.
    ///
    /// Illegal destinations are ignored: nothing changes and `None` is
    /// returned.
    pub fn make_move(&mut self, to: Position) -> Option<MoveRecord> {
        if !self.is_legal_move(to) {
            warn!(player = %self.current_player, %to, "Illegal move attempted");
            return None;
        }
        let from = self.find_current_player_position()?;
        info!(player = %self.current_player, %from, %to, "Making move");

        self.set_square(to, self.current_player.token());
        self.set_square(from, Square::Empty);
        let blocked = self.block_random_square();

        let record = MoveRecord {
            player: self.current_player,
            from,
            to,
            blocked,
        };
        self.history.push_back(record);
        self.switch_player();
        Some(record)
    }

    /// Block one uniformly random empty square.
    ///
    /// Samples the whole grid until an empty cell comes up. Returns `None`
    /// without sampling when no empty cell exists, so the loop always ends.
    pub fn block_random_square(&mut self) -> Option<Position> {
        if self.board.count(Square::Empty) == 0 {
            warn!("No empty square left to block");
            return None;
        }
        let position = loop {
            let candidate = self.generate_random_position();
            if self.is_empty(candidate) {
                break candidate;
            }
        };
        self.set_square(position, Square::Blocked);
        info!(%position, "Blocked square");
        Some(position)
    }

    /// Hand the turn to the opponent.
    pub fn switch_player(&mut self) {
        self.current_player = self.current_player.opponent();
        info!(player = %self.current_player, "Current player switched");
    }

    // === Game End ===

    /// True iff the player to move has no legal destination.
    #[must_use]
    pub fn is_game_over(&self) -> bool {
        let token = self.current_player.token();
        let has_move = self
            .board
            .iter()
            .filter(|&(_, square)| square == token)
            .any(|(from, _)| {
                KING_DIRECTIONS
                    .iter()
                    .any(|&(d_row, d_col)| self.is_legal_move(from.offset(d_row, d_col)))
            });
        if !has_move {
            info!(player = %self.current_player, "Game is over");
        }
        !has_move
    }

    /// `InProgress` or `Over`.
    #[must_use]
    pub fn status(&self) -> GameStatus {
        if self.is_game_over() {
            GameStatus::Over
        } else {
            GameStatus::InProgress
        }
    }

    /// True iff the game is over and `player` is not the stuck player.
    #[must_use]
    pub fn is_winner(&self, player: Player) -> bool {
        self.is_game_over() && player != self.current_player
    }

    /// The winner once the game is over, `None` while it is in progress.
    #[must_use]
    pub fn determine_winner(&self) -> Option<Player> {
        self.result().map(|r| r.winner)
    }

    /// Winner and stuck player once the game is over.
    #[must_use]
    pub fn result(&self) -> Option<GameResult> {
        self.is_game_over()
            .then(|| GameResult::stuck(self.current_player))
    }
}

impl RulesEngine for BoardEngine {
    fn current_player(&self) -> Player {
        self.current_player
    }

    fn find_current_player_position(&self) -> Option<Position> {
        BoardEngine::find_current_player_position(self)
    }

    fn is_legal_to_move_from(&self) -> bool {
        BoardEngine::is_legal_to_move_from(self)
    }

    fn is_legal_move(&self, to: Position) -> bool {
        BoardEngine::is_legal_move(self, to)
    }

    fn make_move(&mut self, to: Position) -> Option<MoveRecord> {
        BoardEngine::make_move(self, to)
    }

    fn is_terminal(&self) -> Option<GameResult> {
        self.result()
    }
}

impl std::fmt::Display for BoardEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.board)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(row: i32, col: i32) -> Position {
        Position::new(row, col)
    }

    /// Block every neighbor of `center` that is currently empty.
    fn wall_in(engine: &mut BoardEngine, center: Position) {
        for neighbor in center.neighbors() {
            if engine.is_empty(neighbor) {
                engine.set_square(neighbor, Square::Blocked);
            }
        }
    }

    #[test]
    fn test_initial_layout() {
        let engine = BoardEngine::default();

        assert_eq!(engine.get_square(p(2, 0)), Ok(Square::TokenA));
        assert_eq!(engine.get_square(p(3, 7)), Ok(Square::TokenB));
        assert_eq!(engine.board().count(Square::Empty), 46);
        assert_eq!(engine.current_player(), Player::Player1);
        assert_eq!(engine.status(), GameStatus::InProgress);
    }

    #[test]
    fn test_new_rejects_small_board() {
        let config = GameConfig::default().with_size(3, 3);
        assert!(matches!(
            BoardEngine::new(config),
            Err(GameError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_get_square_out_of_bounds() {
        let engine = BoardEngine::default();
        assert_eq!(
            engine.get_square(p(6, 0)),
            Err(GameError::OutOfBounds { position: p(6, 0) })
        );
        assert!(engine.get_square(p(-1, 3)).is_err());
    }

    #[test]
    fn test_set_square() {
        let mut engine = BoardEngine::default();
        engine.set_square(p(0, 0), Square::Blocked);
        assert_eq!(engine.get_square(p(0, 0)), Ok(Square::Blocked));
        assert!(engine.is_blocked(p(0, 0)));
        assert!(!engine.is_empty(p(0, 0)));
    }

    #[test]
    fn test_is_position_on_board() {
        let engine = BoardEngine::default();
        assert!(engine.is_position_on_board(p(0, 0)));
        assert!(!engine.is_position_on_board(p(0, 8)));
        assert!(!engine.is_position_on_board(None));
    }

    #[test]
    fn test_generate_random_position_on_board() {
        let mut engine = BoardEngine::default();
        for _ in 0..200 {
            let position = engine.generate_random_position();
            assert!(engine.is_position_on_board(position));
        }
    }

    #[test]
    fn test_is_empty_off_board() {
        let engine = BoardEngine::default();
        assert!(engine.is_empty(p(0, 0)));
        assert!(!engine.is_empty(p(-1, 0)));
        assert!(!engine.is_blocked(p(-1, 0)));
    }

    #[test]
    fn test_legal_first_move() {
        let engine = BoardEngine::default();
        assert!(engine.is_legal_to_move_from());
        assert!(engine.is_king_move(p(1, 1)));
        assert!(engine.is_legal_move(p(1, 1)));
        assert!(!engine.is_legal_move(p(2, 0)));
        assert!(!engine.is_legal_move(p(2, -1)));
    }

    #[test]
    fn test_distance_two_rejected() {
        let engine = BoardEngine::default();
        assert!(!engine.is_legal_move(p(0, 0)));
        assert!(!engine.is_legal_move(p(4, 0)));
        assert!(!engine.is_legal_move(p(2, 2)));
    }

    #[test]
    fn test_legal_moves_from_edge() {
        let engine = BoardEngine::default();
        let moves = engine.legal_moves();
        assert_eq!(moves.len(), 5);
        assert!(moves.contains(&p(1, 0)));
        assert!(moves.contains(&p(3, 1)));
    }

    #[test]
    fn test_make_move() {
        let mut engine = BoardEngine::default();

        let record = engine.make_move(p(1, 1)).expect("legal move");

        assert_eq!(record.player, Player::Player1);
        assert_eq!(record.from, p(2, 0));
        assert_eq!(record.to, p(1, 1));
        assert_eq!(engine.get_square(p(2, 0)), Ok(Square::Empty));
        assert_eq!(engine.get_square(p(1, 1)), Ok(Square::TokenA));
        assert_eq!(engine.board().count(Square::Blocked), 1);

        let blocked = record.blocked.expect("a square was blocked");
        assert_ne!(blocked, p(1, 1));
        assert_eq!(engine.get_square(blocked), Ok(Square::Blocked));
        assert_eq!(engine.current_player(), Player::Player2);
        assert_eq!(engine.history().len(), 1);
    }

    #[test]
    fn test_illegal_move_is_noop() {
        let mut engine = BoardEngine::default();
        let before = engine.board().clone();

        assert!(engine.make_move(p(0, 0)).is_none());
        assert!(engine.make_move(p(9, 9)).is_none());

        assert_eq!(engine.board(), &before);
        assert_eq!(engine.current_player(), Player::Player1);
        assert!(engine.history().is_empty());
    }

    #[derive(Clone, Default)]
    struct LogBuffer(std::sync::Arc<std::sync::Mutex<Vec<u8>>>);

    impl std::io::Write for LogBuffer {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    fn captured_logs(f: impl FnOnce()) -> String {
        let buffer = LogBuffer::default();
        let writer = buffer.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::INFO)
            .with_ansi(false)
            .with_writer(move || writer.clone())
            .finish();
        tracing::subscriber::with_default(subscriber, f);
        let bytes = buffer.0.lock().unwrap().clone();
        String::from_utf8(bytes).unwrap()
    }

    #[test]
    fn test_rejected_move_logs_no_move() {
        let mut engine = BoardEngine::default();
        let logs = captured_logs(|| {
            engine.make_move(p(0, 0));
        });
        assert!(logs.contains("Illegal move attempted"));
        assert!(!logs.contains("Making move"));

        let logs = captured_logs(|| {
            engine.make_move(p(1, 1));
        });
        assert!(logs.contains("Making move"));
    }

    #[test]
    fn test_cannot_move_onto_opponent_or_blocked() {
        let mut engine = BoardEngine::default();
        engine.set_square(p(1, 0), Square::Blocked);
        engine.set_square(p(3, 1), Square::TokenB);
        engine.set_square(p(3, 7), Square::Empty);

        assert!(!engine.is_legal_move(p(1, 0)));
        assert!(!engine.is_legal_move(p(3, 1)));
        assert!(engine.is_legal_move(p(3, 0)));
    }

    #[test]
    fn test_switch_player() {
        let mut engine = BoardEngine::default();
        engine.switch_player();
        assert_eq!(engine.current_player(), Player::Player2);
        assert_eq!(engine.find_current_player_position(), Some(p(3, 7)));
    }

    #[test]
    fn test_game_over_when_walled_in() {
        let mut engine = BoardEngine::default();
        assert_eq!(engine.determine_winner(), None);

        wall_in(&mut engine, p(2, 0));

        assert!(engine.is_game_over());
        assert_eq!(engine.status(), GameStatus::Over);
        assert_eq!(engine.determine_winner(), Some(Player::Player2));
        assert!(engine.is_winner(Player::Player2));
        assert!(!engine.is_winner(Player::Player1));
        assert_eq!(
            engine.result(),
            Some(GameResult {
                winner: Player::Player2,
                stuck: Player::Player1
            })
        );
    }

    #[test]
    fn test_opponent_token_counts_as_occupied() {
        let mut engine = BoardEngine::default();
        engine.set_square(p(3, 7), Square::Empty);
        engine.set_square(p(1, 0), Square::TokenB);
        for cell in [p(1, 1), p(2, 1), p(3, 0), p(3, 1)] {
            engine.set_square(cell, Square::Blocked);
        }

        assert!(engine.is_game_over());
        assert_eq!(engine.determine_winner(), Some(Player::Player2));
    }

    #[test]
    fn test_missing_token_means_no_origin() {
        let mut engine = BoardEngine::default();
        engine.set_square(p(2, 0), Square::Empty);

        assert_eq!(engine.find_current_player_position(), None);
        assert!(!engine.is_legal_to_move_from());
        assert!(!engine.is_king_move(p(1, 1)));
        assert!(engine.is_game_over());
    }

    #[test]
    fn test_block_random_square_on_full_board() {
        let mut engine = BoardEngine::new(GameConfig::default().with_size(4, 2)).unwrap();
        for (position, square) in engine.board().clone().iter() {
            if square == Square::Empty {
                engine.set_square(position, Square::Blocked);
            }
        }
        assert_eq!(engine.block_random_square(), None);
    }

    #[test]
    fn test_reset() {
        let mut engine = BoardEngine::default();
        engine.make_move(p(1, 1));
        engine.set_square(p(0, 0), Square::TokenB);

        engine.reset();

        assert_eq!(engine.board(), BoardEngine::default().board());
        assert_eq!(engine.current_player(), Player::Player1);
        assert!(engine.history().is_empty());
    }

    #[test]
    fn test_same_seed_same_blocks() {
        let mut a = BoardEngine::new(GameConfig::default().with_seed(7)).unwrap();
        let mut b = BoardEngine::new(GameConfig::default().with_seed(7)).unwrap();

        assert_eq!(a.make_move(p(1, 1)), b.make_move(p(1, 1)));
        assert_eq!(a.board(), b.board());
    }

    #[test]
    fn test_display() {
        let engine = BoardEngine::default();
        let text = engine.to_string();
        let lines: Vec<_> = text.lines().collect();
        assert_eq!(lines.len(), 6);
        assert_eq!(lines[2], "1 0 0 0 0 0 0 0 ");
        assert_eq!(lines[3], "0 0 0 0 0 0 0 2 ");
    }
}

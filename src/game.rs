use crate::color::Side;
use crate::error::Error;
use crate::movegen::{BoardStatus, MoveGen};
use crate::piece::PieceType;
use crate::position::Position;
use crate::square::Square;
use crate::validate::Rules;
use log::{debug, log_enabled, Level};

/// What was the result of this game?
#[derive(Copy, Clone, PartialEq, PartialOrd, Eq, Ord, Debug, Hash)]
pub enum GameResult {
    WhiteCheckmates,
    BlackCheckmates,
    Stalemate,
}

/// A game in progress: the current position, every position that came before it, and whose turn
/// it is.
///
/// `Game` is the layer that alternates sides.  It hands each requested move to the `Rules`
/// pipeline and adopts the resulting position only when every validator agrees.
#[derive(Clone, Debug)]
pub struct Game {
    position: Position,
    history: Vec<Position>,
    side_to_move: Side,
    rules: Rules,
}

impl Game {
    /// Create a new `Game` with the initial position, White to move.
    ///
    /// ```
    /// use chess_rules::{Game, Position, Side};
    ///
    /// let game = Game::new();
    /// assert_eq!(game.current_position(), &Position::standard());
    /// assert_eq!(game.side_to_move(), Side::White);
    /// ```
    pub fn new() -> Game {
        Game::from_position(Position::standard(), Side::White)
    }

    /// Create a new `Game` with a specific starting position.
    pub fn from_position(position: Position, side_to_move: Side) -> Game {
        Game {
            position,
            history: Vec::with_capacity(50),
            side_to_move,
            rules: Rules::standard(),
        }
    }

    /// Play under a different validator registry.
    pub fn with_rules(mut self, rules: Rules) -> Game {
        self.rules = rules;
        self
    }

    pub fn rules(&self) -> &Rules {
        &self.rules
    }

    /// Get the current position on the board from the `Game` object.
    pub fn current_position(&self) -> &Position {
        &self.position
    }

    /// Every position before the current one, oldest first.
    pub fn history(&self) -> &[Position] {
        &self.history
    }

    /// Whose turn is it?
    pub fn side_to_move(&self) -> Side {
        self.side_to_move
    }

    /// What is the status of this game?
    ///
    /// ```
    /// use chess_rules::Game;
    ///
    /// let game = Game::new();
    /// assert!(game.result().is_none());
    /// ```
    pub fn result(&self) -> Option<GameResult> {
        match MoveGen::status(&self.rules, &self.position, self.side_to_move) {
            BoardStatus::Checkmate => match self.side_to_move {
                Side::White => Some(GameResult::BlackCheckmates),
                Side::Black => Some(GameResult::WhiteCheckmates),
            },
            BoardStatus::Stalemate => Some(GameResult::Stalemate),
            BoardStatus::Ongoing => None,
        }
    }

    /// Try to move the piece on `from` to `to`.
    ///
    /// Returns `Ok(true)` when the move was made, and `Ok(false)` when it was refused: there is no
    /// piece on `from`, the piece belongs to the side not on move, a validator rejected it, or the
    /// game is already over.  Only squares off the board are errors.
    ///
    /// ```
    /// use chess_rules::{Game, Side, Square};
    ///
    /// let mut game = Game::new();
    /// assert_eq!(game.try_move(Square::new(4, 1), Square::new(4, 3), None), Ok(true));
    /// assert_eq!(game.side_to_move(), Side::Black);
    ///
    /// // White already moved
    /// assert_eq!(game.try_move(Square::new(3, 1), Square::new(3, 3), None), Ok(false));
    /// assert_eq!(game.try_move(Square::new(4, 4), Square::new(4, 5), None), Ok(false));
    /// assert!(game.try_move(Square::new(4, 6), Square::new(4, 8), None).is_err());
    /// ```
    pub fn try_move(
        &mut self,
        from: Square,
        to: Square,
        promotion: Option<PieceType>,
    ) -> Result<bool, Error> {
        let mv = self.position.make_move(from, to, promotion)?;
        let piece = match mv.piece() {
            Some(piece) => piece,
            None => {
                debug!("{} refused: no piece on {}", mv, from);
                return Ok(false);
            }
        };

        if piece.side() != self.side_to_move {
            debug!("{} refused: {} is not on move", mv, piece.side());
            return Ok(false);
        }
        if self.result().is_some() {
            debug!("{} refused: the game is over", mv);
            return Ok(false);
        }
        if !self.rules.is_valid_move(&self.position, &mv) {
            debug!("{} refused: illegal", mv);
            return Ok(false);
        }

        let next = self.position.apply(&mv);
        self.history.push(self.position);
        self.position = next;
        self.side_to_move = !self.side_to_move;
        debug!("{} {} played, {} to move", piece.side(), mv, self.side_to_move);

        if log_enabled!(Level::Debug) {
            if let Some(result) = self.result() {
                debug!("game over: {:?}", result);
            }
        }
        Ok(true)
    }
}

impl Default for Game {
    fn default() -> Game {
        Game::new()
    }
}

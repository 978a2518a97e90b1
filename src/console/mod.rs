//! Text front end.
//!
//! Reads moves as `<row> <col>` lines, prints the board after every legal
//! move and announces the winner. Illegal or unparsable input is ignored
//! and the same player is asked again.

use std::io::{BufRead, Write};

use tracing::{debug, info, warn};

use crate::core::Position;
use crate::error::ParseError;
use crate::scores::ResultSink;
use crate::session::{GameSession, SelectOutcome, SessionError};

/// Parse `"<row> <col>"` into a position.
///
/// Surrounding whitespace is ignored; the two numbers may be separated by
/// any run of whitespace. Each number is plain ASCII digits, no sign.
///
/// ```
/// use rust_isolation::console::parse_move;
/// use rust_isolation::core::Position;
///
/// assert_eq!(parse_move("  3  5 ").unwrap(), Position::new(3, 5));
/// assert!(parse_move("a b").is_err());
/// ```
pub fn parse_move(input: &str) -> Result<Position, ParseError> {
    debug!(input, "Parsing move");
    let tokens: Vec<&str> = input.split_whitespace().collect();
    let [row, col] = tokens.as_slice() else {
        return Err(ParseError::WrongTokenCount {
            input: input.to_string(),
            count: tokens.len(),
        });
    };
    let number = |token: &str| {
        token
            .bytes()
            .all(|b| b.is_ascii_digit())
            .then(|| token.parse::<i32>().ok())
            .flatten()
            .ok_or_else(|| ParseError::NotANumber {
                input: input.to_string(),
                token: token.to_string(),
            })
    };
    Ok(Position::new(number(*row)?, number(*col)?))
}

/// Console game loop over any line source and sink.
pub struct ConsoleGame<S: ResultSink, R: BufRead, W: Write> {
    session: GameSession<S>,
    input: R,
    output: W,
}

impl<S: ResultSink, R: BufRead, W: Write> ConsoleGame<S, R, W> {
    /// Wrap a session with an input and an output.
    pub fn new(session: GameSession<S>, input: R, output: W) -> Self {
        Self {
            session,
            input,
            output,
        }
    }

    /// The underlying session.
    #[must_use]
    pub fn session(&self) -> &GameSession<S> {
        &self.session
    }

    /// Play until the game ends or input runs out.
    ///
    /// Returns the winner's display name, or `None` if input ended first.
    pub fn run(&mut self) -> Result<Option<String>, SessionError> {
        write!(self.output, "{}", self.session.engine())?;
        self.prompt()?;

        let mut line = String::new();
        loop {
            line.clear();
            if self.input.read_line(&mut line)? == 0 {
                info!("Input closed before the game ended");
                return Ok(None);
            }

            let position = match parse_move(&line) {
                Ok(position) => position,
                Err(err) => {
                    warn!(%err, "Ignoring malformed move");
                    writeln!(self.output, "{err}")?;
                    self.prompt()?;
                    continue;
                }
            };

            match self.session.select(position)? {
                SelectOutcome::Rejected | SelectOutcome::Selected(_) => {}
                SelectOutcome::Moved(_) => {
                    write!(self.output, "{}", self.session.engine())?;
                }
                SelectOutcome::GameOver { winner_name, .. } => {
                    write!(self.output, "{}", self.session.engine())?;
                    writeln!(self.output, "{winner_name} won the game!")?;
                    return Ok(Some(winner_name));
                }
            }
            self.prompt()?;
        }
    }

    fn prompt(&mut self) -> Result<(), SessionError> {
        writeln!(self.output, "{} to move:", self.session.current_name())?;
        Ok(())
    }
}

use super::lexer::{is_metadata, is_move_data, normalize_moves, split_tag, strip_annotations};
use super::PgnDatabase;
use crate::error::PgnError;
use crate::game::GameRecord;

use log::{debug, trace};

/// State of the game being read.
#[derive(Debug, Default)]
pub struct ParseState {
    pub current: GameRecord,
    pub annotation_depth: u32,
    pub has_moves_seen: bool,
    pub pgn_buffer: String,
}

impl ParseState {
    pub fn new(source_name: &str) -> Self {
        ParseState {
            current: GameRecord::new(source_name),
            ..Default::default()
        }
    }

    /// Closes the current game and returns it, leaving a fresh one in its
    /// place.
    pub fn complete_game(&mut self) -> GameRecord {
        let fresh = GameRecord::new(self.current.source_name());
        let mut game = std::mem::replace(&mut self.current, fresh);
        game.set_raw_pgn(std::mem::take(&mut self.pgn_buffer));

        self.annotation_depth = 0;
        self.has_moves_seen = false;

        game
    }

    /// A tag line only starts a new game once the current one has moves.
    pub fn read_metadata(
        &mut self,
        line: &str,
        line_number: usize,
    ) -> Result<Option<GameRecord>, PgnError> {
        let completed = if self.has_moves_seen {
            Some(self.complete_game())
        } else {
            None
        };

        let (key, value) = split_tag(line).ok_or_else(|| PgnError::MalformedMetadata {
            line: line_number,
            text: line.to_string(),
        })?;
        self.current.apply_tag(&key, value);

        self.pgn_buffer.push_str(line);
        self.pgn_buffer.push('\n');

        Ok(completed)
    }

    pub fn read_moves(&mut self, line: &str, line_number: usize) -> Result<(), PgnError> {
        let stripped = strip_annotations(line, &mut self.annotation_depth);

        if !is_move_data(&stripped) {
            return Err(PgnError::MalformedMoveText {
                line: line_number,
                text: stripped,
            });
        }

        self.current.append_moves(&normalize_moves(&stripped));
        self.has_moves_seen = true;

        self.pgn_buffer.push('\n');
        self.pgn_buffer.push_str(line);

        Ok(())
    }

    /// Processes one raw input line. Returns the previous game when this line
    /// starts a new one.
    pub fn read_line(
        &mut self,
        raw_line: &str,
        line_number: usize,
    ) -> Result<Option<GameRecord>, PgnError> {
        let line = raw_line.trim();
        if line.is_empty() {
            return Ok(None);
        }

        // Inside a multi-line annotation everything is move text.
        if self.annotation_depth == 0 && is_metadata(line) {
            trace!("Line {}: metadata", line_number);
            self.read_metadata(line, line_number)
        } else {
            trace!("Line {}: moves", line_number);
            self.read_moves(line, line_number)?;
            Ok(None)
        }
    }
}

/// Line-oriented PGN reader.
///
/// Lines are fed in file order with [`PgnParser::read_line`]; games are
/// collected as their boundaries are found and the last one is closed by
/// [`PgnParser::finish`].
#[derive(Debug)]
pub struct PgnParser {
    source_name: String,
    games: Vec<GameRecord>,
    state: ParseState,
    line_number: usize,
}

impl PgnParser {
    pub fn new(source_name: impl Into<String>) -> Self {
        let source_name = source_name.into();
        PgnParser {
            state: ParseState::new(&source_name),
            source_name,
            games: Vec::new(),
            line_number: 0,
        }
    }

    /// Parses a whole sequence of lines. Line terminators may be included.
    pub fn parse<I, S>(
        source_name: impl Into<String>,
        lines: I,
    ) -> Result<PgnDatabase, PgnError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut parser = PgnParser::new(source_name);
        for line in lines {
            parser.read_line(line.as_ref())?;
        }
        Ok(parser.finish())
    }

    pub fn read_line(&mut self, line: &str) -> Result<(), PgnError> {
        self.line_number += 1;

        if let Some(game) = self.state.read_line(line, self.line_number)? {
            self.save_game(game);
        }
        Ok(())
    }

    /// Closes the game in progress, even if it has no moves.
    pub fn finish(mut self) -> PgnDatabase {
        let game = self.state.complete_game();
        self.save_game(game);

        debug!(
            "Read {} games from {} ({} lines)",
            self.games.len(),
            self.source_name,
            self.line_number
        );

        PgnDatabase::new(self.source_name, self.games)
    }

    fn save_game(&mut self, game: GameRecord) {
        debug!(
            "Game {} complete: {} vs {}, {} moves",
            self.games.len(),
            game.white().unwrap_or("?"),
            game.black().unwrap_or("?"),
            game.moves().split_whitespace().count()
        );
        self.games.push(game);
    }
}

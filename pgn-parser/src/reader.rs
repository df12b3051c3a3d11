mod lexer;
mod parser;


pub use self::lexer::{is_metadata, is_move_data, normalize_moves, split_tag, strip_annotations};
pub use self::parser::{ParseState, PgnParser};

use crate::error::PgnError;
use crate::game::GameRecord;

use log::debug;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::ops::Index;
use std::path::Path;

/// Games read from one PGN source, in file order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PgnDatabase {
    source_name: String,
    games: Vec<GameRecord>,
}

impl PgnDatabase {
    pub fn new(source_name: String, games: Vec<GameRecord>) -> Self {
        PgnDatabase { source_name, games }
    }

    pub fn source_name(&self) -> &str {
        &self.source_name
    }

    /// How many games were in the source.
    pub fn count(&self) -> usize {
        self.games.len()
    }

    pub fn is_empty(&self) -> bool {
        self.games.is_empty()
    }

    pub fn game(&self, index: usize) -> Option<&GameRecord> {
        self.games.get(index)
    }

    pub fn games(&self) -> &[GameRecord] {
        &self.games
    }

    pub fn iter(&self) -> std::slice::Iter<'_, GameRecord> {
        self.games.iter()
    }

    pub fn into_games(self) -> Vec<GameRecord> {
        self.games
    }
}

impl Index<usize> for PgnDatabase {
    type Output = GameRecord;

    fn index(&self, index: usize) -> &GameRecord {
        &self.games[index]
    }
}

impl IntoIterator for PgnDatabase {
    type Item = GameRecord;
    type IntoIter = std::vec::IntoIter<GameRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.games.into_iter()
    }
}

impl<'a> IntoIterator for &'a PgnDatabase {
    type Item = &'a GameRecord;
    type IntoIter = std::slice::Iter<'a, GameRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.games.iter()
    }
}

/// Parses in-memory lines. Every game is stamped with `source_name`.
pub fn parse_lines<I, S>(source_name: &str, lines: I) -> Result<PgnDatabase, PgnError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    PgnParser::parse(source_name, lines)
}

/// Parses any buffered source line by line.
///
/// Bytes that are not valid UTF-8 (Latin-1 exports are common) are replaced
/// instead of aborting the parse. `path` only labels I/O errors.
pub fn parse_reader<R: BufRead>(
    source_name: &str,
    reader: R,
    path: &Path,
) -> Result<PgnDatabase, PgnError> {
    let mut parser = PgnParser::new(source_name);

    for line_result in reader.split(b'\n') {
        let bytes = line_result.map_err(|source| PgnError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        parser.read_line(&String::from_utf8_lossy(&bytes))?;
    }

    Ok(parser.finish())
}

/// Parses a PGN file. Games are stamped with the file name, e.g. `games.pgn`
/// for `/path/to/games.pgn`.
pub fn parse_file(path: impl AsRef<Path>) -> Result<PgnDatabase, PgnError> {
    let path = path.as_ref();
    let source_name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();

    debug!("Opening {}", path.display());
    let file = File::open(path).map_err(|source| PgnError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    parse_reader(&source_name, BufReader::new(file), path)
}

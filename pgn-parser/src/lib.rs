//! Reads chess games in Portable Game Notation into flat records: the usual
//! header tags plus the main line as a space separated list of SAN moves.
//!
//! ```
//! let db = pgn_parser::parse_lines(
//!     "test.pgn",
//!     ["[Event \"Test\"]", "[Result \"1-0\"]", "1. e4 e5 2. Nf3 1-0"],
//! )
//! .unwrap();
//!
//! assert_eq!(db.count(), 1);
//! assert_eq!(db[0].event(), Some("Test"));
//! assert_eq!(db[0].moves(), "e4 e5 Nf3");
//! ```

pub mod error;
pub mod game;
pub mod reader;

pub use error::PgnError;
pub use game::GameRecord;
pub use reader::{parse_file, parse_lines, parse_reader, PgnDatabase, PgnParser};

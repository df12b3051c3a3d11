use pgn_parser::GameRecord;
use serde::ser::SerializeMap;
use serde::Serialize;

/// A numbered full move: white's half and, unless the game ends there,
/// black's.
#[derive(Debug, PartialEq)]
pub struct MovePair<'a> {
    pub white: &'a str,
    pub black: Option<&'a str>,
}

/// Groups a normalized move list by full move. Moves are paired by position
/// only; the text is not interpreted.
pub fn move_pairs(moves: &str) -> Vec<MovePair<'_>> {
    let tokens: Vec<&str> = moves.split_whitespace().collect();
    tokens
        .chunks(2)
        .map(|pair| MovePair {
            white: pair[0],
            black: pair.get(1).copied(),
        })
        .collect()
}

impl<'a> Serialize for MovePair<'a> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        if let Some(black) = self.black {
            let mut map = serializer.serialize_map(Some(2))?;

            map.serialize_entry("white", self.white)?;
            map.serialize_entry("black", black)?;

            map.end()
        } else {
            let mut map = serializer.serialize_map(Some(1))?;

            map.serialize_entry("white", self.white)?;

            map.end()
        }
    }
}

struct SerializedTags<'a>(&'a GameRecord);

impl<'a> Serialize for SerializedTags<'a> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        let tags = self.0.tags();
        let mut map = serializer.serialize_map(Some(tags.len()))?;

        for (name, value) in tags {
            map.serialize_entry(name, value)?;
        }

        map.end()
    }
}

struct SerializedMoveList<'a>(Vec<MovePair<'a>>);

impl<'a> Serialize for SerializedMoveList<'a> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;

        for (index, mv) in self.0.iter().enumerate() {
            let move_number = index + 1;
            map.serialize_entry(&move_number, mv)?;
        }

        map.end()
    }
}

/// Output shape of one game: `source`, `tags`, `moves` and, on request, the
/// original PGN text as `raw`.
pub struct SerializedGame<'a> {
    pub game: &'a GameRecord,
    pub include_raw: bool,
}

impl<'a> Serialize for SerializedGame<'a> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        let entries = if self.include_raw { 4 } else { 3 };
        let mut map = serializer.serialize_map(Some(entries))?;

        map.serialize_entry("source", self.game.source_name())?;
        map.serialize_entry("tags", &SerializedTags(self.game))?;
        map.serialize_entry("moves", &SerializedMoveList(move_pairs(self.game.moves())))?;
        if self.include_raw {
            map.serialize_entry("raw", self.game.raw_pgn())?;
        }

        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pairs_by_position() {
        assert_eq!(
            move_pairs("e4 e5 Nf3"),
            vec![
                MovePair {
                    white: "e4",
                    black: Some("e5")
                },
                MovePair {
                    white: "Nf3",
                    black: None
                },
            ]
        );
        assert!(move_pairs("").is_empty());
    }

    #[test]
    fn game_as_yaml() {
        let db = pgn_parser::parse_lines(
            "test.pgn",
            [r#"[Event "Test"]"#, r#"[Result "1-0"]"#, "1. e4 e5 2. Nf3 1-0"],
        )
        .unwrap();

        let yaml = serde_yaml::to_string(&SerializedGame {
            game: &db[0],
            include_raw: false,
        })
        .unwrap();

        let value: serde_yaml::Value = serde_yaml::from_str(&yaml).unwrap();
        assert_eq!(value["source"].as_str(), Some("test.pgn"));
        assert_eq!(value["tags"]["Event"].as_str(), Some("Test"));
        assert_eq!(value["tags"]["Result"].as_str(), Some("1-0"));
        assert_eq!(value["moves"][1]["white"].as_str(), Some("e4"));
        assert_eq!(value["moves"][1]["black"].as_str(), Some("e5"));
        assert_eq!(value["moves"][2]["white"].as_str(), Some("Nf3"));
        assert!(value["moves"][2].get("black").is_none());
        assert!(value.get("raw").is_none());
    }

    #[test]
    fn raw_text_on_request() {
        let db = pgn_parser::parse_lines("test.pgn", ["1. e4 e5"]).unwrap();

        let json = serde_json::to_value(SerializedGame {
            game: &db[0],
            include_raw: true,
        })
        .unwrap();

        assert_eq!(json["raw"], "\n1. e4 e5");
        assert_eq!(json["moves"]["1"]["black"], "e5");
        assert!(json.get("tags").unwrap().as_object().unwrap().is_empty());
    }
}

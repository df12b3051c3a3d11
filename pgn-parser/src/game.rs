use log::trace;
use serde::Serialize;

/// One game read from a PGN database.
///
/// Metadata fields hold the tag values verbatim (quotes stripped). Ratings and
/// the ply count are kept as text because PGN exports are inconsistent about
/// them (`"?"`, `"-"`, empty strings...).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct GameRecord {
    source_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    event: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    site: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    round: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    white: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    black: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    white_elo: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    black_elo: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    result: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    eco: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    fen: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    moves_count: Option<String>,
    moves: String,
    raw_pgn: String,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum TagField {
    Fen,
    Event,
    Site,
    Date,
    Round,
    White,
    Black,
    WhiteElo,
    BlackElo,
    Result,
    Eco,
    MovesCount,
}

// Lowercased tag name -> field. Both date tags feed the same field.
const TAG_FIELDS: &[(&str, TagField)] = &[
    ("fen", TagField::Fen),
    ("event", TagField::Event),
    ("site", TagField::Site),
    ("date", TagField::Date),
    ("eventdate", TagField::Date),
    ("round", TagField::Round),
    ("white", TagField::White),
    ("black", TagField::Black),
    ("whiteelo", TagField::WhiteElo),
    ("blackelo", TagField::BlackElo),
    ("result", TagField::Result),
    ("eco", TagField::Eco),
    ("plycount", TagField::MovesCount),
];

impl TagField {
    fn from_key(key: &str) -> Option<Self> {
        TAG_FIELDS
            .iter()
            .find(|(name, _)| *name == key)
            .map(|(_, field)| *field)
    }

    fn assign(self, game: &mut GameRecord, value: String) {
        match self {
            TagField::Fen => game.set_fen(value),
            TagField::Event => game.set_event(value),
            TagField::Site => game.set_site(value),
            TagField::Date => game.set_date_if_unset(value),
            TagField::Round => game.set_round(value),
            TagField::White => game.set_white(value),
            TagField::Black => game.set_black(value),
            TagField::WhiteElo => game.set_white_elo(value),
            TagField::BlackElo => game.set_black_elo(value),
            TagField::Result => game.set_result(value),
            TagField::Eco => game.set_eco(value),
            TagField::MovesCount => game.set_moves_count(value),
        }
    }
}

macro_rules! text_field {
    ($field:ident, $setter:ident) => {
        pub fn $field(&self) -> Option<&str> {
            self.$field.as_deref()
        }

        pub fn $setter(&mut self, value: impl Into<String>) {
            self.$field = Some(value.into());
        }
    };
}

impl GameRecord {
    pub fn new(source_name: impl Into<String>) -> Self {
        GameRecord {
            source_name: source_name.into(),
            ..Default::default()
        }
    }

    text_field!(event, set_event);
    text_field!(site, set_site);
    text_field!(round, set_round);
    text_field!(white, set_white);
    text_field!(black, set_black);
    text_field!(white_elo, set_white_elo);
    text_field!(black_elo, set_black_elo);
    text_field!(result, set_result);
    text_field!(eco, set_eco);
    text_field!(fen, set_fen);
    text_field!(moves_count, set_moves_count);

    pub fn source_name(&self) -> &str {
        &self.source_name
    }

    pub fn set_source_name(&mut self, source_name: impl Into<String>) {
        self.source_name = source_name.into();
    }

    pub fn date(&self) -> Option<&str> {
        self.date.as_deref()
    }

    pub fn set_date(&mut self, date: impl Into<String>) {
        self.date = Some(date.into());
    }

    /// Sets the date only if no non-empty date has been recorded yet.
    pub fn set_date_if_unset(&mut self, date: impl Into<String>) {
        if self.date().map_or(true, str::is_empty) {
            self.date = Some(date.into());
        }
    }

    pub fn moves(&self) -> &str {
        &self.moves
    }

    pub fn set_moves(&mut self, moves: impl Into<String>) {
        self.moves = moves.into();
    }

    /// Appends already normalized move tokens, separated by a single space.
    pub fn append_moves(&mut self, tokens: &str) {
        if tokens.is_empty() {
            return;
        }
        if !self.moves.is_empty() {
            self.moves.push(' ');
        }
        self.moves.push_str(tokens);
    }

    pub fn raw_pgn(&self) -> &str {
        &self.raw_pgn
    }

    pub fn set_raw_pgn(&mut self, raw_pgn: impl Into<String>) {
        self.raw_pgn = raw_pgn.into();
    }

    /// Assigns a tag value to the matching field.
    ///
    /// `key` must already be lowercased. Returns `false` for tags that have no
    /// field, which are ignored.
    pub fn apply_tag(&mut self, key: &str, value: String) -> bool {
        match TagField::from_key(key) {
            Some(field) => {
                field.assign(self, value);
                true
            }
            None => {
                trace!("Ignoring tag {}", key);
                false
            }
        }
    }

    /// Set metadata fields in PGN tag order, paired with their tag names.
    pub fn tags(&self) -> Vec<(&'static str, &str)> {
        [
            ("Event", self.event()),
            ("Site", self.site()),
            ("Date", self.date()),
            ("Round", self.round()),
            ("White", self.white()),
            ("Black", self.black()),
            ("Result", self.result()),
            ("WhiteElo", self.white_elo()),
            ("BlackElo", self.black_elo()),
            ("ECO", self.eco()),
            ("PlyCount", self.moves_count()),
            ("FEN", self.fen()),
        ]
        .into_iter()
        .filter_map(|(name, value)| value.map(|value| (name, value)))
        .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::GameRecord;

    #[test]
    fn tag_table_dispatch() {
        let mut game = GameRecord::new("db.pgn");

        assert!(game.apply_tag("white", "Anand, Viswanathan".to_string()));
        assert!(game.apply_tag("whiteelo", "2787".to_string()));
        assert!(game.apply_tag("plycount", "?".to_string()));
        assert!(!game.apply_tag("timecontrol", "40/7200".to_string()));

        assert_eq!(game.source_name(), "db.pgn");
        assert_eq!(game.white(), Some("Anand, Viswanathan"));
        assert_eq!(game.white_elo(), Some("2787"));
        assert_eq!(game.moves_count(), Some("?"));
        assert_eq!(game.black(), None);
    }

    #[test]
    fn first_date_wins() {
        let mut game = GameRecord::default();
        game.apply_tag("eventdate", "1990.01.01".to_string());
        game.apply_tag("date", "1991.02.02".to_string());
        assert_eq!(game.date(), Some("1990.01.01"));

        let mut game = GameRecord::default();
        game.apply_tag("date", String::new());
        game.apply_tag("eventdate", "1990.01.01".to_string());
        assert_eq!(game.date(), Some("1990.01.01"));
    }

    #[test]
    fn append_moves_single_spaced() {
        let mut game = GameRecord::default();
        game.append_moves("e4 e5");
        game.append_moves("");
        game.append_moves("Nf3");
        assert_eq!(game.moves(), "e4 e5 Nf3");
    }

    #[test]
    fn tags_in_pgn_order() {
        let mut game = GameRecord::default();
        game.set_result("1-0");
        game.set_event("Test");
        assert_eq!(game.tags(), vec![("Event", "Test"), ("Result", "1-0")]);
    }
}

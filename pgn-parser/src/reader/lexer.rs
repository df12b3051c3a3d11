use lazy_static::lazy_static;
use nom::bytes::complete::take_till1;
use nom::character::complete::multispace1;
use nom::combinator::rest;
use nom::sequence::separated_pair;
use nom::IResult;
use regex::Regex;

lazy_static! {
    static ref TAG_LINE: Regex = Regex::new(r#"(?si)\[\s*\w+\s+".[^"]*"\s*\]"#).unwrap();
    static ref MOVE_LINE: Regex = Regex::new(r"(?si)^[0-9]+\.(\s+)?\w{2,6}(\s+\w{2,6})").unwrap();
    static ref MOVE_NUMBER: Regex = Regex::new(r"[0-9]+\.").unwrap();
    static ref RESULT: Regex = Regex::new(r"(1-0|0-1|1/2-1/2|\*)$").unwrap();
    static ref NAG: Regex = Regex::new(r"\$[0-9]").unwrap();
    static ref VARIATION: Regex = Regex::new(r"\([^()]+\)").unwrap();
    static ref SPACES: Regex = Regex::new(r"\s{2,}").unwrap();
}

/// Whether a trimmed line has the shape of a `[Key "Value"]` tag.
pub fn is_metadata(line: &str) -> bool {
    TAG_LINE.is_match(line)
}

/// Whether an annotation-free line starts with a numbered pair of moves.
pub fn is_move_data(line: &str) -> bool {
    MOVE_LINE.is_match(line)
}

fn tag_key_value(input: &str) -> IResult<&str, (&str, &str)> {
    separated_pair(
        take_till1(|c: char| c.is_ascii_whitespace()),
        multispace1,
        rest,
    )(input)
}

/// Splits a tag line such as `[Date "1953.??.??"]` into its lowercased key
/// and its value (`date`, `1953.??.??`).
///
/// Returns `None` when the line has no whitespace separating both parts.
pub fn split_tag(line: &str) -> Option<(String, String)> {
    let (_, (key, value)) = tag_key_value(line).ok()?;

    let key = key.trim_matches('[').to_lowercase();
    let value = value.trim_matches(|c: char| c == '"' || c == ']').to_string();

    Some((key, value))
}

/// Removes `{...}` comments and `(...)` variations from a line.
///
/// `depth` is the number of annotations left open by previous lines, and is
/// updated with the ones left open by this one. Opening characters count
/// before deciding whether to keep a character, closing ones after, so
/// delimiters never reach the output. A closer without an opener is kept.
pub fn strip_annotations(line: &str, depth: &mut u32) -> String {
    let mut stripped = String::with_capacity(line.len());

    for c in line.chars() {
        if c == '{' || c == '(' {
            *depth += 1;
        }
        if *depth == 0 {
            stripped.push(c);
        }
        if c == '}' || c == ')' {
            *depth = depth.saturating_sub(1);
        }
    }

    stripped
}

/// Reduces a line of move text to its bare move tokens.
///
/// `"17. Qe7 Nhg4 18. Nxg4 $1 Na5 1-0"` becomes `"Qe7 Nhg4 Nxg4 Na5"`.
pub fn normalize_moves(line: &str) -> String {
    let line = MOVE_NUMBER.replace_all(line, "");
    let line = RESULT.replace(&line, "");
    // Black moves after a comment are written "17...h5"; the first dot went
    // with the move number.
    let line = line.replace("..", "");
    let line = NAG.replace_all(&line, "");
    let line = VARIATION.replace_all(&line, "");
    let line = SPACES.replace_all(&line, " ");

    line.trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tag_lines() {
        assert!(is_metadata(r#"[Event "Anand - Topalov World Championship"]"#));
        assert!(is_metadata(r#"[ eco  "D56" ]"#));
        assert!(is_metadata(r#"[Date """]"#));
        assert!(!is_metadata(r#"[Date ""]"#));
        assert!(!is_metadata("NotAKey NoQuotesHere]"));
        assert!(!is_metadata("1. e4 e5 2. Nf3 Nc6"));
    }

    #[test]
    fn split_tag_lines() {
        assert_eq!(
            split_tag(r#"[Date "1953.??.??"]"#),
            Some(("date".to_string(), "1953.??.??".to_string()))
        );
        assert_eq!(
            split_tag(r#"[WhiteElo    "2805"]"#),
            Some(("whiteelo".to_string(), "2805".to_string()))
        );
        assert_eq!(
            split_tag(r#"[Black "Topalov, Veselin"]"#),
            Some(("black".to_string(), "Topalov, Veselin".to_string()))
        );
        assert_eq!(split_tag("[NoWhitespace]"), None);
        assert_eq!(split_tag("[Event\u{a0}\"Test\"]"), None);
    }

    #[test]
    fn strip_single_line_annotations() {
        let mut depth = 0;
        assert_eq!(
            strip_annotations("1. e4 {best by test} e5 (1... c5 2. Nf3) 2. Nf3", &mut depth),
            "1. e4  e5  2. Nf3"
        );
        assert_eq!(depth, 0);
    }

    #[test]
    fn strip_nested_annotations() {
        let mut depth = 0;
        assert_eq!(
            strip_annotations("1. d4 (1. e4 {king (pawn)} e5) d5", &mut depth),
            "1. d4  d5"
        );
        assert_eq!(depth, 0);
    }

    #[test]
    fn strip_annotations_across_lines() {
        let mut depth = 0;
        assert_eq!(strip_annotations("1. e4 e5 {a comment (with", &mut depth), "1. e4 e5 ");
        assert_eq!(depth, 2);
        assert_eq!(strip_annotations("2. Nf3 Nc6 inside)", &mut depth), "");
        assert_eq!(depth, 1);
        assert_eq!(strip_annotations("still inside}3. Bb5 a6", &mut depth), "3. Bb5 a6");
        assert_eq!(depth, 0);
    }

    #[test]
    fn empty_and_stray_delimiters() {
        let mut depth = 0;
        assert_eq!(strip_annotations("1. e4 {} e5", &mut depth), "1. e4  e5");
        assert_eq!(depth, 0);

        assert_eq!(strip_annotations("1. e4 } e5", &mut depth), "1. e4 } e5");
        assert_eq!(depth, 0);
    }

    #[test]
    fn move_line_shape() {
        assert!(is_move_data("1. e4 e5 2. Nf3 Nc6"));
        assert!(is_move_data("12.Qe7 Nhg4"));
        assert!(is_move_data("3. Bb5 a6 "));
        assert!(!is_move_data("Nf3 Nc6 3. Bb5"));
        assert!(!is_move_data(" 2. Nf3 Nc6"));
        assert!(!is_move_data("1. e4"));
        assert!(!is_move_data("free text in the moves"));
        assert!(!is_move_data(""));
    }

    #[test]
    fn normalize_move_lines() {
        assert_eq!(normalize_moves("1. e4 e5 2. Nf3 1-0"), "e4 e5 Nf3");
        assert_eq!(normalize_moves("21. Qe7 Nhg4 22. Nxg4 Na5 0-1"), "Qe7 Nhg4 Nxg4 Na5");
        assert_eq!(normalize_moves("30. Rd1 Kf8 1/2-1/2"), "Rd1 Kf8");
        assert_eq!(normalize_moves("40. h4 h5 *"), "h4 h5");
        assert_eq!(normalize_moves("16. Qd2 Rc8  17...h5 18. g3"), "Qd2 Rc8 h5 g3");
        assert_eq!(normalize_moves("5. O-O $1 Be7 $2 6. Re1"), "O-O Be7 Re1");
        assert_eq!(normalize_moves("7. Bb3 (7. Ba4 b5) d6"), "Bb3 d6");
    }

    #[test]
    fn result_only_stripped_at_line_end() {
        assert_eq!(normalize_moves("40. h4 h5 1-0 "), "h4 h5 1-0");
    }
}

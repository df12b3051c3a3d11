use colored::Colorize;
use pgn_parser::GameRecord;

/// One line per game: index, players, result and date.
pub fn summary_line(index: usize, game: &GameRecord, use_color: bool) -> String {
    let white = game.white().unwrap_or("?");
    let black = game.black().unwrap_or("?");
    let result = game.result().unwrap_or("*");
    let date = game.date().unwrap_or("????.??.??");

    if !use_color {
        return format!("{:>4}  {} - {}  {}  {}", index, white, black, result, date);
    }

    let result_str = match result {
        "1-0" => result.bold().white(),
        "0-1" => result.bold().black().on_white(),
        "1/2-1/2" => result.bold().yellow(),
        _ => result.dimmed(),
    };

    format!(
        "{:>4}  {} - {}  {}  {}",
        index.to_string().dimmed(),
        white,
        black,
        result_str,
        date.dimmed()
    )
}

pub fn print_summary(games: &[(usize, &GameRecord)]) {
    let use_color = atty::is(atty::Stream::Stdout);

    for (index, game) in games {
        println!("{}", summary_line(*index, game, use_color));
    }
}

mod converter;
mod summary;

use anyhow::{bail, Context, Result};
use clap::Parser;
use converter::{write_output, Destination, Format};
use log::info;
use pgn_parser::{parse_file, GameRecord};
use std::path::PathBuf;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// PGN file
    file: String,

    /// Path of the output file (if not specified, same as the PGN file with the extension changed)
    ///
    /// Use "-" to write to stdout.
    #[arg(short, long)]
    output: Option<String>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = Format::Yaml)]
    format: Format,

    /// Only convert the game at this index (starting at 0)
    #[arg(short, long)]
    game: Option<usize>,

    /// Print the number of games and exit
    #[arg(long)]
    count: bool,

    /// Print one line per game instead of converting
    #[arg(long)]
    list: bool,

    /// Include the original PGN text of each game
    #[arg(long)]
    raw: bool,
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();

    let pgn_path = PathBuf::from(&cli.file);

    let db = parse_file(&pgn_path).context("Unable to parse PGN file")?;
    info!("{} games in {}", db.count(), db.source_name());

    if cli.count {
        println!("{}", db.count());
        return Ok(());
    }

    let selected: Vec<(usize, &GameRecord)> = match cli.game {
        Some(index) => match db.game(index) {
            Some(game) => vec![(index, game)],
            None => bail!("No game {} in {} ({} games)", index, cli.file, db.count()),
        },
        None => db.iter().enumerate().collect(),
    };

    if cli.list {
        summary::print_summary(&selected);
        return Ok(());
    }

    let destination = Destination::resolve(cli.output.as_deref(), &pgn_path, cli.format);
    let games: Vec<&GameRecord> = selected.iter().map(|(_, game)| *game).collect();
    write_output(&destination, &games, cli.format, cli.raw)?;

    Ok(())
}

mod serializer;

use self::serializer::SerializedGame;

use anyhow::{Context, Result};
use clap::ValueEnum;
use log::info;
use pgn_parser::GameRecord;
use std::io::Write;
use std::path::{Path, PathBuf};

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum Format {
    Yaml,
    Json,
}

impl Format {
    pub fn extension(self) -> &'static str {
        match self {
            Format::Yaml => "yaml",
            Format::Json => "json",
        }
    }
}

/// Where the converted games go. `-` on the command line means stdout.
#[derive(Debug, PartialEq)]
pub enum Destination {
    Stdout,
    File(PathBuf),
}

impl Destination {
    /// Explicit output path, or the PGN path with the format's extension.
    pub fn resolve(output: Option<&str>, pgn_path: &Path, format: Format) -> Self {
        match output {
            Some("-") => Destination::Stdout,
            Some(path) => Destination::File(PathBuf::from(path)),
            None => Destination::File(pgn_path.with_extension(format.extension())),
        }
    }
}

pub fn write_games<W: Write>(
    writer: W,
    games: &[&GameRecord],
    format: Format,
    include_raw: bool,
) -> Result<()> {
    let serialized: Vec<SerializedGame> = games
        .iter()
        .map(|&game| SerializedGame {
            game,
            include_raw,
        })
        .collect();

    match format {
        Format::Yaml => {
            serde_yaml::to_writer(writer, &serialized).context("Error writing YAML data")
        }
        Format::Json => {
            serde_json::to_writer_pretty(writer, &serialized).context("Error writing JSON data")
        }
    }
}

pub fn write_output(
    destination: &Destination,
    games: &[&GameRecord],
    format: Format,
    include_raw: bool,
) -> Result<()> {
    match destination {
        Destination::Stdout => {
            let stdout = std::io::stdout();
            write_games(stdout.lock(), games, format, include_raw)
        }
        Destination::File(path) => {
            info!("Writing {} games to {}", games.len(), path.to_string_lossy());

            let output = std::fs::File::create(path).context(format!(
                "Could not open file {} for writing",
                path.to_string_lossy()
            ))?;

            write_games(std::io::BufWriter::new(output), games, format, include_raw)
                .context(format!("Could not write {}", path.to_string_lossy()))
        }
    }
}

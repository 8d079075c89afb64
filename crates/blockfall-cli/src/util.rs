use std::{
    fs::File,
    io::{self, BufReader, BufWriter, Write},
    path::Path,
};

use anyhow::Context;
use blockfall_engine::GameConfig;
use serde::Serialize;

/// Loads a game config from a JSON file; missing keys keep their defaults.
pub fn read_game_config(path: &Path) -> anyhow::Result<GameConfig> {
    let file = File::open(path)
        .with_context(|| format!("Failed to open game config file: {}", path.display()))?;
    serde_json::from_reader(BufReader::new(file))
        .with_context(|| format!("Failed to parse game config file: {}", path.display()))
}

/// Writes `report` as pretty JSON to `path`, or to stdout when no path is given.
pub fn write_report<T>(report: &T, path: Option<&Path>) -> anyhow::Result<()>
where
    T: Serialize,
{
    match path {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create report file: {}", path.display()))?;
            write_json(BufWriter::new(file), report)
                .with_context(|| format!("Failed to write report to {}", path.display()))
        }
        None => write_json(io::stdout().lock(), report).context("Failed to write report to stdout"),
    }
}

fn write_json<W, T>(mut writer: W, value: &T) -> anyhow::Result<()>
where
    W: Write,
    T: Serialize,
{
    serde_json::to_writer_pretty(&mut writer, value)?;
    writeln!(writer)?;
    writer.flush()?;
    Ok(())
}

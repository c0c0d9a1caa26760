//! JSON payload output

use crate::model::SearchAggregate;
use crate::output::OutputResult;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Writes the JSON payload followed by a newline
pub fn write_json<W: Write>(aggregate: &SearchAggregate, mut writer: W) -> OutputResult<()> {
    serde_json::to_writer_pretty(&mut writer, aggregate)?;
    writer.write_all(b"\n")?;
    writer.flush()?;
    Ok(())
}

/// Writes the JSON payload to `path`, replacing any existing file
pub fn write_json_file(aggregate: &SearchAggregate, path: &Path) -> OutputResult<()> {
    let file = File::create(path)?;
    write_json(aggregate, BufWriter::new(file))
}

use std::{fmt::Display, fs::File, io::Write, path::Path};

use anyhow::{Context, Result};
use csv::WriterBuilder;

use super::Alignment;

/// Writes the alignment as CSV with a `kind,source,target` header and one
/// row per step.
///
/// The consumed side of each row is left empty for insertions and deletions.
pub fn write_csv<T: Display>(alignment: &Alignment<'_, T>, writer: impl Write) -> Result<()> {
    let mut writer = WriterBuilder::new().from_writer(writer);
    writer.write_record(["kind", "source", "target"])?;

    for index in 0..alignment.len() {
        let kind = alignment.kind(index).to_string();
        let source = alignment
            .source_token(index)
            .map(ToString::to_string)
            .unwrap_or_default();
        let target = alignment
            .target_token(index)
            .map(ToString::to_string)
            .unwrap_or_default();

        writer.write_record([kind, source, target])?;
    }

    writer.flush()?;

    Ok(())
}

pub fn write_csv_file<T: Display>(
    alignment: &Alignment<'_, T>,
    path: impl AsRef<Path>,
) -> Result<()> {
    let path = path.as_ref();
    let file =
        File::create(path).with_context(|| format!("Error creating CSV file {path:?}"))?;

    write_csv(alignment, file)
}

//! Report serialization.

use std::io::Write;

use camino::Utf8Path;
use serde::Serialize;

use crate::CliError;

/// Write `report` to `output` when given, otherwise to `fallback`.
pub(crate) fn write_report<T>(
    output: Option<&Utf8Path>,
    fallback: &mut dyn Write,
    report: &T,
) -> Result<(), CliError>
where
    T: Serialize,
{
    output.map_or_else(
        || write_json(fallback, report),
        |path| {
            let mut file =
                maraude_fs::create_utf8_file(path).map_err(|source| CliError::CreateOutput {
                    path: path.to_path_buf(),
                    source,
                })?;
            write_json(&mut file, report)
        },
    )
}

fn write_json<T>(writer: &mut dyn Write, report: &T) -> Result<(), CliError>
where
    T: Serialize,
{
    let payload = serde_json::to_string_pretty(report).map_err(CliError::SerializeReport)?;
    writer
        .write_all(payload.as_bytes())
        .map_err(CliError::WriteReport)?;
    writer.write_all(b"\n").map_err(CliError::WriteReport)?;
    writer.flush().map_err(CliError::WriteReport)
}

//! Zone command implementation.

use super::output::format_zone_text;
use super::{CliError, OutputFormat};
use loco::{zone_info, ZoneCoord};

/// Execute the zone command.
///
/// # Errors
///
/// Returns an error if the coordinates are off the ring.
pub(crate) fn execute(x: i32, y: i32, format: OutputFormat) -> Result<(), CliError> {
    let info = zone_info(ZoneCoord::new(x, y)?);

    match format {
        OutputFormat::Text => print!("{}", format_zone_text(&info)),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&info)?),
    }

    Ok(())
}

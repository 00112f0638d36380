use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use picon_xref_core::ServiceKey;

use crate::error::CliError;

/// Print both canonical encodings of a reference.
pub(crate) fn run_normalize(reference: &str) -> Result<(), CliError> {
    let key: ServiceKey = reference.parse()?;
    log::info!(
        "{}",
        key.to_src().if_supports_color(Stdout, |t| t.bold())
    );
    log::info!("  XML: {}", key.to_xml_ref());
    log::info!("  SRC: {}", key.to_src());
    Ok(())
}

use std::path::Path;

use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use picon_xref_core::reconcile;
use picon_xref_sources::DirectorySink;

use crate::cli_types::{MatchArgs, XmlSourceArgs};
use crate::commands::{load_png_catalog, load_xml_catalog};
use crate::error::CliError;
use crate::settings::Settings;

/// Load both sources, reconcile them and write the four reports.
pub(crate) fn run_reconcile(
    settings: &Settings,
    xml: &XmlSourceArgs,
    logos_file: Option<&Path>,
    output_dir: Option<&Path>,
    matching: &MatchArgs,
    quiet: bool,
) -> Result<(), CliError> {
    let png_catalog = load_png_catalog(settings, logos_file, xml.refresh, quiet)?;
    let xml_catalog = load_xml_catalog(settings, xml, quiet)?;
    let options = settings.match_options(matching);

    let result = reconcile(&png_catalog, &xml_catalog, &options);
    for notice in &result.notices {
        log::warn!(
            "{} {notice}",
            "\u{26A0}".if_supports_color(Stdout, |t| t.yellow()),
        );
    }

    let dir = output_dir.unwrap_or(settings.output.dir.as_path());
    let mut sink = DirectorySink::new(dir);
    result.report.lines.write_to(&mut sink)?;

    log::info!("");
    log::info!("{}", "Summary".if_supports_color(Stdout, |t| t.bold()));
    for line in &result.report.lines.summary {
        log::info!("  {line}");
    }
    log::info!("");
    log::info!(
        "{} Reports written to {}",
        "\u{2714}".if_supports_color(Stdout, |t| t.green()),
        dir.display().if_supports_color(Stdout, |t| t.cyan()),
    );
    Ok(())
}

use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use picon_xref_core::{ServiceKey, resolve_variant, suggest_matches};

use crate::cli_types::{MatchArgs, XmlSourceArgs};
use crate::commands::load_xml_catalog;
use crate::error::CliError;
use crate::settings::Settings;

/// Rank channel-list entries against a single reference.
pub(crate) fn run_suggest(
    settings: &Settings,
    reference: &str,
    xml: &XmlSourceArgs,
    matching: &MatchArgs,
    quiet: bool,
) -> Result<(), CliError> {
    let key: ServiceKey = reference.parse()?;
    let catalog = load_xml_catalog(settings, xml, quiet)?;
    let options = settings.match_options(matching);

    log::info!("");
    if let Some(record) = catalog.get(&key) {
        log::info!(
            "{} {} is in the channel list: {} ({})",
            "\u{2714}".if_supports_color(Stdout, |t| t.green()),
            key,
            record.display_name.if_supports_color(Stdout, |t| t.bold()),
            record.satellites_label(),
        );
        return Ok(());
    }

    if let Some(variant) = resolve_variant(&key, &catalog) {
        let name = catalog
            .get(&variant)
            .map(|r| r.display_name.as_str())
            .unwrap_or_default();
        log::info!(
            "{} {} matches {} as decimal fields: {}",
            "\u{2714}".if_supports_color(Stdout, |t| t.green()),
            key,
            variant,
            name.if_supports_color(Stdout, |t| t.bold()),
        );
    }

    let results = suggest_matches(&key, &catalog, &options);
    if results.is_empty() {
        log::info!(
            "{}",
            format!("No suggestions scoring at least {}.", options.min_score)
                .if_supports_color(Stdout, |t| t.dimmed()),
        );
        return Ok(());
    }

    log::info!(
        "{}",
        format!("Suggestions for {key}:").if_supports_color(Stdout, |t| t.bold()),
    );
    for result in &results {
        let name = catalog
            .get(&result.candidate_key)
            .map(|r| r.display_name.as_str())
            .unwrap_or_default();
        log::info!(
            "  {:>2}  {}  {}",
            result.score,
            result.candidate_key,
            name.if_supports_color(Stdout, |t| t.cyan()),
        );
    }
    Ok(())
}

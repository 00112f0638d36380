use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use picon_xref_sources::SourceCache;

use super::format_bytes;
use crate::error::CliError;

/// List cached sources.
pub(crate) fn run_cache_list() -> Result<(), CliError> {
    let cache = SourceCache::open()?;
    let entries = cache.list()?;
    if entries.is_empty() {
        log::info!(
            "{}",
            "No cached sources.".if_supports_color(Stdout, |t| t.dimmed()),
        );
        log::info!("Run 'picon-xref run' to download them.");
        return Ok(());
    }

    log::info!(
        "{}",
        "Cached sources:".if_supports_color(Stdout, |t| t.bold()),
    );
    log::info!("");

    let mut total_size = 0u64;
    for entry in &entries {
        total_size += entry.file_size;
        log::info!(
            "  {}",
            entry.name.if_supports_color(Stdout, |t| t.bold()),
        );
        log::info!(
            "    {}",
            entry.url.if_supports_color(Stdout, |t| t.cyan()),
        );
        log::info!(
            "    Size: {}, Downloaded: {}",
            format_bytes(entry.file_size),
            entry.downloaded,
        );
    }
    log::info!("");
    log::info!(
        "Total: {} files, {} in {}",
        entries.len(),
        format_bytes(total_size),
        cache.root().display(),
    );
    Ok(())
}

/// Clear the source cache.
pub(crate) fn run_cache_clear() -> Result<(), CliError> {
    let freed = SourceCache::open()?.clear()?;
    log::info!(
        "{} Cache cleared ({} freed)",
        "\u{2714}".if_supports_color(Stdout, |t| t.green()),
        format_bytes(freed),
    );
    Ok(())
}

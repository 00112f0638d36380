pub(crate) mod cache;
pub(crate) mod config;
pub(crate) mod normalize;
pub(crate) mod run;
pub(crate) mod suggest;

use std::path::Path;

use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use picon_xref_core::{Catalog, SourceTag};
use picon_xref_sources::{
    SourceCache, fetch_logo_paths, parse_rytec_file, read_path_list,
};

use crate::cli_types::XmlSourceArgs;
use crate::error::CliError;
use crate::settings::Settings;
use crate::spinner::with_spinner;

/// Cache file name for the downloaded channel list.
const XML_CACHE_NAME: &str = "rytec.channels.xml";

/// Build the channel-list catalog from a local file or the cached download.
pub(crate) fn load_xml_catalog(
    settings: &Settings,
    args: &XmlSourceArgs,
    quiet: bool,
) -> Result<Catalog, CliError> {
    let path = match &args.xml_file {
        Some(path) => path.clone(),
        None => {
            let cache = SourceCache::open()?;
            let url = &settings.sources.xml_url;
            with_spinner("Fetching channel list...", quiet, || {
                cache.load_or_fetch(XML_CACHE_NAME, url, args.refresh)
            })?
        }
    };
    let entries = parse_rytec_file(&path)?;
    let catalog = Catalog::from_xml_entries(entries);
    log_catalog(&catalog, &path);
    Ok(catalog)
}

/// Build the logo catalog from a local path list or the repository tree.
pub(crate) fn load_png_catalog(
    settings: &Settings,
    logos_file: Option<&Path>,
    refresh: bool,
    quiet: bool,
) -> Result<Catalog, CliError> {
    let (paths, origin) = match logos_file {
        Some(file) => (read_path_list(file)?, file.display().to_string()),
        None => {
            let cache = SourceCache::open()?;
            let repo = settings.logo_repo();
            let paths = with_spinner("Fetching logo listing...", quiet, || {
                fetch_logo_paths(&cache, &repo, refresh)
            })?;
            (paths, format!("{}/{}", repo.owner, repo.repo))
        }
    };
    let catalog = Catalog::from_png_paths(paths);
    log_catalog(&catalog, Path::new(&origin));
    Ok(catalog)
}

fn log_catalog(catalog: &Catalog, origin: &Path) {
    let label = match catalog.source() {
        SourceTag::Xml => "channel entries",
        SourceTag::Png => "logo files",
    };
    log::info!(
        "{} {} {label} from {} ({} keys)",
        "\u{2714}".if_supports_color(Stdout, |t| t.green()),
        catalog.input_count(),
        origin.display(),
        catalog.len(),
    );
    if catalog.skipped() > 0 {
        log::warn!(
            "  {} {label} skipped: malformed service reference",
            catalog.skipped()
        );
    }
}

/// Human-readable byte count.
pub(crate) fn format_bytes(bytes: u64) -> String {
    const UNITS: [&str; 4] = ["B", "KB", "MB", "GB"];
    let mut value = bytes as f64;
    let mut unit = 0;
    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }
    if unit == 0 {
        format!("{bytes} B")
    } else {
        format!("{value:.1} {}", UNITS[unit])
    }
}

//! Persistent settings for the `picon-xref` binary.
//!
//! All settings live in `~/.config/picon-xref/settings.toml`. Every key is
//! optional; command-line flags override file values, which override the
//! built-in defaults.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use picon_xref_core::MatchOptions;
use picon_xref_sources::LogoRepo;

use crate::cli_types::MatchArgs;
use crate::error::CliError;

pub(crate) const DEFAULT_XML_URL: &str =
    "https://raw.githubusercontent.com/Belfagor2005/EPGimport-Sources/main/rytec.channels.xml";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub(crate) struct Settings {
    #[serde(default)]
    pub sources: SourceSettings,
    #[serde(default)]
    pub reconcile: ReconcileSettings,
    #[serde(default)]
    pub output: OutputSettings,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub(crate) struct SourceSettings {
    pub logo_owner: String,
    pub logo_repo: String,
    pub logo_branch: String,
    pub logo_root: String,
    pub xml_url: String,
}

impl Default for SourceSettings {
    fn default() -> Self {
        let repo = LogoRepo::default();
        Self {
            logo_owner: repo.owner,
            logo_repo: repo.repo,
            logo_branch: repo.branch,
            logo_root: repo.root,
            xml_url: DEFAULT_XML_URL.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub(crate) struct ReconcileSettings {
    pub min_score: u32,
    pub max_suggestions: usize,
    pub report_threshold: u32,
}

impl Default for ReconcileSettings {
    fn default() -> Self {
        let options = MatchOptions::default();
        Self {
            min_score: options.min_score,
            max_suggestions: options.max_suggestions,
            report_threshold: options.report_threshold,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub(crate) struct OutputSettings {
    pub dir: PathBuf,
}

impl Default for OutputSettings {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("picon-reports"),
        }
    }
}

impl Settings {
    pub(crate) fn logo_repo(&self) -> LogoRepo {
        LogoRepo {
            owner: self.sources.logo_owner.clone(),
            repo: self.sources.logo_repo.clone(),
            branch: self.sources.logo_branch.clone(),
            root: self.sources.logo_root.clone(),
        }
    }

    /// Ranking options with command-line overrides applied.
    pub(crate) fn match_options(&self, args: &MatchArgs) -> MatchOptions {
        MatchOptions::new()
            .min_score(args.min_score.unwrap_or(self.reconcile.min_score))
            .max_suggestions(args.max_suggestions.unwrap_or(self.reconcile.max_suggestions))
            .report_threshold(self.reconcile.report_threshold)
    }

    pub(crate) fn to_toml(&self) -> Result<String, CliError> {
        toml::to_string_pretty(self).map_err(|e| CliError::config(e.to_string()))
    }
}

/// Returns `~/.config/picon-xref/settings.toml`.
pub(crate) fn settings_path() -> PathBuf {
    let config = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
    config.join("picon-xref").join("settings.toml")
}

/// Parse settings from TOML text.
pub(crate) fn parse_settings(contents: &str) -> Result<Settings, CliError> {
    toml::from_str(contents).map_err(|e| CliError::config(e.to_string()))
}

/// Load settings from `path`, returning defaults if the file is missing.
pub(crate) fn load_settings_from(path: &Path) -> Result<Settings, CliError> {
    match std::fs::read_to_string(path) {
        Ok(contents) => parse_settings(&contents)
            .map_err(|e| CliError::config(format!("{}: {e}", path.display()))),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Settings::default()),
        Err(e) => Err(e.into()),
    }
}

pub(crate) fn load_settings() -> Result<Settings, CliError> {
    load_settings_from(&settings_path())
}

//! Logo paths from a GitHub repository tree, or from a local path list.

use std::path::Path;

use serde::Deserialize;

use crate::cache::SourceCache;
use crate::error::SourceError;

/// Where the logo repository lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogoRepo {
    pub owner: String,
    pub repo: String,
    pub branch: String,
    /// Directory inside the repository holding the logos
    pub root: String,
}

impl Default for LogoRepo {
    fn default() -> Self {
        Self {
            owner: "Belfagor2005".to_string(),
            repo: "logos".to_string(),
            branch: "main".to_string(),
            root: "logos".to_string(),
        }
    }
}

impl LogoRepo {
    /// Recursive git tree endpoint for the configured branch.
    pub fn tree_url(&self) -> String {
        format!(
            "https://api.github.com/repos/{}/{}/git/trees/{}?recursive=1",
            self.owner, self.repo, self.branch
        )
    }

    /// Name the tree listing is cached under.
    pub fn cache_name(&self) -> String {
        format!("{}-{}-{}-tree.json", self.owner, self.repo, self.branch)
    }
}

#[derive(Debug, Deserialize)]
struct TreeListing {
    #[serde(default)]
    tree: Vec<TreeEntry>,
    #[serde(default)]
    truncated: bool,
    /// Set on API error bodies (`{"message": "Not Found", ...}`)
    message: Option<String>,
}

#[derive(Debug, Deserialize)]
struct TreeEntry {
    path: String,
    #[serde(rename = "type")]
    kind: String,
}

fn is_logo_path(path: &str, root: &str) -> bool {
    let root = root.trim_matches('/');
    let under_root = root.is_empty()
        || path
            .strip_prefix(root)
            .is_some_and(|rest| rest.starts_with('/'));
    under_root && path.to_ascii_lowercase().ends_with(".png")
}

/// Extract `.png` blob paths under `root` from a git tree JSON body.
pub fn parse_tree_listing(json: &str, root: &str) -> Result<Vec<String>, SourceError> {
    let listing: TreeListing = serde_json::from_str(json)?;
    if let Some(message) = listing.message {
        return Err(SourceError::invalid_source(format!(
            "GitHub tree listing: {message}"
        )));
    }
    if listing.truncated {
        log::warn!("GitHub tree listing was truncated, some logos will be missing");
    }
    Ok(listing
        .tree
        .into_iter()
        .filter(|entry| entry.kind == "blob" && is_logo_path(&entry.path, root))
        .map(|entry| entry.path)
        .collect())
}

/// Logo paths for `repo`, through the download cache.
pub fn fetch_logo_paths(
    cache: &SourceCache,
    repo: &LogoRepo,
    refresh: bool,
) -> Result<Vec<String>, SourceError> {
    let path = cache.load_or_fetch(&repo.cache_name(), &repo.tree_url(), refresh)?;
    let json = std::fs::read_to_string(&path)?;
    let paths = parse_tree_listing(&json, &repo.root)?;
    log::debug!("{} logo paths under {}/{}", paths.len(), repo.repo, repo.root);
    Ok(paths)
}

/// Parse a path list: one logo path per line, blank lines and `#` comments
/// ignored.
pub fn parse_path_list(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(str::to_string)
        .collect()
}

/// Read a path list from a local file.
pub fn read_path_list(path: &Path) -> Result<Vec<String>, SourceError> {
    let text = std::fs::read_to_string(path)?;
    Ok(parse_path_list(&text))
}

#[cfg(test)]
#[path = "tests/github_tests.rs"]
mod tests;

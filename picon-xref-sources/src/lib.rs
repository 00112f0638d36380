//! Fetching and reading the two reconciliation inputs, and writing reports.

pub mod cache;
pub mod error;
pub mod github;
pub mod rytec;
pub mod sink;

pub use cache::{CacheEntry, SourceCache};
pub use error::SourceError;
pub use github::{LogoRepo, fetch_logo_paths, parse_tree_listing, read_path_list};
pub use rytec::{parse_rytec, parse_rytec_file};
pub use sink::DirectorySink;

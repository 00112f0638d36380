use std::fs;
use std::path::{Path, PathBuf};

use picon_xref_core::ReportSink;

use crate::error::SourceError;

/// Writes each named report to `<dir>/<name>.txt`, one line per entry.
#[derive(Debug, Clone)]
pub struct DirectorySink {
    dir: PathBuf,
}

impl DirectorySink {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn report_path(&self, name: &str) -> PathBuf {
        self.dir.join(format!("{name}.txt"))
    }
}

impl ReportSink for DirectorySink {
    type Error = SourceError;

    fn write_report(&mut self, name: &str, lines: &[String]) -> Result<(), SourceError> {
        fs::create_dir_all(&self.dir)?;
        let mut contents = lines.join("\n");
        if !contents.is_empty() {
            contents.push('\n');
        }
        let path = self.report_path(name);
        fs::write(&path, contents)?;
        log::debug!("Wrote {} lines to {}", lines.len(), path.display());
        Ok(())
    }
}

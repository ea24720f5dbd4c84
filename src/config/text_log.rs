use crate::domain::ports::RecordSink;
use crate::utils::error::Result;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

pub const RECORD_DELIMITER: &str = "----------------------------------------";

/// Appends rendered records to a plain-text file.
#[derive(Debug, Clone)]
pub struct TextLogSink {
    path: PathBuf,
}

impl TextLogSink {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn append(&self, text: &str) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        file.write_all(text.as_bytes())?;
        Ok(())
    }
}

impl RecordSink for TextLogSink {
    fn begin_session(&mut self) -> Result<()> {
        let stamp = chrono::Utc::now().format("%Y-%m-%d %H:%M:%S UTC");
        self.append(&format!("=== Roster saved {} ===\n", stamp))
    }

    fn write_record(&mut self, rendered: &str) -> Result<()> {
        self.append(&format!("{}\n{}\n", rendered, RECORD_DELIMITER))?;
        tracing::debug!(path = %self.path.display(), "record appended");
        Ok(())
    }
}

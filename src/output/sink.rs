use super::row::{ReportRow, HEADER};
use crate::error::OutputError;
use std::fs::{self, OpenOptions};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Append-mode CSV writer that buffers rows and flushes them in batches.
///
/// The header is written only when the file does not exist yet, so an
/// interrupted export can be continued into the same file.
pub struct CsvSink {
    path: PathBuf,
    batch_size: usize,
    buffer: Vec<ReportRow>,
    saved: usize,
}

impl CsvSink {
    pub fn open(path: &Path, batch_size: usize) -> Result<Self, OutputError> {
        if !path.exists() {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                fs::create_dir_all(parent)?;
            }
            let mut writer = csv::Writer::from_path(path)?;
            writer.write_record(HEADER)?;
            writer.flush()?;
            debug!("Created {} with header", path.display());
        }

        Ok(Self {
            path: path.to_path_buf(),
            batch_size: batch_size.max(1),
            buffer: Vec::with_capacity(batch_size),
            saved: 0,
        })
    }

    pub fn push(&mut self, row: ReportRow) -> Result<(), OutputError> {
        self.buffer.push(row);
        if self.buffer.len() >= self.batch_size {
            self.flush()?;
        }
        Ok(())
    }

    /// Append buffered rows to the file
    pub fn flush(&mut self) -> Result<(), OutputError> {
        if self.buffer.is_empty() {
            return Ok(());
        }

        let file = OpenOptions::new()
            .append(true)
            .open(&self.path)
            .map_err(|e| OutputError::Open {
                path: self.path.clone(),
                source: e,
            })?;
        let mut writer = csv::Writer::from_writer(file);
        for row in &self.buffer {
            writer.write_record(row.fields())?;
        }
        writer.flush()?;

        self.saved += self.buffer.len();
        debug!(
            "Flushed {} rows to {} ({} total)",
            self.buffer.len(),
            self.path.display(),
            self.saved
        );
        self.buffer.clear();
        Ok(())
    }

    /// Flush the remainder and return the number of rows saved
    pub fn finish(mut self) -> Result<usize, OutputError> {
        self.flush()?;
        Ok(self.saved)
    }

    #[cfg(test)]
    pub fn buffered(&self) -> usize {
        self.buffer.len()
    }
}

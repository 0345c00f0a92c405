//! Writing per-query result sets to disk.

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use mapscrape_core::{ExportFormat, ListingRecord};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("I/O error writing {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("CSV error writing {path}: {source}")]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("JSON error writing {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Destination for a finished query's records.
pub trait RecordSink {
    /// Persists `records` under the file stem `stem` and returns where they went.
    ///
    /// # Errors
    ///
    /// Returns [`ExportError`] if the records could not be written.
    fn export(&mut self, stem: &str, records: &[ListingRecord]) -> Result<PathBuf, ExportError>;
}

/// Writes one file per query into a directory.
#[derive(Debug, Clone)]
pub struct FileExporter {
    dir: PathBuf,
    format: ExportFormat,
}

impl FileExporter {
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>, format: ExportFormat) -> Self {
        Self {
            dir: dir.into(),
            format,
        }
    }

    #[must_use]
    pub fn path_for(&self, stem: &str) -> PathBuf {
        self.dir.join(format!("{stem}.{}", self.format.extension()))
    }

    fn write_csv(path: &Path, records: &[ListingRecord]) -> Result<(), ExportError> {
        let csv_err = |source| ExportError::Csv {
            path: path.to_path_buf(),
            source,
        };
        let mut writer = csv::Writer::from_path(path).map_err(csv_err)?;
        writer
            .write_record(ListingRecord::HEADERS)
            .map_err(csv_err)?;
        for record in records {
            writer.write_record(record.to_row()).map_err(csv_err)?;
        }
        writer.flush().map_err(|source| ExportError::Io {
            path: path.to_path_buf(),
            source,
        })
    }

    fn write_json(path: &Path, records: &[ListingRecord]) -> Result<(), ExportError> {
        let io_err = |source| ExportError::Io {
            path: path.to_path_buf(),
            source,
        };
        let file = File::create(path).map_err(io_err)?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut writer, records).map_err(|source| {
            ExportError::Json {
                path: path.to_path_buf(),
                source,
            }
        })?;
        writer.write_all(b"\n").map_err(io_err)?;
        writer.flush().map_err(io_err)
    }
}

impl RecordSink for FileExporter {
    fn export(&mut self, stem: &str, records: &[ListingRecord]) -> Result<PathBuf, ExportError> {
        fs::create_dir_all(&self.dir).map_err(|source| ExportError::Io {
            path: self.dir.clone(),
            source,
        })?;

        let path = self.path_for(stem);
        match self.format {
            ExportFormat::Csv => Self::write_csv(&path, records)?,
            ExportFormat::Json => Self::write_json(&path, records)?,
        }

        tracing::info!(path = %path.display(), records = records.len(), "exported results");
        Ok(path)
    }
}

use common::config::{ConfigError, WriterConfig};
use std::{fs, path::PathBuf};

use crate::{
    error::WriteError,
    table::{Requirement, Table},
};

/// Destination for validated tables.
pub trait TableSink {
    /// Persists one table and returns where it was written.
    fn write_table(&mut self, table: &Table) -> Result<PathBuf, WriteError>;
}

/// Writes each table as `<output_dir>/<table>.csv`, overwriting existing files.
#[derive(Debug, Clone)]
pub struct CsvDirectorySink {
    output_dir: PathBuf,
    delimiter: u8,
}

impl CsvDirectorySink {
    pub fn new(output_dir: impl Into<PathBuf>, delimiter: u8) -> Self {
        Self {
            output_dir: output_dir.into(),
            delimiter,
        }
    }

    pub fn from_config(config: &WriterConfig) -> Result<Self, ConfigError> {
        Ok(Self::new(config.output_dir.clone(), config.delimiter_byte()?))
    }
}

impl TableSink for CsvDirectorySink {
    fn write_table(&mut self, table: &Table) -> Result<PathBuf, WriteError> {
        fs::create_dir_all(&self.output_dir).map_err(|source| WriteError::Io {
            path: self.output_dir.clone(),
            source,
        })?;
        let path = self.output_dir.join(table.file_name());
        let csv_error = |source| WriteError::Csv {
            path: path.clone(),
            source,
        };

        let mut writer = csv::WriterBuilder::new()
            .delimiter(self.delimiter)
            .from_path(&path)
            .map_err(csv_error)?;

        writer.write_record(table.columns()).map_err(csv_error)?;
        for row in table.rows() {
            writer
                .write_record(row.iter().map(|cell| cell.as_deref().unwrap_or("")))
                .map_err(csv_error)?;
        }
        writer.flush().map_err(|source| WriteError::Io {
            path: path.clone(),
            source,
        })?;

        tracing::debug!(rows = table.len(), "Wrote {:?}", path);
        Ok(path)
    }
}

/// Validates a batch of tables and hands them to a [`TableSink`].
pub struct TableWriter<S: TableSink> {
    sink: S,
    strict_optional_tables: bool,
}

impl<S: TableSink> TableWriter<S> {
    pub fn new(sink: S, strict_optional_tables: bool) -> Self {
        Self {
            sink,
            strict_optional_tables,
        }
    }

    /// Fails on the first empty table that must not be empty. Nothing is written on failure.
    pub fn validate(&self, tables: &[Table]) -> Result<(), WriteError> {
        for table in tables.iter().filter(|table| table.is_empty()) {
            match table.requirement() {
                Requirement::Optional if !self.strict_optional_tables => {
                    tracing::warn!(
                        table = table.name(),
                        "Table is empty (this might be expected)"
                    );
                }
                _ => {
                    return Err(WriteError::EmptyTable {
                        table: table.name().to_string(),
                    });
                }
            }
        }
        Ok(())
    }

    pub fn write_all(&mut self, tables: &[Table]) -> Result<Vec<PathBuf>, WriteError> {
        self.validate(tables)?;
        tracing::info!("All tables successfully created");

        let written = tables
            .iter()
            .map(|table| self.sink.write_table(table))
            .collect::<Result<Vec<_>, _>>()?;

        tracing::info!(files = written.len(), "Data successfully parsed and saved as CSV files");
        Ok(written)
    }
}

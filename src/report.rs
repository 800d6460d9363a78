//! Report sink trait and the CSV implementation.
//!
//! Column layout is `full_path, filename, creation_time_utc,
//! modification_time_utc, access_time_utc, <alg...>, size` with the algorithm
//! columns in configuration order. One row per successfully processed file;
//! files that fail filtering or hashing produce no row.

use std::io::Write;

use anyhow::{Context, Result};

use crate::hashing::AlgorithmSet;
use crate::models::FileRecord;

/// Receives ordered rows and appends them to the output record.
pub trait ReportSink {
    fn write_record(&mut self, record: &FileRecord) -> Result<()>;
}

/// CSV report writer with a configurable single-byte delimiter.
pub struct CsvReport<W: Write> {
    writer: csv::Writer<W>,
}

impl<W: Write> CsvReport<W> {
    /// Wrap `inner` and immediately write the header row derived from the
    /// configured algorithm set.
    pub fn new(inner: W, delimiter: u8, algorithms: &AlgorithmSet) -> Result<Self> {
        let mut writer = csv::WriterBuilder::new()
            .delimiter(delimiter)
            .from_writer(inner);

        let mut header: Vec<&str> = vec![
            "full_path",
            "filename",
            "creation_time_utc",
            "modification_time_utc",
            "access_time_utc",
        ];
        header.extend(algorithms.names().iter().map(String::as_str));
        header.push("size");

        writer
            .write_record(&header)
            .context("Failed to write report header")?;

        Ok(CsvReport { writer })
    }

    pub fn flush(&mut self) -> Result<()> {
        self.writer.flush().context("Failed to flush report")
    }
}

impl<W: Write> ReportSink for CsvReport<W> {
    fn write_record(&mut self, record: &FileRecord) -> Result<()> {
        let mut row: Vec<&str> = Vec::with_capacity(6 + record.digests.len());
        row.push(&record.full_path);
        row.push(&record.filename);
        row.push(&record.creation_time_utc);
        row.push(&record.modification_time_utc);
        row.push(&record.access_time_utc);
        for (_, digest) in &record.digests {
            row.push(digest);
        }
        row.push(&record.size);

        self.writer
            .write_record(&row)
            .context("Failed to write report row")
    }
}

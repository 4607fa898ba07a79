//! Writing visit records to CSV or JSON Lines

use std::fmt;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use tracing::debug;

use crate::events::VisitRecord;
use crate::simulation::{SimulationError, SimulationResult};
use crate::types::OutputFormat;

enum Sink<W: Write> {
    Csv(csv::Writer<W>),
    JsonLines(BufWriter<W>),
}

/// Streams visit records in the configured format
pub struct RecordWriter<W: Write> {
    format: OutputFormat,
    sink: Sink<W>,
    written: usize,
}

impl<W: Write> fmt::Debug for RecordWriter<W> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RecordWriter")
            .field("format", &self.format)
            .field("written", &self.written)
            .finish()
    }
}

impl RecordWriter<Box<dyn Write>> {
    /// Writer for a file path, or stdout when `path` is `None`
    pub fn create(path: Option<&str>, format: OutputFormat) -> SimulationResult<Self> {
        let destination: Box<dyn Write> = match path {
            Some(path) => Box::new(File::create(Path::new(path))?),
            None => Box::new(io::stdout()),
        };
        Ok(Self::new(destination, format))
    }
}

impl<W: Write> RecordWriter<W> {
    /// Wrap `writer`; the CSV header is emitted with the first record
    pub fn new(writer: W, format: OutputFormat) -> Self {
        let sink = match format {
            OutputFormat::Csv => Sink::Csv(csv::Writer::from_writer(writer)),
            OutputFormat::JsonLines => Sink::JsonLines(BufWriter::new(writer)),
        };

        Self {
            format,
            sink,
            written: 0,
        }
    }

    /// Format being written
    pub fn format(&self) -> OutputFormat {
        self.format
    }

    /// Records written so far
    pub fn written(&self) -> usize {
        self.written
    }

    /// Write one record
    pub fn write_record(&mut self, record: &VisitRecord) -> SimulationResult<()> {
        match &mut self.sink {
            Sink::Csv(writer) => writer.serialize(record)?,
            Sink::JsonLines(writer) => {
                serde_json::to_writer(&mut *writer, record)?;
                writer.write_all(b"\n")?;
            }
        }
        self.written += 1;
        Ok(())
    }

    /// Write every record in order, returning how many were written
    pub fn write_all(&mut self, records: &[VisitRecord]) -> SimulationResult<usize> {
        for record in records {
            self.write_record(record)?;
        }
        debug!("Wrote {} {} records", records.len(), self.format);
        Ok(records.len())
    }

    /// Flush buffered output and return the underlying writer
    pub fn finish(self) -> SimulationResult<W> {
        match self.sink {
            Sink::Csv(writer) => writer
                .into_inner()
                .map_err(|e| SimulationError::export_error(e.error().to_string())),
            Sink::JsonLines(writer) => writer
                .into_inner()
                .map_err(|e| SimulationError::IoError(e.into_error())),
        }
    }
}

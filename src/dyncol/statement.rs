//! Batching decoded objects into INSERT statements

use crate::dyncol::encoder::ValueEncoder;
use crate::dyncol::writer::StatementWriter;
use crate::error::ConfigError;
use crate::types::{ConvertReport, Diagnostic, InsertConfig};
use anyhow::Result;
use serde_json::{Map, Value};
use std::io::{BufReader, Read, Write};
use tracing::{debug, info, warn};

type JsonObject = Map<String, Value>;

/// Objects read for one statement
struct Batch {
    /// Encoded `COLUMN_CREATE(...)` terms, in input order
    terms: Vec<String>,

    /// The stream ended (cleanly or not) while filling this batch
    exhausted: bool,
}

/// Drives the batch loop: decode objects, encode them, emit one statement per batch
pub struct StatementAssembler {
    config: InsertConfig,
    prefix: String,
    encoder: ValueEncoder,
}

impl StatementAssembler {
    pub fn new(config: InsertConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let prefix = config.statement_prefix();
        Ok(StatementAssembler {
            config,
            prefix,
            encoder: ValueEncoder::new(),
        })
    }

    /// Convert every object in `reader` and write the statements to `writer`.
    ///
    /// Only output failures are returned as errors. Malformed input ends the
    /// run early and is recorded in the report like the other diagnostics.
    pub fn run<R: Read, W: Write>(&mut self, reader: R, writer: W) -> Result<ConvertReport> {
        let mut stream = serde_json::Deserializer::from_reader(BufReader::new(reader))
            .into_iter::<Option<JsonObject>>();
        let mut writer = StatementWriter::new(writer);
        let mut report = ConvertReport::default();

        loop {
            let batch = self.read_batch(&mut stream, &mut report.diagnostics);

            // At least one value was read
            if !batch.terms.is_empty() {
                report.objects += batch.terms.len();
                let statement = render_statement(&self.prefix, &batch.terms, self.config.pretty);
                writer.write_statement(&statement)?;
                debug!(objects = batch.terms.len(), "Wrote statement");
            }

            if batch.exhausted {
                break;
            }
        }

        writer.flush()?;
        report.statements = writer.written();

        if report.objects == 0 {
            warn!("{}", Diagnostic::NoValidValues);
            report.diagnostics.push(Diagnostic::NoValidValues);
        }

        info!(
            objects = report.objects,
            statements = report.statements,
            "Conversion finished"
        );
        Ok(report)
    }

    /// Decode up to `insert_size` objects.
    ///
    /// A decode failure truncates the batch; nothing after the bad token is read.
    fn read_batch<I>(&mut self, stream: &mut I, diagnostics: &mut Vec<Diagnostic>) -> Batch
    where
        I: Iterator<Item = serde_json::Result<Option<JsonObject>>>,
    {
        let mut terms = Vec::with_capacity(self.config.insert_size);

        while terms.len() < self.config.insert_size {
            match stream.next() {
                Some(Ok(obj)) => {
                    // A top-level null reads as an object with no members
                    let obj = obj.unwrap_or_default();
                    terms.push(self.encoder.encode_object(&obj));
                    diagnostics.append(&mut self.encoder.take_diagnostics());
                }
                Some(Err(err)) => {
                    warn!("{}", err);
                    diagnostics.push(Diagnostic::Decode {
                        message: err.to_string(),
                        line: err.line(),
                        column: err.column(),
                    });
                    return Batch { terms, exhausted: true };
                }
                None => return Batch { terms, exhausted: true },
            }
        }

        Batch { terms, exhausted: false }
    }
}

/// Join encoded objects into one `INSERT ... values (...),(...);` statement
pub fn render_statement(prefix: &str, terms: &[String], pretty: bool) -> String {
    let separator = if pretty { ",\n" } else { "," };
    let body = terms
        .iter()
        .map(|term| format!(" ({})", term))
        .collect::<Vec<_>>()
        .join(separator);
    format!("{}{};", prefix, body)
}

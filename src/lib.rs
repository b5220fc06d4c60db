//! # jsontodyncol - JSON to MariaDB dynamic columns
//!
//! Reads a stream of JSON objects and turns each one into a
//! `COLUMN_CREATE(...)` expression inside `INSERT` statements, ready to be
//! piped into a MariaDB client.
//!
//! ## Modules
//!
//! - **dyncol**: value encoding, literal quoting and statement batching
//!
//! ## Quick Start
//!
//! ```rust
//! use jsontodyncol::{convert_json, InsertConfig};
//!
//! # fn main() -> anyhow::Result<()> {
//! let input = r#"{"name": "Alice", "tags": ["a", "b"]} {"name": "Bob"}"#;
//! let config = InsertConfig::new("users", "attrs").with_insert_size(2);
//!
//! let mut output = Vec::new();
//! let report = convert_json(input.as_bytes(), &mut output, config)?;
//!
//! assert_eq!(report.objects, 2);
//! assert_eq!(report.statements, 1);
//! # Ok(())
//! # }
//! ```

use anyhow::Result;
use std::io::{Read, Write};

pub mod dyncol;
pub mod error;
pub mod types;

// Re-export commonly used types for convenience
pub use dyncol::{StatementAssembler, StatementWriter, ValueEncoder};
pub use error::ConfigError;
pub use types::{ConvertReport, Diagnostic, InsertConfig};

/// Main entry point: convert a JSON object stream into INSERT statements
pub fn convert_json<R: Read, W: Write>(
    reader: R,
    writer: W,
    config: InsertConfig,
) -> Result<ConvertReport> {
    let mut assembler = StatementAssembler::new(config)?;
    assembler.run(reader, writer)
}

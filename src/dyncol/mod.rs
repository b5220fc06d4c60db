//! JSON to dynamic column conversion
//!
//! Each decoded JSON object becomes a `COLUMN_CREATE(...)` expression, and
//! objects are grouped into multi-row `INSERT` statements.

pub mod encoder;
pub mod escape;
pub mod statement;
pub mod writer;

pub use encoder::{format_number, ValueEncoder};
pub use escape::{quote_ascii, quote_readable, sql_literal};
pub use statement::{render_statement, StatementAssembler};
pub use writer::StatementWriter;

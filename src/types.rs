use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Configuration for the conversion process
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InsertConfig {
    /// Optional schema the table lives in, e.g. "shop" for `shop.orders`
    pub database: Option<String>,

    /// Target table name
    pub table: String,

    /// Dynamic column the encoded objects are stored in
    pub column: String,

    /// Number of encoded objects per INSERT statement
    pub insert_size: usize,

    /// Put a newline after each `),` separator
    pub pretty: bool,
}

impl InsertConfig {
    pub fn new(table: impl Into<String>, column: impl Into<String>) -> Self {
        InsertConfig {
            database: None,
            table: table.into(),
            column: column.into(),
            insert_size: 1,
            pretty: false,
        }
    }

    /// Qualify the table with a database name. An empty name means no database.
    pub fn with_database(mut self, database: impl Into<String>) -> Self {
        let database = database.into();
        self.database = if database.is_empty() { None } else { Some(database) };
        self
    }

    pub fn with_insert_size(mut self, insert_size: usize) -> Self {
        self.insert_size = insert_size;
        self
    }

    pub fn with_pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }

    /// Check the required fields before any input is read
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.table.is_empty() {
            return Err(ConfigError::MissingTable);
        }
        if self.column.is_empty() {
            return Err(ConfigError::MissingColumn);
        }
        if self.insert_size == 0 {
            return Err(ConfigError::InvalidInsertSize(self.insert_size));
        }
        Ok(())
    }

    /// The fixed text every statement starts with
    pub fn statement_prefix(&self) -> String {
        let mut prefix = String::from("INSERT INTO ");
        if let Some(ref database) = self.database {
            prefix.push_str(database);
            prefix.push('.');
        }
        prefix.push_str(&self.table);
        prefix.push('(');
        prefix.push_str(&self.column);
        prefix.push_str(") values");
        prefix
    }
}

/// A non-fatal problem found while converting
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Diagnostic {
    /// An array element that has no dynamic column form; it was dropped
    UnsupportedElement { value: String },

    /// The input stopped being valid JSON objects; the rest was not read
    Decode {
        message: String,
        line: usize,
        column: usize,
    },

    /// Nothing was converted in the whole run
    NoValidValues,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Diagnostic::UnsupportedElement { value } => write!(f, "Unknown type: {}", value),
            Diagnostic::Decode { message, .. } => f.write_str(message),
            Diagnostic::NoValidValues => f.write_str("No valid values read."),
        }
    }
}

/// Summary of one conversion run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConvertReport {
    /// Objects encoded into statements
    pub objects: usize,

    /// Statements written to the output
    pub statements: usize,

    /// Everything reported along the way, in order
    pub diagnostics: Vec<Diagnostic>,
}

impl ConvertReport {
    pub fn has_decode_error(&self) -> bool {
        self.diagnostics
            .iter()
            .any(|d| matches!(d, Diagnostic::Decode { .. }))
    }
}

/// Errors raised while validating an [`InsertConfig`](crate::InsertConfig)
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("No table name provided! See -help output for more info.")]
    MissingTable,

    #[error("No column provided! See -help output for more info.")]
    MissingColumn,

    #[error("Invalid insert size {0}: each statement needs at least one value")]
    InvalidInsertSize(usize),
}

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("expected {expected} rows, got {got}")]
    RowCount { expected: usize, got: usize },

    #[error("row {row} has {got} cells, expected {expected}")]
    RowLength {
        row: usize,
        expected: usize,
        got: usize,
    },

    #[error("invalid character '{character}' at row {row}, column {col}")]
    InvalidCell {
        character: char,
        row: usize,
        col: usize,
    },

    #[error("unknown difficulty '{0}' (expected easy, normal or hard)")]
    UnknownDifficulty(String),
}

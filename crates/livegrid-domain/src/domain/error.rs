use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GridError {
    #[error("Grid is not rectangular: row {row} has {actual} columns, expected {expected}")]
    InvalidShape {
        row: usize,
        expected: usize,
        actual: usize,
    },
    #[error("Grid has no cells")]
    EmptyGrid,
    #[error("Cell ({row}, {col}) is out of range for a {rows}x{columns} grid")]
    IndexOutOfRange {
        row: usize,
        col: usize,
        rows: usize,
        columns: usize,
    },
}

impl GridError {
    pub fn kind(&self) -> &'static str {
        match self {
            GridError::InvalidShape { .. } => "invalid_shape",
            GridError::EmptyGrid => "empty_grid",
            GridError::IndexOutOfRange { .. } => "index_out_of_range",
        }
    }
}

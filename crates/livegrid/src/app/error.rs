use std::io;

use thiserror::Error;

use crate::adapters::presenter::ErrorView;
use crate::infra::ConfigError;

/// Exit codes following sysexits.h conventions.
pub mod exit_codes {
    pub const SUCCESS: i32 = 0;
    pub const USAGE: i32 = 64;
    pub const IOERR: i32 = 74;
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Terminal error: {0}")]
    Terminal(#[from] io::Error),

    #[error("Invalid configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("Nothing to show: the grid is {rows} x {columns}")]
    EmptyGrid { rows: usize, columns: usize },
}

impl AppError {
    pub fn exit_code(&self) -> i32 {
        match self {
            AppError::Terminal(_) => exit_codes::IOERR,
            AppError::Config(_) | AppError::EmptyGrid { .. } => exit_codes::USAGE,
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            AppError::Terminal(_) => "terminal",
            AppError::Config(_) => "config",
            AppError::EmptyGrid { .. } => "empty_grid",
        }
    }

    pub fn suggestion(&self) -> &'static str {
        match self {
            AppError::Terminal(_) => "Run livegrid from an interactive terminal.",
            AppError::Config(ConfigError::ZeroInterval) => {
                "Pass --interval-ms with a value above zero."
            }
            AppError::Config(ConfigError::CellTooNarrow(_)) => "Pass --cell-width 3 or wider.",
            AppError::EmptyGrid { .. } => "Pass --rows and --columns above zero.",
        }
    }

    pub fn to_view(&self) -> ErrorView {
        ErrorView {
            error: self.to_string(),
            kind: self.kind(),
            exit_code: self.exit_code(),
            suggestion: Some(self.suggestion().to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_codes_follow_sysexits() {
        let io_err = AppError::from(io::Error::other("no tty"));
        assert_eq!(io_err.exit_code(), exit_codes::IOERR);

        let config = AppError::from(ConfigError::ZeroInterval);
        assert_eq!(config.exit_code(), exit_codes::USAGE);

        let empty = AppError::EmptyGrid {
            rows: 0,
            columns: 5,
        };
        assert_eq!(empty.exit_code(), exit_codes::USAGE);
        assert_eq!(empty.to_string(), "Nothing to show: the grid is 0 x 5");
    }

    #[test]
    fn test_view_carries_kind_and_code() {
        let view = AppError::from(ConfigError::CellTooNarrow(1)).to_view();
        assert_eq!(view.kind, "config");
        assert_eq!(view.exit_code, exit_codes::USAGE);
        assert!(view.suggestion.is_some());
    }
}

//! Grid and runtime configuration.

use std::env;
use std::str::FromStr;
use std::time::Duration;

use thiserror::Error;
use tracing::warn;

use crate::domain::RenderMode;

pub const DEFAULT_ROWS: usize = 100;
pub const DEFAULT_COLUMNS: usize = 5;
const DEFAULT_INTERVAL_MS: u64 = 200;
const DEFAULT_FLASH_MS: u64 = 300;
const DEFAULT_CELL_WIDTH: u16 = 10;
const DEFAULT_MAX_VALUE: u32 = 100;
const MIN_CELL_WIDTH: u16 = 3;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Tick interval must be greater than zero")]
    ZeroInterval,
    #[error("Cell width {0} is too narrow; the minimum is 3")]
    CellTooNarrow(u16),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridConfig {
    rows: usize,
    columns: usize,
    interval: Duration,
    flash: Duration,
    render_mode: RenderMode,
    cell_width: u16,
    max_value: u32,
    initial_value: String,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self::from_env()
    }
}

impl GridConfig {
    /// Built-in defaults, ignoring the environment.
    pub fn builtin() -> Self {
        Self {
            rows: DEFAULT_ROWS,
            columns: DEFAULT_COLUMNS,
            interval: Duration::from_millis(DEFAULT_INTERVAL_MS),
            flash: Duration::from_millis(DEFAULT_FLASH_MS),
            render_mode: RenderMode::Push,
            cell_width: DEFAULT_CELL_WIDTH,
            max_value: DEFAULT_MAX_VALUE,
            initial_value: "0".to_string(),
        }
    }

    pub fn from_env() -> Self {
        Self {
            rows: parse_env("LIVEGRID_ROWS", DEFAULT_ROWS),
            columns: parse_env("LIVEGRID_COLUMNS", DEFAULT_COLUMNS),
            interval: Duration::from_millis(parse_env("LIVEGRID_INTERVAL_MS", DEFAULT_INTERVAL_MS)),
            flash: Duration::from_millis(parse_env("LIVEGRID_FLASH_MS", DEFAULT_FLASH_MS)),
            render_mode: parse_env("LIVEGRID_RENDER_MODE", RenderMode::Push),
            ..Self::builtin()
        }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn columns(&self) -> usize {
        self.columns
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn flash(&self) -> Duration {
        self.flash
    }

    pub fn render_mode(&self) -> RenderMode {
        self.render_mode
    }

    pub fn cell_width(&self) -> u16 {
        self.cell_width
    }

    pub fn max_value(&self) -> u32 {
        self.max_value
    }

    pub fn initial_value(&self) -> &str {
        &self.initial_value
    }

    pub fn with_rows(mut self, rows: usize) -> Self {
        self.rows = rows;
        self
    }

    pub fn with_columns(mut self, columns: usize) -> Self {
        self.columns = columns;
        self
    }

    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    pub fn with_flash(mut self, flash: Duration) -> Self {
        self.flash = flash;
        self
    }

    pub fn with_render_mode(mut self, mode: RenderMode) -> Self {
        self.render_mode = mode;
        self
    }

    pub fn with_cell_width(mut self, width: u16) -> Self {
        self.cell_width = width;
        self
    }

    pub fn with_max_value(mut self, max: u32) -> Self {
        self.max_value = max;
        self
    }

    pub fn with_initial_value(mut self, value: impl Into<String>) -> Self {
        self.initial_value = value.into();
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.interval.is_zero() {
            return Err(ConfigError::ZeroInterval);
        }
        if self.cell_width < MIN_CELL_WIDTH {
            return Err(ConfigError::CellTooNarrow(self.cell_width));
        }
        Ok(())
    }
}

fn parse_env<T: FromStr>(key: &str, default: T) -> T {
    let value = match env::var(key) {
        Ok(value) => value,
        Err(_) => return default,
    };
    if value.trim().is_empty() {
        return default;
    }
    match value.trim().parse::<T>() {
        Ok(parsed) => parsed,
        Err(_) => {
            warn!(value = %value, key, "Invalid config value; using default");
            default
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    static ENV_LOCK: Mutex<()> = Mutex::new(());

    struct EnvGuard {
        key: &'static str,
        prev: Option<String>,
    }

    impl EnvGuard {
        fn set(key: &'static str, value: &str) -> Self {
            let prev = env::var(key).ok();
            // SAFETY: Test-only environment override, serialized by ENV_LOCK.
            unsafe {
                env::set_var(key, value);
            }
            Self { key, prev }
        }
    }

    impl Drop for EnvGuard {
        fn drop(&mut self) {
            if let Some(prev) = self.prev.take() {
                // SAFETY: Test-only environment restoration.
                unsafe {
                    env::set_var(self.key, prev);
                }
            } else {
                // SAFETY: Test-only environment cleanup.
                unsafe {
                    env::remove_var(self.key);
                }
            }
        }
    }

    #[test]
    fn test_builtin_config() {
        let config = GridConfig::builtin();
        assert_eq!(config.rows(), DEFAULT_ROWS);
        assert_eq!(config.columns(), DEFAULT_COLUMNS);
        assert_eq!(config.interval(), Duration::from_millis(DEFAULT_INTERVAL_MS));
        assert_eq!(config.flash(), Duration::from_millis(DEFAULT_FLASH_MS));
        assert_eq!(config.render_mode(), RenderMode::Push);
        assert_eq!(config.initial_value(), "0");
        assert_eq!(config.validate(), Ok(()));
    }

    #[test]
    fn test_builder_pattern() {
        let config = GridConfig::builtin()
            .with_rows(4)
            .with_columns(100)
            .with_interval(Duration::from_millis(50))
            .with_flash(Duration::from_millis(10))
            .with_render_mode(RenderMode::RedrawAll)
            .with_cell_width(6)
            .with_max_value(9)
            .with_initial_value("-");

        assert_eq!(config.rows(), 4);
        assert_eq!(config.columns(), 100);
        assert_eq!(config.interval(), Duration::from_millis(50));
        assert_eq!(config.flash(), Duration::from_millis(10));
        assert_eq!(config.render_mode(), RenderMode::RedrawAll);
        assert_eq!(config.cell_width(), 6);
        assert_eq!(config.max_value(), 9);
        assert_eq!(config.initial_value(), "-");
    }

    #[test]
    fn test_env_overrides() {
        let _lock = ENV_LOCK.lock().unwrap_or_else(|p| p.into_inner());
        let _rows = EnvGuard::set("LIVEGRID_ROWS", "4");
        let _cols = EnvGuard::set("LIVEGRID_COLUMNS", " 100 ");
        let _mode = EnvGuard::set("LIVEGRID_RENDER_MODE", "redraw-all");

        let config = GridConfig::from_env();
        assert_eq!(config.rows(), 4);
        assert_eq!(config.columns(), 100);
        assert_eq!(config.render_mode(), RenderMode::RedrawAll);
    }

    #[test]
    fn test_invalid_env_uses_defaults() {
        let _lock = ENV_LOCK.lock().unwrap_or_else(|p| p.into_inner());
        let _rows = EnvGuard::set("LIVEGRID_ROWS", "many");
        let _interval = EnvGuard::set("LIVEGRID_INTERVAL_MS", "-5");
        let _flash = EnvGuard::set("LIVEGRID_FLASH_MS", "");
        let _mode = EnvGuard::set("LIVEGRID_RENDER_MODE", "sideways");

        let config = GridConfig::from_env();
        assert_eq!(config.rows(), DEFAULT_ROWS);
        assert_eq!(config.interval(), Duration::from_millis(DEFAULT_INTERVAL_MS));
        assert_eq!(config.flash(), Duration::from_millis(DEFAULT_FLASH_MS));
        assert_eq!(config.render_mode(), RenderMode::Push);
    }

    #[test]
    fn test_validate_rejects_zero_interval_and_narrow_cells() {
        let zero = GridConfig::builtin().with_interval(Duration::ZERO);
        assert_eq!(zero.validate(), Err(ConfigError::ZeroInterval));

        let narrow = GridConfig::builtin().with_cell_width(2);
        assert_eq!(narrow.validate(), Err(ConfigError::CellTooNarrow(2)));
    }
}

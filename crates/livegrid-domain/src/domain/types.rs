use std::fmt;
use std::str::FromStr;

/// Logical address of a cell in the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CellPosition {
    pub row: usize,
    pub col: usize,
}

impl CellPosition {
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

impl fmt::Display for CellPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// A reusable visual placeholder owned by the grid widget.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SlotId(usize);

impl SlotId {
    pub fn new(index: usize) -> Self {
        Self(index)
    }

    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for SlotId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "slot#{}", self.0)
    }
}

/// How value changes reach the screen.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum RenderMode {
    /// Each slot subscribes to its item and is updated on every write.
    #[default]
    Push,
    /// Nothing subscribes; every visible slot is re-rendered after each tick.
    RedrawAll,
}

impl RenderMode {
    pub fn as_str(self) -> &'static str {
        match self {
            RenderMode::Push => "push",
            RenderMode::RedrawAll => "redraw-all",
        }
    }
}

impl fmt::Display for RenderMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RenderMode {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "push" => Ok(RenderMode::Push),
            "redraw-all" | "redraw_all" | "poll" => Ok(RenderMode::RedrawAll),
            other => Err(format!(
                "unknown render mode '{other}' (expected push or redraw-all)"
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_mode_parsing() {
        assert_eq!("push".parse::<RenderMode>(), Ok(RenderMode::Push));
        assert_eq!(" Redraw-All ".parse::<RenderMode>(), Ok(RenderMode::RedrawAll));
        assert_eq!("poll".parse::<RenderMode>(), Ok(RenderMode::RedrawAll));
        assert!("flash".parse::<RenderMode>().is_err());
    }

    #[test]
    fn test_render_mode_round_trips_through_display() {
        for mode in [RenderMode::Push, RenderMode::RedrawAll] {
            assert_eq!(mode.to_string().parse::<RenderMode>(), Ok(mode));
        }
    }

    #[test]
    fn test_position_display() {
        assert_eq!(CellPosition::new(2, 5).to_string(), "(2, 5)");
        assert_eq!(SlotId::new(3).to_string(), "slot#3");
    }
}

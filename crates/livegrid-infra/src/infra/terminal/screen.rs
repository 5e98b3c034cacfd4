use super::CellStyle;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cell {
    pub char: char,
    pub style: CellStyle,
}

impl Default for Cell {
    fn default() -> Self {
        Self {
            char: ' ',
            style: CellStyle::default(),
        }
    }
}

/// Fixed-size grid of styled characters, one frame's worth of output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScreenBuffer {
    pub cells: Vec<Vec<Cell>>,
}

impl ScreenBuffer {
    pub fn new(cols: usize, rows: usize) -> Self {
        Self {
            cells: vec![vec![Cell::default(); cols]; rows],
        }
    }

    pub fn rows(&self) -> usize {
        self.cells.len()
    }

    pub fn cols(&self) -> usize {
        self.cells.first().map(Vec::len).unwrap_or(0)
    }

    /// Writes `text` starting at (`row`, `col`), clipped at the right edge.
    /// Returns how many characters landed on screen.
    pub fn put_str(&mut self, row: usize, col: usize, text: &str, style: CellStyle) -> usize {
        let Some(line) = self.cells.get_mut(row) else {
            return 0;
        };
        let mut written = 0;
        for (cell, ch) in line.iter_mut().skip(col).zip(text.chars()) {
            *cell = Cell { char: ch, style };
            written += 1;
        }
        written
    }

    /// Restyles `width` cells without touching their characters.
    pub fn paint(&mut self, row: usize, col: usize, width: usize, style: CellStyle) {
        if let Some(line) = self.cells.get_mut(row) {
            for cell in line.iter_mut().skip(col).take(width) {
                cell.style = style;
            }
        }
    }

    pub fn row_text(&self, row: usize) -> Option<String> {
        self.cells
            .get(row)
            .map(|line| line.iter().map(|cell| cell.char).collect())
    }

    pub fn to_plain_text(&self) -> String {
        (0..self.rows())
            .filter_map(|row| self.row_text(row))
            .map(|line| line.trim_end().to_string())
            .collect::<Vec<_>>()
            .join("\n")
    }
}

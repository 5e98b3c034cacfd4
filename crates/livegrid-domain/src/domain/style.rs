//! Screen styling types.

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Color {
    Default,
    Indexed(u8),
    Rgb(u8, u8, u8),
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct CellStyle {
    pub bold: bool,
    pub underline: bool,
    pub inverse: bool,
    pub fg_color: Option<Color>,
    pub bg_color: Option<Color>,
}

impl CellStyle {
    /// Style of a slot whose item changed recently.
    pub fn flash() -> Self {
        Self {
            bold: true,
            fg_color: Some(Color::Indexed(0)),
            bg_color: Some(Color::Indexed(11)),
            ..Self::default()
        }
    }

    /// Style of row and column labels.
    pub fn header() -> Self {
        Self {
            bold: true,
            fg_color: Some(Color::Indexed(8)),
            ..Self::default()
        }
    }

    pub fn status() -> Self {
        Self {
            inverse: true,
            ..Self::default()
        }
    }
}

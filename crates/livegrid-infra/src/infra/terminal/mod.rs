//! Terminal drawing: styled screen buffers, their crossterm encoding, and the
//! slot surface that feeds them.

mod render;
mod screen;
mod surface;

pub use crate::domain::CellStyle;
pub use crate::domain::Color;
pub use render::render_screen;
pub use screen::Cell;
pub use screen::ScreenBuffer;
pub use surface::FrameLayout;
pub use surface::SurfaceStats;
pub use surface::TerminalSurface;

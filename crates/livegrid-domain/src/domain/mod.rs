//! Cell values, the grid that owns them, and the types shared by outer layers.

mod error;
mod grid;
mod item;
mod style;
mod types;

pub use error::GridError;
pub use grid::GridModel;
pub use grid::ItemGrid;
pub use item::CellChange;
pub use item::DataItem;
pub use item::SubscriptionId;
pub use style::CellStyle;
pub use style::Color;
pub use types::CellPosition;
pub use types::RenderMode;
pub use types::SlotId;

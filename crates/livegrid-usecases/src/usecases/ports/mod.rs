//! Port interfaces owned by use cases.

pub mod cell_surface;
pub mod clock;
#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

pub use cell_surface::CellSurface;
pub use cell_surface::CellSurfaceHandle;
pub use clock::Clock;

mod binding;
mod mutation;
mod redraw;
mod timer;

pub mod ports;

pub use binding::{BindingController, BindingStats};
pub use mutation::{DriverStats, MutationDriver, TickOutcome, ValueRange};
pub use redraw::{RedrawReport, redraw_slots};
pub use timer::IntervalTimer;

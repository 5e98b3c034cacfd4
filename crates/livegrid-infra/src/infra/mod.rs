pub mod clock;
pub mod config;
pub mod terminal;
pub mod viewport;

pub use clock::ManualClock;
pub use clock::SystemClock;
pub use config::ConfigError;
pub use config::GridConfig;
pub use viewport::Viewport;
pub use terminal::FrameLayout;
pub use terminal::ScreenBuffer;
pub use terminal::TerminalSurface;
pub use terminal::render_screen;

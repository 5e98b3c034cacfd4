mod recording_surface;

pub use recording_surface::RecordingSurface;
pub use recording_surface::SurfaceEvent;

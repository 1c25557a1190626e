pub mod tick;
pub mod time;
pub mod time_scale;
pub mod viewport;
pub mod zoom;

pub use tick::Tick;
pub use time::TimeMs;
pub use time_scale::TimeScale;
pub use viewport::Viewport;
pub use zoom::{ZOOM_CONFIGS, ZoomConfig, ZoomLevel};

//! gantt-rs: time-scale and viewport engine for interactive Gantt charts.
//!
//! This crate owns the numeric core of a zoomable timeline: the discrete
//! zoom catalog, time/pixel projection, tick-grid generation, clamped
//! pan/zoom state, touch/wheel gesture interpretation, and activity-bar
//! layout. It performs no I/O and no rendering; hosts feed it resources,
//! activities and pointer events and draw the geometry it returns.

pub mod api;
pub mod core;
pub mod error;
pub mod interaction;
pub mod layout;
pub mod telemetry;

pub use api::{GanttEngine, GanttEngineConfig};
pub use error::{GanttError, GanttResult};

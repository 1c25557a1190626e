pub mod engine;

pub use engine::{GanttEngine, GanttEngineConfig, GanttGroup, GanttLayout, GanttRow};

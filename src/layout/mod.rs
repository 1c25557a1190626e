pub mod bars;
pub mod grouping;

pub use bars::{Activity, GanttBar, GanttServiceRange, ServiceRole, bars_in_window, service_ranges};
pub use grouping::{GroupKey, Resource, ResourceCategory, ResourceGroup, group_resources};

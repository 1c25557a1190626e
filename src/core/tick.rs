use serde::{Deserialize, Serialize};

use crate::core::time::TimeMs;

/// One labeled cell of the time ruler.
///
/// Ticks returned for a window are ordered by `offset_px`, contiguous and
/// non-overlapping; cells at the timeline boundary are clipped, so
/// `width_px` can be shorter than the zoom level's step.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tick {
    /// Clipped cell start.
    pub time: TimeMs,
    pub label: String,
    /// Heading for the major-step bucket this cell falls in.
    pub major_label: Option<String>,
    /// Secondary label, present only in cells wide enough to carry it.
    pub minor_label: Option<String>,
    pub width_px: f64,
    /// Pixel position of the cell's left edge, measured from the timeline
    /// start so ticks are scroll-position independent.
    pub offset_px: f64,
    /// Position on the minor grid, counted from the grid cell containing
    /// the timeline start.
    pub index: i64,
    pub is_major: bool,
    pub is_weekend: bool,
    pub is_now: bool,
}

use serde::{Deserialize, Serialize};

use crate::core::tick::Tick;
use crate::core::time::{
    MS_PER_DAY, TimeMs, ceil_to_step, floor_to_step, is_weekend, now_ms, same_utc_day,
};
use crate::core::zoom;
use crate::error::{GanttError, GanttResult};

/// Cells narrower than this fall back to the compact label.
pub const COMPACT_LABEL_WIDTH_PX: f64 = 48.0;
/// Cells need at least this width before a minor label is attached.
pub const MINOR_LABEL_WIDTH_PX: f64 = 68.0;

/// Projection between absolute time and pixel offsets for fixed timeline
/// bounds, plus tick-grid generation for a visible window.
///
/// Pixel offsets are measured from `timeline_start`, so consecutive
/// renders at one density produce pixel-stable output independent of
/// scroll position.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimeScale {
    timeline_start: TimeMs,
    timeline_end: TimeMs,
    pixels_per_ms: f64,
}

impl TimeScale {
    pub fn new(
        timeline_start: TimeMs,
        timeline_end: TimeMs,
        pixels_per_ms: f64,
    ) -> GanttResult<Self> {
        validate_range(timeline_start, timeline_end)?;
        validate_density(pixels_per_ms)?;
        Ok(Self {
            timeline_start,
            timeline_end,
            pixels_per_ms,
        })
    }

    /// Builds a scale from bounds the caller has already validated.
    pub(crate) fn from_validated(
        timeline_start: TimeMs,
        timeline_end: TimeMs,
        pixels_per_ms: f64,
    ) -> Self {
        debug_assert!(timeline_end > timeline_start);
        debug_assert!(pixels_per_ms.is_finite() && pixels_per_ms > 0.0);
        Self {
            timeline_start,
            timeline_end,
            pixels_per_ms,
        }
    }

    #[must_use]
    pub fn timeline_start(self) -> TimeMs {
        self.timeline_start
    }

    #[must_use]
    pub fn timeline_end(self) -> TimeMs {
        self.timeline_end
    }

    #[must_use]
    pub fn pixels_per_ms(self) -> f64 {
        self.pixels_per_ms
    }

    /// Replaces the timeline bounds, rejecting degenerate ranges without
    /// touching current state.
    pub fn set_timeline_range(&mut self, start: TimeMs, end: TimeMs) -> GanttResult<()> {
        validate_range(start, end)?;
        self.timeline_start = start;
        self.timeline_end = end;
        Ok(())
    }

    pub fn set_pixels_per_ms(&mut self, pixels_per_ms: f64) -> GanttResult<()> {
        validate_density(pixels_per_ms)?;
        self.pixels_per_ms = pixels_per_ms;
        Ok(())
    }

    /// Pixel offset of `time` from the timeline start.
    ///
    /// The instant is clamped into the timeline bounds first, so off-range
    /// input never yields negative or beyond-content pixels.
    #[must_use]
    pub fn time_to_px(self, time: TimeMs) -> f64 {
        let clamped = time.clamp(self.timeline_start, self.timeline_end);
        (clamped - self.timeline_start) as f64 * self.pixels_per_ms
    }

    /// Inverse of [`Self::time_to_px`], intentionally unclamped: pointer
    /// positions may fall slightly outside rendered content during a drag.
    #[must_use]
    pub fn px_to_time(self, px: f64) -> TimeMs {
        if !px.is_finite() {
            return self.timeline_start;
        }
        self.timeline_start + (px / self.pixels_per_ms).round() as TimeMs
    }

    /// Total rendered width of the timeline in pixels, floored at 1.
    #[must_use]
    pub fn content_width(self) -> f64 {
        let span = (self.timeline_end - self.timeline_start) as f64;
        (span * self.pixels_per_ms).round().max(1.0)
    }

    /// Tick grid covering `[view_start, view_end)`, using wall-clock time
    /// for the `is_now` flag.
    #[must_use]
    pub fn get_ticks(&self, view_start: TimeMs, view_end: TimeMs) -> Vec<Tick> {
        self.ticks_with_now(view_start, view_end, now_ms())
    }

    /// Tick grid with an explicit "now" instant; deterministic variant of
    /// [`Self::get_ticks`].
    #[must_use]
    pub fn ticks_with_now(
        &self,
        view_start: TimeMs,
        view_end: TimeMs,
        now: TimeMs,
    ) -> Vec<Tick> {
        let config = zoom::nearest_by_density(self.pixels_per_ms);
        let step = config.step_ms;
        let major_step = config.major_step_ms;

        // Ticks beyond the timeline are clipped away anyway; bounding the
        // walk keeps hostile windows from producing unbounded iteration.
        let view_start = view_start.max(self.timeline_start.saturating_sub(step));
        let view_end = view_end.min(self.timeline_end.saturating_add(step));
        if view_end <= view_start {
            return Vec::new();
        }

        let snapped_start = floor_to_step(view_start, step);
        let snapped_end = ceil_to_step(view_end, step);

        // Grid cell numbering anchored at the cell containing the
        // timeline start, so `index` is scroll-position independent.
        let grid_base = floor_to_step(self.timeline_start, step);

        let mut ticks = Vec::with_capacity(((snapped_end - snapped_start) / step) as usize + 1);
        let mut ts = snapped_start;
        while ts < snapped_end {
            let grid_start = ts;
            ts += step;
            let cell_start = grid_start.max(self.timeline_start);
            let cell_end = (grid_start + step).min(self.timeline_end);
            if cell_end <= cell_start {
                continue;
            }

            let width_px = (cell_end - cell_start) as f64 * self.pixels_per_ms;
            let offset_px = (cell_start - self.timeline_start) as f64 * self.pixels_per_ms;
            let grid_offset = cell_start - self.timeline_start;
            let is_major = grid_offset.rem_euclid(major_step) == 0;
            let bucket_start = cell_start - grid_offset.rem_euclid(major_step);

            let label = if width_px < COMPACT_LABEL_WIDTH_PX {
                config.level.compact_label(cell_start)
            } else {
                config.level.label(cell_start)
            };
            let minor_label = if width_px >= MINOR_LABEL_WIDTH_PX {
                config.level.minor_label(bucket_start)
            } else {
                None
            };

            let is_now = if step >= MS_PER_DAY {
                same_utc_day(cell_start, now)
            } else {
                now >= cell_start && now < cell_end
            };

            ticks.push(Tick {
                time: cell_start,
                label,
                major_label: Some(config.level.major_label(bucket_start)),
                minor_label,
                width_px,
                offset_px,
                index: (grid_start - grid_base).div_euclid(step),
                is_major,
                is_weekend: is_weekend(cell_start),
                is_now,
            });
        }

        ticks
    }
}

fn validate_range(start: TimeMs, end: TimeMs) -> GanttResult<()> {
    if end <= start {
        return Err(GanttError::InvalidRange { start, end });
    }
    Ok(())
}

fn validate_density(pixels_per_ms: f64) -> GanttResult<()> {
    if !pixels_per_ms.is_finite() || pixels_per_ms <= 0.0 {
        return Err(GanttError::InvalidData(
            "pixel density must be finite and > 0".to_owned(),
        ));
    }
    Ok(())
}

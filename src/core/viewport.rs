use serde::{Deserialize, Serialize};

use crate::core::time::{TimeMs, now_ms};
use crate::core::time_scale::TimeScale;
use crate::core::zoom::{self, ZoomLevel};
use crate::error::{GanttError, GanttResult};

/// Authoritative pan/zoom state for one chart instance.
///
/// The viewport owns the timeline bounds, the visible window start, the
/// discrete zoom level and the live pixel density. The window end, the
/// scroll offset and the projection used by ruler and bars are all
/// derived on demand, so there is no second state holder to reconcile.
///
/// `pixels_per_ms` normally equals the zoom level's canonical density but
/// may diverge mid-pinch; [`Viewport::snap_to_catalog`] restores it when
/// the gesture ends.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    timeline_start: TimeMs,
    timeline_end: TimeMs,
    view_start: TimeMs,
    zoom_level: ZoomLevel,
    pixels_per_ms: f64,
}

impl Viewport {
    pub fn new(
        timeline_start: TimeMs,
        timeline_end: TimeMs,
        initial_zoom: ZoomLevel,
        initial_center: Option<TimeMs>,
    ) -> GanttResult<Self> {
        if timeline_end <= timeline_start {
            return Err(GanttError::InvalidRange {
                start: timeline_start,
                end: timeline_end,
            });
        }

        let config = zoom::config_for(initial_zoom);
        let mut viewport = Self {
            timeline_start,
            timeline_end,
            view_start: timeline_start,
            zoom_level: initial_zoom,
            pixels_per_ms: config.px_per_ms,
        };
        let center =
            initial_center.unwrap_or_else(|| midpoint(timeline_start, timeline_end));
        viewport.center_on(center);
        Ok(viewport)
    }

    #[must_use]
    pub fn timeline_start(&self) -> TimeMs {
        self.timeline_start
    }

    #[must_use]
    pub fn timeline_end(&self) -> TimeMs {
        self.timeline_end
    }

    #[must_use]
    pub fn view_start(&self) -> TimeMs {
        self.view_start
    }

    /// Current visible window duration: the catalog value for the active
    /// zoom level, independent of any mid-pinch density override.
    #[must_use]
    pub fn range_ms(&self) -> i64 {
        zoom::config_for(self.zoom_level).range_ms
    }

    #[must_use]
    pub fn view_end(&self) -> TimeMs {
        self.view_start + self.range_ms()
    }

    #[must_use]
    pub fn view_center(&self) -> TimeMs {
        midpoint(self.view_start, self.view_end())
    }

    #[must_use]
    pub fn zoom_level(&self) -> ZoomLevel {
        self.zoom_level
    }

    #[must_use]
    pub fn pixels_per_ms(&self) -> f64 {
        self.pixels_per_ms
    }

    /// Projection for the current bounds and density.
    #[must_use]
    pub fn scale(&self) -> TimeScale {
        TimeScale::from_validated(self.timeline_start, self.timeline_end, self.pixels_per_ms)
    }

    /// Pixel offset of the visible window's left edge from the timeline
    /// start; hosts use it to sync scroll-linked containers.
    #[must_use]
    pub fn scroll_x(&self) -> f64 {
        (self.view_start - self.timeline_start) as f64 * self.pixels_per_ms
    }

    /// Replaces the timeline bounds, keeping the zoom level and
    /// re-centering on the previous focal center as far as the new bounds
    /// allow. Degenerate ranges are rejected without state change.
    pub fn set_timeline_range(&mut self, start: TimeMs, end: TimeMs) -> GanttResult<()> {
        if end <= start {
            return Err(GanttError::InvalidRange { start, end });
        }
        let center = self.view_center();
        self.timeline_start = start;
        self.timeline_end = end;
        self.center_on(center);
        Ok(())
    }

    /// Switches zoom level and re-centers on `center` (default: current
    /// view center). Same-level calls only re-center.
    pub fn set_zoom(&mut self, level: ZoomLevel, center: Option<TimeMs>) {
        let center = center.unwrap_or_else(|| self.view_center());
        if level != self.zoom_level {
            self.zoom_level = level;
            self.pixels_per_ms = zoom::config_for(level).px_per_ms;
        }
        self.center_on(center);
    }

    /// Steps to the adjacent finer level; no-op at the finest end.
    /// Returns whether the level changed.
    pub fn zoom_in(&mut self, center: Option<TimeMs>) -> bool {
        match self.zoom_level.finer() {
            Some(finer) => {
                self.set_zoom(finer, center);
                true
            }
            None => false,
        }
    }

    /// Steps to the adjacent coarser level; no-op at the coarsest end.
    /// Returns whether the level changed.
    pub fn zoom_out(&mut self, center: Option<TimeMs>) -> bool {
        match self.zoom_level.coarser() {
            Some(coarser) => {
                self.set_zoom(coarser, center);
                true
            }
            None => false,
        }
    }

    /// Shifts the window by a pixel delta at the current density.
    /// Non-finite input is ignored.
    pub fn scroll_by(&mut self, delta_px: f64) {
        if !delta_px.is_finite() {
            return;
        }
        let delta_ms = (delta_px / self.pixels_per_ms).round() as i64;
        self.view_start = self.view_start.saturating_add(delta_ms);
        self.clamp_to_timeline();
    }

    /// Positions the window's left edge at an absolute pixel offset from
    /// the timeline start. Non-finite input is ignored.
    pub fn set_scroll_px(&mut self, px: f64) {
        if !px.is_finite() {
            return;
        }
        let offset_ms = (px / self.pixels_per_ms).round() as i64;
        self.view_start = self.timeline_start.saturating_add(offset_ms);
        self.clamp_to_timeline();
    }

    /// Re-centers the current-width window on `time`, clamped.
    pub fn goto(&mut self, time: TimeMs) {
        self.center_on(time);
    }

    pub fn goto_today(&mut self) {
        self.goto(now_ms());
    }

    /// Mid-pinch density override, decoupling the projection from the
    /// discrete catalog until the gesture ends. Non-finite or
    /// non-positive values are ignored.
    pub fn set_pixels_per_ms(&mut self, pixels_per_ms: f64) {
        if !pixels_per_ms.is_finite() || pixels_per_ms <= 0.0 {
            return;
        }
        self.pixels_per_ms = pixels_per_ms;
    }

    /// Snaps the live density back to the nearest catalog level and adopts
    /// that level, preserving the current view center.
    pub fn snap_to_catalog(&mut self) {
        let config = zoom::nearest_by_density(self.pixels_per_ms);
        let center = self.view_center();
        self.zoom_level = config.level;
        self.pixels_per_ms = config.px_per_ms;
        self.center_on(center);
    }

    fn center_on(&mut self, center: TimeMs) {
        self.view_start = center.saturating_sub(self.range_ms() / 2);
        self.clamp_to_timeline();
    }

    /// Valid `view_start` range is `[timeline_start, timeline_end -
    /// range_ms]`; when the window is wider than the timeline the window
    /// collapses onto the timeline start.
    fn clamp_to_timeline(&mut self) {
        let range = self.range_ms();
        if self.timeline_end - self.timeline_start >= range {
            self.view_start = self
                .view_start
                .clamp(self.timeline_start, self.timeline_end - range);
        } else {
            self.view_start = self.timeline_start;
        }
    }
}

fn midpoint(start: TimeMs, end: TimeMs) -> TimeMs {
    start + (end - start) / 2
}

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::core::tick::Tick;
use crate::core::time::{TimeMs, unix_ms_to_datetime};
use crate::core::viewport::Viewport;
use crate::core::zoom::ZoomLevel;
use crate::error::GanttResult;
use crate::interaction::{GestureInterpreter, GestureState, PointerEvent, WheelEvent};
use crate::layout::{
    Activity, GanttBar, GanttServiceRange, GroupKey, Resource, bars_in_window, group_resources,
    service_ranges,
};

/// Construction parameters for [`GanttEngine`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GanttEngineConfig {
    pub timeline_start: TimeMs,
    pub timeline_end: TimeMs,
    pub initial_zoom: ZoomLevel,
    pub initial_center: Option<TimeMs>,
}

impl GanttEngineConfig {
    #[must_use]
    pub fn new(timeline_start: TimeMs, timeline_end: TimeMs) -> Self {
        Self {
            timeline_start,
            timeline_end,
            initial_zoom: ZoomLevel::Week,
            initial_center: None,
        }
    }

    #[must_use]
    pub fn with_zoom(mut self, level: ZoomLevel) -> Self {
        self.initial_zoom = level;
        self
    }

    #[must_use]
    pub fn with_center(mut self, center: TimeMs) -> Self {
        self.initial_center = Some(center);
        self
    }
}

/// One laid-out resource row: bars plus service overlay bands.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GanttRow {
    pub resource_id: String,
    pub name: String,
    pub bars: Vec<GanttBar>,
    pub service_ranges: Vec<GanttServiceRange>,
}

/// One group band with its rows; collapsed groups carry no rows.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GanttGroup {
    pub key: GroupKey,
    pub label: String,
    pub collapsed: bool,
    pub rows: Vec<GanttRow>,
}

/// Full layout of the current window, recomputed per render pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GanttLayout {
    pub groups: Vec<GanttGroup>,
}

/// Facade wiring viewport, gesture interpretation and layout together
/// for one chart instance.
///
/// All mutation is synchronous; derived output (ticks, layout) is pure
/// over current state and never cached across calls, so hosts recompute
/// after every state change that could move it.
#[derive(Debug, Clone)]
pub struct GanttEngine {
    viewport: Viewport,
    gestures: GestureInterpreter,
    resources: Vec<Resource>,
    activities: Vec<Activity>,
    collapsed: HashSet<GroupKey>,
}

impl GanttEngine {
    pub fn new(config: GanttEngineConfig) -> GanttResult<Self> {
        let viewport = Viewport::new(
            config.timeline_start,
            config.timeline_end,
            config.initial_zoom,
            config.initial_center,
        )?;
        debug!(
            timeline_start = config.timeline_start,
            timeline_end = config.timeline_end,
            zoom = ?config.initial_zoom,
            "gantt engine created"
        );
        Ok(Self {
            viewport,
            gestures: GestureInterpreter::new(),
            resources: Vec::new(),
            activities: Vec::new(),
            collapsed: HashSet::new(),
        })
    }

    #[must_use]
    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    #[must_use]
    pub fn gesture_state(&self) -> GestureState {
        self.gestures.state()
    }

    #[must_use]
    pub fn zoom_level(&self) -> ZoomLevel {
        self.viewport.zoom_level()
    }

    // Navigation surface; every operation clamps inside the viewport.

    pub fn set_timeline_range(&mut self, start: TimeMs, end: TimeMs) -> GanttResult<()> {
        self.viewport.set_timeline_range(start, end)?;
        debug!(start, end, "timeline range replaced");
        Ok(())
    }

    pub fn set_zoom(&mut self, level: ZoomLevel, center: Option<TimeMs>) {
        self.viewport.set_zoom(level, center);
        debug!(zoom = ?level, "zoom set");
    }

    pub fn zoom_in(&mut self) -> bool {
        self.viewport.zoom_in(None)
    }

    pub fn zoom_out(&mut self) -> bool {
        self.viewport.zoom_out(None)
    }

    pub fn scroll_by(&mut self, delta_px: f64) {
        self.viewport.scroll_by(delta_px);
    }

    pub fn set_scroll_px(&mut self, px: f64) {
        self.viewport.set_scroll_px(px);
    }

    pub fn goto(&mut self, time: TimeMs) {
        self.viewport.goto(time);
    }

    pub fn goto_today(&mut self) {
        self.viewport.goto_today();
    }

    // Projection surface.

    #[must_use]
    pub fn time_to_px(&self, time: TimeMs) -> f64 {
        self.viewport.scale().time_to_px(time)
    }

    #[must_use]
    pub fn px_to_time(&self, px: f64) -> TimeMs {
        self.viewport.scale().px_to_time(px)
    }

    #[must_use]
    pub fn content_width(&self) -> f64 {
        self.viewport.scale().content_width()
    }

    #[must_use]
    pub fn scroll_x(&self) -> f64 {
        self.viewport.scroll_x()
    }

    /// Ticks for an arbitrary window at the current projection.
    #[must_use]
    pub fn get_ticks(&self, view_start: TimeMs, view_end: TimeMs) -> Vec<Tick> {
        self.viewport.scale().get_ticks(view_start, view_end)
    }

    /// Ticks for the currently visible window.
    #[must_use]
    pub fn ticks(&self) -> Vec<Tick> {
        self.get_ticks(self.viewport.view_start(), self.viewport.view_end())
    }

    /// Human-readable label for the visible window, phrased at the
    /// current zoom granularity.
    #[must_use]
    pub fn view_range_label(&self) -> String {
        let start = unix_ms_to_datetime(self.viewport.view_start());
        let end = unix_ms_to_datetime(self.viewport.view_end());
        match self.viewport.zoom_level() {
            ZoomLevel::Quarter | ZoomLevel::Month | ZoomLevel::Week => format!(
                "{} – {}",
                start.format("%d %b %Y"),
                end.format("%d %b %Y")
            ),
            ZoomLevel::Day => start.format("%a %d %b %Y").to_string(),
            ZoomLevel::Hour | ZoomLevel::FiveMin => format!(
                "{} – {}",
                start.format("%d %b %Y %H:%M"),
                end.format("%H:%M")
            ),
        }
    }

    // Data surface. The engine never mutates host data, it only replaces
    // its own copies wholesale.

    pub fn set_resources(&mut self, resources: Vec<Resource>) {
        trace!(count = resources.len(), "resources replaced");
        self.resources = resources;
    }

    pub fn set_activities(&mut self, activities: Vec<Activity>) {
        trace!(count = activities.len(), "activities replaced");
        self.activities = activities;
    }

    pub fn set_group_collapsed(&mut self, key: GroupKey, collapsed: bool) {
        if collapsed {
            self.collapsed.insert(key);
        } else {
            self.collapsed.remove(&key);
        }
    }

    /// Flips a group's collapsed state; returns the new state.
    pub fn toggle_group(&mut self, key: &GroupKey) -> bool {
        if self.collapsed.remove(key) {
            false
        } else {
            self.collapsed.insert(key.clone());
            true
        }
    }

    #[must_use]
    pub fn is_group_collapsed(&self, key: &GroupKey) -> bool {
        self.collapsed.contains(key)
    }

    /// Lays out grouped rows and bar geometry for the current window.
    #[must_use]
    pub fn layout(&self) -> GanttLayout {
        let scale = self.viewport.scale();
        let view_start = self.viewport.view_start();
        let view_end = self.viewport.view_end();

        let by_id: HashMap<&str, &Resource> = self
            .resources
            .iter()
            .map(|resource| (resource.id.as_str(), resource))
            .collect();

        let groups = group_resources(&self.resources, &self.collapsed)
            .into_iter()
            .map(|group| {
                let rows = if group.collapsed {
                    Vec::new()
                } else {
                    group
                        .resource_ids
                        .iter()
                        .filter_map(|resource_id| by_id.get(resource_id.as_str()))
                        .map(|resource| {
                            let bars = bars_in_window(
                                self.activities
                                    .iter()
                                    .filter(|activity| activity.resource_id == resource.id),
                                scale,
                                view_start,
                                view_end,
                            );
                            GanttRow {
                                service_ranges: service_ranges(&bars),
                                resource_id: resource.id.clone(),
                                name: resource.name.clone(),
                                bars,
                            }
                        })
                        .collect()
                };
                GanttGroup {
                    key: group.key,
                    label: group.label,
                    collapsed: group.collapsed,
                    rows,
                }
            })
            .collect();

        GanttLayout { groups }
    }

    // Gesture surface: raw DOM-style events, already content-relative.

    pub fn on_pointer_down(&mut self, event: PointerEvent) {
        self.gestures.on_pointer_down(event, &mut self.viewport);
    }

    pub fn on_pointer_move(&mut self, event: PointerEvent) {
        self.gestures.on_pointer_move(event, &mut self.viewport);
    }

    pub fn on_pointer_up(&mut self, event: PointerEvent) {
        self.gestures.on_pointer_up(event, &mut self.viewport);
    }

    pub fn on_wheel(&mut self, event: WheelEvent) {
        self.gestures.on_wheel(event, &mut self.viewport);
    }
}

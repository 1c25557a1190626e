use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::core::time::{MS_PER_HOUR, TimeMs};
use crate::core::time_scale::TimeScale;

/// Window expansion applied on both sides before intersecting activities,
/// so bars do not visibly pop in at the window edge mid-pan.
pub const VIEW_MARGIN_MS: i64 = 2 * MS_PER_HOUR;

/// Role of one activity inside a multi-activity service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ServiceRole {
    Start,
    Segment,
    End,
}

/// A time-bound task on a resource. Supplied by the host and read-only
/// to the engine; timestamps are not assumed to be validated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Activity {
    pub id: String,
    pub resource_id: String,
    pub label: String,
    pub start: TimeMs,
    pub end: TimeMs,
    /// Free-form style class the host renders with.
    pub kind: String,
    /// Activities sharing a service id form one logical service.
    pub service_id: Option<String>,
    pub service_role: Option<ServiceRole>,
}

/// Pixel geometry of one activity within the current projection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GanttBar {
    pub activity_id: String,
    pub label: String,
    /// Left edge in pixels from the timeline start, rounded.
    pub left: i64,
    /// Rounded width, floored at 1 so zero-duration activities stay visible.
    pub width: i64,
    pub kind: String,
    pub service_id: Option<String>,
    pub service_role: Option<ServiceRole>,
}

/// Aggregated pixel span of all bars sharing a service id, rendered as a
/// background band under the service's activities.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GanttServiceRange {
    pub service_id: String,
    pub left: i64,
    pub right: i64,
}

/// Converts the activities intersecting the margined window into bars.
///
/// Activities with `end < start` come from unvalidated external data and
/// are dropped silently rather than rejected.
#[must_use]
pub fn bars_in_window<'a>(
    activities: impl IntoIterator<Item = &'a Activity>,
    scale: TimeScale,
    view_start: TimeMs,
    view_end: TimeMs,
) -> Vec<GanttBar> {
    let window_start = view_start.saturating_sub(VIEW_MARGIN_MS);
    let window_end = view_end.saturating_add(VIEW_MARGIN_MS);

    activities
        .into_iter()
        .filter(|activity| activity.end >= activity.start)
        .filter(|activity| activity.end >= window_start && activity.start <= window_end)
        .map(|activity| {
            let left = scale.time_to_px(activity.start).round() as i64;
            let right = scale.time_to_px(activity.end).round() as i64;
            GanttBar {
                activity_id: activity.id.clone(),
                label: activity.label.clone(),
                left,
                width: (right - left).max(1),
                kind: activity.kind.clone(),
                service_id: activity.service_id.clone(),
                service_role: activity.service_role,
            }
        })
        .collect()
}

/// Folds bars sharing a non-null service id into one span per service,
/// in first-appearance order.
#[must_use]
pub fn service_ranges(bars: &[GanttBar]) -> Vec<GanttServiceRange> {
    let mut spans: IndexMap<&str, (i64, i64)> = IndexMap::new();
    for bar in bars {
        let Some(service_id) = bar.service_id.as_deref() else {
            continue;
        };
        let right = bar.left + bar.width;
        spans
            .entry(service_id)
            .and_modify(|(span_left, span_right)| {
                *span_left = (*span_left).min(bar.left);
                *span_right = (*span_right).max(right);
            })
            .or_insert((bar.left, right));
    }

    spans
        .into_iter()
        .map(|(service_id, (left, right))| GanttServiceRange {
            service_id: service_id.to_owned(),
            left,
            right,
        })
        .collect()
}

use gantt_rs::core::zoom::config_for;
use gantt_rs::core::{TimeMs, TimeScale, ZoomLevel};
use gantt_rs::layout::{Activity, bars_in_window, service_ranges};

const JAN_1: TimeMs = 1_704_067_200_000; // 2024-01-01T00:00:00Z
const FEB_1: TimeMs = 1_706_745_600_000; // 2024-02-01T00:00:00Z
const MS_PER_HOUR: TimeMs = 3_600_000;
const MS_PER_DAY: TimeMs = 24 * MS_PER_HOUR;
const JAN_5: TimeMs = JAN_1 + 4 * MS_PER_DAY;

fn day_scale() -> TimeScale {
    TimeScale::new(JAN_1, FEB_1, config_for(ZoomLevel::Day).px_per_ms).expect("valid scale")
}

fn activity(id: &str, start: TimeMs, end: TimeMs, service_id: Option<&str>) -> Activity {
    Activity {
        id: id.to_owned(),
        resource_id: "r1".to_owned(),
        label: id.to_owned(),
        start,
        end,
        kind: "trip".to_owned(),
        service_id: service_id.map(str::to_owned),
        service_role: None,
    }
}

#[test]
fn bars_project_activity_times_through_the_scale() {
    let scale = day_scale();
    let nine = JAN_5 + 9 * MS_PER_HOUR;
    let ten = nine + MS_PER_HOUR;
    let activities = vec![activity("a", nine, ten, None)];

    let bars = bars_in_window(&activities, scale, JAN_5, JAN_5 + MS_PER_DAY);
    assert_eq!(bars.len(), 1);
    assert_eq!(bars[0].left, scale.time_to_px(nine).round() as i64);
    assert_eq!(
        bars[0].width,
        (scale.time_to_px(ten).round() - scale.time_to_px(nine).round()) as i64
    );
}

#[test]
fn zero_duration_bars_stay_visible_and_inverted_ones_are_dropped() {
    let scale = day_scale();
    let at = JAN_5 + 9 * MS_PER_HOUR;
    let activities = vec![
        activity("point", at, at, None),
        activity("bad", at, at - MS_PER_HOUR, None),
    ];

    let bars = bars_in_window(&activities, scale, JAN_5, JAN_5 + MS_PER_DAY);
    assert_eq!(bars.len(), 1);
    assert_eq!(bars[0].activity_id, "point");
    assert_eq!(bars[0].width, 1);
}

#[test]
fn window_margin_keeps_nearby_offscreen_bars() {
    let scale = day_scale();
    let view_start = JAN_5;
    let view_end = JAN_5 + MS_PER_DAY;

    // Ends 90 minutes before the window: inside the 2 h margin.
    let close = activity("close", view_start - 3 * MS_PER_HOUR, view_start - MS_PER_HOUR - MS_PER_HOUR / 2, None);
    // Ends 3 hours before the window: outside the margin.
    let far = activity("far", view_start - 5 * MS_PER_HOUR, view_start - 3 * MS_PER_HOUR, None);

    let bars = bars_in_window([&close, &far], scale, view_start, view_end);
    let ids: Vec<&str> = bars.iter().map(|bar| bar.activity_id.as_str()).collect();
    assert_eq!(ids, vec!["close"]);
}

#[test]
fn service_ranges_fold_shared_services_and_skip_unserviced_bars() {
    let scale = day_scale();
    let base = JAN_5 + 6 * MS_PER_HOUR;
    let activities = vec![
        activity("a", base, base + MS_PER_HOUR, Some("S1")),
        activity("b", base + MS_PER_HOUR, base + 2 * MS_PER_HOUR, Some("S1")),
        activity("c", base + 3 * MS_PER_HOUR, base + 4 * MS_PER_HOUR, None),
        activity("d", base + 5 * MS_PER_HOUR, base + 6 * MS_PER_HOUR, Some("S2")),
    ];

    let bars = bars_in_window(&activities, scale, JAN_5, JAN_5 + MS_PER_DAY);
    let ranges = service_ranges(&bars);
    let ids: Vec<&str> = ranges.iter().map(|range| range.service_id.as_str()).collect();
    assert_eq!(ids, vec!["S1", "S2"]);

    // S1 spans the min/max extent of its two bars.
    assert_eq!(ranges[0].left, bars[0].left);
    assert_eq!(ranges[0].right, bars[1].left + bars[1].width);
}

#[test]
fn off_timeline_activities_clamp_to_content_edges() {
    let scale = day_scale();
    let activities = vec![activity("early", JAN_1 - 2 * MS_PER_DAY, JAN_1 + MS_PER_HOUR, None)];

    let bars = bars_in_window(&activities, scale, JAN_1, JAN_1 + MS_PER_DAY);
    assert_eq!(bars[0].left, 0);
    assert!(bars[0].width >= 1);
}

use approx::abs_diff_eq;
use gantt_rs::core::zoom::{ZOOM_CONFIGS, interpolate_density};
use gantt_rs::core::{TimeScale, Viewport, ZoomLevel};
use proptest::prelude::*;

const MS_PER_DAY: i64 = 86_400_000;

fn zoom_level_strategy() -> impl Strategy<Value = ZoomLevel> {
    prop::sample::select(ZoomLevel::ALL.to_vec())
}

proptest! {
    #[test]
    fn time_pixel_round_trip_within_one_millisecond(
        start_days in -20_000i64..20_000,
        span_days in 1i64..5_000,
        position in 0.0f64..1.0,
        level in zoom_level_strategy()
    ) {
        let timeline_start = start_days * MS_PER_DAY;
        let timeline_end = timeline_start + span_days * MS_PER_DAY;
        let density = gantt_rs::core::zoom::config_for(level).px_per_ms;
        let scale = TimeScale::new(timeline_start, timeline_end, density).expect("valid scale");

        let span = timeline_end - timeline_start;
        let t = timeline_start + (position * span as f64) as i64;
        let recovered = scale.px_to_time(scale.time_to_px(t));
        prop_assert!((recovered - t).abs() <= 1, "t={t}, recovered={recovered}");
    }

    #[test]
    fn ticks_are_ordered_contiguous_and_inside_content(
        span_days in 2i64..400,
        window_offset in 0.0f64..1.0,
        window_fraction in 0.01f64..1.0,
        level in zoom_level_strategy()
    ) {
        let timeline_start = 1_704_067_200_000i64; // 2024-01-01T00:00:00Z
        let timeline_end = timeline_start + span_days * MS_PER_DAY;
        let density = gantt_rs::core::zoom::config_for(level).px_per_ms;
        let scale = TimeScale::new(timeline_start, timeline_end, density).expect("valid scale");

        let span = (timeline_end - timeline_start) as f64;
        let view_start = timeline_start + (window_offset * span * 0.9) as i64;
        let view_len = ((span * window_fraction * 0.1) as i64).max(1);
        let ticks = scale.ticks_with_now(view_start, view_start + view_len, 0);

        for tick in &ticks {
            prop_assert!(tick.width_px > 0.0);
            prop_assert!(tick.offset_px >= 0.0);
            prop_assert!(tick.offset_px + tick.width_px <= scale.content_width() + 1.0);
        }
        for pair in ticks.windows(2) {
            prop_assert!(pair[0].offset_px < pair[1].offset_px);
            let right_edge = pair[0].offset_px + pair[0].width_px;
            prop_assert!(abs_diff_eq!(right_edge, pair[1].offset_px, epsilon = 1e-6));
            prop_assert!(pair[0].index < pair[1].index);
        }
    }

    #[test]
    fn interpolated_density_is_monotone(
        r1 in 0i64..10_000 * MS_PER_DAY,
        r2 in 0i64..10_000 * MS_PER_DAY
    ) {
        let (small, large) = if r1 <= r2 { (r1, r2) } else { (r2, r1) };
        prop_assert!(interpolate_density(small) >= interpolate_density(large));
    }

    #[test]
    fn viewport_never_escapes_the_timeline(
        span_days in 1i64..2_000,
        level in zoom_level_strategy(),
        scrolls in prop::collection::vec(-1.0e9f64..1.0e9, 0..12),
        goto_offset in -5_000i64..5_000
    ) {
        let timeline_start = 1_704_067_200_000i64;
        let timeline_end = timeline_start + span_days * MS_PER_DAY;
        let mut viewport =
            Viewport::new(timeline_start, timeline_end, level, None).expect("valid viewport");

        for delta in scrolls {
            viewport.scroll_by(delta);
        }
        viewport.goto(timeline_start + goto_offset * MS_PER_DAY);
        viewport.set_scroll_px(-1.0e12);

        let range = viewport.range_ms();
        if timeline_end - timeline_start >= range {
            prop_assert!(viewport.view_start() >= timeline_start);
            prop_assert!(viewport.view_start() + range <= timeline_end);
        } else {
            prop_assert_eq!(viewport.view_start(), timeline_start);
        }
    }

    #[test]
    fn zoom_in_then_out_restores_the_level_everywhere(
        level in zoom_level_strategy(),
        center_days in 0i64..30
    ) {
        let timeline_start = 1_704_067_200_000i64;
        let timeline_end = timeline_start + 365 * MS_PER_DAY;
        let mut viewport =
            Viewport::new(timeline_start, timeline_end, level, None).expect("valid viewport");
        viewport.goto(timeline_start + center_days * MS_PER_DAY);

        let before = viewport.zoom_level();
        if viewport.zoom_in(None) {
            viewport.zoom_out(None);
        }
        prop_assert_eq!(viewport.zoom_level(), before);
    }
}

#[test]
fn interpolated_density_brackets_every_catalog_gap() {
    for pair in ZOOM_CONFIGS.windows(2) {
        let mid = (pair[0].range_ms + pair[1].range_ms) / 2;
        let density = interpolate_density(mid);
        assert!(density >= pair[0].px_per_ms);
        assert!(density <= pair[1].px_per_ms);
    }
}

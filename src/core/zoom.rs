//! Discrete zoom catalog: ordered levels with canonical densities and
//! tick cadences, plus nearest-match and interpolation queries.
//!
//! The catalog is a process-wide constant. All queries are total: the
//! table is non-empty and monotone in both `range_ms` (decreasing) and
//! `px_per_ms` (increasing) from coarsest to finest, which the
//! nearest-match and interpolation lookups rely on.

use serde::{Deserialize, Serialize};

use crate::core::time::{
    MS_PER_DAY, MS_PER_HOUR, MS_PER_MINUTE, MS_PER_WEEK, TimeMs, unix_ms_to_datetime,
};

/// Named timeline granularity, ordered coarsest to finest.
///
/// The declaration order defines adjacency for zoom stepping.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "kebab-case")]
pub enum ZoomLevel {
    Quarter,
    Month,
    Week,
    Day,
    Hour,
    FiveMin,
}

impl ZoomLevel {
    pub const ALL: [ZoomLevel; 6] = [
        ZoomLevel::Quarter,
        ZoomLevel::Month,
        ZoomLevel::Week,
        ZoomLevel::Day,
        ZoomLevel::Hour,
        ZoomLevel::FiveMin,
    ];

    #[must_use]
    fn ordinal(self) -> usize {
        self as usize
    }

    /// Adjacent finer level, or `None` at the finest end.
    #[must_use]
    pub fn finer(self) -> Option<ZoomLevel> {
        Self::ALL.get(self.ordinal() + 1).copied()
    }

    /// Adjacent coarser level, or `None` at the coarsest end.
    #[must_use]
    pub fn coarser(self) -> Option<ZoomLevel> {
        self.ordinal().checked_sub(1).map(|index| Self::ALL[index])
    }

    /// Primary cell label for a tick starting at `time`.
    #[must_use]
    pub fn label(self, time: TimeMs) -> String {
        let at = unix_ms_to_datetime(time);
        match self {
            ZoomLevel::Quarter => format!("W{}", at.format("%V")),
            ZoomLevel::Month => at.format("%a %d").to_string(),
            ZoomLevel::Week => at.format("%a %H:%M").to_string(),
            ZoomLevel::Day | ZoomLevel::Hour | ZoomLevel::FiveMin => {
                at.format("%H:%M").to_string()
            }
        }
    }

    /// Short label used when the cell is too narrow for the primary one.
    #[must_use]
    pub fn compact_label(self, time: TimeMs) -> String {
        let at = unix_ms_to_datetime(time);
        match self {
            ZoomLevel::Quarter => format!("W{}", at.format("%V")),
            ZoomLevel::Month => at.format("%d").to_string(),
            ZoomLevel::Week => at.format("%Hh").to_string(),
            ZoomLevel::Day => at.format("%H").to_string(),
            ZoomLevel::Hour | ZoomLevel::FiveMin => at.format(":%M").to_string(),
        }
    }

    /// Heading label for the major-step bucket containing a tick.
    #[must_use]
    pub fn major_label(self, bucket_start: TimeMs) -> String {
        let at = unix_ms_to_datetime(bucket_start);
        match self {
            ZoomLevel::Quarter | ZoomLevel::Month => at.format("%B %Y").to_string(),
            ZoomLevel::Week | ZoomLevel::Day => at.format("%a %d %b").to_string(),
            ZoomLevel::Hour | ZoomLevel::FiveMin => at.format("%H:%M").to_string(),
        }
    }

    /// Secondary label, shown only in wide cells; not every level has one.
    #[must_use]
    pub fn minor_label(self, bucket_start: TimeMs) -> Option<String> {
        let at = unix_ms_to_datetime(bucket_start);
        match self {
            ZoomLevel::Month => Some(format!("W{}", at.format("%V"))),
            ZoomLevel::Week | ZoomLevel::Day => Some(at.format("%H:%M").to_string()),
            ZoomLevel::Quarter | ZoomLevel::Hour | ZoomLevel::FiveMin => None,
        }
    }
}

/// Immutable per-level tuning: default window, canonical density and
/// minor/major tick cadence.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ZoomConfig {
    pub level: ZoomLevel,
    /// Default visible window duration at this level.
    pub range_ms: i64,
    /// Canonical pixel density at this level.
    pub px_per_ms: f64,
    /// Minor tick spacing.
    pub step_ms: i64,
    /// Major tick spacing; always an integer multiple of `step_ms`.
    pub major_step_ms: i64,
}

/// The zoom catalog, ordered coarsest to finest.
pub const ZOOM_CONFIGS: [ZoomConfig; 6] = [
    ZoomConfig {
        level: ZoomLevel::Quarter,
        range_ms: 91 * MS_PER_DAY,
        px_per_ms: 0.000_000_2,
        step_ms: MS_PER_WEEK,
        major_step_ms: 4 * MS_PER_WEEK,
    },
    ZoomConfig {
        level: ZoomLevel::Month,
        range_ms: 30 * MS_PER_DAY,
        px_per_ms: 0.000_000_5,
        step_ms: MS_PER_DAY,
        major_step_ms: MS_PER_WEEK,
    },
    ZoomConfig {
        level: ZoomLevel::Week,
        range_ms: MS_PER_WEEK,
        px_per_ms: 0.000_002,
        step_ms: 6 * MS_PER_HOUR,
        major_step_ms: MS_PER_DAY,
    },
    ZoomConfig {
        level: ZoomLevel::Day,
        range_ms: MS_PER_DAY,
        px_per_ms: 0.000_015,
        step_ms: MS_PER_HOUR,
        major_step_ms: 6 * MS_PER_HOUR,
    },
    ZoomConfig {
        level: ZoomLevel::Hour,
        range_ms: MS_PER_HOUR,
        px_per_ms: 0.000_4,
        step_ms: 15 * MS_PER_MINUTE,
        major_step_ms: MS_PER_HOUR,
    },
    ZoomConfig {
        level: ZoomLevel::FiveMin,
        range_ms: 30 * MS_PER_MINUTE,
        px_per_ms: 0.000_8,
        step_ms: 5 * MS_PER_MINUTE,
        major_step_ms: 15 * MS_PER_MINUTE,
    },
];

#[must_use]
pub fn config_for(level: ZoomLevel) -> &'static ZoomConfig {
    &ZOOM_CONFIGS[level.ordinal()]
}

/// Config whose default window is closest to `range_ms`.
///
/// Ties break toward catalog order (stable fold, first match wins).
#[must_use]
pub fn nearest_by_range(range_ms: i64) -> &'static ZoomConfig {
    nearest_by(|config| (i128::from(config.range_ms) - i128::from(range_ms)).unsigned_abs() as f64)
}

/// Config whose canonical density is closest to `px_per_ms`.
#[must_use]
pub fn nearest_by_density(px_per_ms: f64) -> &'static ZoomConfig {
    nearest_by(|config| (config.px_per_ms - px_per_ms).abs())
}

fn nearest_by(distance: impl Fn(&ZoomConfig) -> f64) -> &'static ZoomConfig {
    let mut best = &ZOOM_CONFIGS[0];
    let mut best_distance = distance(best);
    for config in ZOOM_CONFIGS.iter().skip(1) {
        let candidate = distance(config);
        if candidate < best_distance {
            best = config;
            best_distance = candidate;
        }
    }
    best
}

/// Pixel density for an arbitrary window duration.
///
/// Outside the catalog's range the nearest extreme's density is returned;
/// between two catalog entries the density is linearly interpolated
/// proportional to where `range_ms` falls between their windows.
#[must_use]
pub fn interpolate_density(range_ms: i64) -> f64 {
    let coarsest = &ZOOM_CONFIGS[0];
    let finest = &ZOOM_CONFIGS[ZOOM_CONFIGS.len() - 1];

    if range_ms >= coarsest.range_ms {
        return coarsest.px_per_ms;
    }
    if range_ms <= finest.range_ms {
        return finest.px_per_ms;
    }

    for pair in ZOOM_CONFIGS.windows(2) {
        let (wide, narrow) = (&pair[0], &pair[1]);
        if range_ms <= wide.range_ms && range_ms >= narrow.range_ms {
            let span = (wide.range_ms - narrow.range_ms) as f64;
            let position = (wide.range_ms - range_ms) as f64 / span;
            return wide.px_per_ms + position * (narrow.px_per_ms - wide.px_per_ms);
        }
    }

    // Unreachable: the extremes are handled above and the table is monotone.
    finest.px_per_ms
}

#[cfg(test)]
mod tests {
    use super::{
        ZOOM_CONFIGS, ZoomLevel, config_for, interpolate_density, nearest_by_density,
        nearest_by_range,
    };
    use crate::core::time::MS_PER_DAY;
    use approx::assert_abs_diff_eq;

    #[test]
    fn catalog_is_monotone_and_major_steps_divide_evenly() {
        for pair in ZOOM_CONFIGS.windows(2) {
            assert!(pair[0].range_ms > pair[1].range_ms);
            assert!(pair[0].px_per_ms < pair[1].px_per_ms);
        }
        for config in &ZOOM_CONFIGS {
            assert_eq!(config.major_step_ms % config.step_ms, 0);
            assert!(config.major_step_ms >= config.step_ms);
        }
    }

    #[test]
    fn level_stepping_is_inverse_at_interior_levels() {
        for level in ZoomLevel::ALL {
            if let Some(finer) = level.finer() {
                assert_eq!(finer.coarser(), Some(level));
            }
        }
        assert_eq!(ZoomLevel::Quarter.coarser(), None);
        assert_eq!(ZoomLevel::FiveMin.finer(), None);
    }

    #[test]
    fn nearest_queries_match_exact_catalog_entries() {
        for config in &ZOOM_CONFIGS {
            assert_eq!(nearest_by_range(config.range_ms).level, config.level);
            assert_eq!(nearest_by_density(config.px_per_ms).level, config.level);
        }
    }

    #[test]
    fn nearest_by_range_picks_the_closest_window() {
        // 2 days is closer to the Day window (1 d) than to the Week (7 d);
        // 5 days is closer to the Week window.
        assert_eq!(nearest_by_range(2 * MS_PER_DAY).level, ZoomLevel::Day);
        assert_eq!(nearest_by_range(5 * MS_PER_DAY).level, ZoomLevel::Week);
        // Exactly between Week and Day both are 3 d away; the tie breaks
        // toward catalog order.
        assert_eq!(nearest_by_range(4 * MS_PER_DAY).level, ZoomLevel::Week);
    }

    #[test]
    fn nearest_by_density_handles_off_catalog_values() {
        assert_eq!(nearest_by_density(0.0).level, ZoomLevel::Quarter);
        assert_eq!(nearest_by_density(1.0).level, ZoomLevel::FiveMin);
    }

    #[test]
    fn interpolated_density_matches_catalog_at_exact_entries() {
        for config in &ZOOM_CONFIGS {
            assert_abs_diff_eq!(
                interpolate_density(config.range_ms),
                config.px_per_ms,
                epsilon = 1e-12
            );
        }
    }

    #[test]
    fn interpolated_density_clamps_outside_and_is_linear_between() {
        let coarsest = config_for(ZoomLevel::Quarter);
        let finest = config_for(ZoomLevel::FiveMin);
        assert_eq!(
            interpolate_density(coarsest.range_ms * 10),
            coarsest.px_per_ms
        );
        assert_eq!(interpolate_density(0), finest.px_per_ms);
        assert_eq!(interpolate_density(-MS_PER_DAY), finest.px_per_ms);

        let day = config_for(ZoomLevel::Day);
        let hour = config_for(ZoomLevel::Hour);
        assert_abs_diff_eq!(
            interpolate_density((day.range_ms + hour.range_ms) / 2),
            (day.px_per_ms + hour.px_per_ms) / 2.0,
            epsilon = 1e-12
        );
    }

    #[test]
    fn label_formatters_produce_level_appropriate_text() {
        // 2024-01-05T09:15:00Z, a Friday.
        let at = 1_704_446_100_000;

        assert_eq!(ZoomLevel::Month.label(at), "Fri 05");
        assert_eq!(ZoomLevel::Month.compact_label(at), "05");
        assert_eq!(ZoomLevel::Month.major_label(at), "January 2024");

        assert_eq!(ZoomLevel::Hour.label(at), "09:15");
        assert_eq!(ZoomLevel::Hour.compact_label(at), ":15");

        assert_eq!(ZoomLevel::Day.label(at), "09:15");
        assert_eq!(ZoomLevel::Day.major_label(at), "Fri 05 Jan");

        // Minor labels exist only where the level defines one.
        assert!(ZoomLevel::Month.minor_label(at).is_some());
        assert!(ZoomLevel::Week.minor_label(at).is_some());
        assert!(ZoomLevel::Hour.minor_label(at).is_none());
        assert!(ZoomLevel::Quarter.minor_label(at).is_none());
    }
}

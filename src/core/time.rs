use chrono::{DateTime, Datelike, Utc, Weekday};

/// Engine-internal instant: milliseconds since the Unix epoch, UTC.
pub type TimeMs = i64;

pub const MS_PER_SECOND: i64 = 1_000;
pub const MS_PER_MINUTE: i64 = 60 * MS_PER_SECOND;
pub const MS_PER_HOUR: i64 = 60 * MS_PER_MINUTE;
pub const MS_PER_DAY: i64 = 24 * MS_PER_HOUR;
pub const MS_PER_WEEK: i64 = 7 * MS_PER_DAY;

#[must_use]
pub fn datetime_to_unix_ms(time: DateTime<Utc>) -> TimeMs {
    time.timestamp_millis()
}

/// Converts an engine instant back to a calendar datetime.
///
/// Instants outside chrono's representable range (hundreds of millennia
/// away) fall back to the epoch rather than failing; the engine clamps
/// everything it projects into validated timeline bounds first.
#[must_use]
pub fn unix_ms_to_datetime(time: TimeMs) -> DateTime<Utc> {
    DateTime::from_timestamp_millis(time).unwrap_or(DateTime::UNIX_EPOCH)
}

#[must_use]
pub fn now_ms() -> TimeMs {
    Utc::now().timestamp_millis()
}

#[must_use]
pub fn is_weekend(time: TimeMs) -> bool {
    matches!(
        unix_ms_to_datetime(time).weekday(),
        Weekday::Sat | Weekday::Sun
    )
}

#[must_use]
pub fn same_utc_day(left: TimeMs, right: TimeMs) -> bool {
    left.div_euclid(MS_PER_DAY) == right.div_euclid(MS_PER_DAY)
}

/// Largest multiple of `step` that is `<= time` (floor on the step grid).
#[must_use]
pub fn floor_to_step(time: TimeMs, step: i64) -> TimeMs {
    debug_assert!(step > 0);
    time - time.rem_euclid(step)
}

/// Smallest multiple of `step` that is `>= time` (ceil on the step grid).
#[must_use]
pub fn ceil_to_step(time: TimeMs, step: i64) -> TimeMs {
    let floored = floor_to_step(time, step);
    if floored == time { floored } else { floored + step }
}

use std::fmt::{Display, Formatter};

use chrono::{DateTime, Duration, Local, NaiveDateTime, Offset, Timelike, Utc};

const DAY_START_HOUR: u32 = 6;
const DAY_END_HOUR: u32 = 18;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClockError {
    InvalidTimezoneFormat(String),
}

impl Display for ClockError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            ClockError::InvalidTimezoneFormat(label) => {
                write!(f, "invalid timezone format: {label:?} (expected GMT+H or GMT-H)")
            }
        }
    }
}

impl std::error::Error for ClockError {}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DayPhase {
    Day,
    Night,
}

impl Display for DayPhase {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            DayPhase::Day => write!(f, "Day"),
            DayPhase::Night => write!(f, "Night"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LocalTime {
    pub wall: NaiveDateTime,
    pub offset_minutes: i32,
    pub phase: DayPhase,
}

pub fn offset_minutes(label: &str) -> Result<i32, ClockError> {
    let invalid = || ClockError::InvalidTimezoneFormat(label.to_string());

    let rest = label.strip_prefix("GMT").ok_or_else(invalid)?;
    let (sign, digits) = match rest.strip_prefix('-') {
        Some(digits) => (-1, digits),
        None => (1, rest.strip_prefix('+').unwrap_or(rest)),
    };

    if digits.is_empty() || !digits.bytes().all(|byte| byte.is_ascii_digit()) {
        return Err(invalid());
    }

    let hours: i32 = digits.parse().map_err(|_| invalid())?;
    let minutes = hours.checked_mul(60).ok_or_else(invalid)?;
    Ok(sign * minutes)
}

pub fn local_time(
    now: DateTime<Utc>,
    device_offset_minutes: i32,
    target_offset_minutes: i32,
) -> DateTime<Utc> {
    now + Duration::minutes((device_offset_minutes + target_offset_minutes).into())
}

pub fn wall_clock(
    now: DateTime<Utc>,
    device_offset_minutes: i32,
    target_offset_minutes: i32,
) -> NaiveDateTime {
    // Rendering local_time in the device zone cancels the device term,
    // leaving the wall clock at the target offset.
    let shifted = local_time(now, device_offset_minutes, target_offset_minutes);
    shifted.naive_utc() - Duration::minutes(device_offset_minutes.into())
}

// Minutes behind UTC, positive west of UTC.
pub fn device_offset_minutes() -> i32 {
    -(Local::now().offset().fix().local_minus_utc() / 60)
}

pub fn day_phase(wall: NaiveDateTime) -> DayPhase {
    if (DAY_START_HOUR..DAY_END_HOUR).contains(&wall.hour()) {
        DayPhase::Day
    } else {
        DayPhase::Night
    }
}

pub fn derive_local_time(
    label: &str,
    now: DateTime<Utc>,
    device_offset_minutes: i32,
) -> Result<LocalTime, ClockError> {
    let target = offset_minutes(label)?;
    let wall = wall_clock(now, device_offset_minutes, target);
    Ok(LocalTime {
        wall,
        offset_minutes: target,
        phase: day_phase(wall),
    })
}

pub fn format_clock(wall: NaiveDateTime) -> String {
    wall.format("%H:%M:%S").to_string()
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, TimeZone, Utc};

    use super::{
        DayPhase, day_phase, derive_local_time, format_clock, local_time, offset_minutes,
        wall_clock,
    };

    #[test]
    fn parses_signed_offset_labels() {
        assert_eq!(offset_minutes("GMT-5"), Ok(-300));
        assert_eq!(offset_minutes("GMT+8"), Ok(480));
        assert_eq!(offset_minutes("GMT+0"), Ok(0));
        assert_eq!(offset_minutes("GMT+12"), Ok(720));
        assert_eq!(offset_minutes("GMT-11"), Ok(-660));
    }

    #[test]
    fn unsigned_hours_are_positive() {
        assert_eq!(offset_minutes("GMT3"), Ok(180));
    }

    #[test]
    fn rejects_malformed_labels() {
        for label in ["", "GMT", "GMT+", "GMT-", "UTC-5", "GMT+5:30", "GMT+five", "5"] {
            assert!(offset_minutes(label).is_err(), "accepted {label:?}");
        }
    }

    #[test]
    fn rejects_hour_counts_that_overflow_minutes() {
        // In-range hour counts whose minute conversion would not fit.
        for label in ["GMT+100000000", "GMT-100000000", "GMT+2147483647"] {
            assert!(offset_minutes(label).is_err(), "accepted {label:?}");
        }
        // Past i32 entirely; the digit parse itself fails.
        assert!(offset_minutes("GMT+99999999999").is_err());
    }

    #[test]
    fn local_time_is_exact_minute_arithmetic() {
        let now = Utc.with_ymd_and_hms(2026, 3, 1, 18, 30, 45).unwrap();
        assert_eq!(local_time(now, 0, -300), now - Duration::hours(5));
        assert_eq!(local_time(now, 60, 480), now + Duration::minutes(540));
        assert_eq!(local_time(now, -120, 120), now);
    }

    #[test]
    fn wall_clock_cancels_the_device_term() {
        let now = Utc.with_ymd_and_hms(2026, 3, 1, 18, 30, 45).unwrap();
        let expected = (now + Duration::hours(8)).naive_utc();
        for device_offset in [-480, -60, 0, 300] {
            assert_eq!(wall_clock(now, device_offset, 480), expected);
        }
    }

    #[test]
    fn classifies_day_window_boundaries() {
        let at_hour = |hour| {
            Utc.with_ymd_and_hms(2026, 3, 1, hour, 0, 0)
                .unwrap()
                .naive_utc()
        };
        assert_eq!(day_phase(at_hour(6)), DayPhase::Day);
        assert_eq!(day_phase(at_hour(12)), DayPhase::Day);
        assert_eq!(day_phase(at_hour(17)), DayPhase::Day);
        assert_eq!(day_phase(at_hour(18)), DayPhase::Night);
        assert_eq!(day_phase(at_hour(5)), DayPhase::Night);
        assert_eq!(day_phase(at_hour(0)), DayPhase::Night);
    }

    #[test]
    fn derives_john_doe_afternoon() {
        // 18:30 UTC at GMT-5 is 13:30, inside the day window.
        let now = Utc.with_ymd_and_hms(2026, 3, 1, 18, 30, 0).unwrap();
        let derived = derive_local_time("GMT-5", now, 0).expect("label should parse");
        assert_eq!(derived.offset_minutes, -300);
        assert_eq!(format_clock(derived.wall), "13:30:00");
        assert_eq!(derived.phase, DayPhase::Day);
    }

    #[test]
    fn derive_rejects_unset_timezone() {
        let now = Utc.with_ymd_and_hms(2026, 3, 1, 18, 30, 0).unwrap();
        assert!(derive_local_time("", now, 0).is_err());
    }
}

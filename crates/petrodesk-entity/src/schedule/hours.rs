//! Worked-hours arithmetic over `HH:MM` clock times.

use petrodesk_core::{AppError, AppResult};

/// Compute the total hours between a check-in and a check-out time.
///
/// Both arguments are wall-clock times in `HH:MM` form. A check-out earlier
/// than the check-in is treated as an overnight span and gains 24 hours.
/// Equal times yield zero, not a full day.
pub fn total_hours(check_in: &str, check_out: &str) -> AppResult<f64> {
    let start = parse_minutes(check_in)?;
    let end = parse_minutes(check_out)?;

    let mut span = end - start;
    if span < 0 {
        span += 24 * 60;
    }
    Ok(f64::from(span) / 60.0)
}

/// Parse `HH:MM` into minutes since midnight.
fn parse_minutes(time: &str) -> AppResult<i32> {
    let (hours, minutes) = time
        .split_once(':')
        .ok_or_else(|| AppError::validation(format!("Invalid time '{time}', expected HH:MM")))?;

    let hours: i32 = hours
        .parse()
        .map_err(|_| AppError::validation(format!("Invalid hour in '{time}'")))?;
    let minutes: i32 = minutes
        .parse()
        .map_err(|_| AppError::validation(format!("Invalid minute in '{time}'")))?;

    if !(0..24).contains(&hours) || !(0..60).contains(&minutes) {
        return Err(AppError::validation(format!(
            "Time '{time}' is out of range"
        )));
    }
    Ok(hours * 60 + minutes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use petrodesk_core::error::ErrorKind;

    #[test]
    fn test_day_shift() {
        assert_eq!(total_hours("08:00", "17:00").unwrap(), 9.0);
    }

    #[test]
    fn test_overnight_shift() {
        assert_eq!(total_hours("22:00", "06:00").unwrap(), 8.0);
    }

    #[test]
    fn test_equal_times_is_zero_not_a_full_day() {
        assert_eq!(total_hours("09:00", "09:00").unwrap(), 0.0);
    }

    #[test]
    fn test_fractional_hours() {
        assert_eq!(total_hours("08:15", "16:45").unwrap(), 8.5);
    }

    #[test]
    fn test_one_minute_overnight_wrap() {
        // 23:59 -> 00:01 is two minutes, not a negative span.
        let hours = total_hours("23:59", "00:01").unwrap();
        assert!((hours - 2.0 / 60.0).abs() < 1e-9);
    }

    #[test]
    fn test_malformed_input() {
        for bad in ["9am", "25:00", "10:60", "10", "ab:cd", ""] {
            let err = total_hours(bad, "10:00").unwrap_err();
            assert_eq!(err.kind, ErrorKind::Validation, "input {bad:?}");
        }
    }
}

//! Pure conversions between the units stored by Garmin Connect (meters per
//! second, seconds) and the strings people write in workout files.

use crate::garmin::workouts::error::{Result, WorkoutError};

const PACE_UNIT: &str = "min/km";
const SPEED_UNIT: &str = "km/h";
const MPS_TO_KMH: f64 = 3.6;

/// Converts meters per second into a pace of whole minutes and seconds per
/// kilometer.
///
/// The seconds are rounded, not carried: a speed just above a whole-minute
/// pace yields `seconds == 60` (4.1667 m/s gives `(3, 60)`). Format with
/// [`mps_to_pace_string`], which carries it: [`pace_string_to_mps`] rejects
/// seconds of 60 or more.
pub fn mps_to_pace_minutes_seconds(mps: f64) -> Result<(u32, u32)> {
    if !mps.is_finite() || mps <= 0.0 {
        return Err(WorkoutError::format(
            mps.to_string(),
            "speed must be a positive number of meters per second",
        ));
    }

    let pace = 1000.0 / (60.0 * mps);
    let minutes = pace.floor();
    let seconds = (60.0 * (pace - minutes)).round();
    Ok((minutes as u32, seconds as u32))
}

/// Formats meters per second as `"M:SS min/km"`.
///
/// Unlike [`mps_to_pace_minutes_seconds`], a rounded `60` is carried into the
/// minutes, so 3.3333 m/s reads `"5:00 min/km"` rather than `"4:60 min/km"`.
pub fn mps_to_pace_string(mps: f64) -> Result<String> {
    let (mut minutes, mut seconds) = mps_to_pace_minutes_seconds(mps)?;
    if seconds == 60 {
        minutes += 1;
        seconds = 0;
    }
    Ok(format!("{minutes}:{seconds:02} {PACE_UNIT}"))
}

/// Parses a `"MM:SS"` pace, optionally followed by a unit token, into meters
/// per second. Seconds must be below 60.
pub fn pace_string_to_mps(pace: &str) -> Result<f64> {
    let value = pace
        .split_whitespace()
        .next()
        .ok_or_else(|| WorkoutError::format(pace, "empty pace"))?;

    let (minutes, seconds) = value.split_once(':').ok_or_else(|| {
        WorkoutError::format(pace, "missing ':' in the pace, expected format 'MM:SS'")
    })?;
    let minutes: u32 = minutes
        .parse()
        .map_err(|_| WorkoutError::format(pace, "minutes are not a whole number"))?;
    let seconds: u32 = seconds
        .parse()
        .map_err(|_| WorkoutError::format(pace, "seconds are not a whole number"))?;
    if seconds >= 60 {
        return Err(WorkoutError::format(pace, "seconds must be below 60"));
    }

    let total = minutes
        .checked_mul(60)
        .and_then(|minutes| minutes.checked_add(seconds))
        .filter(|total| *total > 0)
        .ok_or_else(|| WorkoutError::format(pace, "pace must be longer than zero"))?;
    Ok(1000.0 / f64::from(total))
}

/// Converts kilometers per hour into meters per second.
pub fn kmh_to_mps(kmh: f64) -> f64 {
    kmh / MPS_TO_KMH
}

/// Formats meters per second as kilometers per hour with one decimal place,
/// e.g. `"22.0 km/h"`.
pub fn mps_to_kmh_string(mps: f64) -> Result<String> {
    if !mps.is_finite() || mps < 0.0 {
        return Err(WorkoutError::format(
            mps.to_string(),
            "speed must be a non-negative number of meters per second",
        ));
    }
    Ok(format!("{:.1} {SPEED_UNIT}", mps * MPS_TO_KMH))
}

/// Parses `"X.X km/h"` (the unit is optional) into meters per second.
pub fn kmh_string_to_mps(speed: &str) -> Result<f64> {
    let value = speed
        .split_whitespace()
        .next()
        .ok_or_else(|| WorkoutError::format(speed, "empty speed"))?;
    let kmh: f64 = value
        .parse()
        .map_err(|_| WorkoutError::format(speed, "expected a speed such as '12.5 km/h'"))?;
    if !kmh.is_finite() || kmh < 0.0 {
        return Err(WorkoutError::format(speed, "speed must not be negative"));
    }
    Ok(kmh_to_mps(kmh))
}

/// Formats a number of seconds as `"HH:MM:SS hours"`, `"MM:SS minutes"`, or
/// `"SS seconds"`, whichever is the largest non-zero unit. Fractional seconds
/// are truncated.
pub fn seconds_to_time_string(total_seconds: f64) -> String {
    let total = total_seconds as u64;
    let seconds = total % 60;
    let minutes_total = total / 60;
    let hours = minutes_total / 60;
    let minutes = minutes_total % 60;

    if hours != 0 {
        format!("{hours:02}:{minutes:02}:{seconds:02} hours")
    } else if minutes != 0 {
        format!("{minutes:02}:{seconds:02} minutes")
    } else {
        format!("{seconds:02} seconds")
    }
}

/// Parses the output of [`seconds_to_time_string`] back into seconds. A bare
/// number, fractional or not, is read as seconds (`"90.5 seconds"`).
pub fn time_string_to_seconds(time: &str) -> Result<f64> {
    let mut tokens = time.split_whitespace();
    let value = tokens
        .next()
        .ok_or_else(|| WorkoutError::format(time, "empty time"))?;
    let unit = tokens.next();

    if !value.contains(':') {
        let seconds: f64 = value
            .parse()
            .map_err(|_| WorkoutError::format(time, "expected a time such as '05:00 minutes'"))?;
        if !seconds.is_finite() || seconds < 0.0 {
            return Err(WorkoutError::format(time, "time must not be negative"));
        }
        return match unit {
            None | Some("seconds") => Ok(seconds),
            Some(other) => Err(WorkoutError::format(
                time,
                format!("unit '{other}' does not match a plain number of seconds"),
            )),
        };
    }

    let parts = value
        .split(':')
        .map(|part| part.parse::<u64>())
        .collect::<std::result::Result<Vec<_>, _>>()
        .map_err(|_| WorkoutError::format(time, "time components must be whole numbers"))?;

    let (total, expected_unit) = match parts.as_slice() {
        [minutes, seconds] => (sexagesimal(0, *minutes, *seconds), "minutes"),
        [hours, minutes, seconds] => (sexagesimal(*hours, *minutes, *seconds), "hours"),
        _ => {
            return Err(WorkoutError::format(
                time,
                "expected 'MM:SS minutes' or 'HH:MM:SS hours'",
            ));
        }
    };

    let total = total.ok_or_else(|| WorkoutError::format(time, "time is too large"))?;
    match unit {
        Some(unit) if unit != expected_unit => Err(WorkoutError::format(
            time,
            format!("unit '{unit}' does not match the number of components"),
        )),
        _ => Ok(total as f64),
    }
}

fn sexagesimal(hours: u64, minutes: u64, seconds: u64) -> Option<u64> {
    hours
        .checked_mul(60)?
        .checked_add(minutes)?
        .checked_mul(60)?
        .checked_add(seconds)
}

use serde_json::Value;
use tracing::{debug, instrument};

use crate::garmin::workouts::error::Result;
use crate::garmin::workouts::io::{compact, remote};

/// Converts a Garmin Connect workout document into the compact form.
///
/// The input is only borrowed; the returned tree shares nothing with it.
#[instrument(level = "debug", skip_all)]
pub fn to_compact(remote_workout: &Value) -> Result<Value> {
    let workout = remote::parse_remote_workout(remote_workout)?;
    debug!(
        name = %workout.name,
        step_count = workout.step_count(),
        "parsed remote workout"
    );
    compact::workout_to_compact(&workout)
}

/// Converts a compact workout document into the Garmin Connect form,
/// numbering the steps and filling in the defaults the service expects.
#[instrument(level = "debug", skip_all)]
pub fn to_remote(compact_workout: &Value) -> Result<Value> {
    let workout = compact::parse_compact_workout(compact_workout)?;
    debug!(
        name = %workout.name,
        step_count = workout.step_count(),
        "parsed compact workout"
    );
    Ok(remote::workout_to_remote(&workout))
}

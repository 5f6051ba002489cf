use serde_json::{Map, Value};

use crate::garmin::workouts::error::{Result, WorkoutError};
use crate::garmin::workouts::io::fields::{
    Object, ROOT, as_object, child_path, compact_number, index_path, invalid, missing, optional,
    optional_u64, require, require_array, require_f64, require_str, require_u64,
};
use crate::garmin::workouts::model::{
    Duration, HrDirection, SimpleStep, Step, StepKind, Target, Workout,
};
use crate::garmin::workouts::units;

const REPETITION: &str = "repetition";

const DURATION_FIELDS: [&str; 6] = [
    "distance",
    "time",
    "calories",
    "hr_above",
    "hr_below",
    "lap_button",
];

/// Parses a hand-edited workout document into a [`Workout`].
///
/// Simple steps need exactly one duration field and at most one target.
/// Range targets need both of their bounds.
pub fn parse_compact_workout(document: &Value) -> Result<Workout> {
    let workout = as_object(document, ROOT)?;
    let name = require_str(workout, "name", ROOT)?.to_string();
    let id = optional_u64(workout, "id", ROOT)?;
    let steps = require_array(workout, "steps", ROOT)?;
    let steps = parse_steps(steps, &child_path(ROOT, "steps"))?;
    Ok(Workout { name, id, steps })
}

fn parse_steps(items: &[Value], path: &str) -> Result<Vec<Step>> {
    items
        .iter()
        .enumerate()
        .map(|(index, item)| parse_step(item, &index_path(path, index)))
        .collect()
}

fn parse_step(value: &Value, path: &str) -> Result<Step> {
    let step = as_object(value, path)?;
    let step_type = require_str(step, "type", path)?;

    if step_type == REPETITION {
        let count = u32::try_from(require_u64(step, "count", path)?)
            .ok()
            .filter(|count| *count > 0)
            .ok_or_else(|| invalid(step, &child_path(path, "count"), "a positive count"))?;
        let children = require_array(step, "steps", path)?;
        let children_path = child_path(path, "steps");
        if children.is_empty() {
            return Err(invalid(step, &children_path, "at least one step"));
        }
        return Ok(Step::Repetition {
            count,
            steps: parse_steps(children, &children_path)?,
        });
    }

    let kind =
        StepKind::from_compact_name(step_type).ok_or_else(|| WorkoutError::UnsupportedStepType {
            value: step_type.to_string(),
            path: child_path(path, "type"),
            node: Value::Object(step.clone()),
        })?;

    Ok(Step::Simple(SimpleStep {
        kind,
        duration: parse_duration(step, path)?,
        target: parse_target(step, path)?,
    }))
}

fn parse_duration(step: &Object, path: &str) -> Result<Duration> {
    let present: Vec<&str> = DURATION_FIELDS
        .into_iter()
        .filter(|field| match optional(step, field) {
            Some(Value::Bool(pressed)) => *pressed,
            Some(_) => true,
            None => false,
        })
        .collect();

    let field = match present.as_slice() {
        [] => return Err(missing(step, "duration", path)),
        [field] => *field,
        _ => {
            return Err(invalid(
                step,
                path,
                format!("exactly one duration, found {}", present.join(", ")),
            ));
        }
    };

    let duration = match field {
        "distance" => Duration::Distance {
            meters: require_f64(step, field, path)?,
        },
        "time" => Duration::Time {
            seconds: parse_time(step, path)?,
        },
        "calories" => Duration::Calories {
            count: require_f64(step, field, path)?,
        },
        "hr_above" => Duration::HeartRate {
            threshold: require_f64(step, field, path)?,
            direction: HrDirection::Above,
        },
        "hr_below" => Duration::HeartRate {
            threshold: require_f64(step, field, path)?,
            direction: HrDirection::Below,
        },
        _ => Duration::LapButton,
    };
    Ok(duration)
}

fn parse_time(step: &Object, path: &str) -> Result<f64> {
    match require(step, "time", path)? {
        Value::String(text) => units::time_string_to_seconds(text),
        _ => Err(invalid(
            step,
            &child_path(path, "time"),
            "a time string such as '05:00 minutes'",
        )),
    }
}

fn parse_target(step: &Object, path: &str) -> Result<Option<Target>> {
    let mut targets = Vec::new();

    match (optional(step, "pace_from"), optional(step, "pace_to")) {
        (Some(_), Some(_)) => targets.push(Target::PaceRange {
            from_mps: units::pace_string_to_mps(require_str(step, "pace_from", path)?)?,
            to_mps: units::pace_string_to_mps(require_str(step, "pace_to", path)?)?,
        }),
        (None, None) => {}
        _ => {
            return Err(WorkoutError::IncompletePaceRange {
                path: path.to_string(),
                node: Value::Object(step.clone()),
            });
        }
    }

    if let Some(zone) = optional_u64(step, "hr_zone", path)? {
        let zone = Target::zone_number(zone)
            .ok_or_else(|| invalid(step, &child_path(path, "hr_zone"), "a zone 1..5"))?;
        targets.push(Target::HrZoneNumber { zone });
    }

    if range_present(step, "hr_low", "hr_high", path)? {
        targets.push(Target::HrZoneRange {
            low: require_f64(step, "hr_low", path)?,
            high: require_f64(step, "hr_high", path)?,
        });
    }

    if range_present(step, "speed_from", "speed_to", path)? {
        targets.push(Target::SpeedRange {
            from_mps: parse_speed(step, "speed_from", path)?,
            to_mps: parse_speed(step, "speed_to", path)?,
        });
    }

    if range_present(step, "cadence_from", "cadence_to", path)? {
        targets.push(Target::CadenceRange {
            low: require_f64(step, "cadence_from", path)?,
            high: require_f64(step, "cadence_to", path)?,
        });
    }

    match targets.as_slice() {
        [] => Ok(None),
        [target] => Ok(Some(*target)),
        _ => Err(invalid(step, path, "at most one target")),
    }
}

fn range_present(step: &Object, low: &str, high: &str, path: &str) -> Result<bool> {
    let (given, absent) = match (optional(step, low), optional(step, high)) {
        (Some(_), Some(_)) => return Ok(true),
        (None, None) => return Ok(false),
        (Some(_), None) => (low, high),
        (None, Some(_)) => (high, low),
    };
    Err(WorkoutError::IncompleteRange {
        present: given.to_string(),
        missing: absent.to_string(),
        path: path.to_string(),
        node: Value::Object(step.clone()),
    })
}

fn parse_speed(step: &Object, key: &str, path: &str) -> Result<f64> {
    match require(step, key, path)? {
        Value::String(text) => units::kmh_string_to_mps(text),
        _ => require_f64(step, key, path).map(units::kmh_to_mps),
    }
}

/// Serialises a [`Workout`] into the hand-editable document shape.
pub fn workout_to_compact(workout: &Workout) -> Result<Value> {
    let mut document = Map::new();
    document.insert("name".into(), Value::String(workout.name.clone()));
    if let Some(id) = workout.id {
        document.insert("id".into(), Value::from(id));
    }
    document.insert("steps".into(), steps_to_compact(&workout.steps)?);
    Ok(Value::Object(document))
}

fn steps_to_compact(steps: &[Step]) -> Result<Value> {
    steps
        .iter()
        .map(step_to_compact)
        .collect::<Result<Vec<_>>>()
        .map(Value::Array)
}

fn step_to_compact(step: &Step) -> Result<Value> {
    let mut map = Map::new();

    let simple = match step {
        Step::Repetition { count, steps } => {
            map.insert("type".into(), Value::from(REPETITION));
            map.insert("count".into(), Value::from(*count));
            map.insert("steps".into(), steps_to_compact(steps)?);
            return Ok(Value::Object(map));
        }
        Step::Simple(simple) => simple,
    };

    map.insert("type".into(), Value::from(simple.kind.compact_name()));

    let (field, value) = match simple.duration {
        Duration::LapButton => ("lap_button", Value::Bool(true)),
        Duration::Distance { meters } => ("distance", compact_number(meters)),
        Duration::Time { seconds } => ("time", Value::from(time_to_compact(seconds))),
        Duration::Calories { count } => ("calories", compact_number(count)),
        Duration::HeartRate {
            threshold,
            direction: HrDirection::Above,
        } => ("hr_above", compact_number(threshold)),
        Duration::HeartRate {
            threshold,
            direction: HrDirection::Below,
        } => ("hr_below", compact_number(threshold)),
    };
    map.insert(field.into(), value);

    match simple.target {
        None => {}
        Some(Target::PaceRange { from_mps, to_mps }) => {
            map.insert("pace_from".into(), units::mps_to_pace_string(from_mps)?.into());
            map.insert("pace_to".into(), units::mps_to_pace_string(to_mps)?.into());
        }
        Some(Target::HrZoneNumber { zone }) => {
            map.insert("hr_zone".into(), Value::from(zone));
        }
        Some(Target::HrZoneRange { low, high }) => {
            map.insert("hr_low".into(), compact_number(low));
            map.insert("hr_high".into(), compact_number(high));
        }
        Some(Target::SpeedRange { from_mps, to_mps }) => {
            map.insert("speed_from".into(), units::mps_to_kmh_string(from_mps)?.into());
            map.insert("speed_to".into(), units::mps_to_kmh_string(to_mps)?.into());
        }
        Some(Target::CadenceRange { low, high }) => {
            map.insert("cadence_from".into(), compact_number(low));
            map.insert("cadence_to".into(), compact_number(high));
        }
    }

    Ok(Value::Object(map))
}

/// Whole seconds read as `"MM:SS minutes"`; anything finer keeps its fraction
/// as `"90.5 seconds"`.
fn time_to_compact(seconds: f64) -> String {
    if seconds.fract() == 0.0 {
        units::seconds_to_time_string(seconds)
    } else {
        format!("{seconds} seconds")
    }
}

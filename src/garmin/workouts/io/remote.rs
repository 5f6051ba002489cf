use serde_json::{Map, Value, json};

use crate::garmin::workouts::error::{Result, WorkoutError};
use crate::garmin::workouts::io::fields::{
    Object, ROOT, as_object, child_path, float, index_path, invalid, optional, optional_u64,
    require_array, require_f64, require_object, require_str, require_u64,
};
use crate::garmin::workouts::model::{
    DISTANCE_UNIT_FACTOR, DISTANCE_UNIT_ID, DISTANCE_UNIT_KEY, Duration, HrDirection, NO_TARGET,
    REPEAT_STEP, RUNNING, RemoteKey, SimpleStep, Step, StepKind, Target, Workout,
};

const REPEAT_GROUP: &str = "RepeatGroupDTO";
const EXECUTABLE_STEP: &str = "ExecutableStepDTO";

/// Parses a Garmin Connect workout document into a [`Workout`].
///
/// The document must hold exactly one workout segment and that segment must
/// be a running segment.
pub fn parse_remote_workout(document: &Value) -> Result<Workout> {
    let workout = as_object(document, ROOT)?;
    let name = require_str(workout, "workoutName", ROOT)?.to_string();
    let id = optional_u64(workout, "workoutId", ROOT)?;

    let segments = require_array(workout, "workoutSegments", ROOT)?;
    let segments_path = child_path(ROOT, "workoutSegments");
    let [segment] = segments else {
        return Err(invalid(
            workout,
            &segments_path,
            format!("exactly one workout segment, found {}", segments.len()),
        ));
    };

    let segment_path = index_path(&segments_path, 0);
    let segment = as_object(segment, &segment_path)?;
    let sport_path = child_path(&segment_path, "sportType");
    let sport = require_object(segment, "sportType", &segment_path)?;
    let sport_key = require_str(sport, "sportTypeKey", &sport_path)?;
    if sport_key != RUNNING.key {
        return Err(WorkoutError::UnsupportedSport {
            value: sport_key.to_string(),
            path: child_path(&sport_path, "sportTypeKey"),
            node: Value::Object(segment.clone()),
        });
    }

    let steps = require_array(segment, "workoutSteps", &segment_path)?;
    let steps = parse_steps(steps, &child_path(&segment_path, "workoutSteps"))?;

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

    match require_str(step, "type", path)? {
        REPEAT_GROUP => {
            let count = require_u64(step, "numberOfIterations", path)?;
            let count = u32::try_from(count)
                .ok()
                .filter(|count| *count > 0)
                .ok_or_else(|| {
                    invalid(
                        step,
                        &child_path(path, "numberOfIterations"),
                        "a positive number of iterations",
                    )
                })?;
            let children = require_array(step, "workoutSteps", path)?;
            let children_path = child_path(path, "workoutSteps");
            if children.is_empty() {
                return Err(invalid(step, &children_path, "at least one step"));
            }
            Ok(Step::Repetition {
                count,
                steps: parse_steps(children, &children_path)?,
            })
        }
        EXECUTABLE_STEP => parse_executable_step(step, path).map(Step::Simple),
        other => Err(WorkoutError::UnsupportedStepType {
            value: other.to_string(),
            path: child_path(path, "type"),
            node: Value::Object(step.clone()),
        }),
    }
}

fn parse_executable_step(step: &Object, path: &str) -> Result<SimpleStep> {
    let step_type_path = child_path(path, "stepType");
    let step_type = require_object(step, "stepType", path)?;
    let key = require_str(step_type, "stepTypeKey", &step_type_path)?;
    let kind = StepKind::from_remote_key(key).ok_or_else(|| WorkoutError::UnsupportedStepType {
        value: key.to_string(),
        path: child_path(&step_type_path, "stepTypeKey"),
        node: Value::Object(step.clone()),
    })?;

    Ok(SimpleStep {
        kind,
        duration: parse_end_condition(step, path)?,
        target: parse_target(step, path)?,
    })
}

fn parse_end_condition(step: &Object, path: &str) -> Result<Duration> {
    let condition_path = child_path(path, "endCondition");
    let condition = require_object(step, "endCondition", path)?;
    let key = require_str(condition, "conditionTypeKey", &condition_path)?;

    let duration = match key {
        "lap.button" => Duration::LapButton,
        "distance" => Duration::Distance {
            meters: require_f64(step, "endConditionValue", path)?,
        },
        "time" => Duration::Time {
            seconds: require_f64(step, "endConditionValue", path)?,
        },
        "calories" => Duration::Calories {
            count: require_f64(step, "endConditionValue", path)?,
        },
        "heart.rate" => {
            let threshold = require_f64(step, "endConditionValue", path)?;
            let compare = require_str(step, "endConditionCompare", path)?;
            let direction = HrDirection::from_compare(compare).ok_or_else(|| {
                WorkoutError::UnsupportedDuration {
                    value: compare.to_string(),
                    path: child_path(path, "endConditionCompare"),
                    node: Value::Object(step.clone()),
                }
            })?;
            Duration::HeartRate {
                threshold,
                direction,
            }
        }
        other => {
            return Err(WorkoutError::UnsupportedDuration {
                value: other.to_string(),
                path: child_path(&condition_path, "conditionTypeKey"),
                node: Value::Object(step.clone()),
            });
        }
    };
    Ok(duration)
}

fn parse_target(step: &Object, path: &str) -> Result<Option<Target>> {
    let Some(target_type) = optional(step, "targetType") else {
        return Ok(None);
    };
    let target_path = child_path(path, "targetType");
    let target_type = as_object(target_type, &target_path)?;
    let key = require_str(target_type, "workoutTargetTypeKey", &target_path)?;

    let target = match key {
        "no.target" => return Ok(None),
        "pace.zone" => Target::PaceRange {
            from_mps: require_f64(step, "targetValueOne", path)?,
            to_mps: require_f64(step, "targetValueTwo", path)?,
        },
        "heart.rate.zone" => match optional_u64(step, "zoneNumber", path)? {
            Some(zone) => Target::HrZoneNumber {
                zone: Target::zone_number(zone)
                    .ok_or_else(|| invalid(step, &child_path(path, "zoneNumber"), "a zone 1..5"))?,
            },
            None => Target::HrZoneRange {
                low: require_f64(step, "targetValueOne", path)?,
                high: require_f64(step, "targetValueTwo", path)?,
            },
        },
        "speed.zone" => Target::SpeedRange {
            from_mps: require_f64(step, "targetValueOne", path)?,
            to_mps: require_f64(step, "targetValueTwo", path)?,
        },
        "cadence" => Target::CadenceRange {
            low: require_f64(step, "targetValueOne", path)?,
            high: require_f64(step, "targetValueTwo", path)?,
        },
        other => {
            return Err(WorkoutError::UnsupportedTarget {
                value: other.to_string(),
                path: child_path(&target_path, "workoutTargetTypeKey"),
                node: Value::Object(step.clone()),
            });
        }
    };
    Ok(Some(target))
}

/// Serialises a [`Workout`] into the document shape Garmin Connect accepts.
///
/// Steps are numbered with a single pre-order counter across the whole tree,
/// so a repeat group takes the number before its children.
pub fn workout_to_remote(workout: &Workout) -> Value {
    let mut step_order = 0;
    let steps = steps_to_remote(&workout.steps, &mut step_order);

    let mut document = Map::new();
    document.insert("sportType".into(), sport_type());
    document.insert("workoutName".into(), Value::String(workout.name.clone()));
    if let Some(id) = workout.id {
        document.insert("workoutId".into(), Value::from(id));
    }
    document.insert(
        "workoutSegments".into(),
        json!([{
            "segmentOrder": 1,
            "sportType": sport_type(),
            "workoutSteps": steps,
        }]),
    );
    Value::Object(document)
}

fn sport_type() -> Value {
    json!({ "sportTypeId": RUNNING.id, "sportTypeKey": RUNNING.key })
}

fn step_type(key: RemoteKey) -> Value {
    json!({ "stepTypeId": key.id, "stepTypeKey": key.key })
}

fn steps_to_remote(steps: &[Step], step_order: &mut u32) -> Vec<Value> {
    steps
        .iter()
        .map(|step| step_to_remote(step, step_order))
        .collect()
}

fn step_to_remote(step: &Step, step_order: &mut u32) -> Value {
    *step_order += 1;
    let order = *step_order;

    match step {
        Step::Repetition { count, steps } => json!({
            "type": REPEAT_GROUP,
            "stepOrder": order,
            "stepType": step_type(REPEAT_STEP),
            "childStepId": 1,
            "smartRepeat": false,
            "numberOfIterations": count,
            "workoutSteps": steps_to_remote(steps, step_order),
        }),
        Step::Simple(simple) => executable_to_remote(simple, order),
    }
}

fn executable_to_remote(step: &SimpleStep, order: u32) -> Value {
    let mut map = Map::new();
    map.insert("type".into(), Value::from(EXECUTABLE_STEP));
    map.insert("stepOrder".into(), Value::from(order));
    map.insert("stepType".into(), step_type(step.kind.remote_type()));

    let condition = step.duration.condition();
    map.insert(
        "endCondition".into(),
        json!({ "conditionTypeId": condition.id, "conditionTypeKey": condition.key }),
    );
    match step.duration {
        Duration::LapButton => {}
        Duration::Distance { meters } => {
            map.insert("endConditionValue".into(), float(meters));
            map.insert(
                "preferredEndConditionUnit".into(),
                json!({
                    "unitId": DISTANCE_UNIT_ID,
                    "unitKey": DISTANCE_UNIT_KEY,
                    "factor": DISTANCE_UNIT_FACTOR,
                }),
            );
        }
        Duration::Time { seconds } => {
            map.insert("endConditionValue".into(), float(seconds));
        }
        Duration::Calories { count } => {
            map.insert("endConditionValue".into(), float(count));
        }
        Duration::HeartRate {
            threshold,
            direction,
        } => {
            map.insert("endConditionValue".into(), float(threshold));
            map.insert("endConditionCompare".into(), Value::from(direction.compare()));
        }
    }

    let target_type = step
        .target
        .as_ref()
        .map_or(NO_TARGET, Target::target_type);
    map.insert(
        "targetType".into(),
        json!({
            "workoutTargetTypeId": target_type.id,
            "workoutTargetTypeKey": target_type.key,
        }),
    );
    match step.target {
        None => {}
        Some(Target::HrZoneNumber { zone }) => {
            map.insert("zoneNumber".into(), Value::from(zone));
        }
        Some(
            Target::PaceRange {
                from_mps: one,
                to_mps: two,
            }
            | Target::SpeedRange {
                from_mps: one,
                to_mps: two,
            }
            | Target::HrZoneRange { low: one, high: two }
            | Target::CadenceRange { low: one, high: two },
        ) => {
            map.insert("targetValueOne".into(), float(one));
            map.insert("targetValueTwo".into(), float(two));
        }
    }

    Value::Object(map)
}

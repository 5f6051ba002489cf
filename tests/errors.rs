use garmin_workouts::WorkoutError;
use garmin_workouts::convert::{to_compact, to_remote};
use serde_json::{Value, json};

fn remote_with_steps(sport: &str, steps: Value) -> Value {
    json!({
        "workoutName": "Broken",
        "workoutSegments": [{
            "segmentOrder": 1,
            "sportType": {"sportTypeId": 2, "sportTypeKey": sport},
            "workoutSteps": steps
        }]
    })
}

fn interval(end_condition: &str) -> Value {
    json!({
        "type": "ExecutableStepDTO",
        "stepOrder": 1,
        "stepType": {"stepTypeId": 3, "stepTypeKey": "interval"},
        "endCondition": {"conditionTypeKey": end_condition},
        "endConditionValue": 60.0
    })
}

fn compact_with_step(step: Value) -> Value {
    json!({"name": "Broken", "steps": [step]})
}

#[test]
fn cycling_segment_is_unsupported() {
    let error = to_compact(&remote_with_steps("cycling", json!([]))).unwrap_err();

    assert!(error.is_unsupported());
    match error {
        WorkoutError::UnsupportedSport { value, path, node } => {
            assert_eq!(value, "cycling");
            assert_eq!(path, "$.workoutSegments[0].sportType.sportTypeKey");
            assert_eq!(node["segmentOrder"], 1);
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn missing_segments_are_reported_by_name() {
    let error = to_compact(&json!({"workoutName": "No segments"})).unwrap_err();

    assert!(!error.is_unsupported());
    match error {
        WorkoutError::MissingField { field, path, node } => {
            assert_eq!(field, "workoutSegments");
            assert_eq!(path, "$.workoutSegments");
            assert_eq!(node, json!({"workoutName": "No segments"}));
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn repeat_group_without_iterations_names_the_nested_path() {
    let steps = json!([{
        "type": "RepeatGroupDTO",
        "stepOrder": 1,
        "workoutSteps": [interval("time")]
    }]);

    match to_compact(&remote_with_steps("running", steps)).unwrap_err() {
        WorkoutError::MissingField { field, path, .. } => {
            assert_eq!(field, "numberOfIterations");
            assert_eq!(
                path,
                "$.workoutSegments[0].workoutSteps[0].numberOfIterations"
            );
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn more_than_one_segment_is_rejected() {
    let mut remote = remote_with_steps("running", json!([interval("time")]));
    let segment = remote["workoutSegments"][0].clone();
    remote["workoutSegments"]
        .as_array_mut()
        .expect("segments")
        .push(segment);

    assert!(matches!(
        to_compact(&remote).unwrap_err(),
        WorkoutError::InvalidField { .. }
    ));
}

#[test]
fn unknown_step_type_key_is_unsupported() {
    let mut step = interval("time");
    step["stepType"]["stepTypeKey"] = json!("mobility");

    match to_compact(&remote_with_steps("running", json!([step]))).unwrap_err() {
        WorkoutError::UnsupportedStepType { value, path, node } => {
            assert_eq!(value, "mobility");
            assert_eq!(path, "$.workoutSegments[0].workoutSteps[0].stepType.stepTypeKey");
            assert_eq!(node["endCondition"]["conditionTypeKey"], "time");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn unknown_step_discriminator_is_unsupported() {
    let mut step = interval("time");
    step["type"] = json!("SmartStepDTO");

    let error = to_compact(&remote_with_steps("running", json!([step]))).unwrap_err();
    assert!(matches!(
        error,
        WorkoutError::UnsupportedStepType { ref value, .. } if value == "SmartStepDTO"
    ));
}

#[test]
fn unknown_end_condition_is_unsupported() {
    let error =
        to_compact(&remote_with_steps("running", json!([interval("fixed.rest")]))).unwrap_err();

    assert!(matches!(
        error,
        WorkoutError::UnsupportedDuration { ref value, .. } if value == "fixed.rest"
    ));
}

#[test]
fn heart_rate_end_condition_needs_a_known_comparison() {
    let mut step = interval("heart.rate");
    step["endConditionCompare"] = json!("eq");

    match to_compact(&remote_with_steps("running", json!([step]))).unwrap_err() {
        WorkoutError::UnsupportedDuration { value, path, .. } => {
            assert_eq!(value, "eq");
            assert_eq!(path, "$.workoutSegments[0].workoutSteps[0].endConditionCompare");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn unknown_target_is_unsupported() {
    let mut step = interval("time");
    step["targetType"] = json!({"workoutTargetTypeId": 2, "workoutTargetTypeKey": "power.zone"});

    let error = to_compact(&remote_with_steps("running", json!([step]))).unwrap_err();
    assert!(matches!(
        error,
        WorkoutError::UnsupportedTarget { ref value, .. } if value == "power.zone"
    ));
}

#[test]
fn pace_target_without_values_is_a_missing_field() {
    let mut step = interval("time");
    step["targetType"] = json!({"workoutTargetTypeKey": "pace.zone"});
    step["targetValueOne"] = json!(3.0);

    match to_compact(&remote_with_steps("running", json!([step]))).unwrap_err() {
        WorkoutError::MissingField { field, .. } => assert_eq!(field, "targetValueTwo"),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn distance_step_with_only_pace_from_is_incomplete() {
    let compact = compact_with_step(json!({
        "type": "run",
        "distance": 1000,
        "pace_from": "5:00 min/km"
    }));

    match to_remote(&compact).unwrap_err() {
        WorkoutError::IncompletePaceRange { path, node } => {
            assert_eq!(path, "$.steps[0]");
            assert_eq!(node["pace_from"], "5:00 min/km");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn distance_step_without_any_pace_has_no_target() {
    let compact = compact_with_step(json!({"type": "run", "distance": 1000}));

    let remote = to_remote(&compact).expect("compact converted");
    let step = &remote["workoutSegments"][0]["workoutSteps"][0];
    assert_eq!(step["targetType"]["workoutTargetTypeKey"], "no.target");
}

#[test]
fn other_ranges_need_both_bounds() {
    let compact = compact_with_step(json!({"type": "run", "time": "10:00 minutes", "hr_low": 120}));

    match to_remote(&compact).unwrap_err() {
        WorkoutError::IncompleteRange {
            present, missing, ..
        } => {
            assert_eq!(present, "hr_low");
            assert_eq!(missing, "hr_high");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn compact_workout_requires_name_and_steps() {
    match to_remote(&json!({"steps": []})).unwrap_err() {
        WorkoutError::MissingField { field, .. } => assert_eq!(field, "name"),
        other => panic!("unexpected error: {other}"),
    }
    match to_remote(&json!({"name": "Empty"})).unwrap_err() {
        WorkoutError::MissingField { field, .. } => assert_eq!(field, "steps"),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn compact_step_requires_type_and_repetition_requires_count() {
    match to_remote(&compact_with_step(json!({"distance": 1000}))).unwrap_err() {
        WorkoutError::MissingField { field, path, .. } => {
            assert_eq!(field, "type");
            assert_eq!(path, "$.steps[0].type");
        }
        other => panic!("unexpected error: {other}"),
    }

    let repetition = json!({"type": "repetition", "steps": [{"type": "run", "lap_button": true}]});
    match to_remote(&compact_with_step(repetition)).unwrap_err() {
        WorkoutError::MissingField { field, .. } => assert_eq!(field, "count"),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn compact_repetition_must_not_be_empty() {
    let repetition = json!({"type": "repetition", "count": 3, "steps": []});

    assert!(matches!(
        to_remote(&compact_with_step(repetition)).unwrap_err(),
        WorkoutError::InvalidField { .. }
    ));
}

#[test]
fn compact_step_needs_exactly_one_duration() {
    let none = compact_with_step(json!({"type": "run"}));
    match to_remote(&none).unwrap_err() {
        WorkoutError::MissingField { field, .. } => assert_eq!(field, "duration"),
        other => panic!("unexpected error: {other}"),
    }

    let two = compact_with_step(json!({"type": "run", "distance": 400, "time": "02:00 minutes"}));
    assert!(matches!(
        to_remote(&two).unwrap_err(),
        WorkoutError::InvalidField { .. }
    ));
}

#[test]
fn compact_time_must_be_a_time_string() {
    let compact = compact_with_step(json!({"type": "run", "time": 600}));

    match to_remote(&compact).unwrap_err() {
        WorkoutError::InvalidField {
            path,
            expected,
            node,
        } => {
            assert_eq!(path, "$.steps[0].time");
            assert_eq!(expected, "a time string such as '05:00 minutes'");
            assert_eq!(node["time"], 600);
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn oversized_compact_time_is_a_format_error() {
    let compact = compact_with_step(json!({"type": "run", "time": "307445734561825861:00 minutes"}));

    assert!(matches!(
        to_remote(&compact).unwrap_err(),
        WorkoutError::Format { .. }
    ));
}

#[test]
fn unknown_compact_step_type_is_unsupported() {
    let error = to_remote(&compact_with_step(json!({"type": "swim", "distance": 100}))).unwrap_err();

    assert!(matches!(
        error,
        WorkoutError::UnsupportedStepType { ref value, .. } if value == "swim"
    ));
}

#[test]
fn heart_rate_zone_must_be_between_one_and_five() {
    let compact = compact_with_step(json!({"type": "run", "lap_button": true, "hr_zone": 6}));

    assert!(matches!(
        to_remote(&compact).unwrap_err(),
        WorkoutError::InvalidField { .. }
    ));
}

#[test]
fn malformed_pace_is_a_format_error() {
    let compact = compact_with_step(json!({
        "type": "run",
        "distance": 1000,
        "pace_from": "530",
        "pace_to": "5:00"
    }));

    assert!(matches!(
        to_remote(&compact).unwrap_err(),
        WorkoutError::Format { ref value, .. } if value == "530"
    ));
}

#[test]
fn step_with_two_targets_is_rejected() {
    let compact = compact_with_step(json!({
        "type": "run",
        "lap_button": true,
        "hr_zone": 3,
        "cadence_from": 170,
        "cadence_to": 180
    }));

    assert!(matches!(
        to_remote(&compact).unwrap_err(),
        WorkoutError::InvalidField { .. }
    ));
}

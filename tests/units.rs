use garmin_workouts::WorkoutError;
use garmin_workouts::units::{
    kmh_string_to_mps, kmh_to_mps, mps_to_kmh_string, mps_to_pace_minutes_seconds,
    mps_to_pace_string, pace_string_to_mps, seconds_to_time_string, time_string_to_seconds,
};

fn seconds_per_km(mps: f64) -> f64 {
    1000.0 / mps
}

#[test]
fn time_strings_use_the_largest_non_zero_unit() {
    assert_eq!(seconds_to_time_string(0.0), "00 seconds");
    assert_eq!(seconds_to_time_string(45.0), "45 seconds");
    assert_eq!(seconds_to_time_string(90.0), "01:30 minutes");
    assert_eq!(seconds_to_time_string(3661.0), "01:01:01 hours");
    assert_eq!(seconds_to_time_string(90.9), "01:30 minutes");
}

#[test]
fn time_strings_parse_back_to_seconds() {
    for seconds in [0.0, 45.0, 90.0, 600.0, 3661.0, 7200.0] {
        let text = seconds_to_time_string(seconds);
        assert_eq!(time_string_to_seconds(&text).expect("time parsed"), seconds);
    }
    assert_eq!(time_string_to_seconds("75").expect("bare seconds"), 75.0);
}

#[test]
fn time_string_with_mismatched_unit_is_rejected() {
    let error = time_string_to_seconds("01:30 hours").unwrap_err();
    assert!(matches!(error, WorkoutError::Format { .. }));
    assert!(time_string_to_seconds("ten minutes").is_err());
    assert!(time_string_to_seconds("").is_err());
}

#[test]
fn oversized_time_components_are_rejected() {
    for time in [
        "307445734561825861:00 minutes",
        "5124095576030432:00:00 hours",
        "00:307445734561825861:00 hours",
    ] {
        match time_string_to_seconds(time).unwrap_err() {
            WorkoutError::Format { value, reason } => {
                assert_eq!(value, time);
                assert_eq!(reason, "time is too large");
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}

#[test]
fn fractional_seconds_parse_with_or_without_unit() {
    assert_eq!(time_string_to_seconds("90.5 seconds").expect("time parsed"), 90.5);
    assert_eq!(time_string_to_seconds("0.25").expect("time parsed"), 0.25);
}

#[test]
fn speed_formats_as_kilometers_per_hour() {
    assert_eq!(mps_to_kmh_string(1.0).expect("speed formatted"), "3.6 km/h");
    assert_eq!(
        mps_to_kmh_string(6.11111116).expect("speed formatted"),
        "22.0 km/h"
    );
    assert!(mps_to_kmh_string(f64::NAN).is_err());
}

#[test]
fn speed_strings_parse_with_or_without_unit() {
    let with_unit = kmh_string_to_mps("36.0 km/h").expect("speed parsed");
    let without_unit = kmh_string_to_mps("36").expect("speed parsed");
    assert!((with_unit - 10.0).abs() < 1e-9);
    assert!((without_unit - 10.0).abs() < 1e-9);
    assert!((kmh_to_mps(18.0) - 5.0).abs() < 1e-9);
    assert!(kmh_string_to_mps("fast").is_err());
}

#[test]
fn pace_splits_into_minutes_and_seconds() {
    assert_eq!(mps_to_pace_minutes_seconds(2.5).expect("pace"), (6, 40));
    assert_eq!(mps_to_pace_string(2.5).expect("pace"), "6:40 min/km");
    assert_eq!(mps_to_pace_string(3.0).expect("pace"), "5:33 min/km");
}

#[test]
fn pace_just_under_a_whole_minute_rounds_seconds_to_sixty() {
    assert_eq!(mps_to_pace_minutes_seconds(4.1667).expect("pace"), (3, 60));
    assert_eq!(mps_to_pace_string(4.1667).expect("pace"), "4:00 min/km");
    assert_eq!(mps_to_pace_string(1000.0 / 300.0).expect("pace"), "5:00 min/km");
}

#[test]
fn pace_strings_round_trip_within_one_second_per_km() {
    for mps in [2.5, 3.0, 4.1667] {
        let text = mps_to_pace_string(mps).expect("pace formatted");
        let parsed = pace_string_to_mps(&text).expect("pace parsed");
        assert!(
            (seconds_per_km(parsed) - seconds_per_km(mps)).abs() <= 1.0,
            "{mps} m/s became {text}"
        );
    }
}

#[test]
fn pace_unit_token_is_optional() {
    let bare = pace_string_to_mps("5:00").expect("pace parsed");
    let with_unit = pace_string_to_mps("5:00 min/km").expect("pace parsed");
    assert_eq!(bare, with_unit);
    assert!((bare - 1000.0 / 300.0).abs() < 1e-12);
}

#[test]
fn malformed_paces_are_rejected() {
    for pace in ["530", "5-30 min/km", "five:30", "0:00", ""] {
        let error = pace_string_to_mps(pace).unwrap_err();
        assert!(
            matches!(error, WorkoutError::Format { .. }),
            "{pace:?} gave {error}"
        );
    }
    assert!(mps_to_pace_minutes_seconds(0.0).is_err());
    assert!(mps_to_pace_minutes_seconds(-3.0).is_err());
}

#[test]
fn pace_seconds_must_stay_below_sixty() {
    for pace in ["4:75", "3:60 min/km"] {
        match pace_string_to_mps(pace).unwrap_err() {
            WorkoutError::Format { value, reason } => {
                assert_eq!(value, pace);
                assert_eq!(reason, "seconds must be below 60");
            }
            other => panic!("unexpected error: {other}"),
        }
    }
    assert!(pace_string_to_mps("4:59").is_ok());
}

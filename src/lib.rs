//! Core library for the garmin-workouts command line application.
//!
//! The heart of the crate is the translator between the verbose, type-tagged
//! workout documents exchanged with Garmin Connect and a compact format meant
//! for hand-editing and version control. Unit conversions live in
//! [`garmin::workouts::units`], the typed workout tree in
//! [`garmin::workouts::model`], the two document adapters under
//! [`garmin::workouts::io`], the tree-to-tree entry points in
//! [`garmin::workouts::convert`], and file orchestration in
//! [`garmin::workouts::sync`].

pub mod garmin;

pub use garmin::workouts::{Result, WorkoutError, convert, error, io, model, sync, units};

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use serde_json::Value;
use tracing::{debug, info, instrument, warn};

use crate::garmin::workouts::convert;
use crate::garmin::workouts::error::Result;
use crate::garmin::workouts::io::{compact, remote};
use crate::garmin::workouts::model::Workout;

/// Outcome of [`export_collection`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExportSummary {
    /// Compact files written, in input order.
    pub written: Vec<PathBuf>,
    /// Number of workouts skipped because they use unsupported features.
    pub skipped: usize,
}

/// Converts a Garmin Connect JSON document into a compact YAML file.
#[instrument(
    level = "info",
    skip_all,
    fields(input = %input.display(), output = %output.display())
)]
pub fn remote_to_compact(input: &Path, output: &Path) -> Result<()> {
    let document = read_json(input)?;
    let compact = convert::to_compact(&document)?;
    info!("converted remote workout to compact form");
    write_yaml(output, &compact)
}

/// Converts a compact YAML (or JSON) file into a Garmin Connect JSON document.
#[instrument(
    level = "info",
    skip_all,
    fields(input = %input.display(), output = %output.display())
)]
pub fn compact_to_remote(input: &Path, output: &Path) -> Result<()> {
    let document = read_yaml(input)?;
    let remote = convert::to_remote(&document)?;
    info!("converted compact workout to remote form");
    write_json(output, &remote)
}

/// Splits a raw export holding several Garmin Connect workouts into one
/// compact file per workout inside `output_dir`.
///
/// Workouts using a sport, step, duration, or target the converter does not
/// implement are skipped with a warning. Any other error aborts the export.
#[instrument(
    level = "info",
    skip_all,
    fields(input = %input.display(), output_dir = %output_dir.display())
)]
pub fn export_collection(input: &Path, output_dir: &Path) -> Result<ExportSummary> {
    let document = read_json(input)?;
    let workouts = match document {
        Value::Array(items) => items,
        single => vec![single],
    };
    info!(workout_count = workouts.len(), "read workouts from export");

    fs::create_dir_all(output_dir)?;
    let mut summary = ExportSummary::default();
    let mut used_names = HashSet::new();

    for (index, document) in workouts.iter().enumerate() {
        let workout = match remote::parse_remote_workout(document) {
            Ok(workout) => workout,
            Err(error) if error.is_unsupported() => {
                warn!(index, %error, "skipping workout");
                summary.skipped += 1;
                continue;
            }
            Err(error) => return Err(error),
        };

        let path = output_dir.join(format!("{}.yaml", unique_stem(&workout, &mut used_names)));
        write_yaml(&path, &compact::workout_to_compact(&workout)?)?;
        debug!(name = %workout.name, path = %path.display(), "workout exported");
        summary.written.push(path);
    }

    info!(
        written = summary.written.len(),
        skipped = summary.skipped,
        "export finished"
    );
    Ok(summary)
}

/// Writes the Garmin Connect document of a one-step sample workout.
#[instrument(level = "info", skip_all, fields(output = %output.display()))]
pub fn write_sample(output: &Path, name: Option<String>) -> Result<Workout> {
    let workout = Workout::sample(name);
    write_json(output, &remote::workout_to_remote(&workout))?;
    info!(name = %workout.name, "sample workout written");
    Ok(workout)
}

fn unique_stem(workout: &Workout, used: &mut HashSet<String>) -> String {
    let base = slug(&workout.name);
    let mut stem = base.clone();
    let mut suffix = 2;
    while !used.insert(stem.clone()) {
        stem = format!("{base}_{suffix}");
        suffix += 1;
    }
    stem
}

fn slug(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    for character in name.trim().chars() {
        if character.is_alphanumeric() {
            slug.extend(character.to_lowercase());
        } else if !slug.ends_with('_') {
            slug.push('_');
        }
    }
    let slug = slug.trim_matches('_');
    if slug.is_empty() {
        "workout".to_string()
    } else {
        slug.to_string()
    }
}

fn read_json(path: &Path) -> Result<Value> {
    let source = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&source)?)
}

fn read_yaml(path: &Path) -> Result<Value> {
    let source = fs::read_to_string(path)?;
    Ok(serde_yaml::from_str(&source)?)
}

fn write_json(path: &Path, document: &Value) -> Result<()> {
    fs::write(path, serde_json::to_string_pretty(document)?)?;
    Ok(())
}

fn write_yaml(path: &Path, document: &Value) -> Result<()> {
    fs::write(path, serde_yaml::to_string(document)?)?;
    Ok(())
}

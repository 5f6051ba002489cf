use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use garmin_workouts::sync;
use garmin_workouts::{Result, WorkoutError};
use tracing_subscriber::EnvFilter;

fn main() {
    let cli = Cli::parse();
    if let Err(error) = init_logging(cli.verbose).and_then(|()| run(cli)) {
        eprintln!("error: {error}");
        std::process::exit(1);
    }
}

fn init_logging(verbose: bool) -> Result<()> {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init()
        .map_err(|error| WorkoutError::Logging(error.to_string()))
}

fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Command::Convert(args) => execute_convert(args),
        Command::Export(args) => execute_export(args),
        Command::Sample(args) => sync::write_sample(&args.output, args.name).map(|_| ()),
    }
}

fn execute_convert(args: ConvertArgs) -> Result<()> {
    if !args.input.exists() {
        return Err(WorkoutError::MissingInput(args.input));
    }

    match (args.from, args.to) {
        (WorkoutFormat::Remote, WorkoutFormat::Compact) => {
            sync::remote_to_compact(&args.input, &args.output)
        }
        (WorkoutFormat::Compact, WorkoutFormat::Remote) => {
            sync::compact_to_remote(&args.input, &args.output)
        }
        _ => Err(WorkoutError::UnsupportedConversion {
            from: args.from.to_string(),
            to: args.to.to_string(),
        }),
    }
}

fn execute_export(args: ExportArgs) -> Result<()> {
    if !args.input.exists() {
        return Err(WorkoutError::MissingInput(args.input));
    }
    let summary = sync::export_collection(&args.input, &args.output_dir)?;
    for path in &summary.written {
        println!("{}", path.display());
    }
    Ok(())
}

#[derive(Parser)]
#[command(
    author,
    version,
    about = "Keep Garmin Connect workouts as hand-editable files."
)]
struct Cli {
    /// Log debug output (overridden by RUST_LOG).
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Convert a single workout between the two representations.
    Convert(ConvertArgs),
    /// Split a raw export of Garmin Connect workouts into compact files.
    Export(ExportArgs),
    /// Write the Garmin Connect document of a sample workout.
    Sample(SampleArgs),
}

#[derive(clap::Args)]
struct ConvertArgs {
    /// Source representation.
    #[arg(long, value_enum)]
    from: WorkoutFormat,

    /// Input file path.
    #[arg(long)]
    input: PathBuf,

    /// Target representation.
    #[arg(long, value_enum)]
    to: WorkoutFormat,

    /// Output file path.
    #[arg(long)]
    output: PathBuf,
}

#[derive(clap::Args)]
struct ExportArgs {
    /// JSON file holding an array of Garmin Connect workouts.
    #[arg(long)]
    input: PathBuf,

    /// Directory receiving one compact file per workout.
    #[arg(long)]
    output_dir: PathBuf,
}

#[derive(clap::Args)]
struct SampleArgs {
    /// Output file path.
    #[arg(long)]
    output: PathBuf,

    /// Workout name; a random one is generated when omitted.
    #[arg(long)]
    name: Option<String>,
}

#[derive(Copy, Clone, Debug, ValueEnum)]
enum WorkoutFormat {
    /// Garmin Connect JSON.
    Remote,
    /// Hand-editable YAML.
    Compact,
}

impl std::fmt::Display for WorkoutFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            WorkoutFormat::Remote => write!(f, "remote"),
            WorkoutFormat::Compact => write!(f, "compact"),
        }
    }
}

use uuid::Uuid;

/// An `(id, key)` pair as used by Garmin Connect to tag sports, step types,
/// end conditions, and target types.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RemoteKey {
    pub id: u32,
    pub key: &'static str,
}

impl RemoteKey {
    const fn new(id: u32, key: &'static str) -> Self {
        Self { id, key }
    }
}

/// The only sport the converter understands.
pub const RUNNING: RemoteKey = RemoteKey::new(1, "running");

/// Step type of repeat groups.
pub const REPEAT_STEP: RemoteKey = RemoteKey::new(6, "repeat");

/// Target type of steps without intensity guidance.
pub const NO_TARGET: RemoteKey = RemoteKey::new(1, "no.target");

/// Unit Garmin Connect expects on distance steps. The compact form does not
/// record it.
pub const DISTANCE_UNIT_ID: u32 = 2;
pub const DISTANCE_UNIT_KEY: &str = "kilometer";
pub const DISTANCE_UNIT_FACTOR: f64 = 100000.0;

/// A structured running workout.
#[derive(Debug, Clone, PartialEq)]
pub struct Workout {
    /// Display name of the workout.
    pub name: String,
    /// Identifier assigned by Garmin Connect once the workout was created.
    pub id: Option<u64>,
    /// Top level steps, in execution order.
    pub steps: Vec<Step>,
}

impl Workout {
    /// A minimal workout: one minute of warm-up without a target.
    ///
    /// Without a name a random `Workout xxxxxx` name is generated.
    pub fn sample(name: Option<String>) -> Self {
        let name = name.unwrap_or_else(random_name);
        Self {
            name,
            id: None,
            steps: vec![Step::Simple(SimpleStep {
                kind: StepKind::Warmup,
                duration: Duration::Time { seconds: 60.0 },
                target: None,
            })],
        }
    }

    /// Total number of steps, repeat groups included.
    pub fn step_count(&self) -> usize {
        count_steps(&self.steps)
    }
}

fn count_steps(steps: &[Step]) -> usize {
    steps
        .iter()
        .map(|step| match step {
            Step::Repetition { steps, .. } => 1 + count_steps(steps),
            Step::Simple(_) => 1,
        })
        .sum()
}

fn random_name() -> String {
    let hash = Uuid::new_v4().simple().to_string();
    format!("Workout {}", &hash[..6])
}

/// One node of the interval plan.
#[derive(Debug, Clone, PartialEq)]
pub enum Step {
    /// Repeats the child steps `count` times. Children are never empty.
    Repetition { count: u32, steps: Vec<Step> },
    /// A single executable step.
    Simple(SimpleStep),
}

#[derive(Debug, Clone, PartialEq)]
pub struct SimpleStep {
    pub kind: StepKind,
    pub duration: Duration,
    pub target: Option<Target>,
}

/// Intent of an executable step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepKind {
    Warmup,
    Cooldown,
    Run,
    Recovery,
    Rest,
    Other,
}

impl StepKind {
    const ALL: [StepKind; 6] = [
        StepKind::Warmup,
        StepKind::Cooldown,
        StepKind::Run,
        StepKind::Recovery,
        StepKind::Rest,
        StepKind::Other,
    ];

    /// Name used in the compact format's `type` field.
    pub fn compact_name(self) -> &'static str {
        match self {
            StepKind::Warmup => "warmup",
            StepKind::Cooldown => "cooldown",
            StepKind::Run => "run",
            StepKind::Recovery => "recovery",
            StepKind::Rest => "rest",
            StepKind::Other => "other",
        }
    }

    /// Step type pair used by Garmin Connect.
    pub fn remote_type(self) -> RemoteKey {
        match self {
            StepKind::Warmup => RemoteKey::new(1, "warmup"),
            StepKind::Cooldown => RemoteKey::new(2, "cooldown"),
            StepKind::Run => RemoteKey::new(3, "interval"),
            StepKind::Recovery => RemoteKey::new(4, "recovery"),
            StepKind::Rest => RemoteKey::new(5, "rest"),
            StepKind::Other => RemoteKey::new(7, "other"),
        }
    }

    pub fn from_compact_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.compact_name() == name)
    }

    pub fn from_remote_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.remote_type().key == key)
    }
}

/// End condition of a step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Duration {
    /// Ends when the lap button is pressed.
    LapButton,
    Distance { meters: f64 },
    Time { seconds: f64 },
    Calories { count: f64 },
    /// Ends once the heart rate crosses `threshold` in `direction`.
    HeartRate { threshold: f64, direction: HrDirection },
}

impl Duration {
    /// End condition pair used by Garmin Connect.
    pub fn condition(&self) -> RemoteKey {
        match self {
            Duration::LapButton => RemoteKey::new(1, "lap.button"),
            Duration::Time { .. } => RemoteKey::new(2, "time"),
            Duration::Distance { .. } => RemoteKey::new(3, "distance"),
            Duration::Calories { .. } => RemoteKey::new(4, "calories"),
            Duration::HeartRate { .. } => RemoteKey::new(6, "heart.rate"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HrDirection {
    Above,
    Below,
}

impl HrDirection {
    /// Value of `endConditionCompare`.
    pub fn compare(self) -> &'static str {
        match self {
            HrDirection::Above => "gt",
            HrDirection::Below => "lt",
        }
    }

    pub fn from_compare(compare: &str) -> Option<Self> {
        match compare {
            "gt" => Some(HrDirection::Above),
            "lt" => Some(HrDirection::Below),
            _ => None,
        }
    }
}

/// Intensity guidance of a step. Speeds are stored in meters per second.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Target {
    PaceRange { from_mps: f64, to_mps: f64 },
    /// One of the five heart-rate zones configured on the watch.
    HrZoneNumber { zone: u8 },
    HrZoneRange { low: f64, high: f64 },
    SpeedRange { from_mps: f64, to_mps: f64 },
    CadenceRange { low: f64, high: f64 },
}

impl Target {
    /// Validates a heart-rate zone number.
    pub fn zone_number(zone: u64) -> Option<u8> {
        u8::try_from(zone).ok().filter(|zone| (1..=5).contains(zone))
    }

    /// Target type pair used by Garmin Connect.
    pub fn target_type(&self) -> RemoteKey {
        match self {
            Target::CadenceRange { .. } => RemoteKey::new(3, "cadence"),
            Target::HrZoneNumber { .. } | Target::HrZoneRange { .. } => {
                RemoteKey::new(4, "heart.rate.zone")
            }
            Target::SpeedRange { .. } => RemoteKey::new(5, "speed.zone"),
            Target::PaceRange { .. } => RemoteKey::new(6, "pace.zone"),
        }
    }
}

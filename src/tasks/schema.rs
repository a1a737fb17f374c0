use clap::ValueEnum;
use serde::Deserialize;
use std::fmt;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TimeUnit {
    #[default]
    Seconds,
    Nanoseconds,
}

impl TimeUnit {
    pub fn to_seconds(&self, value: f64) -> f64 {
        match self {
            TimeUnit::Seconds => value,
            TimeUnit::Nanoseconds => value / 1e9,
        }
    }
}

impl fmt::Display for TimeUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TimeUnit::Seconds => write!(f, "s"),
            TimeUnit::Nanoseconds => write!(f, "ns"),
        }
    }
}

/// Names of the two CSV columns a measurement is read from.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct ColumnSchema {
    /// Header of the processor-count column.
    pub processors: String,
    /// Header of the elapsed-time column.
    pub time: String,
    /// Unit of the elapsed-time column. Only used for log output.
    #[serde(default)]
    pub unit: TimeUnit,
}

impl ColumnSchema {
    pub fn new(processors: &str, time: &str, unit: TimeUnit) -> Self {
        Self {
            processors: processors.to_string(),
            time: time.to_string(),
            unit,
        }
    }
}

/// Column layouts written by the different benchmark drivers.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum SchemaPreset {
    /// `Nb Processeurs`, `Temps` (seconds)
    French,
    /// `numProcessors`, `timeDurationNs` (nanoseconds)
    English,
    /// `numWorkers`, `duration (ns)`
    MasterSocket,
}

impl fmt::Display for SchemaPreset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SchemaPreset::French => write!(f, "french"),
            SchemaPreset::English => write!(f, "english"),
            SchemaPreset::MasterSocket => write!(f, "master-socket"),
        }
    }
}

impl SchemaPreset {
    pub fn columns(&self) -> ColumnSchema {
        match self {
            SchemaPreset::French => ColumnSchema::new("Nb Processeurs", "Temps", TimeUnit::Seconds),
            SchemaPreset::English => {
                ColumnSchema::new("numProcessors", "timeDurationNs", TimeUnit::Nanoseconds)
            }
            SchemaPreset::MasterSocket => {
                ColumnSchema::new("numWorkers", "duration (ns)", TimeUnit::Nanoseconds)
            }
        }
    }
}

/// Schema as written in a plot table: either a preset name or explicit
/// column names.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum SchemaSpec {
    Preset(SchemaPreset),
    Columns(ColumnSchema),
}

impl SchemaSpec {
    pub fn columns(&self) -> ColumnSchema {
        match self {
            SchemaSpec::Preset(preset) => preset.columns(),
            SchemaSpec::Columns(columns) => columns.clone(),
        }
    }
}

impl fmt::Display for SchemaSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SchemaSpec::Preset(preset) => write!(f, "{preset}"),
            SchemaSpec::Columns(columns) => {
                write!(f, "{}/{} ({})", columns.processors, columns.time, columns.unit)
            }
        }
    }
}

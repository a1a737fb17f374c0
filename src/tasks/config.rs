use crate::{
    env::Env,
    error::{ReportError, Result},
    tasks::{
        chart::IdealCurve,
        schema::{SchemaPreset, SchemaSpec},
    },
};
use clap::ValueEnum;
use log::{debug, error};
use serde::Deserialize;
use std::{
    collections::BTreeMap,
    fmt, fs, io,
    path::{Path, PathBuf},
};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum ScalingKind {
    /// Fixed total work, more processors should divide the time
    Strong,
    /// Fixed work per processor, time should stay flat
    Weak,
}

impl fmt::Display for ScalingKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScalingKind::Strong => write!(f, "Strong"),
            ScalingKind::Weak => write!(f, "Weak"),
        }
    }
}

impl ScalingKind {
    pub fn ideal_curve(&self) -> IdealCurve {
        match self {
            ScalingKind::Strong => IdealCurve::Linear,
            ScalingKind::Weak => IdealCurve::Constant,
        }
    }
}

/// Where performance logs are read from and charts are written to.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReportDirs {
    pub input_dir: PathBuf,
    pub output_dir: PathBuf,
}

impl ReportDirs {
    pub fn new(input_dir: impl Into<PathBuf>, output_dir: impl Into<PathBuf>) -> Self {
        Self {
            input_dir: input_dir.into(),
            output_dir: output_dir.into(),
        }
    }

    /// Default `perfs/` and `courbe/` directories under the working directory.
    pub fn from_env() -> io::Result<Self> {
        Ok(Self::new(Env::input_root()?, Env::output_root()?))
    }
}

/// One entry of the plot table: which log to read, how to read it, and how
/// to draw it.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct PlotConfig {
    /// Dataset name, used as the prefix of the output file
    pub dataset: String,
    pub scaling: ScalingKind,
    /// CSV file, relative to the input directory
    pub input: PathBuf,
    pub schema: SchemaSpec,
    pub title: String,
    /// Output file name, relative to the output directory
    #[serde(default)]
    pub output: Option<String>,
    /// Average rows that repeat a processor count
    #[serde(default)]
    pub average_repeats: bool,
}

impl PlotConfig {
    pub fn new(
        dataset: &str,
        scaling: ScalingKind,
        input: impl Into<PathBuf>,
        schema: SchemaPreset,
        title: &str,
    ) -> Self {
        Self {
            dataset: dataset.to_string(),
            scaling,
            input: input.into(),
            schema: SchemaSpec::Preset(schema),
            title: title.to_string(),
            output: None,
            average_repeats: false,
        }
    }

    pub fn output_name(&self) -> String {
        match &self.output {
            Some(output) => output.clone(),
            None => format!("{}_{}_Scaling.png", self.dataset, self.scaling),
        }
    }

    pub fn input_path(&self, dirs: &ReportDirs) -> PathBuf {
        dirs.input_dir.join(&self.input)
    }

    pub fn output_path(&self, dirs: &ReportDirs) -> PathBuf {
        dirs.output_dir.join(self.output_name())
    }
}

/// The plot table the menu selects from, plus named groups of entries.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct ReportConfig {
    pub plots: Vec<PlotConfig>,
    /// Token to 1-based plot indices
    #[serde(default)]
    pub aliases: BTreeMap<String, Vec<usize>>,
}

impl Default for ReportConfig {
    fn default() -> Self {
        let plots = vec![
            PlotConfig::new(
                "MonteCarlo",
                ScalingKind::Strong,
                "MonteCarlo_Distribue_Strong.csv",
                SchemaPreset::French,
                "Scalabilité Forte - MonteCarlo Distribué",
            ),
            PlotConfig::new(
                "MonteCarlo",
                ScalingKind::Weak,
                "MonteCarlo_Distribue_Weak.csv",
                SchemaPreset::French,
                "Scalabilité Faible - MonteCarlo Distribué",
            ),
            PlotConfig::new(
                "Pi",
                ScalingKind::Strong,
                "performanceSF_assignment102.csv",
                SchemaPreset::English,
                "Scalabilité Forte - Pi (Assignment102)",
            ),
            PlotConfig::new(
                "Pi",
                ScalingKind::Weak,
                "performanceWF_assignment102.csv",
                SchemaPreset::English,
                "Scalabilité Faible - Pi (Assignment102)",
            ),
        ];

        let aliases = BTreeMap::from([
            ("montecarlo".to_string(), vec![1, 2]),
            ("pi".to_string(), vec![3, 4]),
        ]);

        Self { plots, aliases }
    }
}

impl ReportConfig {
    pub const ALL_TOKEN: &'static str = "all";

    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let mut config: ReportConfig = serde_yaml::from_str(yaml)?;

        let mut aliases = BTreeMap::new();
        for (name, indices) in config.aliases {
            let key = name.trim().to_lowercase();
            if aliases.insert(key.clone(), indices).is_some() {
                let reason = format!("alias defined twice (alias={key})");
                error!("{reason}");
                return Err(ReportError::InvalidConfig(reason));
            }
        }
        config.aliases = aliases;
        config.validate()?;

        debug!(
            "loaded plot table (plots={}, aliases={})",
            config.plots.len(),
            config.aliases.len()
        );

        Ok(config)
    }

    pub fn from_path(path: &Path) -> Result<Self> {
        if !path.exists() {
            error!("config file does not exist (path={})", path.display());
            return Err(ReportError::MissingFile(path.to_path_buf()));
        }

        Self::from_yaml(&fs::read_to_string(path)?)
    }

    fn validate(&self) -> Result<()> {
        let invalid = |reason: String| {
            error!("{reason}");
            Err(ReportError::InvalidConfig(reason))
        };

        if self.plots.is_empty() {
            return invalid("plot table has no entries".to_string());
        }

        for (name, indices) in &self.aliases {
            if name == Self::ALL_TOKEN || name.parse::<usize>().is_ok() {
                return invalid(format!("alias shadows a reserved token (alias={name})"));
            }
            if indices.is_empty() {
                return invalid(format!("alias selects no plots (alias={name})"));
            }
            if let Some(idx) = indices.iter().find(|&&i| i == 0 || i > self.plots.len()) {
                return invalid(format!(
                    "alias index out of range (alias={name}, index={idx}, plots={})",
                    self.plots.len()
                ));
            }
        }

        Ok(())
    }

    /// Map a menu token to the plots it selects: a 1-based index, an alias
    /// (case-insensitive), or `all`.
    pub fn resolve(&self, token: &str) -> Result<Vec<&PlotConfig>> {
        let token = token.trim();
        let lowered = token.to_lowercase();

        if lowered == Self::ALL_TOKEN {
            return Ok(self.plots.iter().collect());
        }

        if let Ok(idx) = token.parse::<usize>() {
            if idx >= 1 && idx <= self.plots.len() {
                return Ok(vec![&self.plots[idx - 1]]);
            }
        } else if let Some(indices) = self.aliases.get(&lowered) {
            return indices
                .iter()
                .map(|&i| {
                    i.checked_sub(1)
                        .and_then(|idx| self.plots.get(idx))
                        .ok_or_else(|| {
                            let reason = format!(
                                "alias index out of range (alias={lowered}, index={i}, plots={})",
                                self.plots.len()
                            );
                            error!("{reason}");
                            ReportError::InvalidConfig(reason)
                        })
                })
                .collect();
        }

        debug!("unrecognised selection token (token={token})");
        Err(ReportError::InvalidSelection(token.to_string()))
    }
}

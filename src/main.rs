use clap::{Parser, Subcommand};
use env_logger::Builder;
use log::error;
use speedup::{
    ReportError,
    tasks::{
        config::{PlotConfig, ReportConfig, ReportDirs, ScalingKind},
        menu, report,
        schema::SchemaPreset,
    },
};
use std::{io, path::PathBuf};

#[derive(Parser)]
#[command(name = "speedup", about = "Render speed-up charts from CSV performance logs")]
struct Cli {
    /// Directory holding the CSV performance logs [default: ./perfs]
    #[arg(long, global = true)]
    input_dir: Option<PathBuf>,
    /// Directory the charts are written to [default: ./courbe]
    #[arg(long, global = true)]
    output_dir: Option<PathBuf>,
    /// YAML file replacing the built-in plot table
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    // The name of the task to execute, the interactive menu if omitted
    #[clap(subcommand)]
    task: Option<Command>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Print the menu and read a choice from stdin
    Menu {},
    /// Generate the charts for a menu token without prompting
    Plot {
        /// Plot index, alias (e.g. 'montecarlo', 'pi'), or 'all'
        choice: String,
    },
    /// List the plot table
    List {},
    /// Generate a chart for a CSV log that is not in the plot table
    Render {
        /// CSV file, relative to the input directory
        input: PathBuf,
        /// Dataset name, used as the output file prefix
        #[arg(long)]
        dataset: String,
        #[arg(long)]
        scaling: ScalingKind,
        #[arg(long)]
        schema: SchemaPreset,
        /// Chart title [default: '<dataset> - <scaling> scaling']
        #[arg(long)]
        title: Option<String>,
        /// Average rows that repeat a processor count
        #[arg(long, default_value_t = false)]
        average_repeats: bool,
    },
}

fn main() -> anyhow::Result<()> {
    // Initialize the logger.
    let env = env_logger::Env::default().filter_or("RUST_LOG", "info");
    let mut builder = Builder::from_env(env);
    builder.init();

    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => ReportConfig::from_path(path)?,
        None => ReportConfig::default(),
    };
    let defaults = ReportDirs::from_env().map_err(|e| {
        error!("error resolving working directory (error={e:?})");
        ReportError::from(e)
    })?;
    let dirs = ReportDirs {
        input_dir: cli.input_dir.unwrap_or(defaults.input_dir),
        output_dir: cli.output_dir.unwrap_or(defaults.output_dir),
    };

    let mut stdout = io::stdout();
    match cli.task.unwrap_or(Command::Menu {}) {
        Command::Menu {} => {
            let mut stdin = io::stdin().lock();
            menu::run(&config, &dirs, &mut stdin, &mut stdout)?;
        }
        Command::Plot { choice } => {
            menu::dispatch(&choice, &config, &dirs, &mut stdout)?;
        }
        Command::List {} => {
            menu::list(&config, &dirs, &mut stdout)?;
        }
        Command::Render {
            input,
            dataset,
            scaling,
            schema,
            title,
            average_repeats,
        } => {
            let title = title.unwrap_or_else(|| format!("{dataset} - {scaling} scaling"));
            let mut plot = PlotConfig::new(&dataset, scaling, input, schema, &title);
            plot.average_repeats = average_repeats;
            report::generate(&plot, &dirs)?;
        }
    }

    Ok(())
}

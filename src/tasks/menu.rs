use crate::{
    error::{ReportError, Result},
    tasks::{
        config::{ReportConfig, ReportDirs},
        report,
    },
};
use log::info;
use std::{
    io::{self, BufRead, Write},
    path::PathBuf,
};

pub const INVALID_CHOICE: &str = "Choix invalide.";

pub fn print_menu<W: Write>(config: &ReportConfig, out: &mut W) -> io::Result<()> {
    writeln!(out, "Choisissez le graphe à afficher :")?;
    for (idx, plot) in config.plots.iter().enumerate() {
        writeln!(out, "{} - {}", idx + 1, plot.title)?;
    }
    for (alias, indices) in &config.aliases {
        let indices = indices
            .iter()
            .map(|i| i.to_string())
            .collect::<Vec<_>>()
            .join(", ");
        writeln!(
            out,
            "Tapez '{alias}' pour afficher les graphes {indices}"
        )?;
    }
    writeln!(
        out,
        "Tapez '{}' pour afficher tous les graphes existants",
        ReportConfig::ALL_TOKEN
    )
}

/// Prompt for and read a single line, without its surrounding whitespace.
pub fn read_choice<R: BufRead, W: Write>(input: &mut R, out: &mut W) -> io::Result<String> {
    write!(out, "Votre choix : ")?;
    out.flush()?;

    let mut line = String::new();
    input.read_line(&mut line)?;
    Ok(line.trim().to_string())
}

/// Generate the charts selected by `token`. An unrecognised token is reported
/// with a single invalid-choice message and is not an error.
pub fn dispatch<W: Write>(
    token: &str,
    config: &ReportConfig,
    dirs: &ReportDirs,
    out: &mut W,
) -> Result<Vec<PathBuf>> {
    match report::generate_selection(token, config, dirs) {
        Err(ReportError::InvalidSelection(_)) => {
            writeln!(out, "{INVALID_CHOICE}")?;
            Ok(Vec::new())
        }
        result => result,
    }
}

/// Show the menu, read one choice and dispatch it.
pub fn run<R: BufRead, W: Write>(
    config: &ReportConfig,
    dirs: &ReportDirs,
    input: &mut R,
    out: &mut W,
) -> Result<Vec<PathBuf>> {
    print_menu(config, out)?;
    let choice = read_choice(input, out)?;
    info!("selected: {choice}");

    dispatch(&choice, config, dirs, out)
}

/// Print the plot table with resolved input and output paths.
pub fn list<W: Write>(config: &ReportConfig, dirs: &ReportDirs, out: &mut W) -> io::Result<()> {
    for (idx, plot) in config.plots.iter().enumerate() {
        writeln!(
            out,
            "{}\t{}\t{}\t{}\t{} -> {}",
            idx + 1,
            plot.dataset,
            plot.scaling,
            plot.schema,
            plot.input_path(dirs).display(),
            plot.output_path(dirs).display(),
        )?;
    }
    for (alias, indices) in &config.aliases {
        writeln!(out, "{alias}\t{indices:?}")?;
    }
    writeln!(out, "{}\t1..={}", ReportConfig::ALL_TOKEN, config.plots.len())
}

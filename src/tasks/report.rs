use crate::{
    error::Result,
    tasks::{
        chart::SpeedUpChart,
        config::{PlotConfig, ReportConfig, ReportDirs},
        measurements::{self, Measurement},
        speedup::{self, SpeedUpPoint},
    },
};
use log::{debug, error, info};
use std::{fs, path::PathBuf};

fn log_summary(plot: &PlotConfig, rows: &[Measurement], points: &[SpeedUpPoint]) {
    let unit = plot.schema.columns().unit;
    for (m, p) in rows.iter().zip(points) {
        debug!(
            "{}/{}: processors={} time={:.4}s speed-up={:.3} efficiency={:.3}",
            plot.dataset,
            plot.scaling,
            p.processors,
            unit.to_seconds(m.elapsed),
            p.speed_up,
            speedup::efficiency(p, plot.scaling),
        );
    }
}

/// Read one performance log, compute its speed-up and save the chart.
/// Returns the path of the written image.
pub fn generate(plot: &PlotConfig, dirs: &ReportDirs) -> Result<PathBuf> {
    let input_path = plot.input_path(dirs);
    debug!(
        "generating {} {} scaling chart from {} (schema={})",
        plot.dataset,
        plot.scaling,
        input_path.display(),
        plot.schema
    );

    let mut rows = measurements::read_measurements(&input_path, &plot.schema.columns())?;
    if plot.average_repeats {
        rows = measurements::average_repeats(&rows);
    }

    let points = speedup::compute_speed_up(&rows)?;
    log_summary(plot, &rows, &points);

    let chart = SpeedUpChart::new(points, plot.scaling.ideal_curve(), &plot.title)?;

    fs::create_dir_all(&dirs.output_dir).map_err(|e| {
        error!(
            "error creating output directory (path={}, error={e:?})",
            dirs.output_dir.display()
        );
        e
    })?;
    let plot_path = plot.output_path(dirs);
    chart.render_png(&plot_path)?;

    info!("generated plot at: {}", plot_path.display());

    Ok(plot_path)
}

/// Generate every chart a menu token selects, in table order. Stops at the
/// first failure.
pub fn generate_selection(
    token: &str,
    config: &ReportConfig,
    dirs: &ReportDirs,
) -> Result<Vec<PathBuf>> {
    config
        .resolve(token)?
        .into_iter()
        .map(|plot| generate(plot, dirs))
        .collect()
}

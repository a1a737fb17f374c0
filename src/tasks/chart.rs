use crate::{
    error::{ReportError, Result},
    tasks::{
        color::{FONT_SIZE, MARKER_SIZE, STROKE_WIDTH, TITLE_FONT_SIZE, get_color_from_label},
        speedup::SpeedUpPoint,
    },
};
use log::error;
use plotters::{
    coord::{Shift, combinators::BindKeyPoints},
    drawing::DrawingAreaErrorKind,
    prelude::*,
    series::DashedLineSeries,
};
use std::{ops::Range, path::Path};

/// Reference curve drawn next to the measured speed-up.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum IdealCurve {
    /// Perfect linear scaling: speed-up equals the processor count
    Linear,
    /// Flat at 1.0, the target for weak scaling
    Constant,
}

impl IdealCurve {
    pub fn value_at(&self, processors: u32) -> f64 {
        match self {
            IdealCurve::Linear => processors as f64,
            IdealCurve::Constant => 1.0,
        }
    }
}

fn render_err<E: std::error::Error + Send + Sync>(e: DrawingAreaErrorKind<E>) -> ReportError {
    error!("error drawing chart (error={e:?})");
    ReportError::Render(e.to_string())
}

/// Measured speed-up and its ideal reference, ready to be drawn.
#[derive(Clone, Debug, PartialEq)]
pub struct SpeedUpChart {
    pub title: String,
    pub points: Vec<SpeedUpPoint>,
    pub ideal_curve: IdealCurve,
    pub ideal: Vec<(u32, f64)>,
}

impl SpeedUpChart {
    pub const WIDTH: u32 = 1000;
    pub const HEIGHT: u32 = 600;
    pub const X_DESC: &'static str = "Nombre de processeurs";
    pub const Y_DESC: &'static str = "Speed-up";
    pub const ACTUAL_LABEL: &'static str = "Speed-up Réel";
    pub const IDEAL_LABEL: &'static str = "Speed-up Idéal";

    pub fn new(points: Vec<SpeedUpPoint>, ideal_curve: IdealCurve, title: &str) -> Result<Self> {
        if points.is_empty() {
            error!("cannot build a chart without points (title={title})");
            return Err(ReportError::EmptyMeasurements);
        }
        if let Some(position) = points.iter().position(|p| !p.speed_up.is_finite()) {
            let processors = points[position].processors;
            error!("cannot chart a non-finite speed-up (title={title}, processors={processors})");
            return Err(ReportError::NonFiniteSpeedUp {
                position,
                processors,
            });
        }

        let ideal = points
            .iter()
            .map(|p| (p.processors, ideal_curve.value_at(p.processors)))
            .collect();

        Ok(Self {
            title: title.to_string(),
            points,
            ideal_curve,
            ideal,
        })
    }

    /// The processor counts present in the data, which are the only x-axis
    /// ticks drawn.
    pub fn x_ticks(&self) -> Vec<u32> {
        let mut ticks: Vec<u32> = self.points.iter().map(|p| p.processors).collect();
        ticks.sort_unstable();
        ticks.dedup();
        ticks
    }

    /// Data span padded by one processor on each side.
    pub fn x_range(&self) -> Range<u32> {
        let ticks = self.x_ticks();
        let x_min = ticks.first().copied().unwrap_or(1);
        let x_max = ticks.last().copied().unwrap_or(1);

        x_min.saturating_sub(1)..x_max.saturating_add(1)
    }

    pub fn y_range(&self) -> Range<f64> {
        let values = self
            .points
            .iter()
            .map(|p| p.speed_up)
            .chain(self.ideal.iter().map(|(_, y)| *y))
            .filter(|y| y.is_finite());
        let (y_min, y_max) = values.fold((0.0_f64, 0.0_f64), |(lo, hi), y| (lo.min(y), hi.max(y)));

        let y_max = if y_max > 0.0 { y_max * 1.1 } else { 1.0 };
        let y_min = if y_min < 0.0 { y_min * 1.1 } else { 0.0 };
        y_min..y_max
    }

    fn legend_position(&self) -> SeriesLabelPosition {
        match self.ideal_curve {
            IdealCurve::Linear => SeriesLabelPosition::UpperLeft,
            IdealCurve::Constant => SeriesLabelPosition::LowerRight,
        }
    }

    pub fn draw<DB: DrawingBackend>(&self, root: &DrawingArea<DB, Shift>) -> Result<()> {
        let actual_color = get_color_from_label("actual")?;
        let ideal_color = get_color_from_label("ideal")?;
        let grid_color = get_color_from_label("grid")?;

        root.fill(&WHITE).map_err(render_err)?;

        let ticks = self.x_ticks();
        let num_ticks = ticks.len();
        let mut chart = ChartBuilder::on(root)
            .caption(&self.title, ("sans-serif", TITLE_FONT_SIZE).into_font())
            .margin(20)
            .x_label_area_size(60)
            .y_label_area_size(70)
            .build_cartesian_2d(self.x_range().with_key_points(ticks), self.y_range())
            .map_err(render_err)?;

        chart
            .configure_mesh()
            .light_line_style(WHITE)
            .bold_line_style(grid_color)
            .x_labels(num_ticks)
            .y_labels(10)
            .x_desc(Self::X_DESC)
            .y_desc(Self::Y_DESC)
            .axis_desc_style(("sans-serif", FONT_SIZE).into_font())
            .label_style(("sans-serif", FONT_SIZE).into_font())
            .x_label_formatter(&|x| x.to_string())
            .y_label_formatter(&|y| format!("{:.1}", y))
            .draw()
            .map_err(render_err)?;

        let actual: Vec<(u32, f64)> = self
            .points
            .iter()
            .map(|p| (p.processors, p.speed_up))
            .collect();

        chart
            .draw_series(LineSeries::new(
                actual.clone(),
                actual_color.stroke_width(STROKE_WIDTH),
            ))
            .map_err(render_err)?
            .label(Self::ACTUAL_LABEL)
            .legend(move |(x, y)| {
                PathElement::new(
                    vec![(x, y), (x + 20, y)],
                    actual_color.stroke_width(STROKE_WIDTH),
                )
            });

        chart
            .draw_series(
                actual
                    .iter()
                    .map(|&(x, y)| Circle::new((x, y), MARKER_SIZE, actual_color.filled())),
            )
            .map_err(render_err)?;

        chart
            .draw_series(DashedLineSeries::new(
                self.ideal.clone(),
                10,
                6,
                ideal_color.stroke_width(STROKE_WIDTH),
            ))
            .map_err(render_err)?
            .label(Self::IDEAL_LABEL)
            .legend(move |(x, y)| {
                PathElement::new(
                    vec![(x, y), (x + 20, y)],
                    ideal_color.stroke_width(STROKE_WIDTH),
                )
            });

        chart
            .configure_series_labels()
            .position(self.legend_position())
            .label_font(("sans-serif", FONT_SIZE).into_font())
            .background_style(WHITE.mix(0.8))
            .border_style(BLACK)
            .draw()
            .map_err(render_err)?;

        root.present().map_err(render_err)?;

        Ok(())
    }

    pub fn render_png(&self, path: &Path) -> Result<()> {
        let root = BitMapBackend::new(path, (Self::WIDTH, Self::HEIGHT)).into_drawing_area();
        self.draw(&root)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn points(rows: &[(u32, f64)]) -> Vec<SpeedUpPoint> {
        rows.iter()
            .map(|&(processors, speed_up)| SpeedUpPoint {
                processors,
                speed_up,
            })
            .collect()
    }

    #[test]
    fn test_linear_ideal_follows_processors() {
        let chart = SpeedUpChart::new(
            points(&[(1, 1.0), (2, 1.92), (4, 3.7)]),
            IdealCurve::Linear,
            "strong",
        )
        .unwrap();

        assert_eq!(chart.ideal, vec![(1, 1.0), (2, 2.0), (4, 4.0)]);
        assert_eq!(chart.points.len(), 3);
    }

    #[test]
    fn test_constant_ideal_is_flat() {
        let chart = SpeedUpChart::new(
            points(&[(1, 1.0), (2, 0.98), (4, 0.952)]),
            IdealCurve::Constant,
            "weak",
        )
        .unwrap();

        assert!(chart.ideal.iter().all(|&(_, y)| y == 1.0));
        assert_eq!(
            chart.ideal.iter().map(|&(p, _)| p).collect::<Vec<_>>(),
            vec![1, 2, 4]
        );
    }

    #[test]
    fn test_x_ticks_are_data_processor_counts() {
        let chart = SpeedUpChart::new(
            points(&[(1, 1.0), (3, 2.5), (6, 4.0), (16, 9.0)]),
            IdealCurve::Linear,
            "ticks",
        )
        .unwrap();

        assert_eq!(chart.x_ticks(), vec![1, 3, 6, 16]);
        assert_eq!(chart.x_range(), 0..17);
    }

    #[test]
    fn test_y_range_covers_both_series() {
        let strong = SpeedUpChart::new(
            points(&[(1, 1.0), (8, 5.0)]),
            IdealCurve::Linear,
            "strong",
        )
        .unwrap();
        let y_range = strong.y_range();
        assert_eq!(y_range.start, 0.0);
        assert!(y_range.end >= 8.0);

        let weak = SpeedUpChart::new(
            points(&[(1, 1.0), (8, 0.8)]),
            IdealCurve::Constant,
            "weak",
        )
        .unwrap();
        let y_range = weak.y_range();
        assert_eq!(y_range.start, 0.0);
        assert!(y_range.end > 1.0);
    }

    #[test]
    fn test_single_point_has_non_empty_ranges() {
        let chart =
            SpeedUpChart::new(points(&[(1, 1.0)]), IdealCurve::Constant, "single").unwrap();

        let x_range = chart.x_range();
        assert!(x_range.end > x_range.start);
        let y_range = chart.y_range();
        assert!(y_range.end > y_range.start);
    }

    #[test]
    fn test_empty_points_rejected() {
        let result = SpeedUpChart::new(vec![], IdealCurve::Linear, "empty");
        assert!(matches!(result, Err(ReportError::EmptyMeasurements)));
    }

    #[test]
    fn test_non_finite_speed_up_rejected() {
        let result = SpeedUpChart::new(
            points(&[(1, 1.0), (2, f64::INFINITY)]),
            IdealCurve::Linear,
            "overflow",
        );
        assert!(matches!(
            result,
            Err(ReportError::NonFiniteSpeedUp {
                position: 1,
                processors: 2
            })
        ));
        assert!(SpeedUpChart::new(points(&[(1, f64::NAN)]), IdealCurve::Constant, "nan").is_err());
    }

    #[test]
    fn test_y_range_skips_non_finite_values() {
        let chart = SpeedUpChart {
            title: "overflow".to_string(),
            points: points(&[(1, 1.0), (2, f64::INFINITY), (4, f64::NAN)]),
            ideal_curve: IdealCurve::Constant,
            ideal: vec![(1, 1.0), (2, 1.0), (4, 1.0)],
        };

        let y_range = chart.y_range();
        assert_eq!(y_range.start, 0.0);
        assert!(y_range.end.is_finite() && y_range.end > 1.0);
    }

    #[test]
    fn test_render_png_writes_file() {
        let dir = tempfile::TempDir::new().unwrap();

        for (name, rows, curve) in [
            (
                "strong.png",
                vec![(1, 1.0), (2, 1.923), (4, 3.704)],
                IdealCurve::Linear,
            ),
            (
                "weak.png",
                vec![(1, 1.0), (2, 0.980), (4, 0.952)],
                IdealCurve::Constant,
            ),
            ("single.png", vec![(1, 1.0)], IdealCurve::Constant),
        ] {
            let chart = SpeedUpChart::new(points(&rows), curve, name).unwrap();
            let path = dir.path().join(name);
            chart.render_png(&path).unwrap();

            let metadata = std::fs::metadata(&path).unwrap();
            assert!(metadata.len() > 0, "empty chart: {name}");
        }
    }

    #[test]
    fn test_draw_to_buffer() {
        let chart = SpeedUpChart::new(
            points(&[(1, 1.0), (2, 1.9), (4, 3.6)]),
            IdealCurve::Linear,
            "buffer",
        )
        .unwrap();

        let (width, height) = (SpeedUpChart::WIDTH, SpeedUpChart::HEIGHT);
        let mut buffer = vec![0u8; (width * height * 3) as usize];
        {
            let root = BitMapBackend::with_buffer(&mut buffer, (width, height)).into_drawing_area();
            chart.draw(&root).unwrap();
        }
        assert!(buffer.iter().any(|&b| b != 0));
    }
}

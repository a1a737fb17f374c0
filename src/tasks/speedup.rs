use crate::{
    error::{ReportError, Result},
    tasks::{config::ScalingKind, measurements::Measurement},
};
use log::error;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SpeedUpPoint {
    pub processors: u32,
    pub speed_up: f64,
}

/// Compute the speed-up of every measurement relative to the first one.
///
/// The baseline is the first row by position, whatever its processor count.
/// The output has the same length and order as the input. A zero elapsed time
/// anywhere in the sequence is rejected, as is a speed-up that overflows to
/// infinity. Negative times are passed through.
pub fn compute_speed_up(measurements: &[Measurement]) -> Result<Vec<SpeedUpPoint>> {
    let Some(baseline) = measurements.first() else {
        error!("cannot compute speed-up of an empty measurement sequence");
        return Err(ReportError::EmptyMeasurements);
    };

    if let Some(position) = measurements.iter().position(|m| m.elapsed == 0.0) {
        let processors = measurements[position].processors;
        error!("elapsed time is zero (position={position}, processors={processors})");
        return Err(ReportError::ZeroElapsedTime {
            position,
            processors,
        });
    }

    let points: Vec<SpeedUpPoint> = measurements
        .iter()
        .map(|m| SpeedUpPoint {
            processors: m.processors,
            speed_up: baseline.elapsed / m.elapsed,
        })
        .collect();

    if let Some(position) = points.iter().position(|p| !p.speed_up.is_finite()) {
        let processors = points[position].processors;
        error!("speed-up is not finite (position={position}, processors={processors})");
        return Err(ReportError::NonFiniteSpeedUp {
            position,
            processors,
        });
    }

    Ok(points)
}

/// Speed-up normalised by the ideal one for the given scaling kind.
pub fn efficiency(point: &SpeedUpPoint, scaling: ScalingKind) -> f64 {
    match scaling {
        ScalingKind::Strong => point.speed_up / point.processors as f64,
        ScalingKind::Weak => point.speed_up,
    }
}

use tcp_plot_abstract::GridSettings;
use thiserror::Error;

/// Upper bound on grid size; larger grids are rejected instead of allocated.
pub const MAX_POINTS: usize = 100_000_000;

#[derive(Debug, Error, PartialEq)]
pub enum GridError {
    #[error("grid bounds must be finite (start={start}, stop={stop}, step={step})")]
    NonFinite { start: f64, stop: f64, step: f64 },
    #[error("grid step must be positive, got {0}")]
    NonPositiveStep(f64),
    #[error("grid stop {stop} must be greater than start {start}")]
    EmptyRange { start: f64, stop: f64 },
    #[error("grid would hold {points} points, limit is {}", MAX_POINTS)]
    TooManyPoints { points: f64 },
    #[error("grid points must be strictly increasing (index {index})")]
    Unordered { index: usize },
}

/// Evenly spaced timestamps shared by every series of a run.
#[derive(Debug, Clone, PartialEq)]
pub struct TimeGrid {
    points: Vec<f64>,
}

impl TimeGrid {
    /// Points `start + i * step` for every `i` with the point below `stop`.
    pub fn new(start: f64, stop: f64, step: f64) -> Result<Self, GridError> {
        if !(start.is_finite() && stop.is_finite() && step.is_finite()) {
            return Err(GridError::NonFinite { start, stop, step });
        }
        if step <= 0.0 {
            return Err(GridError::NonPositiveStep(step));
        }
        if stop <= start {
            return Err(GridError::EmptyRange { start, stop });
        }

        let points = ((stop - start) / step).ceil();
        if points > MAX_POINTS as f64 {
            return Err(GridError::TooManyPoints { points });
        }
        let len = points as usize;
        let points = (0..len).map(|i| start + i as f64 * step).collect();
        Ok(Self { points })
    }

    pub fn from_settings(settings: &GridSettings) -> Result<Self, GridError> {
        Self::new(settings.start, settings.stop, settings.step)
    }

    /// Explicit grid; points must be finite and strictly increasing.
    pub fn from_points(points: Vec<f64>) -> Result<Self, GridError> {
        if let Some(&bad) = points.iter().find(|p| !p.is_finite()) {
            return Err(GridError::NonFinite {
                start: bad,
                stop: bad,
                step: 0.0,
            });
        }
        if let Some(index) = points.windows(2).position(|w| w[1] <= w[0]) {
            return Err(GridError::Unordered { index: index + 1 });
        }
        Ok(Self { points })
    }

    pub fn points(&self) -> &[f64] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn first(&self) -> Option<f64> {
        self.points.first().copied()
    }

    pub fn last(&self) -> Option<f64> {
        self.points.last().copied()
    }
}

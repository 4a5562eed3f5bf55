//! Forecast checker implementations.
//!
//! [`SmoothingChecker`] is a self-contained baseline built on exponential
//! smoothing, so the tracker can run without an external modelling engine.
//! [`TimeoutChecker`] bounds the time spent in any other checker.

use std::sync::Arc;
use std::thread;
use std::time::Duration;

use crossbeam_channel::RecvTimeoutError;

use checklast_spi::{
    BackCount, CheckLastError, CheckOutcome, ForecastChecker, ModelSpecification, PeriodCheck,
    Result, TsData,
};

/// Minimum number of observations before the checked periods.
const MIN_OBSERVATIONS: usize = 3;

// ============================================================================
// Smoothing checker
// ============================================================================

/// Baseline last-period checker.
///
/// Holds out the last periods, fits a smoothing model on the observations
/// before them and forecasts the held-out periods:
///
/// - `TR0`: random walk (last observation carried forward)
/// - `TR1`, `TR2`: simple exponential smoothing
/// - `TR3`, `TR4`, `TR5`, `TRfull`: Holt linear trend
///
/// Smoothing parameters are chosen by grid search on the in-sample
/// one-step-ahead squared error.
#[derive(Debug, Clone, Copy, Default)]
pub struct SmoothingChecker;

impl SmoothingChecker {
    pub fn new() -> Self {
        Self
    }
}

impl ForecastChecker for SmoothingChecker {
    fn name(&self) -> &str {
        "smoothing"
    }

    fn check(
        &self,
        data: &TsData,
        spec: ModelSpecification,
        back_count: BackCount,
    ) -> Result<CheckOutcome> {
        if data.is_empty() {
            return Ok(CheckOutcome::Empty);
        }
        let values = data.values();
        let horizon = back_count.get();
        let Some(split) = values.len().checked_sub(horizon) else {
            return Ok(CheckOutcome::ModelingFailure(format!(
                "series shorter than the {} checked periods",
                horizon
            )));
        };

        let sample: Vec<f64> = values[..split]
            .iter()
            .copied()
            .filter(|v| v.is_finite())
            .collect();
        if sample.len() < MIN_OBSERVATIONS {
            return Ok(CheckOutcome::ModelingFailure(format!(
                "need at least {} observations before the checked periods, got {}",
                MIN_OBSERVATIONS,
                sample.len()
            )));
        }

        let forecasts = Model::for_spec(spec).forecast(&sample, horizon)?;
        let periods = (0..horizon)
            .map(|k| {
                let observed = values[values.len() - 1 - k];
                let forecast = forecasts[horizon - 1 - k];
                (observed.is_finite() && forecast.is_finite())
                    .then(|| PeriodCheck::new(observed, forecast))
            })
            .collect();
        Ok(CheckOutcome::Success(periods))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Model {
    RandomWalk,
    Simple,
    Holt,
}

impl Model {
    fn for_spec(spec: ModelSpecification) -> Self {
        match spec {
            ModelSpecification::Tr0 => Model::RandomWalk,
            ModelSpecification::Tr1 | ModelSpecification::Tr2 => Model::Simple,
            ModelSpecification::Tr3
            | ModelSpecification::Tr4
            | ModelSpecification::Tr5
            | ModelSpecification::TrFull => Model::Holt,
        }
    }

    fn forecast(self, sample: &[f64], horizon: usize) -> Result<Vec<f64>> {
        let forecasts = match self {
            Model::RandomWalk => {
                let last = sample[sample.len() - 1];
                vec![last; horizon]
            }
            Model::Simple => {
                let (level, _) = best_fit(sample, &grid(0.01, 99), &[0.0]);
                vec![level; horizon]
            }
            Model::Holt => {
                let (level, trend) = best_fit(sample, &grid(0.1, 9), &grid(0.1, 9));
                (1..=horizon).map(|h| level + h as f64 * trend).collect()
            }
        };
        if forecasts.iter().any(|f| !f.is_finite()) {
            return Err(CheckLastError::ModelingFailure(
                "non-finite forecast".to_string(),
            ));
        }
        Ok(forecasts)
    }
}

fn grid(step: f64, count: usize) -> Vec<f64> {
    (1..=count).map(|i| i as f64 * step).collect()
}

/// Final `(level, trend)` of the smoothing run with the lowest one-step
/// squared error. A single `beta` of zero gives simple smoothing.
fn best_fit(sample: &[f64], alphas: &[f64], betas: &[f64]) -> (f64, f64) {
    let with_trend = betas.iter().any(|&b| b > 0.0);
    let mut best = (f64::INFINITY, sample[sample.len() - 1], 0.0);

    for &alpha in alphas {
        for &beta in betas {
            let (sse, level, trend) = smooth(sample, alpha, beta, with_trend);
            if sse < best.0 {
                best = (sse, level, trend);
            }
        }
    }
    (best.1, best.2)
}

fn smooth(sample: &[f64], alpha: f64, beta: f64, with_trend: bool) -> (f64, f64, f64) {
    let mut level = sample[0];
    let mut trend = if with_trend { sample[1] - sample[0] } else { 0.0 };
    let mut sse = 0.0;

    for &value in &sample[1..] {
        let predicted = level + trend;
        let error = value - predicted;
        sse += error * error;

        let previous = level;
        level = alpha * value + (1.0 - alpha) * predicted;
        if with_trend {
            trend = beta * (level - previous) + (1.0 - beta) * trend;
        }
    }
    (sse, level, trend)
}

// ============================================================================
// Timeout checker
// ============================================================================

/// Runs another checker on a worker thread and gives up after `timeout`.
///
/// A timed-out or panicking check becomes a modeling failure. The worker of
/// a timed-out check is left to finish on its own.
pub struct TimeoutChecker<C: ?Sized> {
    inner: Arc<C>,
    timeout: Duration,
}

impl<C: ForecastChecker + ?Sized + 'static> TimeoutChecker<C> {
    pub fn new(inner: Arc<C>, timeout: Duration) -> Self {
        Self { inner, timeout }
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }
}

impl<C: ForecastChecker + ?Sized + 'static> ForecastChecker for TimeoutChecker<C> {
    fn name(&self) -> &str {
        self.inner.name()
    }

    fn check(
        &self,
        data: &TsData,
        spec: ModelSpecification,
        back_count: BackCount,
    ) -> Result<CheckOutcome> {
        let (tx, rx) = crossbeam_channel::bounded(1);
        let inner = Arc::clone(&self.inner);
        let data = data.clone();

        thread::Builder::new()
            .name("checklast-check".to_string())
            .spawn(move || {
                let _ = tx.send(inner.check(&data, spec, back_count));
            })
            .map_err(|e| CheckLastError::ModelingFailure(format!("cannot start check: {}", e)))?;

        match rx.recv_timeout(self.timeout) {
            Ok(result) => result,
            Err(RecvTimeoutError::Timeout) => Ok(CheckOutcome::ModelingFailure(format!(
                "check timed out after {} ms",
                self.timeout.as_millis()
            ))),
            Err(RecvTimeoutError::Disconnected) => Ok(CheckOutcome::ModelingFailure(
                "check aborted".to_string(),
            )),
        }
    }
}

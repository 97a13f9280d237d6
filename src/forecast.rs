use crate::aggregate::SectorSeries;
use crate::error::FitError;
use crate::schema::ForecastRecord;
use aprender::primitives::Vector;
use aprender::time_series::ARIMA;
use log::debug;

/// AR(1) on deviations from the series mean: `y_t - mu = phi * (y_{t-1} - mu) + e_t`.
///
/// The coefficient comes from `aprender`'s ARIMA(1, 0, 0). It is bounded to
/// `[-MAX_ABS_PHI, MAX_ABS_PHI]`, so trending series still get a fitted (if
/// damped) forecast.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ar1Fit {
    pub mean: f64,
    pub phi: f64,
    /// Set when the raw estimate fell outside the stationary bound.
    pub phi_clamped: bool,
    /// One-step-ahead prediction.
    pub forecast: f64,
}

impl Ar1Fit {
    /// Two points leave a single lag pair, which cannot identify both mean and phi.
    pub const MIN_OBSERVATIONS: usize = 3;
    pub const MAX_ABS_PHI: f64 = 0.99;

    pub fn fit(series: &[f64]) -> Result<Self, FitError> {
        let mean = series.iter().sum::<f64>() / series.len() as f64;
        let deviations: Vec<f64> = series.iter().map(|v| v - mean).collect();

        let mut model = ARIMA::new(1, 0, 0);
        model
            .fit(&Vector::from_slice(&deviations))
            .map_err(|e| FitError::Model(e.to_string()))?;

        if series.len() < Self::MIN_OBSERVATIONS {
            return Err(FitError::InsufficientData {
                required: Self::MIN_OBSERVATIONS,
                got: series.len(),
            });
        }

        if !mean.is_finite() {
            return Err(FitError::NonFinite);
        }
        let magnitude = series.iter().fold(0.0_f64, |m, v| m.max(v.abs()));
        if deviations.iter().all(|d| d.abs() <= 1e-12 * magnitude) {
            return Err(FitError::DegenerateSeries);
        }

        let raw_phi = model
            .ar_coefficients()
            .and_then(|coef| coef.as_slice().first().copied())
            .ok_or_else(|| FitError::Model("no AR coefficient estimated".to_string()))?;
        if !raw_phi.is_finite() {
            return Err(FitError::NonFinite);
        }

        let phi = raw_phi.clamp(-Self::MAX_ABS_PHI, Self::MAX_ABS_PHI);
        let phi_clamped = phi != raw_phi;

        let step = if phi_clamped {
            let last = deviations.last().copied().unwrap_or(0.0);
            model.intercept() + phi * last
        } else {
            model
                .forecast(1)
                .map_err(|e| FitError::Model(e.to_string()))?
                .as_slice()
                .first()
                .copied()
                .ok_or_else(|| FitError::Model("empty forecast".to_string()))?
        };

        let forecast = mean + step;
        if !forecast.is_finite() {
            return Err(FitError::NonFinite);
        }

        Ok(Self {
            mean,
            phi,
            phi_clamped,
            forecast,
        })
    }
}

/// Result of one forecast attempt. A rejected fit repeats the last observation.
#[derive(Debug, Clone, PartialEq)]
pub enum ForecastOutcome {
    Fitted { value: f64, fit: Ar1Fit },
    Fallback { value: f64, reason: FitError },
}

impl ForecastOutcome {
    pub fn value(&self) -> f64 {
        match self {
            ForecastOutcome::Fitted { value, .. } | ForecastOutcome::Fallback { value, .. } => {
                *value
            }
        }
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self, ForecastOutcome::Fallback { .. })
    }
}

/// One-step-ahead prediction for an ascending series. The fit is always
/// attempted, even for a single point; `None` only for an empty series.
pub fn forecast_next(series: &[f64]) -> Option<ForecastOutcome> {
    let last = *series.last()?;

    let outcome = match Ar1Fit::fit(series) {
        Ok(fit) => ForecastOutcome::Fitted {
            value: fit.forecast,
            fit,
        },
        Err(reason) => ForecastOutcome::Fallback {
            value: last,
            reason,
        },
    };

    Some(outcome)
}

#[derive(Debug, Clone, PartialEq)]
pub struct SectorForecast {
    pub record: ForecastRecord,
    pub outcome: ForecastOutcome,
}

/// Forecasts the year after the sector's last observed year.
pub fn forecast_sector(series: &SectorSeries) -> Option<SectorForecast> {
    let next_year = series.last_year()? + 1;
    let outcome = forecast_next(&series.values)?;

    match &outcome {
        ForecastOutcome::Fitted { fit, .. } => debug!(
            "Sector {:?}: AR(1) fitted (phi={:.4}, mean={:.4}, clamped={})",
            series.sector, fit.phi, fit.mean, fit.phi_clamped
        ),
        ForecastOutcome::Fallback { reason, .. } => debug!(
            "Sector {:?}: repeating last value ({})",
            series.sector, reason
        ),
    }

    Some(SectorForecast {
        record: ForecastRecord {
            sector: series.sector.name().map(str::to_string),
            next_year,
            predicted_allocation_cr: round2(outcome.value()),
        },
        outcome,
    })
}

pub fn forecast_all(series: &[SectorSeries]) -> Vec<SectorForecast> {
    series.iter().filter_map(forecast_sector).collect()
}

fn round2(value: f64) -> f64 {
    let scaled = value * 100.0;
    if !scaled.is_finite() {
        return value;
    }
    scaled.round() / 100.0
}

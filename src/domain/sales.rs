// Sales domain models
use super::error::ComposeError;
use serde::Deserialize;

/// Parallel per-period sequences: `targets[i]` and `actuals[i]` belong to `periods[i]`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SalesSeries {
    pub periods: Vec<String>,
    pub targets: Vec<f64>,
    pub actuals: Vec<f64>,
}

impl SalesSeries {
    #[cfg(test)]
    pub fn new(periods: Vec<String>, targets: Vec<f64>, actuals: Vec<f64>) -> Self {
        Self {
            periods,
            targets,
            actuals,
        }
    }

    pub fn len(&self) -> usize {
        self.periods.len()
    }

    /// Per-period label and metrics, stopping at the shortest sequence
    pub fn pairs(&self) -> impl Iterator<Item = (&str, MetricPair)> {
        self.periods
            .iter()
            .zip(self.targets.iter().zip(&self.actuals))
            .map(|(period, (&target, &actual))| (period.as_str(), MetricPair::new(target, actual)))
    }

    pub fn validate(&self) -> Result<(), ComposeError> {
        validate_sequences(&self.periods, &self.targets, &self.actuals)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MetricPair {
    pub target: f64,
    pub actual: f64,
}

impl MetricPair {
    pub fn new(target: f64, actual: f64) -> Self {
        Self { target, actual }
    }

    /// Signed distance from target, as shown by the gauge delta
    pub fn delta(&self) -> f64 {
        self.actual - self.target
    }
}

/// Shared upper bound for every gauge axis on one dashboard
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AxisScale {
    pub max: f64,
}

impl AxisScale {
    pub fn from_targets(targets: &[f64], headroom: f64) -> Result<Self, ComposeError> {
        let max_target = targets
            .iter()
            .copied()
            .reduce(f64::max)
            .ok_or(ComposeError::EmptyInput)?;

        Ok(Self {
            max: max_target + headroom,
        })
    }

    pub fn range(&self) -> [f64; 2] {
        [0.0, self.max]
    }
}

/// Fails fast on sequences the composer cannot index in lockstep.
pub fn validate_sequences(
    periods: &[String],
    targets: &[f64],
    actuals: &[f64],
) -> Result<(), ComposeError> {
    if periods.len() != targets.len() || periods.len() != actuals.len() {
        return Err(ComposeError::LengthMismatch {
            periods: periods.len(),
            targets: targets.len(),
            actuals: actuals.len(),
        });
    }

    if periods.is_empty() {
        return Err(ComposeError::EmptyInput);
    }

    if let Some(index) = targets.iter().position(|v| !v.is_finite()) {
        return Err(ComposeError::NonFiniteValue {
            field: "target",
            index,
        });
    }

    if let Some(index) = actuals.iter().position(|v| !v.is_finite()) {
        return Err(ComposeError::NonFiniteValue {
            field: "actual",
            index,
        });
    }

    Ok(())
}

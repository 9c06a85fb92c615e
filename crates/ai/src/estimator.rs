use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use petrocost_core::FeatureRecord;

use crate::registry::SharedModel;
use crate::result::InferenceError;

/// Overrun factor above which the estimate is flagged as a cost overrun.
pub const OVERRUN_THRESHOLD: f64 = 1.10;
/// Overrun factor below which the estimate is flagged as a saving.
pub const SAVINGS_THRESHOLD: f64 = 0.95;

/// How the model's output is read.
///
/// Both modes treat the output as a ratio to planned cost; they differ in what
/// is reported alongside the final figure.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", try_from = "String")]
pub enum OutputMode {
    /// Report the final cost and its deviation from plan.
    Direct,
    /// Report the final cost, the overrun factor and an alert category.
    #[default]
    Overrun,
}

impl OutputMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            OutputMode::Direct => "direct",
            OutputMode::Overrun => "overrun",
        }
    }
}

impl core::fmt::Display for OutputMode {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OutputMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "direct" => Ok(OutputMode::Direct),
            "overrun" => Ok(OutputMode::Overrun),
            other => Err(format!("unknown output mode '{other}' (expected direct|overrun)")),
        }
    }
}

impl TryFrom<String> for OutputMode {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// Alert category for an overrun factor.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Alert {
    /// Factor above [`OVERRUN_THRESHOLD`] ("sobrecosto").
    Overrun,
    /// Factor below [`SAVINGS_THRESHOLD`].
    Savings,
    #[default]
    None,
}

impl Alert {
    pub fn for_factor(factor: f64) -> Self {
        if factor > OVERRUN_THRESHOLD {
            Alert::Overrun
        } else if factor < SAVINGS_THRESHOLD {
            Alert::Savings
        } else {
            Alert::None
        }
    }
}

/// Result of one submission, held only for display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Estimate {
    pub mode: OutputMode,
    /// Raw model output (ratio to planned cost).
    pub model_output: f64,
    pub planned_cost: f64,
    pub final_cost: f64,
    /// `final_cost - planned_cost`.
    pub deviation: f64,
    /// Deviation as a percentage of plan; `0.0` when planned cost is zero.
    pub deviation_pct: f64,
    pub alert: Alert,

    /// Model that produced the output, when known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub computed_at: Option<DateTime<Utc>>,
}

impl Estimate {
    /// Whether a non-zero planned cost backs `deviation_pct`.
    pub fn has_baseline(&self) -> bool {
        self.planned_cost != 0.0
    }

    /// The overrun factor, in overrun mode.
    pub fn overrun_factor(&self) -> Option<f64> {
        match self.mode {
            OutputMode::Overrun => Some(self.model_output),
            OutputMode::Direct => None,
        }
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    pub fn with_timestamp(mut self, at: DateTime<Utc>) -> Self {
        self.computed_at = Some(at);
        self
    }
}

/// Turn a model output and planned cost into the displayed figures.
pub fn derive(mode: OutputMode, model_output: f64, planned_cost: f64) -> Estimate {
    let final_cost = model_output * planned_cost;
    let deviation = final_cost - planned_cost;
    let deviation_pct = if planned_cost != 0.0 {
        deviation / planned_cost * 100.0
    } else {
        0.0
    };
    let alert = match mode {
        OutputMode::Overrun => Alert::for_factor(model_output),
        OutputMode::Direct => Alert::None,
    };

    Estimate {
        mode,
        model_output,
        planned_cost,
        final_cost,
        deviation,
        deviation_pct,
        alert,
        model: None,
        computed_at: None,
    }
}

/// Runs one inference per submission and post-processes the result.
#[derive(Clone)]
pub struct Estimator {
    model: SharedModel,
    mode: OutputMode,
}

impl Estimator {
    pub fn new(model: SharedModel, mode: OutputMode) -> Self {
        Self { model, mode }
    }

    pub fn estimate(&self, record: &FeatureRecord) -> Result<Estimate, InferenceError> {
        let planned_cost = record.planned_cost().ok_or_else(|| {
            InferenceError::InvalidRecord(format!(
                "missing numeric '{}'",
                petrocost_core::PLANNED_COST_COLUMN
            ))
        })?;

        let output = self.model.predict(record).inspect_err(|e| {
            tracing::warn!(model = %self.model.name(), error = %e, "inference failed");
        })?;
        let model_output = *output.first().ok_or(InferenceError::EmptyOutput)?;
        if !model_output.is_finite() {
            return Err(InferenceError::NonFiniteOutput(model_output));
        }

        let estimate = derive(self.mode, model_output, planned_cost);
        let derived = [estimate.final_cost, estimate.deviation, estimate.deviation_pct];
        if let Some(bad) = derived.into_iter().find(|v| !v.is_finite()) {
            return Err(InferenceError::NonFiniteOutput(bad));
        }
        let estimate = estimate
            .with_model(self.model.name())
            .with_timestamp(Utc::now());

        tracing::info!(
            mode = %self.mode,
            model = %self.model.name(),
            model_output,
            planned_cost,
            final_cost = estimate.final_cost,
            alert = ?estimate.alert,
            "estimate computed"
        );

        Ok(estimate)
    }
}

impl core::fmt::Debug for Estimator {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Estimator")
            .field("model", &self.model.name())
            .field("mode", &self.mode)
            .finish()
    }
}

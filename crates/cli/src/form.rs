//! Form input: files, flags and interactive prompts.
//!
//! Every path ends in a [`PredictionRequest`]. Text fields missing from a file
//! or flags keep the form defaults; numeric fields missing there are zero.

use std::collections::BTreeMap;
use std::io::{BufRead, Write};
use std::path::Path;

use serde::Deserialize;

use petrocost_core::request::{DEFAULT_DEPARTMENT, DEFAULT_EVENT_OBJECTIVE, DEFAULT_PROJECT};
use petrocost_core::schema::{
    DEPARTMENT_COLUMN, EVENT_OBJECTIVE_COLUMN, PLANNED_COST_COLUMN, PROJECT_COLUMN,
};
use petrocost_core::{COST_CODES, DomainError, PredictionRequest, parse_number};

use crate::args::PredictArgs;
use crate::error::{CliError, CliResult};

/// A form saved to disk, keyed by the original column names.
#[derive(Debug, Default, Clone, PartialEq, Deserialize)]
pub struct FormFile {
    #[serde(rename = "PROYECTO")]
    pub project: Option<String>,
    #[serde(rename = "DEPARTAMENTO")]
    pub department: Option<String>,
    #[serde(rename = "OBJETIVO_EVENTO")]
    pub event_objective: Option<String>,
    #[serde(rename = "COSTO_TOTAL_PLANEADO (US)")]
    pub planned_cost: Option<f64>,
    /// Remaining keys; each must be a cost code.
    #[serde(flatten)]
    pub cost_codes: BTreeMap<String, f64>,
}

impl FormFile {
    /// Read a TOML (`.toml`) or JSON (anything else) form.
    pub fn load(path: &Path) -> CliResult<Self> {
        let raw = std::fs::read_to_string(path).map_err(|e| CliError::FormFile {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        let is_toml = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("toml"));
        let parsed = if is_toml {
            toml::from_str(&raw).map_err(|e| e.to_string())
        } else {
            serde_json::from_str(&raw).map_err(|e| e.to_string())
        };
        parsed.map_err(|reason| CliError::FormFile {
            path: path.to_path_buf(),
            reason,
        })
    }

    /// Overlay this file onto `request`.
    pub fn apply(&self, request: &mut PredictionRequest) -> CliResult<()> {
        if let Some(v) = &self.project {
            request.project = v.clone();
        }
        if let Some(v) = &self.department {
            request.department = v.clone();
        }
        if let Some(v) = &self.event_objective {
            request.event_objective = v.clone();
        }
        if let Some(v) = self.planned_cost {
            request.planned_cost = v;
        }
        for (code, value) in &self.cost_codes {
            request.set_cost_code(code, *value)?;
        }
        Ok(())
    }
}

/// Starting point for non-interactive submissions: default text, zero numbers.
pub fn blank_request() -> PredictionRequest {
    PredictionRequest::new(DEFAULT_PROJECT, DEFAULT_DEPARTMENT, DEFAULT_EVENT_OBJECTIVE)
}

/// Build a request from `predict` arguments: form file first, then flags.
pub fn request_from_args(args: &PredictArgs) -> CliResult<PredictionRequest> {
    let mut request = blank_request();

    if let Some(path) = &args.input {
        FormFile::load(path)?.apply(&mut request)?;
    }

    if let Some(v) = &args.project {
        request.project = v.clone();
    }
    if let Some(v) = &args.department {
        request.department = v.clone();
    }
    if let Some(v) = &args.objective {
        request.event_objective = v.clone();
    }
    if let Some(v) = args.planned {
        request.planned_cost = v;
    }
    for (code, value) in &args.codes {
        request.set_cost_code(code, *value)?;
    }

    request.validate()?;
    Ok(request)
}

/// Line-oriented form on any reader/writer pair.
pub struct Prompter<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    pub fn output_mut(&mut self) -> &mut W {
        &mut self.output
    }

    /// One line of input; `None` at end of input.
    fn read_line(&mut self) -> CliResult<Option<String>> {
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }

    fn text(&mut self, label: &str, default: &str) -> CliResult<Option<String>> {
        write!(self.output, "{label} [{default}]: ")?;
        self.output.flush()?;
        Ok(self.read_line()?.map(|line| {
            if line.is_empty() {
                default.to_string()
            } else {
                line
            }
        }))
    }

    /// Re-asks until the value parses and passes `check`.
    fn number<F>(&mut self, label: &str, default: f64, check: F) -> CliResult<Option<f64>>
    where
        F: Fn(f64) -> Result<(), DomainError>,
    {
        loop {
            write!(self.output, "{label} [{default}]: ")?;
            self.output.flush()?;
            let Some(line) = self.read_line()? else {
                return Ok(None);
            };
            let parsed = if line.is_empty() {
                Ok(default)
            } else {
                parse_number(label, &line)
            };
            match parsed.and_then(|v| check(v).map(|_| v)) {
                Ok(v) => return Ok(Some(v)),
                Err(e) => writeln!(self.output, "  {e}")?,
            }
        }
    }

    /// Ask for every field. Blank answers keep the shown default.
    ///
    /// Returns `None` if input ends before the form is complete.
    pub fn fill(&mut self, defaults: &PredictionRequest) -> CliResult<Option<PredictionRequest>> {
        let finite = |v: f64| -> Result<(), DomainError> {
            if v.is_finite() {
                Ok(())
            } else {
                Err(DomainError::validation("value must be finite"))
            }
        };
        let non_negative = |v: f64| -> Result<(), DomainError> {
            finite(v)?;
            if v < 0.0 {
                return Err(DomainError::validation("planned cost must be >= 0"));
            }
            Ok(())
        };

        writeln!(self.output, "-- General and financial information --")?;
        let Some(project) = self.text(PROJECT_COLUMN, &defaults.project)? else {
            return Ok(None);
        };
        let Some(department) = self.text(DEPARTMENT_COLUMN, &defaults.department)? else {
            return Ok(None);
        };
        let Some(objective) = self.text(EVENT_OBJECTIVE_COLUMN, &defaults.event_objective)? else {
            return Ok(None);
        };
        let Some(planned) =
            self.number(PLANNED_COST_COLUMN, defaults.planned_cost, non_negative)?
        else {
            return Ok(None);
        };

        let mut request =
            PredictionRequest::new(project, department, objective).with_planned_cost(planned);

        writeln!(self.output, "-- Technical variables / cost codes --")?;
        for (idx, code) in COST_CODES.iter().enumerate() {
            let label = format!("Cod {code}");
            let Some(value) = self.number(&label, defaults.cost_codes[idx], finite)? else {
                return Ok(None);
            };
            request.cost_codes[idx] = value;
        }

        Ok(Some(request))
    }

    /// Yes/no question; anything but `y`/`yes` (or end of input) is no.
    pub fn confirm(&mut self, question: &str) -> CliResult<bool> {
        write!(self.output, "{question} [y/N]: ")?;
        self.output.flush()?;
        Ok(self
            .read_line()?
            .is_some_and(|l| matches!(l.to_ascii_lowercase().as_str(), "y" | "yes")))
    }
}

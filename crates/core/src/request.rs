use crate::error::{DomainError, DomainResult};
use crate::schema::{COST_CODES, cost_code_index};

pub const DEFAULT_PROJECT: &str = "Proyecto Alpha";
pub const DEFAULT_DEPARTMENT: &str = "HUILA";
pub const DEFAULT_EVENT_OBJECTIVE: &str = "PERFORACION";
pub const DEFAULT_PLANNED_COST: f64 = 500_000.0;

/// Values captured by one form submission.
///
/// Cost codes are stored positionally, aligned with [`COST_CODES`]. Numeric
/// fields the caller never sets stay at zero.
#[derive(Debug, Clone, PartialEq)]
pub struct PredictionRequest {
    pub project: String,
    pub department: String,
    pub event_objective: String,
    pub cost_codes: [f64; 21],
    pub planned_cost: f64,
}

impl PredictionRequest {
    pub fn new(
        project: impl Into<String>,
        department: impl Into<String>,
        event_objective: impl Into<String>,
    ) -> Self {
        Self {
            project: project.into(),
            department: department.into(),
            event_objective: event_objective.into(),
            cost_codes: [0.0; 21],
            planned_cost: 0.0,
        }
    }

    pub fn with_cost_code(mut self, code: &str, value: f64) -> DomainResult<Self> {
        self.set_cost_code(code, value)?;
        Ok(self)
    }

    pub fn with_planned_cost(mut self, planned_cost: f64) -> Self {
        self.planned_cost = planned_cost;
        self
    }

    pub fn set_cost_code(&mut self, code: &str, value: f64) -> DomainResult<()> {
        let idx = cost_code_index(code).ok_or_else(|| DomainError::unknown_field(code))?;
        self.cost_codes[idx] = value;
        Ok(())
    }

    pub fn cost_code(&self, code: &str) -> Option<f64> {
        cost_code_index(code).map(|idx| self.cost_codes[idx])
    }

    /// `(code, value)` pairs in schema order.
    pub fn cost_code_entries(&self) -> impl Iterator<Item = (&'static str, f64)> + '_ {
        COST_CODES.iter().copied().zip(self.cost_codes.iter().copied())
    }

    /// Form-level checks: every number finite, planned cost non-negative.
    pub fn validate(&self) -> DomainResult<()> {
        if !self.planned_cost.is_finite() {
            return Err(DomainError::validation("planned cost must be a finite number"));
        }
        if self.planned_cost < 0.0 {
            return Err(DomainError::validation(format!(
                "planned cost must be >= 0 (got {})",
                self.planned_cost
            )));
        }
        if let Some((code, value)) = self.cost_code_entries().find(|(_, v)| !v.is_finite()) {
            return Err(DomainError::validation(format!(
                "cost code {code} must be a finite number (got {value})"
            )));
        }
        Ok(())
    }
}

impl Default for PredictionRequest {
    fn default() -> Self {
        Self::new(DEFAULT_PROJECT, DEFAULT_DEPARTMENT, DEFAULT_EVENT_OBJECTIVE)
            .with_planned_cost(DEFAULT_PLANNED_COST)
    }
}

/// Parse a numeric form field. Blank input means zero.
pub fn parse_number(field: &str, raw: &str) -> DomainResult<f64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(0.0);
    }
    trimmed
        .parse::<f64>()
        .map_err(|_| DomainError::validation(format!("{field}: '{trimmed}' is not a number")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_request_has_zeroed_numbers() {
        let req = PredictionRequest::new("P", "META", "WORKOVER");
        assert_eq!(req.planned_cost, 0.0);
        assert!(req.cost_codes.iter().all(|v| *v == 0.0));
    }

    #[test]
    fn default_matches_form_defaults() {
        let req = PredictionRequest::default();
        assert_eq!(req.project, "Proyecto Alpha");
        assert_eq!(req.department, "HUILA");
        assert_eq!(req.event_objective, "PERFORACION");
        assert_eq!(req.planned_cost, 500_000.0);
    }

    #[test]
    fn set_and_read_cost_code() {
        let req = PredictionRequest::default()
            .with_cost_code("2900", 12.5)
            .unwrap();
        assert_eq!(req.cost_code("2900"), Some(12.5));
        assert_eq!(req.cost_code("1000"), Some(0.0));
        assert_eq!(req.cost_code("0000"), None);
    }

    #[test]
    fn unknown_cost_code_is_rejected() {
        let err = PredictionRequest::default()
            .with_cost_code("2300", 1.0)
            .unwrap_err();
        assert_eq!(err, DomainError::UnknownField("2300".to_string()));
    }

    #[test]
    fn validate_rejects_negative_planned_cost() {
        let req = PredictionRequest::default().with_planned_cost(-1.0);
        assert!(matches!(req.validate(), Err(DomainError::Validation(_))));
    }

    #[test]
    fn validate_rejects_non_finite_codes() {
        let req = PredictionRequest::default()
            .with_cost_code("1300", f64::NAN)
            .unwrap();
        let err = req.validate().unwrap_err();
        assert!(err.to_string().contains("1300"));
    }

    #[test]
    fn validate_accepts_zero_planned_cost() {
        let req = PredictionRequest::default().with_planned_cost(0.0);
        assert!(req.validate().is_ok());
    }

    #[test]
    fn parse_number_blank_is_zero() {
        assert_eq!(parse_number("1000", "").unwrap(), 0.0);
        assert_eq!(parse_number("1000", "   ").unwrap(), 0.0);
        assert_eq!(parse_number("1000", " 42.5 ").unwrap(), 42.5);
        assert!(parse_number("1000", "abc").is_err());
    }
}

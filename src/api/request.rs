//! Request types for the Payroll Computation Engine API.
//!
//! This module defines the JSON request body shared by the `/payroll/gross`
//! and `/payroll/net` endpoints.

use serde::{Deserialize, Serialize};

use crate::error::EngineResult;
use crate::models::PayPeriod;

/// Request body for the payroll endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PayrollRequest {
    /// Employee number.
    pub employee_id: String,
    /// Calendar year of the period.
    pub year: i32,
    /// Month of the period (1-12).
    pub month: u32,
    /// Week of the month (1-4).
    pub week: u32,
}

impl PayrollRequest {
    /// Validates the requested period against today's date.
    pub fn pay_period(&self) -> EngineResult<PayPeriod> {
        PayPeriod::new(self.year, self.month, self.week)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::EngineError;

    #[test]
    fn test_deserialize_payroll_request() {
        let json = r#"{"employee_id": "10001", "year": 2024, "month": 6, "week": 1}"#;

        let request: PayrollRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.employee_id, "10001");
        assert_eq!(request.month, 6);

        let period = request.pay_period().unwrap();
        assert_eq!(period.week, 1);
    }

    #[test]
    fn test_missing_field_is_rejected() {
        let json = r#"{"employee_id": "10001", "year": 2024, "month": 6}"#;
        let err = serde_json::from_str::<PayrollRequest>(json).unwrap_err();
        assert!(err.to_string().contains("missing field"));
    }

    #[test]
    fn test_out_of_range_week_is_invalid_period() {
        let request = PayrollRequest {
            employee_id: "10001".to_string(),
            year: 2024,
            month: 6,
            week: 5,
        };
        assert!(matches!(
            request.pay_period(),
            Err(EngineError::InvalidPeriod { .. })
        ));
    }
}

use crate::classify::Classification;
use crate::format::round_fixed;
use serde::{Deserialize, Serialize};

/// Raw calculator fields as typed into the form. Blank means "not provided".
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct UsageForm {
    #[serde(default)]
    pub diesel: String,
    #[serde(default)]
    pub gasoline: String,
    #[serde(default)]
    pub natural_gas: String,
    #[serde(default)]
    pub kwh: String,
}

/// JSON API body. Missing or null fields are treated like blank form fields.
#[derive(Debug, Deserialize, Default)]
pub struct UsageRequest {
    pub diesel_used: Option<f64>,
    pub gasoline_used: Option<f64>,
    pub natural_gas_used: Option<f64>,
    pub kwh_used: Option<f64>,
}

/// Payload sent to the calculation service.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UsageInput {
    pub diesel_used: f64,
    pub gasoline_used: f64,
    pub natural_gas_used: f64,
    pub kwh_used: f64,
    #[serde(rename = "State")]
    pub state: String,
}

/// Scope totals in kilograms CO2e, as returned by the calculation service.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct EmissionsResult {
    pub scope1: f64,
    pub scope2: f64,
}

impl EmissionsResult {
    /// Rounds both scopes to one decimal place for display.
    pub fn rounded(self) -> Self {
        Self {
            scope1: round_fixed(self.scope1, 1),
            scope2: round_fixed(self.scope2, 1),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct CalculationResponse {
    pub scope1: f64,
    pub scope2: f64,
    pub scope1_tons: String,
    pub scope2_tons: String,
    pub classification: Classification,
}

#[derive(Debug, Serialize)]
pub struct StateResponse {
    pub message: Option<String>,
    pub inputs: UsageForm,
    pub result: Option<EmissionsResult>,
    pub calculated_at: Option<String>,
    pub classification: Option<Classification>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rounding_keeps_one_decimal() {
        let result = EmissionsResult {
            scope1: 1234.56,
            scope2: 0.04,
        }
        .rounded();
        assert_eq!(result.scope1, 1234.6);
        assert_eq!(result.scope2, 0.0);
    }

    #[test]
    fn rounding_uses_exact_binary_value() {
        let rounded = |scope1: f64| EmissionsResult { scope1, scope2: 0.0 }.rounded().scope1;

        // Stored just below the midpoint.
        assert_eq!(rounded(20_000.05), 20_000.0);
        assert_eq!(rounded(0.15), 0.1);
        // Stored just above it.
        assert_eq!(rounded(50_000.05), 50_000.1);
        assert_eq!(rounded(100_000.05), 100_000.1);
        // Exact midpoint.
        assert_eq!(rounded(0.25), 0.3);
    }

    #[test]
    fn rounded_result_keeps_boundary_tier() {
        let result = EmissionsResult {
            scope1: 20_000.05,
            scope2: 0.0,
        }
        .rounded();
        let classification = crate::classify::classify(result.scope1, result.scope2);
        assert_eq!(classification.total_tons, 20.0);
        assert_eq!(classification.tier, crate::classify::Tier::APlus);
    }

    #[test]
    fn payload_uses_service_field_names() {
        let input = UsageInput {
            diesel_used: 1.0,
            gasoline_used: 0.0,
            natural_gas_used: 2.5,
            kwh_used: 10.0,
            state: "Washington".to_string(),
        };
        let value = serde_json::to_value(&input).unwrap();
        assert_eq!(value["State"], "Washington");
        assert_eq!(value["diesel_used"], 1.0);
        assert_eq!(value["natural_gas_used"], 2.5);
        assert!(value.get("state").is_none());
    }
}

use crate::models::{UsageForm, UsageInput, UsageRequest};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputError {
    Missing,
    NotNumeric,
    Negative,
}

impl fmt::Display for InputError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let message = match self {
            InputError::Missing => "Please fill in at least one field.",
            InputError::NotNumeric => "Usage values must be numbers.",
            InputError::Negative => "Usage values cannot be negative.",
        };
        f.write_str(message)
    }
}

impl std::error::Error for InputError {}

/// Validates the form and builds the service payload. Blank fields become zero.
pub fn usage_from_form(form: &UsageForm, region: &str) -> Result<UsageInput, InputError> {
    let fields = [&form.diesel, &form.gasoline, &form.natural_gas, &form.kwh];
    if fields.iter().all(|value| value.trim().is_empty()) {
        return Err(InputError::Missing);
    }

    Ok(UsageInput {
        diesel_used: parse_field(&form.diesel)?,
        gasoline_used: parse_field(&form.gasoline)?,
        natural_gas_used: parse_field(&form.natural_gas)?,
        kwh_used: parse_field(&form.kwh)?,
        state: region.to_string(),
    })
}

pub fn usage_from_request(request: &UsageRequest, region: &str) -> Result<UsageInput, InputError> {
    let fields = [
        request.diesel_used,
        request.gasoline_used,
        request.natural_gas_used,
        request.kwh_used,
    ];
    if fields.iter().all(Option::is_none) {
        return Err(InputError::Missing);
    }

    Ok(UsageInput {
        diesel_used: check_value(request.diesel_used.unwrap_or(0.0))?,
        gasoline_used: check_value(request.gasoline_used.unwrap_or(0.0))?,
        natural_gas_used: check_value(request.natural_gas_used.unwrap_or(0.0))?,
        kwh_used: check_value(request.kwh_used.unwrap_or(0.0))?,
        state: region.to_string(),
    })
}

fn parse_field(raw: &str) -> Result<f64, InputError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(0.0);
    }
    let value = raw.parse::<f64>().map_err(|_| InputError::NotNumeric)?;
    check_value(value)
}

fn check_value(value: f64) -> Result<f64, InputError> {
    if !value.is_finite() {
        return Err(InputError::NotNumeric);
    }
    if value < 0.0 {
        return Err(InputError::Negative);
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form(diesel: &str, gasoline: &str, natural_gas: &str, kwh: &str) -> UsageForm {
        UsageForm {
            diesel: diesel.to_string(),
            gasoline: gasoline.to_string(),
            natural_gas: natural_gas.to_string(),
            kwh: kwh.to_string(),
        }
    }

    #[test]
    fn all_blank_is_missing() {
        let err = usage_from_form(&form("", " ", "", "\t"), "Washington").unwrap_err();
        assert_eq!(err, InputError::Missing);
        assert_eq!(err.to_string(), "Please fill in at least one field.");
    }

    #[test]
    fn blanks_become_zero() {
        let input = usage_from_form(&form("12.5", "", "", "300"), "Washington").unwrap();
        assert_eq!(input.diesel_used, 12.5);
        assert_eq!(input.gasoline_used, 0.0);
        assert_eq!(input.natural_gas_used, 0.0);
        assert_eq!(input.kwh_used, 300.0);
        assert_eq!(input.state, "Washington");
    }

    #[test]
    fn explicit_zero_counts_as_filled() {
        let input = usage_from_form(&form("0", "", "", ""), "Oregon").unwrap();
        assert_eq!(input.diesel_used, 0.0);
        assert_eq!(input.state, "Oregon");
    }

    #[test]
    fn rejects_text_and_negatives() {
        assert_eq!(
            usage_from_form(&form("abc", "", "", ""), "Washington"),
            Err(InputError::NotNumeric)
        );
        assert_eq!(
            usage_from_form(&form("", "inf", "", ""), "Washington"),
            Err(InputError::NotNumeric)
        );
        assert_eq!(
            usage_from_form(&form("", "", "-4", ""), "Washington"),
            Err(InputError::Negative)
        );
    }

    #[test]
    fn request_requires_one_field() {
        let err = usage_from_request(&UsageRequest::default(), "Washington").unwrap_err();
        assert_eq!(err, InputError::Missing);

        let request = UsageRequest {
            kwh_used: Some(1500.0),
            ..UsageRequest::default()
        };
        let input = usage_from_request(&request, "Washington").unwrap();
        assert_eq!(input.kwh_used, 1500.0);
        assert_eq!(input.diesel_used, 0.0);
    }
}

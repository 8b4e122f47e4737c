//! Validation helpers shared by the services and the API layer

use chrono::{Local, NaiveDate};
use validator::{Validate, ValidationError, ValidationErrors};

use crate::entities::blood_pressure::CreateBloodPressureRequest;

/// Reject dates after today in local time
pub fn validate_not_in_future(date: &NaiveDate) -> Result<(), ValidationError> {
    if *date > Local::now().date_naive() {
        let mut error = ValidationError::new("future_date");
        error.message = Some("Reading date cannot be in the future".into());
        return Err(error);
    }
    Ok(())
}

/// Flatten validator errors into one message, fields in alphabetical order
pub fn describe_validation_errors(errors: &ValidationErrors) -> String {
    let mut fields: Vec<String> = errors
        .field_errors()
        .iter()
        .map(|(field, errors)| {
            let messages: Vec<String> = errors
                .iter()
                .map(|err| match &err.message {
                    Some(msg) => msg.to_string(),
                    None => format!("Invalid {}", field),
                })
                .collect();
            format!("{}: {}", field, messages.join(", "))
        })
        .collect();
    fields.sort();
    fields.join("; ")
}

/// Validate a reading request: field ranges, date, and systolic above diastolic
pub fn validate_reading_request(request: &CreateBloodPressureRequest) -> Result<(), String> {
    request
        .validate()
        .map_err(|errors| describe_validation_errors(&errors))?;

    if request.systolic <= request.diastolic {
        return Err("Systolic pressure must be greater than diastolic pressure".to_string());
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, NaiveTime};

    fn request(systolic: u16, diastolic: u16) -> CreateBloodPressureRequest {
        CreateBloodPressureRequest {
            systolic,
            diastolic,
            pulse: 70,
            date: NaiveDate::from_ymd_opt(2024, 1, 15).unwrap(),
            time: NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
        }
    }

    #[test]
    fn test_today_is_not_future() {
        assert!(validate_not_in_future(&Local::now().date_naive()).is_ok());
        assert!(validate_not_in_future(&(Local::now().date_naive() + Duration::days(3))).is_err());
    }

    #[test]
    fn test_valid_request() {
        assert!(validate_reading_request(&request(120, 80)).is_ok());
    }

    #[test]
    fn test_out_of_range_fields_are_named() {
        let message = validate_reading_request(&request(350, 250)).unwrap_err();
        assert!(message.contains("Systolic must be between 40 and 300"));
        assert!(message.contains("Diastolic must be between 20 and 200"));
        assert!(message.starts_with("diastolic:"));
    }

    #[test]
    fn test_systolic_must_exceed_diastolic() {
        let message = validate_reading_request(&request(80, 80)).unwrap_err();
        assert!(message.contains("greater than"));
    }
}

//! Common validation utilities.

use chrono::{DateTime, Utc};
use validator::ValidationError;

/// Lowest grade on the six-point scale.
pub const MIN_GRADE: f64 = 2.0;

/// Highest grade on the six-point scale.
pub const MAX_GRADE: f64 = 6.0;

/// Highest school year a class can be in.
const MAX_CLASS_YEAR: i32 = 12;

/// Validates that a grade is on the six-point scale (2.00 to 6.00).
pub fn validate_grade_value(value: f64) -> Result<(), ValidationError> {
    if (MIN_GRADE..=MAX_GRADE).contains(&value) {
        Ok(())
    } else {
        let mut err = ValidationError::new("grade_range");
        err.message = Some("Grade must be between 2 and 6".into());
        Err(err)
    }
}

/// Validates that a class year is within valid range (1 to 12).
pub fn validate_class_year(year: i32) -> Result<(), ValidationError> {
    if (1..=MAX_CLASS_YEAR).contains(&year) {
        Ok(())
    } else {
        let mut err = ValidationError::new("class_year_range");
        err.message = Some("Class year must be between 1 and 12".into());
        Err(err)
    }
}

/// Validates a school year label such as `2024/2025`.
///
/// Both halves must be four-digit years and the second must follow the first.
pub fn validate_school_year(label: &str) -> Result<(), ValidationError> {
    let parsed = label
        .split_once('/')
        .and_then(|(start, end)| {
            if start.len() != 4 || end.len() != 4 {
                return None;
            }
            Some((start.parse::<i32>().ok()?, end.parse::<i32>().ok()?))
        });

    match parsed {
        Some((start, end)) if end == start + 1 => Ok(()),
        _ => {
            let mut err = ValidationError::new("school_year_format");
            err.message = Some("School year must look like 2024/2025".into());
            Err(err)
        }
    }
}

/// Validates that a recorded moment is not in the future.
pub fn validate_not_in_future(moment: &DateTime<Utc>) -> Result<(), ValidationError> {
    if *moment <= Utc::now() {
        Ok(())
    } else {
        let mut err = ValidationError::new("timestamp_future");
        err.message = Some("Timestamp cannot be in the future".into());
        Err(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn test_validate_grade_value() {
        assert!(validate_grade_value(2.0).is_ok());
        assert!(validate_grade_value(4.5).is_ok());
        assert!(validate_grade_value(6.0).is_ok());
        assert!(validate_grade_value(1.99).is_err());
        assert!(validate_grade_value(6.01).is_err());
    }

    #[test]
    fn test_validate_grade_value_error_message() {
        let err = validate_grade_value(7.0).unwrap_err();
        assert_eq!(
            err.message.unwrap().to_string(),
            "Grade must be between 2 and 6"
        );
    }

    #[test]
    fn test_validate_class_year() {
        assert!(validate_class_year(1).is_ok());
        assert!(validate_class_year(12).is_ok());
        assert!(validate_class_year(0).is_err());
        assert!(validate_class_year(13).is_err());
    }

    #[test]
    fn test_validate_school_year() {
        assert!(validate_school_year("2024/2025").is_ok());
        assert!(validate_school_year("1999/2000").is_ok());
        assert!(validate_school_year("2024/2026").is_err());
        assert!(validate_school_year("2025/2024").is_err());
        assert!(validate_school_year("24/25").is_err());
        assert!(validate_school_year("2024-2025").is_err());
        assert!(validate_school_year("").is_err());
    }

    #[test]
    fn test_validate_not_in_future() {
        assert!(validate_not_in_future(&(Utc::now() - Duration::hours(1))).is_ok());
        assert!(validate_not_in_future(&(Utc::now() + Duration::hours(1))).is_err());
    }
}

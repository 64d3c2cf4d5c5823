// steward-service/src/utils/validation.rs
use crate::models::ServiceError;
use chrono::{NaiveDate, NaiveTime};
use lazy_static::lazy_static;
use regex::Regex;
use uuid::Uuid;

lazy_static! {
    static ref EMAIL_RE: Regex = Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap();
    static ref HEX_COLOR_RE: Regex = Regex::new(r"^#(?:[0-9a-fA-F]{3}|[0-9a-fA-F]{6})$").unwrap();
}

pub fn is_valid_email(value: &str) -> bool {
    EMAIL_RE.is_match(value.trim())
}

pub fn is_hex_color(value: &str) -> bool {
    HEX_COLOR_RE.is_match(value.trim())
}

// Form fields arrive as strings; blank means "not provided"
pub fn optional_text(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

pub fn required_text(value: &str, field: &str) -> Result<String, ServiceError> {
    optional_text(value).ok_or_else(|| ServiceError::BadRequest(format!("{} is required", field)))
}

pub fn parse_date(value: &str, field: &str) -> Result<NaiveDate, ServiceError> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").map_err(|_| {
        ServiceError::BadRequest(format!("{} must be a date in YYYY-MM-DD format", field))
    })
}

// Accepts the HH:MM a time input produces, or HH:MM:SS
pub fn parse_time(value: &str, field: &str) -> Result<NaiveTime, ServiceError> {
    let trimmed = value.trim();
    NaiveTime::parse_from_str(trimmed, "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(trimmed, "%H:%M:%S"))
        .map_err(|_| ServiceError::BadRequest(format!("{} must be a time in HH:MM format", field)))
}

pub fn optional_uuid(value: &str, field: &str) -> Result<Option<Uuid>, ServiceError> {
    match optional_text(value) {
        None => Ok(None),
        Some(raw) => Uuid::parse_str(&raw)
            .map(Some)
            .map_err(|_| ServiceError::BadRequest(format!("{} is not a valid id", field))),
    }
}

pub fn optional_u32(value: &str, field: &str) -> Result<Option<u32>, ServiceError> {
    match optional_text(value) {
        None => Ok(None),
        Some(raw) => raw
            .parse::<u32>()
            .map(Some)
            .map_err(|_| ServiceError::BadRequest(format!("{} must be a whole number", field))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn emails() {
        assert!(is_valid_email("office@gracechurch.org"));
        assert!(is_valid_email("  office@gracechurch.org "));
        assert!(!is_valid_email("office@"));
        assert!(!is_valid_email("office gracechurch.org"));
    }

    #[test]
    fn colors() {
        assert!(is_hex_color("#3b82f6"));
        assert!(is_hex_color("#fff"));
        assert!(!is_hex_color("blue"));
    }

    #[test]
    fn blank_form_values_become_absent() {
        assert_eq!(optional_text("   "), None);
        assert_eq!(optional_text(" Hall "), Some("Hall".to_string()));
        assert!(required_text("", "Title").is_err());
    }

    #[test]
    fn times_with_and_without_seconds() {
        assert_eq!(parse_time("14:05", "start").unwrap(), NaiveTime::from_hms_opt(14, 5, 0).unwrap());
        assert_eq!(parse_time("14:05:30", "start").unwrap(), NaiveTime::from_hms_opt(14, 5, 30).unwrap());
        assert!(parse_time("2pm", "start").is_err());
    }

    #[test]
    fn numbers_and_ids() {
        assert_eq!(optional_u32("", "capacity").unwrap(), None);
        assert_eq!(optional_u32("120", "capacity").unwrap(), Some(120));
        assert!(optional_u32("-4", "capacity").is_err());
        assert!(optional_uuid("room-7", "room").is_err());
        assert_eq!(optional_uuid("", "room").unwrap(), None);
    }
}

//! Input validation utilities

use crate::constants::MAX_NAME_LENGTH;

/// Sanitize string input (remove control characters, trim whitespace)
pub fn sanitize_string(input: &str) -> String {
    input
        .chars()
        .filter(|c| !c.is_control() || *c == '\n' || *c == '\t')
        .collect::<String>()
        .trim()
        .to_string()
}

/// Validate and sanitize a display name (student, event, house, category)
pub fn validate_name(name: &str) -> Result<String, &'static str> {
    let sanitized = sanitize_string(name);
    if sanitized.is_empty() {
        return Err("Name cannot be empty");
    }
    if sanitized.chars().count() as u64 > MAX_NAME_LENGTH {
        return Err("Name is too long");
    }
    if sanitized.contains('\n') || sanitized.contains('\t') {
        return Err("Name must be a single line");
    }
    Ok(sanitized)
}

/// Validate admission number format
pub fn validate_admission_number(admission_number: &str) -> Result<String, &'static str> {
    let trimmed = admission_number.trim();
    if trimmed.is_empty() {
        return Err("Admission number cannot be empty");
    }
    if trimmed.len() > 32 {
        return Err("Admission number must be at most 32 characters");
    }
    if !trimmed
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '/')
    {
        return Err("Admission number can only contain letters, digits, '-' and '/'");
    }
    Ok(trimmed.to_string())
}

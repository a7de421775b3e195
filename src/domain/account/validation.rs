//! Account payload validation rules
//!
//! Rules are checked per field, and the collectors gather every violation in
//! a payload instead of stopping at the first, so a caller sees all problems
//! in a single response.

use once_cell::sync::Lazy;
use regex::Regex;
use thiserror::Error;

/// Minimum plaintext secret length
pub const MIN_PASSWORD_LENGTH: usize = 6;

static EMAIL_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("email pattern is valid"));

/// A single field rule violation
#[derive(Debug, Error, Clone, PartialEq)]
pub enum AccountRuleError {
    #[error("{0} is required")]
    Required(&'static str),

    #[error("email must be a valid email address")]
    InvalidEmail,

    #[error("password must be at least {0} characters long")]
    PasswordTooShort(usize),
}

/// A required name field must be present and non-empty (whitespace-only
/// counts as empty).
pub fn validate_required_name(
    field: &'static str,
    value: &str,
) -> Result<(), AccountRuleError> {
    if value.trim().is_empty() {
        return Err(AccountRuleError::Required(field));
    }

    Ok(())
}

/// Syntactic email check: one `@`, no whitespace, a dotted domain part.
pub fn validate_email(email: &str) -> Result<(), AccountRuleError> {
    if email.trim().is_empty() {
        return Err(AccountRuleError::Required("email"));
    }

    if !EMAIL_PATTERN.is_match(email) {
        return Err(AccountRuleError::InvalidEmail);
    }

    Ok(())
}

pub fn validate_password(password: &str) -> Result<(), AccountRuleError> {
    if password.is_empty() {
        return Err(AccountRuleError::Required("password"));
    }

    if password.len() < MIN_PASSWORD_LENGTH {
        return Err(AccountRuleError::PasswordTooShort(MIN_PASSWORD_LENGTH));
    }

    Ok(())
}

/// Check a create payload. All fields are required; every violation is
/// returned, in field order.
pub fn collect_create_violations(
    firstname: &str,
    lastname: &str,
    middlename: &str,
    email: &str,
    password: &str,
) -> Vec<AccountRuleError> {
    let mut violations = Vec::new();

    let checks = [
        validate_required_name("firstname", firstname),
        validate_required_name("lastname", lastname),
        validate_required_name("middlename", middlename),
        validate_email(email),
        validate_password(password),
    ];

    for check in checks {
        if let Err(violation) = check {
            violations.push(violation);
        }
    }

    violations
}

/// Check an update payload. Every field is optional; a field that is present
/// must satisfy the same rule as on create, and absent fields are skipped.
pub fn collect_update_violations(
    firstname: Option<&str>,
    lastname: Option<&str>,
    middlename: Option<&str>,
    email: Option<&str>,
    password: Option<&str>,
) -> Vec<AccountRuleError> {
    let mut violations = Vec::new();

    let checks = [
        firstname.map(|v| validate_required_name("firstname", v)),
        lastname.map(|v| validate_required_name("lastname", v)),
        middlename.map(|v| validate_required_name("middlename", v)),
        email.map(validate_email),
        password.map(validate_password),
    ];

    for check in checks.into_iter().flatten() {
        if let Err(violation) = check {
            violations.push(violation);
        }
    }

    violations
}

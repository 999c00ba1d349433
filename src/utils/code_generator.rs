//! Short code generation and validation utilities.
//!
//! Generated codes are random alphanumeric strings; custom codes are used
//! verbatim once they pass [`validate_custom_code`].

use crate::error::AppError;
use rand::Rng;
use rand::distr::Alphanumeric;
use regex::Regex;
use serde_json::json;
use std::sync::LazyLock;

/// Length of generated short codes.
pub const GENERATED_CODE_LENGTH: usize = 7;

/// Maximum length of a caller-supplied short code.
pub const MAX_CUSTOM_CODE_LENGTH: usize = 64;

/// Codes that would be shadowed by fixed routes and so could never redirect.
pub const RESERVED_CODES: &[&str] = &["api", "health", "static", "admin"];

/// URL-safe path segment characters accepted in custom codes.
static CUSTOM_CODE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9_-]+$").expect("valid custom code regex"));

/// Generates a random short code from `[A-Za-z0-9]`.
///
/// 62^7 possible values keep collisions rare but not impossible; callers must
/// still check the store.
///
/// # Examples
///
/// ```ignore
/// let code = generate_code();
/// assert_eq!(code.len(), 7);
/// assert!(code.chars().all(|c| c.is_ascii_alphanumeric()));
/// ```
pub fn generate_code() -> String {
    rand::rng()
        .sample_iter(&Alphanumeric)
        .take(GENERATED_CODE_LENGTH)
        .map(char::from)
        .collect()
}

/// Validates a user-provided custom short code.
///
/// # Rules
///
/// - Length: 1-64 characters
/// - Allowed characters: ASCII letters, digits, hyphens, underscores
/// - Cannot be a reserved route name (case-insensitive)
///
/// # Errors
///
/// Returns [`AppError::Validation`] if any rule is violated.
///
/// # Examples
///
/// ```ignore
/// assert!(validate_custom_code("my-link_2024").is_ok());
/// assert!(validate_custom_code("has space").is_err());
/// assert!(validate_custom_code("api").is_err());
/// ```
pub fn validate_custom_code(code: &str) -> Result<(), AppError> {
    if code.is_empty() || code.len() > MAX_CUSTOM_CODE_LENGTH {
        return Err(AppError::bad_request(
            "Custom code must be 1-64 characters",
            json!({ "provided_length": code.len() }),
        ));
    }

    if !CUSTOM_CODE_REGEX.is_match(code) {
        return Err(AppError::bad_request(
            "Custom code can only contain letters, digits, hyphens, and underscores",
            json!({ "code": code }),
        ));
    }

    if RESERVED_CODES
        .iter()
        .any(|reserved| reserved.eq_ignore_ascii_case(code))
    {
        return Err(AppError::bad_request(
            "This code is reserved",
            json!({ "code": code }),
        ));
    }

    Ok(())
}

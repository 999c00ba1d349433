//! Validation of redirect targets.
//!
//! The submitted URL is stored as given (minus surrounding whitespace), so a
//! redirect always points at exactly what the client sent. Only its shape is
//! checked here.

use url::Url;

/// Upper bound on stored target length.
pub const MAX_URL_LENGTH: usize = 2048;

/// Errors that can occur while validating a target URL.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum UrlValidationError {
    #[error("longUrl is required")]
    Empty,

    #[error("URL is longer than {MAX_URL_LENGTH} characters")]
    TooLong,

    #[error("Invalid URL format: {0}")]
    InvalidFormat(String),

    #[error("Only HTTP and HTTPS protocols are allowed")]
    UnsupportedProtocol,

    #[error("URL must include a host")]
    MissingHost,

    #[error("URL must not contain control characters")]
    ControlCharacter,
}

/// Checks that `input` is an absolute HTTP(S) URL and returns the trimmed value.
///
/// Rejects `javascript:`, `data:`, `file:` and other schemes that would turn a
/// redirect into something other than navigation.
///
/// # Errors
///
/// See [`UrlValidationError`].
pub fn validate_url(input: &str) -> Result<String, UrlValidationError> {
    let trimmed = input.trim();

    if trimmed.is_empty() {
        return Err(UrlValidationError::Empty);
    }

    if trimmed.len() > MAX_URL_LENGTH {
        return Err(UrlValidationError::TooLong);
    }

    // `Url::parse` silently drops tabs and newlines, so check the raw input:
    // the stored value has to be usable as a `Location` header.
    if trimmed.chars().any(|c| c.is_ascii_control()) {
        return Err(UrlValidationError::ControlCharacter);
    }

    let url = Url::parse(trimmed).map_err(|e| UrlValidationError::InvalidFormat(e.to_string()))?;

    match url.scheme() {
        "http" | "https" => {}
        _ => return Err(UrlValidationError::UnsupportedProtocol),
    }

    if url.host_str().is_none_or(str::is_empty) {
        return Err(UrlValidationError::MissingHost);
    }

    Ok(trimmed.to_string())
}

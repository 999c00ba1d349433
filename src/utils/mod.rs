//! Utility functions for short code handling and URL validation.
//!
//! - [`code_generator`] - Short code generation and custom code validation
//! - [`url_validator`] - Target URL checks

pub mod code_generator;
pub mod url_validator;

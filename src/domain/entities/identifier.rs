//! Identifier accepted by the delete endpoint.

use std::fmt;

/// A delete target as supplied by the client.
///
/// The same path segment may carry either a storage id or a short code. Parsing
/// is strict: only a positive decimal integer without sign or padding is an
/// [`LinkIdentifier::Id`]. Callers that get a miss on an id must still try the
/// raw string as a short code, since codes such as `"2024"` are legal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LinkIdentifier {
    Id(i64),
    Code(String),
}

impl LinkIdentifier {
    pub fn parse(raw: &str) -> Self {
        let is_id_shaped = !raw.is_empty()
            && raw.bytes().all(|b| b.is_ascii_digit())
            && !raw.starts_with('0');

        match raw.parse::<i64>() {
            Ok(id) if is_id_shaped => LinkIdentifier::Id(id),
            _ => LinkIdentifier::Code(raw.to_string()),
        }
    }
}

impl fmt::Display for LinkIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LinkIdentifier::Id(id) => write!(f, "{id}"),
            LinkIdentifier::Code(code) => f.write_str(code),
        }
    }
}

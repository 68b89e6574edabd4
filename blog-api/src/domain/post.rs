use super::error::DomainError;

// Firestore indexes string field values up to 1,500 bytes, accounted at two
// bytes per UTF-16 code unit: 750 units. Kept 50 under that so a write never
// trips the backend limit.
const FIRESTORE_INDEXED_FIELD_UNITS: usize = 750;
pub(crate) const FIELD_UNIT_LIMIT: usize = FIRESTORE_INDEXED_FIELD_UNITS - 50;

#[derive(Debug, Clone)]
pub(crate) struct Post {
    pub(crate) id: String,
    pub(crate) author_id: String,
    pub(crate) title: String,
    pub(crate) content: String,
    pub(crate) date: i64,
}

#[derive(Debug, Clone, Default)]
pub(crate) struct PostSubmission {
    pub(crate) title: Option<String>,
    pub(crate) content: Option<String>,
}

#[derive(Debug, Clone)]
pub(crate) struct ValidSubmission {
    pub(crate) title: String,
    pub(crate) content: String,
}

impl PostSubmission {
    pub(crate) fn validate(self) -> Result<ValidSubmission, DomainError> {
        let title = require_field("title", self.title)?;
        let content = require_field("content", self.content)?;
        Ok(ValidSubmission { title, content })
    }
}

fn require_field(field: &'static str, value: Option<String>) -> Result<String, DomainError> {
    let normalized = value.as_deref().map(normalize_field).unwrap_or_default();
    if normalized.is_empty() {
        return Err(DomainError::Validation {
            field,
            message: "must be present and non-empty",
        });
    }
    Ok(normalized)
}

pub(crate) fn normalize_field(raw: &str) -> String {
    truncate_units(raw.trim(), FIELD_UNIT_LIMIT).to_string()
}

// A char straddling the limit is dropped whole rather than split into a lone
// surrogate.
fn truncate_units(s: &str, limit: usize) -> &str {
    let mut units = 0;
    for (idx, ch) in s.char_indices() {
        let width = ch.len_utf16();
        if units + width > limit {
            return &s[..idx];
        }
        units += width;
    }
    s
}

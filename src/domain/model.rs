/// Flat, insertion-ordered output for one record.
pub type OutputMapping = serde_json::Map<String, serde_json::Value>;

/// One `(output_key, source_attribute)` pair of a field mapping.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldEntry {
    pub output_key: String,
    pub source_attribute: String,
}

impl FieldEntry {
    pub fn new(output_key: impl Into<String>, source_attribute: impl Into<String>) -> Self {
        Self {
            output_key: output_key.into(),
            source_attribute: source_attribute.into(),
        }
    }
}

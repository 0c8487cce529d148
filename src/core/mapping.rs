use crate::domain::model::FieldEntry;
use crate::domain::ports::FieldDeclarations;
use crate::utils::error::Result;
use crate::utils::validation::validate_unique_keys;

/// Ordered output-key to source-attribute pairs, fixed at construction.
///
/// Attribute names are not checked against any record type; records are
/// dynamically shaped and a mismatch only surfaces when a batch is converted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldMapping {
    entries: Vec<FieldEntry>,
}

impl FieldMapping {
    /// Rejects the mapping if two entries share an output key.
    pub fn new<I, K, S>(pairs: I) -> Result<Self>
    where
        I: IntoIterator<Item = (K, S)>,
        K: Into<String>,
        S: Into<String>,
    {
        let entries: Vec<FieldEntry> = pairs
            .into_iter()
            .map(|(output_key, source_attribute)| FieldEntry::new(output_key, source_attribute))
            .collect();

        validate_unique_keys(entries.iter().map(|e| e.output_key.as_str()))?;

        Ok(Self { entries })
    }

    /// Each name is both the output key and the source attribute.
    pub fn from_field_names<I, N>(names: I) -> Result<Self>
    where
        I: IntoIterator<Item = N>,
        N: Into<String>,
    {
        Self::new(names.into_iter().map(|name| {
            let name: String = name.into();
            (name.clone(), name)
        }))
    }

    pub fn from_declarations<D: FieldDeclarations + ?Sized>(declarations: &D) -> Result<Self> {
        Self::new(declarations.field_pairs())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, FieldEntry> {
        self.entries.iter()
    }

    pub fn output_keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.output_key.as_str())
    }
}

impl<'a> IntoIterator for &'a FieldMapping {
    type Item = &'a FieldEntry;
    type IntoIter = std::slice::Iter<'a, FieldEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::error::SerializeError;

    #[test]
    fn test_mapping_preserves_declaration_order() {
        let mapping = FieldMapping::new([
            ("id_col", "id"),
            ("user_id", "uid"),
            ("cost", "price"),
            ("active", "is_active"),
        ])
        .unwrap();

        assert_eq!(mapping.len(), 4);
        assert_eq!(
            mapping.output_keys().collect::<Vec<_>>(),
            vec!["id_col", "user_id", "cost", "active"]
        );
        let sources: Vec<&str> = mapping
            .iter()
            .map(|e| e.source_attribute.as_str())
            .collect();
        assert_eq!(sources, vec!["id", "uid", "price", "is_active"]);
    }

    #[test]
    fn test_duplicate_output_key_is_rejected() {
        let err = FieldMapping::new([("id", "id"), ("id", "pk")]).unwrap_err();
        assert!(matches!(
            err,
            SerializeError::DuplicateOutputKey { ref output_key } if output_key == "id"
        ));
    }

    #[test]
    fn test_same_source_under_two_keys_is_allowed() {
        let mapping = FieldMapping::new([("id", "pk"), ("pk", "pk")]).unwrap();
        assert_eq!(mapping.len(), 2);
    }

    #[test]
    fn test_from_field_names_is_identity() {
        let mapping = FieldMapping::from_field_names(["id", "title", "author"]).unwrap();
        assert!(mapping
            .iter()
            .all(|e| e.output_key == e.source_attribute));
        assert!(FieldMapping::from_field_names(["id", "id"]).is_err());
    }

    #[test]
    fn test_from_declarations() {
        struct BookSerializerMeta;

        impl FieldDeclarations for BookSerializerMeta {
            fn field_pairs(&self) -> Vec<(String, String)> {
                vec![
                    ("id".to_string(), "id".to_string()),
                    ("name".to_string(), "title".to_string()),
                ]
            }
        }

        let mapping = FieldMapping::from_declarations(&BookSerializerMeta).unwrap();
        assert_eq!(mapping.output_keys().collect::<Vec<_>>(), vec!["id", "name"]);
    }

    #[test]
    fn test_empty_mapping() {
        let mapping = FieldMapping::new(Vec::<(String, String)>::new()).unwrap();
        assert!(mapping.is_empty());
    }
}

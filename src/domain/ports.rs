use crate::domain::value::Value;

/// A runtime attribute value read off a record.
///
/// Implementations classify themselves into the closed [`Value`] set. A type
/// that wraps a recognized type should delegate to the wrapped value so it
/// formats exactly like it:
///
/// ```
/// use fast_serializer::{Attribute, Value};
/// use uuid::Uuid;
///
/// struct UserId(Uuid);
///
/// impl Attribute for UserId {
///     fn classify(&self) -> Value<'_> {
///         self.0.classify()
///     }
/// }
///
/// assert_eq!(UserId(Uuid::nil()).classify(), Value::Uuid(Uuid::nil()));
/// ```
pub trait Attribute {
    fn classify(&self) -> Value<'_>;

    /// Runtime type name reported when no formatting rule applies.
    fn type_name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }
}

/// Named-attribute read access to a record.
///
/// `None` means the record has no such attribute at all, which is different
/// from an attribute holding the null sentinel.
pub trait AttributeReadable {
    fn get(&self, name: &str) -> Option<&dyn Attribute>;
}

/// Source of output field declarations, as a host serializer class would
/// declare them: ordered `(output_key, source_attribute)` pairs.
pub trait FieldDeclarations {
    fn field_pairs(&self) -> Vec<(String, String)>;
}

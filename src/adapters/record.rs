use crate::domain::ports::{Attribute, AttributeReadable};
use std::collections::{BTreeMap, HashMap};

/// Implements [`AttributeReadable`] for a struct by exposing the listed
/// fields under their own names.
///
/// ```
/// use fast_serializer::impl_attribute_readable;
///
/// struct Book {
///     id: i64,
///     title: String,
///     price: Option<rust_decimal::Decimal>,
/// }
///
/// impl_attribute_readable!(Book { id, title, price });
/// ```
#[macro_export]
macro_rules! impl_attribute_readable {
    ($ty:ty { $($field:ident),* $(,)? }) => {
        impl $crate::AttributeReadable for $ty {
            fn get(&self, name: &str) -> ::std::option::Option<&dyn $crate::Attribute> {
                $(
                    if name == stringify!($field) {
                        return ::std::option::Option::Some(&self.$field);
                    }
                )*
                ::std::option::Option::None
            }
        }
    };
}

type BoxedAttribute = Box<dyn Attribute + Send + Sync>;

/// Record assembled at runtime from named attribute values.
///
/// Attribute lookup is a linear scan; records carry a handful of fields and
/// this beats hashing at that size.
#[derive(Default)]
pub struct DynamicRecord {
    attributes: Vec<(String, BoxedAttribute)>,
}

impl DynamicRecord {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with<V>(mut self, name: impl Into<String>, value: V) -> Self
    where
        V: Attribute + Send + Sync + 'static,
    {
        self.set(name, value);
        self
    }

    /// Replaces an existing attribute of the same name.
    pub fn set<V>(&mut self, name: impl Into<String>, value: V)
    where
        V: Attribute + Send + Sync + 'static,
    {
        let name = name.into();
        let value: BoxedAttribute = Box::new(value);
        match self.attributes.iter_mut().find(|(n, _)| *n == name) {
            Some((_, slot)) => *slot = value,
            None => self.attributes.push((name, value)),
        }
    }

    pub fn remove(&mut self, name: &str) -> bool {
        let before = self.attributes.len();
        self.attributes.retain(|(n, _)| n != name);
        self.attributes.len() != before
    }

    pub fn len(&self) -> usize {
        self.attributes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.attributes.is_empty()
    }
}

impl std::fmt::Debug for DynamicRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_map()
            .entries(
                self.attributes
                    .iter()
                    .map(|(name, value)| (name, value.classify().kind())),
            )
            .finish()
    }
}

impl AttributeReadable for DynamicRecord {
    fn get(&self, name: &str) -> Option<&dyn Attribute> {
        self.attributes
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, value)| value.as_ref() as &dyn Attribute)
    }
}

impl<V: Attribute> AttributeReadable for HashMap<String, V> {
    fn get(&self, name: &str) -> Option<&dyn Attribute> {
        HashMap::get(self, name).map(|v| v as &dyn Attribute)
    }
}

impl<V: Attribute> AttributeReadable for BTreeMap<String, V> {
    fn get(&self, name: &str) -> Option<&dyn Attribute> {
        BTreeMap::get(self, name).map(|v| v as &dyn Attribute)
    }
}

impl AttributeReadable for serde_json::Map<String, serde_json::Value> {
    fn get(&self, name: &str) -> Option<&dyn Attribute> {
        serde_json::Map::get(self, name).map(|v| v as &dyn Attribute)
    }
}

impl<T: AttributeReadable + ?Sized> AttributeReadable for &T {
    fn get(&self, name: &str) -> Option<&dyn Attribute> {
        (**self).get(name)
    }
}

impl<T: AttributeReadable + ?Sized> AttributeReadable for Box<T> {
    fn get(&self, name: &str) -> Option<&dyn Attribute> {
        (**self).get(name)
    }
}

use crate::domain::decimal::Decimal;
use crate::domain::ports::Attribute;
use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, NaiveTime, Offset, TimeZone};
use std::borrow::Cow;
use uuid::Uuid;

/// Closed classification of an attribute's runtime value.
///
/// Every attribute type maps onto exactly one variant. Wrapper types map onto
/// the variant of the type they wrap, so a `Money(Decimal)` classifies as
/// `Decimal` and formats the same way.
#[derive(Debug, Clone, PartialEq)]
pub enum Value<'a> {
    Null,
    Bool(bool),
    Int(i64),
    UInt(u64),
    Float(f64),
    Text(&'a str),
    Date(NaiveDate),
    Time(NaiveTime),
    /// Wall-clock date-time plus the UTC offset it was observed at, if any.
    DateTime(NaiveDateTime, Option<FixedOffset>),
    Decimal(Cow<'a, Decimal>),
    Uuid(Uuid),
    Unsupported,
}

impl Value<'_> {
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Short kind name used in logs and test assertions.
    pub fn kind(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "bool",
            Value::Int(_) | Value::UInt(_) => "integer",
            Value::Float(_) => "float",
            Value::Text(_) => "text",
            Value::Date(_) => "date",
            Value::Time(_) => "time",
            Value::DateTime(_, None) => "datetime",
            Value::DateTime(_, Some(_)) => "datetime_tz",
            Value::Decimal(_) => "decimal",
            Value::Uuid(_) => "uuid",
            Value::Unsupported => "unsupported",
        }
    }
}

macro_rules! signed_attribute {
    ($($ty:ty),*) => {
        $(impl Attribute for $ty {
            fn classify(&self) -> Value<'_> {
                Value::Int(i64::from(*self))
            }
        })*
    };
}

macro_rules! unsigned_attribute {
    ($($ty:ty),*) => {
        $(impl Attribute for $ty {
            fn classify(&self) -> Value<'_> {
                Value::UInt(u64::from(*self))
            }
        })*
    };
}

signed_attribute!(i8, i16, i32, i64);
unsigned_attribute!(u8, u16, u32, u64);

impl Attribute for isize {
    fn classify(&self) -> Value<'_> {
        Value::Int(*self as i64)
    }
}

impl Attribute for usize {
    fn classify(&self) -> Value<'_> {
        Value::UInt(*self as u64)
    }
}

// Wide integers pass through while they fit a JSON number.
impl Attribute for i128 {
    fn classify(&self) -> Value<'_> {
        i64::try_from(*self)
            .map(Value::Int)
            .or_else(|_| u64::try_from(*self).map(Value::UInt))
            .unwrap_or(Value::Unsupported)
    }
}

impl Attribute for u128 {
    fn classify(&self) -> Value<'_> {
        u64::try_from(*self)
            .map(Value::UInt)
            .unwrap_or(Value::Unsupported)
    }
}

impl Attribute for bool {
    fn classify(&self) -> Value<'_> {
        Value::Bool(*self)
    }
}

impl Attribute for f32 {
    fn classify(&self) -> Value<'_> {
        Value::Float(f64::from(*self))
    }
}

impl Attribute for f64 {
    fn classify(&self) -> Value<'_> {
        Value::Float(*self)
    }
}

impl Attribute for str {
    fn classify(&self) -> Value<'_> {
        Value::Text(self)
    }
}

impl Attribute for String {
    fn classify(&self) -> Value<'_> {
        Value::Text(self)
    }
}

impl Attribute for Cow<'_, str> {
    fn classify(&self) -> Value<'_> {
        Value::Text(self)
    }
}

impl Attribute for NaiveDate {
    fn classify(&self) -> Value<'_> {
        Value::Date(*self)
    }
}

impl Attribute for NaiveTime {
    fn classify(&self) -> Value<'_> {
        Value::Time(*self)
    }
}

impl Attribute for NaiveDateTime {
    fn classify(&self) -> Value<'_> {
        Value::DateTime(*self, None)
    }
}

impl<Tz: TimeZone> Attribute for DateTime<Tz> {
    fn classify(&self) -> Value<'_> {
        Value::DateTime(self.naive_local(), Some(self.offset().fix()))
    }

    fn type_name(&self) -> &'static str {
        "datetime"
    }
}

impl Attribute for Decimal {
    fn classify(&self) -> Value<'_> {
        Value::Decimal(Cow::Borrowed(self))
    }
}

impl Attribute for rust_decimal::Decimal {
    fn classify(&self) -> Value<'_> {
        Value::Decimal(Cow::Owned(Decimal::from(*self)))
    }
}

impl Attribute for Uuid {
    fn classify(&self) -> Value<'_> {
        Value::Uuid(*self)
    }
}

/// `None` is the null sentinel.
impl<T: Attribute> Attribute for Option<T> {
    fn classify(&self) -> Value<'_> {
        match self {
            Some(inner) => inner.classify(),
            None => Value::Null,
        }
    }

    fn type_name(&self) -> &'static str {
        match self {
            Some(inner) => inner.type_name(),
            None => "null",
        }
    }
}

impl<T: Attribute + ?Sized> Attribute for &T {
    fn classify(&self) -> Value<'_> {
        (**self).classify()
    }

    fn type_name(&self) -> &'static str {
        (**self).type_name()
    }
}

impl<T: Attribute + ?Sized> Attribute for Box<T> {
    fn classify(&self) -> Value<'_> {
        (**self).classify()
    }

    fn type_name(&self) -> &'static str {
        (**self).type_name()
    }
}

/// Records decoded from JSON carry `serde_json::Value` attributes. Scalars
/// pass through; arrays and objects are outside the flat-field contract.
impl Attribute for serde_json::Value {
    fn classify(&self) -> Value<'_> {
        match self {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Bool(*b),
            serde_json::Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Value::Int(i)
                } else if let Some(u) = n.as_u64() {
                    Value::UInt(u)
                } else {
                    n.as_f64().map(Value::Float).unwrap_or(Value::Unsupported)
                }
            }
            serde_json::Value::String(s) => Value::Text(s),
            serde_json::Value::Array(_) | serde_json::Value::Object(_) => Value::Unsupported,
        }
    }

    fn type_name(&self) -> &'static str {
        match self {
            serde_json::Value::Null => "null",
            serde_json::Value::Bool(_) => "bool",
            serde_json::Value::Number(_) => "number",
            serde_json::Value::String(_) => "string",
            serde_json::Value::Array(_) => "array",
            serde_json::Value::Object(_) => "object",
        }
    }
}

/// Raw bytes have no textual rule.
impl Attribute for Vec<u8> {
    fn classify(&self) -> Value<'_> {
        Value::Unsupported
    }

    fn type_name(&self) -> &'static str {
        "bytes"
    }
}

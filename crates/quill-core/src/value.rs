
use serde::{Serialize, Serializer, ser::SerializeMap, ser::SerializeSeq};
use std::fmt;
use time::Date;

///
/// Value
/// literal supplied to a predicate
///
/// Bool, Date, Float, Int, Text and Uint are the comparable primitives.
/// Null, List and Map exist so dynamic input can be represented and
/// rejected with a proper error instead of being unrepresentable.
///

#[derive(Clone, Debug, PartialEq)]
#[remain::sorted]
pub enum Value {
    Bool(bool),
    Date(Date),
    Float(f64),
    Int(i64),
    List(Vec<Self>),

    /// Key/value pairs in insertion order.
    Map(Vec<(String, Self)>),
    Null,
    Text(String),

    /// Integers above `i64::MAX`, kept exact.
    Uint(u64),
}

impl Value {
    /// Non-null primitive that a comparison can use.
    #[must_use]
    pub const fn is_comparable(&self) -> bool {
        matches!(
            self,
            Self::Bool(_)
                | Self::Date(_)
                | Self::Float(_)
                | Self::Int(_)
                | Self::Text(_)
                | Self::Uint(_)
        )
    }

    /// Loose truthiness: false, zero, NaN, empty text and null are falsy.
    #[must_use]
    pub fn is_truthy(&self) -> bool {
        match self {
            Self::Bool(b) => *b,
            Self::Float(f) => *f != 0.0 && !f.is_nan(),
            Self::Int(i) => *i != 0,
            Self::Text(s) => !s.is_empty(),
            Self::Null => false,
            Self::Uint(u) => *u != 0,
            Self::Date(_) | Self::List(_) | Self::Map(_) => true,
        }
    }

    /// Short type name used in error messages.
    #[must_use]
    pub const fn type_name(&self) -> &'static str {
        match self {
            Self::Bool(_) => "boolean",
            Self::Date(_) => "date",
            Self::Float(_) => "number",
            Self::Int(_) => "integer",
            Self::List(_) => "array",
            Self::Map(_) => "object",
            Self::Null => "null",
            Self::Text(_) => "string",
            Self::Uint(_) => "integer",
        }
    }

    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_list(&self) -> Option<&[Self]> {
        match self {
            Self::List(items) => Some(items),
            _ => None,
        }
    }

    /// Build a `Value::List` from owned items.
    pub fn from_list<T>(items: Vec<T>) -> Self
    where
        T: Into<Self>,
    {
        Self::List(items.into_iter().map(Into::into).collect())
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool(b) => write!(f, "{b}"),
            Self::Date(d) => write!(f, "{d}"),
            Self::Float(n) => write!(f, "{n}"),
            Self::Int(n) => write!(f, "{n}"),
            Self::List(items) => {
                write!(f, "[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{item}")?;
                }
                write!(f, "]")
            }
            Self::Map(entries) => {
                write!(f, "{{")?;
                for (i, (key, value)) in entries.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{key}: {value}")?;
                }
                write!(f, "}}")
            }
            Self::Null => write!(f, "null"),
            Self::Text(s) => write!(f, "{s}"),
            Self::Uint(n) => write!(f, "{n}"),
        }
    }
}

// Plain JSON shape; dates become ISO `YYYY-MM-DD` strings.
impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Bool(b) => serializer.serialize_bool(*b),
            Self::Date(d) => serializer.collect_str(d),
            Self::Float(n) => serializer.serialize_f64(*n),
            Self::Int(n) => serializer.serialize_i64(*n),
            Self::List(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
            Self::Map(entries) => {
                let mut map = serializer.serialize_map(Some(entries.len()))?;
                for (key, value) in entries {
                    map.serialize_entry(key, value)?;
                }
                map.end()
            }
            Self::Null => serializer.serialize_none(),
            Self::Text(s) => serializer.serialize_str(s),
            Self::Uint(n) => serializer.serialize_u64(*n),
        }
    }
}

//
// Conversions
//

macro_rules! impl_from_int {
    ($($ty:ty),* $(,)?) => {
        $(
            impl From<$ty> for Value {
                fn from(n: $ty) -> Self {
                    Self::Int(i64::from(n))
                }
            }
        )*
    };
}

impl_from_int!(i8, i16, i32, i64, u8, u16, u32);

impl From<u64> for Value {
    fn from(n: u64) -> Self {
        i64::try_from(n).map_or(Self::Uint(n), Self::Int)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl From<f32> for Value {
    fn from(n: f32) -> Self {
        Self::Float(f64::from(n))
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Self::Float(n)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<Date> for Value {
    fn from(d: Date) -> Self {
        Self::Date(d)
    }
}

impl<T: Into<Self>> From<Vec<T>> for Value {
    fn from(items: Vec<T>) -> Self {
        Self::from_list(items)
    }
}

impl<T: Into<Self>> From<Option<T>> for Value {
    fn from(opt: Option<T>) -> Self {
        opt.map_or(Self::Null, Into::into)
    }
}

impl From<serde_json::Value> for Value {
    fn from(json: serde_json::Value) -> Self {
        match json {
            serde_json::Value::Null => Self::Null,
            serde_json::Value::Bool(b) => Self::Bool(b),
            serde_json::Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Self::Int(i)
                } else if let Some(u) = n.as_u64() {
                    Self::Uint(u)
                } else {
                    Self::Float(n.as_f64().unwrap_or(f64::NAN))
                }
            }
            serde_json::Value::String(s) => Self::Text(s),
            serde_json::Value::Array(items) => Self::from_list(items),
            serde_json::Value::Object(map) => {
                Self::Map(map.into_iter().map(|(k, v)| (k, v.into())).collect())
            }
        }
    }
}

use crate::{
    error::{PathError, SchemaError},
    resolve, validate,
};
use derive_more::Display;
use serde::{Deserialize, Serialize};

///
/// PropType
///
/// Declared type of a schema node. Unknown type names are kept verbatim
/// in `Other` so foreign primitives survive a load/serialize round trip.
///

#[derive(Clone, Debug, Deserialize, Display, Eq, Hash, PartialEq, Serialize)]
#[serde(from = "String", into = "String")]
#[remain::sorted]
pub enum PropType {
    #[display("array")]
    Array,
    #[display("boolean")]
    Boolean,
    #[display("date")]
    Date,
    #[display("integer")]
    Integer,
    #[display("number")]
    Number,
    #[display("object")]
    Object,
    #[display("{_0}")]
    Other(String),
    #[display("string")]
    String,
}

impl PropType {
    /// Types that can be compared and ordered directly.
    #[must_use]
    pub const fn is_primitive(&self) -> bool {
        matches!(
            self,
            Self::String | Self::Number | Self::Integer | Self::Boolean
        )
    }

    /// Types a path may descend through.
    #[must_use]
    pub const fn is_container(&self) -> bool {
        matches!(self, Self::Object | Self::Array)
    }
}

impl From<String> for PropType {
    fn from(s: String) -> Self {
        match s.as_str() {
            "array" => Self::Array,
            "boolean" => Self::Boolean,
            "date" => Self::Date,
            "integer" => Self::Integer,
            "number" => Self::Number,
            "object" => Self::Object,
            "string" => Self::String,
            _ => Self::Other(s),
        }
    }
}

impl From<&str> for PropType {
    fn from(s: &str) -> Self {
        Self::from(s.to_string())
    }
}

impl From<PropType> for String {
    fn from(ty: PropType) -> Self {
        match ty {
            PropType::Other(name) => name,
            other => other.to_string(),
        }
    }
}

///
/// Prop
///
/// One node of the schema tree. Objects carry `props`, arrays carry `item`;
/// array items are usually anonymous and have no `key`.
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct Prop {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,

    #[serde(rename = "type")]
    pub ty: PropType,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub props: Option<Vec<Self>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub item: Option<Box<Self>>,
}

impl Prop {
    /// Keyed primitive (or any leaf) node.
    #[must_use]
    pub fn new(key: impl Into<String>, ty: impl Into<PropType>) -> Self {
        Self {
            key: Some(key.into()),
            ty: ty.into(),
            props: None,
            item: None,
        }
    }

    /// Keyed object node.
    #[must_use]
    pub fn object(key: impl Into<String>, props: Vec<Self>) -> Self {
        Self {
            key: Some(key.into()),
            ty: PropType::Object,
            props: Some(props),
            item: None,
        }
    }

    /// Keyed array node.
    #[must_use]
    pub fn array(key: impl Into<String>, item: Self) -> Self {
        Self {
            key: Some(key.into()),
            ty: PropType::Array,
            props: None,
            item: Some(Box::new(item)),
        }
    }

    /// Anonymous node, for use as an array `item`.
    #[must_use]
    pub fn anonymous(ty: impl Into<PropType>) -> Self {
        Self {
            key: None,
            ty: ty.into(),
            props: None,
            item: None,
        }
    }

    /// Anonymous object node, for use as an array `item`.
    #[must_use]
    pub const fn anonymous_object(props: Vec<Self>) -> Self {
        Self {
            key: None,
            ty: PropType::Object,
            props: Some(props),
            item: None,
        }
    }

    #[must_use]
    pub fn key(&self) -> Option<&str> {
        self.key.as_deref()
    }

    /// Child lookup by exact key; the first match wins.
    #[must_use]
    pub fn child(&self, key: &str) -> Option<&Self> {
        self.props
            .as_deref()
            .and_then(|props| props.iter().find(|p| p.key() == Some(key)))
    }

    /// Type of the array element, if this is an array with an item.
    #[must_use]
    pub fn item_type(&self) -> Option<&PropType> {
        match (&self.ty, &self.item) {
            (PropType::Array, Some(item)) => Some(&item.ty),
            _ => None,
        }
    }

    #[must_use]
    pub const fn is_array(&self) -> bool {
        matches!(self.ty, PropType::Array)
    }
}

///
/// Schema
///
/// Root of a schema tree. The root behaves as an object whose children are
/// `props`; `handle` names the schema in every error message.
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct Schema {
    pub handle: String,

    #[serde(default)]
    pub props: Vec<Prop>,
}

impl Schema {
    #[must_use]
    pub fn new(handle: impl Into<String>, props: Vec<Prop>) -> Self {
        Self {
            handle: handle.into(),
            props,
        }
    }

    /// Resolve a dotted path to the property it names.
    pub fn resolve(&self, path: &str) -> Result<&Prop, PathError> {
        resolve::resolve(self, path)
    }

    /// Run the structural checks over the whole tree.
    pub fn validate(&self) -> Result<(), SchemaError> {
        validate::validate_schema(self)
    }
}

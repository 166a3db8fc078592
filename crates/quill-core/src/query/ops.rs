use derive_more::Display;
use serde::Serialize;
use std::str::FromStr;

///
/// Operator
/// canonical comparison operators
///

#[derive(Clone, Copy, Debug, Display, Eq, Hash, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Operator {
    #[display("eq")]
    Eq,
    #[display("ne")]
    Ne,
    #[display("gt")]
    Gt,
    #[display("ge")]
    Ge,
    #[display("lt")]
    Lt,
    #[display("le")]
    Le,
    #[display("in")]
    In,
}

impl Operator {
    pub const ALL: [Self; 7] = [
        Self::Eq,
        Self::Ne,
        Self::Gt,
        Self::Ge,
        Self::Lt,
        Self::Le,
        Self::In,
    ];

    /// Symbolic spellings accepted in place of the canonical names.
    pub const ALIASES: [(&'static str, Self); 8] = [
        ("==", Self::Eq),
        ("=", Self::Eq),
        ("!=", Self::Ne),
        ("<>", Self::Ne),
        (">", Self::Gt),
        (">=", Self::Ge),
        ("<", Self::Lt),
        ("<=", Self::Le),
    ];

    /// Canonical name or alias, exact match only.
    #[must_use]
    pub fn lookup(s: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|op| op.as_str() == s)
            .or_else(|| {
                Self::ALIASES
                    .into_iter()
                    .find_map(|(alias, op)| (alias == s).then_some(op))
            })
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Eq => "eq",
            Self::Ne => "ne",
            Self::Gt => "gt",
            Self::Ge => "ge",
            Self::Lt => "lt",
            Self::Le => "le",
            Self::In => "in",
        }
    }

    /// Every accepted spelling, canonical names first, for error messages.
    #[must_use]
    pub fn expected_list() -> String {
        Self::ALL
            .iter()
            .map(|op| op.as_str())
            .chain(Self::ALIASES.iter().map(|(alias, _)| *alias))
            .collect::<Vec<_>>()
            .join(", ")
    }
}

///
/// ParsedOperator
///
/// Operator text after stripping an optional `not ` prefix.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct ParsedOperator {
    pub operator: Operator,
    pub negated: bool,
}

impl ParsedOperator {
    pub const NOT_PREFIX: &'static str = "not ";

    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.strip_prefix(Self::NOT_PREFIX) {
            Some(rest) => Operator::lookup(rest).map(|operator| Self {
                operator,
                negated: true,
            }),
            None => Operator::lookup(raw).map(|operator| Self {
                operator,
                negated: false,
            }),
        }
    }
}

///
/// BoolOp
/// how a node combines with the node before it
///

#[derive(Clone, Copy, Debug, Default, Display, Eq, Hash, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BoolOp {
    #[default]
    #[display("and")]
    And,
    #[display("or")]
    Or,
}

///
/// Direction
///

#[derive(Clone, Copy, Debug, Default, Display, Eq, Hash, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    #[default]
    #[display("asc")]
    Asc,
    #[display("desc")]
    Desc,
}

///
/// DirectionParseError
///

#[derive(Clone, Debug, Eq, PartialEq, thiserror::Error)]
#[error("invalid orderBy direction '{0}', expect one of 'asc', 'desc'")]
pub struct DirectionParseError(pub String);

impl FromStr for Direction {
    type Err = DirectionParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "asc" => Ok(Self::Asc),
            "desc" => Ok(Self::Desc),
            other => Err(DirectionParseError(other.to_string())),
        }
    }
}

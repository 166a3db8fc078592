use crate::{
    query::{BoolOp, Operator},
    value::Value,
};
use quill_schema::Prop;
use serde::Serialize;

///
/// PredicateNode
///
/// One entry of a `where` list. Node order is evaluation order and must be
/// preserved by consumers; each node's `bool` says how it joins the result
/// of the nodes before it.
///

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum PredicateNode<'s> {
    Part(PredicatePart<'s>),
    Group(PredicateGroup<'s>),
}

impl<'s> PredicateNode<'s> {
    #[must_use]
    pub const fn bool_op(&self) -> BoolOp {
        match self {
            Self::Part(part) => part.bool_op,
            Self::Group(group) => group.bool_op,
        }
    }

    #[must_use]
    pub const fn is_negated(&self) -> bool {
        match self {
            Self::Part(part) => part.negated,
            Self::Group(group) => group.negated,
        }
    }

    #[must_use]
    pub const fn as_part(&self) -> Option<&PredicatePart<'s>> {
        match self {
            Self::Part(part) => Some(part),
            Self::Group(_) => None,
        }
    }

    #[must_use]
    pub const fn as_group(&self) -> Option<&PredicateGroup<'s>> {
        match self {
            Self::Group(group) => Some(group),
            Self::Part(_) => None,
        }
    }
}

///
/// PredicatePart
/// a single validated comparison
///

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct PredicatePart<'s> {
    pub path: String,
    pub prop: &'s Prop,
    pub operator: Operator,
    pub value: Value,

    #[serde(rename = "bool")]
    pub bool_op: BoolOp,

    #[serde(rename = "not")]
    pub negated: bool,
}

///
/// PredicateGroup
/// parenthesised sub-list of nodes
///

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct PredicateGroup<'s> {
    pub parts: Vec<PredicateNode<'s>>,

    #[serde(rename = "bool")]
    pub bool_op: BoolOp,

    #[serde(rename = "not")]
    pub negated: bool,
}

use crate::query::{Direction, PredicateNode};
use quill_schema::Prop;
use serde::Serialize;

///
/// OrderStatement
///

#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct OrderStatement<'s> {
    pub path: String,
    pub prop: &'s Prop,
    pub direction: Direction,
}

///
/// PluckField
///

#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct PluckField<'s> {
    pub path: String,
    pub prop: &'s Prop,
}

///
/// PopulateStatement
/// `schema` is the handle of the related schema to load
///

#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct PopulateStatement<'s> {
    pub path: String,
    pub prop: &'s Prop,
    pub schema: String,
}

///
/// QueryDescriptor
///
/// Compiled, immutable description of a query. Handed to an external
/// executor as is or through `to_json`.
///

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryDescriptor<'s> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub skip: Option<u64>,

    #[serde(rename = "where")]
    pub predicates: Vec<PredicateNode<'s>>,

    pub order_by: Vec<OrderStatement<'s>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub pluck: Option<Vec<PluckField<'s>>>,

    pub populate: Vec<PopulateStatement<'s>>,
}

impl QueryDescriptor<'_> {
    pub fn to_json(&self) -> Result<serde_json::Value, serde_json::Error> {
        serde_json::to_value(self)
    }
}

// One entry per path: the position of the first occurrence, the value of
// the last.
pub(crate) fn dedup_by_path<T: Clone>(items: &[T], path: impl Fn(&T) -> &str) -> Vec<T> {
    let mut out: Vec<T> = Vec::with_capacity(items.len());

    for item in items {
        match out.iter_mut().find(|seen| path(seen) == path(item)) {
            Some(seen) => seen.clone_from(item),
            None => out.push(item.clone()),
        }
    }

    out
}

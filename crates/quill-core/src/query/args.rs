use crate::value::Value;

///
/// WhereArgs
///
/// The call shapes `where` accepts, decided once at the boundary.
/// Group callbacks take their own entry points since a closure can not be
/// carried through a `From` conversion.
///

#[derive(Clone, Debug, PartialEq)]
pub enum WhereArgs {
    /// `{ k1: v1, k2: v2 }`: an `eq` comparison per key, wrapped in a group.
    Hash(Vec<(String, Value)>),

    /// `(path, value)` when `operator` is `None`, else `(path, operator, value)`.
    Compare {
        path: String,
        operator: Option<String>,
        value: Value,
    },

    /// Dynamic input that matched no call shape; rejected when applied.
    Malformed(String),
}

impl WhereArgs {
    /// Hash shorthand; comparisons are emitted in iteration order.
    pub fn hash<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Value>,
    {
        Self::Hash(
            pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }

    /// Dispatch positional dynamic arguments by count and kind.
    #[must_use]
    pub fn from_values(mut args: Vec<Value>) -> Self {
        match args.len() {
            0 => Self::Malformed("no where arguments".to_string()),
            1 => match args.remove(0) {
                Value::Map(pairs) => Self::Hash(pairs),
                other => Self::Malformed(format!(
                    "single where argument must be an object, got {}",
                    other.type_name()
                )),
            },
            2 => {
                let value = args.remove(1);
                match args.remove(0) {
                    Value::Text(path) => Self::Compare {
                        path,
                        operator: None,
                        value,
                    },
                    other => Self::Malformed(path_kind_message(&other)),
                }
            }
            3 => {
                let value = args.remove(2);
                let operator = args.remove(1);
                let path = args.remove(0);

                match (path, operator) {
                    (Value::Text(path), Value::Text(operator)) => Self::Compare {
                        path,
                        operator: Some(operator),
                        value,
                    },
                    (Value::Text(_), other) => Self::Malformed(format!(
                        "where operator must be a string, got {}",
                        other.type_name()
                    )),
                    (other, _) => Self::Malformed(path_kind_message(&other)),
                }
            }
            n => Self::Malformed(format!(
                "invalid where arguments, expect (path, [operator], value), got {n} arguments"
            )),
        }
    }
}

fn path_kind_message(value: &Value) -> String {
    format!("where path must be a string, got {}", value.type_name())
}

impl<P, V> From<(P, V)> for WhereArgs
where
    P: Into<String>,
    V: Into<Value>,
{
    fn from((path, value): (P, V)) -> Self {
        Self::Compare {
            path: path.into(),
            operator: None,
            value: value.into(),
        }
    }
}

impl<P, O, V> From<(P, O, V)> for WhereArgs
where
    P: Into<String>,
    O: Into<String>,
    V: Into<Value>,
{
    fn from((path, operator, value): (P, O, V)) -> Self {
        Self::Compare {
            path: path.into(),
            operator: Some(operator.into()),
            value: value.into(),
        }
    }
}

impl<K, V, const N: usize> From<[(K, V); N]> for WhereArgs
where
    K: Into<String>,
    V: Into<Value>,
{
    fn from(pairs: [(K, V); N]) -> Self {
        Self::hash(pairs)
    }
}

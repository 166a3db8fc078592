
use crate::{
    config::QueryConfig,
    error::{Call, QueryError},
    obs::{self, QueryEvent},
    query::{
        BoolOp, Operator, ParsedOperator, PredicateGroup, PredicateNode, PredicatePart, WhereArgs,
        is_comparable, resolve_path,
    },
    value::Value,
};
use quill_schema::{Prop, Schema};

///
/// Flags
///
/// Pending modifiers for the next node-producing call. Read and reset in
/// one step, so they never outlive the call that consumes them.
///

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
struct Flags {
    bool_op: BoolOp,
    negated: bool,
}

///
/// PredicateBuilder
///
/// Accumulates validated predicate nodes for one schema. Every call either
/// appends exactly one node or fails and leaves the builder untouched.
///

#[derive(Clone, Debug)]
pub struct PredicateBuilder<'s> {
    schema: &'s Schema,
    config: QueryConfig,
    bool_flag: BoolOp,
    not_flag: bool,
    parts: Vec<PredicateNode<'s>>,
}

impl<'s> PredicateBuilder<'s> {
    #[must_use]
    pub fn new(schema: &'s Schema) -> Self {
        Self::with_config(schema, QueryConfig::default())
    }

    #[must_use]
    pub fn with_config(schema: &'s Schema, config: QueryConfig) -> Self {
        Self {
            schema,
            config,
            bool_flag: BoolOp::And,
            not_flag: false,
            parts: Vec::new(),
        }
    }

    #[must_use]
    pub const fn schema(&self) -> &'s Schema {
        self.schema
    }

    #[must_use]
    pub const fn config(&self) -> &QueryConfig {
        &self.config
    }

    /// Nodes accumulated so far.
    #[must_use]
    pub fn parts(&self) -> &[PredicateNode<'s>] {
        &self.parts
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.parts.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.parts.is_empty()
    }

    ///
    /// WHERE
    ///

    pub fn and_where(&mut self, args: impl Into<WhereArgs>) -> Result<&mut Self, QueryError> {
        let flags = self.take_flags();
        let node = self
            .build_where(args.into(), flags)
            .inspect_err(|err| self.rejected(err))?;

        Ok(self.push(node))
    }

    pub fn or_where(&mut self, args: impl Into<WhereArgs>) -> Result<&mut Self, QueryError> {
        self.bool_flag = BoolOp::Or;
        self.and_where(args)
    }

    pub fn where_not(&mut self, args: impl Into<WhereArgs>) -> Result<&mut Self, QueryError> {
        self.not_flag = true;
        self.and_where(args)
    }

    ///
    /// GROUPS
    ///

    /// Run `f` against a fresh builder for the same schema and append its
    /// nodes as one group. An error from `f` propagates and appends nothing.
    pub fn and_where_group<F>(&mut self, f: F) -> Result<&mut Self, QueryError>
    where
        F: FnOnce(&mut Self) -> Result<(), QueryError>,
    {
        let flags = self.take_flags();

        let mut nested = self.nested();
        f(&mut nested).inspect_err(|err| self.rejected(err))?;

        Ok(self.push(group(nested.parts, flags)))
    }

    pub fn or_where_group<F>(&mut self, f: F) -> Result<&mut Self, QueryError>
    where
        F: FnOnce(&mut Self) -> Result<(), QueryError>,
    {
        self.bool_flag = BoolOp::Or;
        self.and_where_group(f)
    }

    pub fn where_not_group<F>(&mut self, f: F) -> Result<&mut Self, QueryError>
    where
        F: FnOnce(&mut Self) -> Result<(), QueryError>,
    {
        self.not_flag = true;
        self.and_where_group(f)
    }

    /// The accumulated nodes. Repeatable; nothing is cleared.
    #[must_use]
    pub fn compile(&self) -> Vec<PredicateNode<'s>> {
        self.parts.clone()
    }

    ///
    /// INTERNAL
    ///

    fn take_flags(&mut self) -> Flags {
        Flags {
            bool_op: std::mem::take(&mut self.bool_flag),
            negated: std::mem::take(&mut self.not_flag),
        }
    }

    fn nested(&self) -> Self {
        Self::with_config(self.schema, self.config)
    }

    fn push(&mut self, node: PredicateNode<'s>) -> &mut Self {
        obs::record(&match &node {
            PredicateNode::Part(part) => QueryEvent::PredicateAdded {
                handle: &self.schema.handle,
                path: &part.path,
                operator: part.operator,
                bool_op: part.bool_op,
                negated: part.negated,
            },
            PredicateNode::Group(group) => QueryEvent::GroupAdded {
                handle: &self.schema.handle,
                parts: group.parts.len(),
                bool_op: group.bool_op,
                negated: group.negated,
            },
        });

        self.parts.push(node);
        self
    }

    fn rejected(&self, err: &QueryError) {
        obs::record(&QueryEvent::Rejected {
            handle: &self.schema.handle,
            call: Call::Where,
            kind: err.kind(),
        });
    }

    fn build_where(&self, args: WhereArgs, flags: Flags) -> Result<PredicateNode<'s>, QueryError> {
        match args {
            WhereArgs::Hash(pairs) => {
                let parts = pairs
                    .into_iter()
                    .map(|(path, value)| self.build_compare(path, None, value, Flags::default()))
                    .collect::<Result<Vec<_>, _>>()?;

                Ok(group(parts, flags))
            }
            WhereArgs::Compare {
                path,
                operator,
                value,
            } => self.build_compare(path, operator.as_deref(), value, flags),
            WhereArgs::Malformed(reason) => Err(QueryError::argument(
                Call::Where,
                &self.schema.handle,
                reason,
            )),
        }
    }

    // Validate one comparison and build its leaf node.
    fn build_compare(
        &self,
        path: String,
        raw_operator: Option<&str>,
        value: Value,
        flags: Flags,
    ) -> Result<PredicateNode<'s>, QueryError> {
        // the `not ` prefix is only recognised in the explicit-operator form
        let parsed = match raw_operator {
            None => ParsedOperator {
                operator: Operator::Eq,
                negated: false,
            },
            Some(raw) => {
                ParsedOperator::parse(raw).ok_or_else(|| QueryError::InvalidOperator {
                    handle: self.schema.handle.clone(),
                    operator: raw.to_string(),
                })?
            }
        };

        let prop = resolve_path(self.schema, &self.config, &path)?;

        if parsed.operator == Operator::In {
            self.check_in_value(&path, &value)?;
        } else {
            self.check_comparable_prop(&path, prop, parsed.operator)?;
            self.check_comparable_value(&path, &value)?;
        }

        Ok(PredicateNode::Part(PredicatePart {
            path,
            prop,
            operator: parsed.operator,
            value,
            bool_op: flags.bool_op,
            negated: flags.negated || parsed.negated,
        }))
    }

    fn check_in_value(&self, path: &str, value: &Value) -> Result<(), QueryError> {
        let Some(items) = value.as_list() else {
            return Err(QueryError::value(
                Call::Where,
                &self.schema.handle,
                format!("value must be an array for operator 'in' at '{path}'"),
            ));
        };

        if let Some(bad) = items.iter().find(|v| !is_comparable(v, &self.config)) {
            return Err(QueryError::value(
                Call::Where,
                &self.schema.handle,
                format!("invalid value for operator 'in' at '{path}': '{bad}'"),
            ));
        }

        Ok(())
    }

    fn check_comparable_prop(
        &self,
        path: &str,
        prop: &Prop,
        operator: Operator,
    ) -> Result<(), QueryError> {
        let handle = &self.schema.handle;

        if prop.is_array() {
            if operator != Operator::Eq {
                return Err(QueryError::OperatorNotSupported {
                    handle: handle.clone(),
                    path: path.to_string(),
                    operator,
                });
            }

            match prop.item_type() {
                Some(item) if item.is_primitive() => Ok(()),
                item => Err(QueryError::type_mismatch(
                    Call::Where,
                    handle,
                    path,
                    format!(
                        "can not compare equality for '{path}', type 'array of {}'",
                        item.map_or_else(|| "unknown".to_string(), ToString::to_string)
                    ),
                )),
            }
        } else if prop.ty.is_primitive() {
            Ok(())
        } else {
            Err(QueryError::type_mismatch(
                Call::Where,
                handle,
                path,
                format!("can not compare '{path}' of type '{}'", prop.ty),
            ))
        }
    }

    fn check_comparable_value(&self, path: &str, value: &Value) -> Result<(), QueryError> {
        if is_comparable(value, &self.config) {
            Ok(())
        } else {
            Err(QueryError::value(
                Call::Where,
                &self.schema.handle,
                format!("can not compare path '{path}' to '{value}'"),
            ))
        }
    }
}

const fn group(parts: Vec<PredicateNode<'_>>, flags: Flags) -> PredicateNode<'_> {
    PredicateNode::Group(PredicateGroup {
        parts,
        bool_op: flags.bool_op,
        negated: flags.negated,
    })
}


use crate::{
    config::QueryConfig,
    error::{Call, QueryError},
    obs::{self, QueryEvent},
    query::{
        Direction, OrderStatement, PluckField, PopulateStatement, PredicateBuilder,
        QueryDescriptor, WhereArgs, descriptor::dedup_by_path, resolve_path,
    },
};
use quill_schema::{Prop, PropType, Schema};

///
/// QueryBuilder
///
/// Fluent front end over a `PredicateBuilder` plus ordering, pagination,
/// field selection and population state. `compile` snapshots everything
/// into a `QueryDescriptor`; the builder stays usable afterwards.
///

#[derive(Clone, Debug)]
pub struct QueryBuilder<'s> {
    predicates: PredicateBuilder<'s>,
    order_by: Vec<OrderStatement<'s>>,
    populate: Vec<PopulateStatement<'s>>,
    pluck: Option<Vec<PluckField<'s>>>,
    limit: Option<u64>,
    skip: Option<u64>,
}

impl<'s> QueryBuilder<'s> {
    #[must_use]
    pub fn new(schema: &'s Schema) -> Self {
        Self::with_config(schema, QueryConfig::default())
    }

    #[must_use]
    pub fn with_config(schema: &'s Schema, config: QueryConfig) -> Self {
        Self {
            predicates: PredicateBuilder::with_config(schema, config),
            order_by: Vec::new(),
            populate: Vec::new(),
            pluck: None,
            limit: None,
            skip: None,
        }
    }

    #[must_use]
    pub const fn schema(&self) -> &'s Schema {
        self.predicates.schema()
    }

    #[must_use]
    pub const fn predicates(&self) -> &PredicateBuilder<'s> {
        &self.predicates
    }

    ///
    /// WHERE
    ///

    pub fn and_where(&mut self, args: impl Into<WhereArgs>) -> Result<&mut Self, QueryError> {
        self.predicates.and_where(args)?;
        Ok(self)
    }

    pub fn or_where(&mut self, args: impl Into<WhereArgs>) -> Result<&mut Self, QueryError> {
        self.predicates.or_where(args)?;
        Ok(self)
    }

    pub fn where_not(&mut self, args: impl Into<WhereArgs>) -> Result<&mut Self, QueryError> {
        self.predicates.where_not(args)?;
        Ok(self)
    }

    pub fn and_where_group<F>(&mut self, f: F) -> Result<&mut Self, QueryError>
    where
        F: FnOnce(&mut PredicateBuilder<'s>) -> Result<(), QueryError>,
    {
        self.predicates.and_where_group(f)?;
        Ok(self)
    }

    pub fn or_where_group<F>(&mut self, f: F) -> Result<&mut Self, QueryError>
    where
        F: FnOnce(&mut PredicateBuilder<'s>) -> Result<(), QueryError>,
    {
        self.predicates.or_where_group(f)?;
        Ok(self)
    }

    pub fn where_not_group<F>(&mut self, f: F) -> Result<&mut Self, QueryError>
    where
        F: FnOnce(&mut PredicateBuilder<'s>) -> Result<(), QueryError>,
    {
        self.predicates.where_not_group(f)?;
        Ok(self)
    }

    ///
    /// ORDER BY
    ///

    pub fn order_by(&mut self, path: impl Into<String>) -> Result<&mut Self, QueryError> {
        self.push_order(path.into(), Direction::Asc)
    }

    pub fn order_by_desc(&mut self, path: impl Into<String>) -> Result<&mut Self, QueryError> {
        self.push_order(path.into(), Direction::Desc)
    }

    /// Direction given as text, as it arrives from dynamic callers.
    pub fn order_by_direction(
        &mut self,
        path: impl Into<String>,
        direction: &str,
    ) -> Result<&mut Self, QueryError> {
        let direction = direction.parse::<Direction>().map_err(|err| {
            self.reject(
                Call::OrderBy,
                QueryError::argument(Call::OrderBy, self.handle(), err.to_string()),
            )
        })?;

        self.push_order(path.into(), direction)
    }

    ///
    /// PAGINATION
    ///

    /// `0` clears the limit.
    pub fn limit(&mut self, n: u64) -> Result<&mut Self, QueryError> {
        if let Some(max) = self.config().max_limit
            && n > max
        {
            return Err(self.reject(
                Call::Limit,
                QueryError::argument(
                    Call::Limit,
                    self.handle(),
                    format!("limit {n} exceeds the configured maximum of {max}"),
                ),
            ));
        }

        self.limit = (n > 0).then_some(n);
        Ok(self)
    }

    /// `0` clears the offset.
    pub const fn skip(&mut self, n: u64) -> &mut Self {
        self.skip = if n > 0 { Some(n) } else { None };
        self
    }

    ///
    /// PLUCK
    ///

    /// Select the fields to return, replacing any earlier selection.
    pub fn pluck<I, P>(&mut self, paths: I) -> Result<&mut Self, QueryError>
    where
        I: IntoIterator<Item = P>,
        P: Into<String>,
    {
        let fields = paths
            .into_iter()
            .enumerate()
            .map(|(index, path)| {
                let path = path.into();
                resolve_path(self.schema(), self.config(), &path)
                    .map(|prop| PluckField { path, prop })
                    .map_err(|source| QueryError::Pluck { index, source })
            })
            .collect::<Result<Vec<_>, _>>()
            .map_err(|err| self.reject(Call::Pluck, err))?;

        if fields.is_empty() {
            return Err(self.reject(
                Call::Pluck,
                QueryError::argument(Call::Pluck, self.handle(), "no paths given"),
            ));
        }

        self.pluck = Some(fields);
        Ok(self)
    }

    ///
    /// POPULATE
    ///

    /// Load the related `schema` records referenced by `path`.
    pub fn populate(
        &mut self,
        path: impl Into<String>,
        schema: impl Into<String>,
    ) -> Result<&mut Self, QueryError> {
        let (path, schema) = (path.into(), schema.into());

        let prop = self
            .check_populate(&path, &schema)
            .map_err(|err| self.reject(Call::Populate, err))?;

        self.populate.push(PopulateStatement { path, prop, schema });
        Ok(self)
    }

    ///
    /// COMPILE
    ///

    #[must_use]
    pub fn compile(&self) -> QueryDescriptor<'s> {
        let descriptor = QueryDescriptor {
            limit: self.limit,
            skip: self.skip,
            predicates: self.predicates.compile(),
            order_by: dedup_by_path(&self.order_by, |s| s.path.as_str()),
            pluck: self.pluck.clone(),
            populate: dedup_by_path(&self.populate, |s| s.path.as_str()),
        };

        obs::record(&QueryEvent::Compiled {
            handle: self.handle(),
            predicates: descriptor.predicates.len(),
            order_by: descriptor.order_by.len(),
            populate: descriptor.populate.len(),
            pluck: descriptor.pluck.as_ref().map(Vec::len),
            limit: descriptor.limit,
            skip: descriptor.skip,
        });

        descriptor
    }

    ///
    /// INTERNAL
    ///

    const fn config(&self) -> &QueryConfig {
        self.predicates.config()
    }

    fn handle(&self) -> &'s str {
        &self.schema().handle
    }

    fn reject(&self, call: Call, err: QueryError) -> QueryError {
        obs::record(&QueryEvent::Rejected {
            handle: self.handle(),
            call,
            kind: err.kind(),
        });

        err
    }

    fn push_order(&mut self, path: String, direction: Direction) -> Result<&mut Self, QueryError> {
        let prop = self
            .check_orderable(&path)
            .map_err(|err| self.reject(Call::OrderBy, err))?;

        self.order_by.push(OrderStatement {
            path,
            prop,
            direction,
        });
        Ok(self)
    }

    fn check_orderable(&self, path: &str) -> Result<&'s Prop, QueryError> {
        let prop = resolve_path(self.schema(), self.config(), path)?;

        if prop.ty.is_primitive() {
            Ok(prop)
        } else {
            Err(QueryError::type_mismatch(
                Call::OrderBy,
                self.handle(),
                path,
                format!("can not order by '{path}' of type '{}'", prop.ty),
            ))
        }
    }

    // a populated field holds one related id or a list of them
    fn check_populate(&self, path: &str, schema: &str) -> Result<&'s Prop, QueryError> {
        if schema.is_empty() {
            return Err(QueryError::argument(
                Call::Populate,
                self.handle(),
                format!("schema handle for '{path}' must be a non-empty string"),
            ));
        }

        let prop = resolve_path(self.schema(), self.config(), path)?;

        let holds_ids = match prop.ty {
            PropType::String => true,
            PropType::Array => prop.item_type() == Some(&PropType::String),
            _ => false,
        };

        if holds_ids {
            Ok(prop)
        } else {
            Err(QueryError::type_mismatch(
                Call::Populate,
                self.handle(),
                path,
                format!(
                    "can not populate '{path}' of type '{}', expect string or array of string",
                    prop.ty
                ),
            ))
        }
    }
}

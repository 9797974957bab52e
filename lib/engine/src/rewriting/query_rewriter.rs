use crate::rewriting::transform_where_patterns;
use crate::scope::OntologyScope;
use crate::transformer::{
    ConstructToConstructTransformer, ConstructToSelectTransformer, SelectToSelectTransformer,
};
use crate::TransformResult;
use gravsearch_model::{ConstructQuery, QueryPattern, SelectQuery, WhereClause};

/// Compiles a CONSTRUCT query into a CONSTRUCT query in the backend's dialect.
pub fn transform_construct_to_construct(
    query: &ConstructQuery,
    transformer: &mut dyn ConstructToConstructTransformer,
    inference_scope: Option<&OntologyScope>,
) -> TransformResult<ConstructQuery> {
    let where_patterns = transform_where_patterns(
        query.where_clause.patterns.clone(),
        &query.order_by,
        transformer,
        inference_scope,
    )?;
    let mut construct_clause = Vec::with_capacity(query.construct_clause.len());
    for statement in &query.construct_clause {
        construct_clause.extend(transformer.transform_statement_in_construct(statement)?);
    }
    Ok(ConstructQuery {
        construct_clause,
        where_clause: WhereClause::new(where_patterns),
        order_by: query.order_by.clone(),
        offset: query.offset,
    })
}

/// Compiles a SELECT query into a SELECT query in the backend's dialect.
pub fn transform_select_to_select(
    query: &SelectQuery,
    transformer: &mut dyn SelectToSelectTransformer,
    inference_scope: Option<&OntologyScope>,
) -> TransformResult<SelectQuery> {
    let where_patterns = transform_where_patterns(
        query.where_clause.patterns.clone(),
        &query.order_by,
        transformer,
        inference_scope,
    )?;
    Ok(SelectQuery {
        from_clause: transformer.from_clause(),
        where_clause: WhereClause::new(where_patterns),
        ..query.clone()
    })
}

/// Compiles a CONSTRUCT query into the SELECT query that pages over its solutions.
///
/// The strategy's `ORDER BY` resolution may add supporting statements; they are appended
/// after the transformed `WHERE` patterns. `GROUP BY` is derived from the resolved `ORDER BY`
/// and the `OFFSET` from the input query's page and the strategy's page size.
pub fn transform_construct_to_select(
    query: &ConstructQuery,
    transformer: &mut dyn ConstructToSelectTransformer,
    inference_scope: Option<&OntologyScope>,
) -> TransformResult<SelectQuery> {
    let mut where_patterns = transform_where_patterns(
        query.where_clause.patterns.clone(),
        &query.order_by,
        transformer,
        inference_scope,
    )?;
    let transformed_order_by = transformer.order_by(&query.order_by)?;
    where_patterns.extend(
        transformed_order_by
            .statement_patterns
            .iter()
            .cloned()
            .map(QueryPattern::Statement),
    );
    let group_by = transformer.group_by(&transformed_order_by);
    let limit = transformer.limit();
    let offset = transformer.offset(query.offset, limit);
    Ok(SelectQuery {
        variables: transformer.select_columns()?,
        use_distinct: true,
        from_clause: None,
        where_clause: WhereClause::new(where_patterns),
        group_by,
        order_by: transformed_order_by.order_by,
        limit: Some(limit),
        offset,
    })
}

//! Backend transformer strategies.
//!
//! A strategy rewrites individual patterns for the deployed triplestore while the traverser in
//! [crate::rewriting] owns the recursion. Unrecognized predicate shapes are not errors: every
//! strategy passes them through unchanged, favoring forward compatibility over strictness.

mod native_inference;
mod prequery;
mod simulated_inference;

pub use native_inference::NativeInferenceTransformer;
pub use prequery::PrequeryTransformer;
pub use simulated_inference::SimulatedInferenceTransformer;

use crate::scope::OntologyScope;
use crate::TransformResult;
use gravsearch_model::vocab::knora_base;
use gravsearch_model::{
    FilterPattern, FromClause, LuceneQueryPattern, OrderCriterion, QueryPattern, SelectColumn,
    StatementPattern, TransformedOrderBy, Variable,
};

/// The rewriting rules applied to the patterns of a `WHERE` clause.
pub trait WhereTransformer {
    /// Reorders the patterns of one block. Single-level: the traverser applies it to each
    /// nested block separately. Runs before any statement of the block is rewritten, since a
    /// reordering pass may drop or merge statements that would otherwise be expanded.
    fn optimise_query_patterns(&self, patterns: Vec<QueryPattern>) -> Vec<QueryPattern> {
        move_is_deleted_to_end(move_lucene_patterns_to_beginning(patterns))
    }

    /// Rewrites one statement into zero or more patterns.
    fn transform_statement_in_where(
        &mut self,
        statement: &StatementPattern,
        input_order_by: &[OrderCriterion],
        inference_scope: Option<&OntologyScope>,
    ) -> TransformResult<Vec<QueryPattern>>;

    /// Rewrites a `FILTER`. Pass-through unless the backend needs something else.
    fn transform_filter(&mut self, filter: &FilterPattern) -> TransformResult<Vec<QueryPattern>> {
        Ok(vec![QueryPattern::Filter(filter.clone())])
    }

    /// Rewrites a full-text search pattern. Pass-through unless the backend has a full-text
    /// index predicate.
    fn transform_lucene_query_pattern(
        &mut self,
        pattern: &LuceneQueryPattern,
    ) -> TransformResult<Vec<QueryPattern>> {
        Ok(vec![QueryPattern::LuceneQuery(pattern.clone())])
    }

    /// Called by the traverser when it enters a `UNION` branch, once per branch in branch
    /// order. Strategies without scoped state do nothing.
    fn entering_union_block(&mut self) {}

    /// Counterpart of [WhereTransformer::entering_union_block].
    fn leaving_union_block(&mut self) {}
}

/// A strategy usable for CONSTRUCT-to-CONSTRUCT compilation.
pub trait ConstructToConstructTransformer: WhereTransformer {
    /// Rewrites one statement of the `CONSTRUCT` template.
    fn transform_statement_in_construct(
        &mut self,
        statement: &StatementPattern,
    ) -> TransformResult<Vec<StatementPattern>>;
}

/// A strategy usable for SELECT-to-SELECT compilation.
pub trait SelectToSelectTransformer: WhereTransformer {
    /// The `FROM` clause to attach, if the backend restricts the default graph.
    fn from_clause(&self) -> Option<FromClause>;
}

/// A strategy usable for CONSTRUCT-to-SELECT compilation.
pub trait ConstructToSelectTransformer: WhereTransformer {
    /// The columns of the generated `SELECT` clause.
    fn select_columns(&self) -> TransformResult<Vec<SelectColumn>>;

    /// Resolves the input `ORDER BY`, possibly adding statements to the `WHERE` clause to
    /// bind the ordering variables. Produced once per query.
    fn order_by(&self, input_order_by: &[OrderCriterion]) -> TransformResult<TransformedOrderBy>;

    /// The `GROUP BY` columns, computed from the already-transformed `ORDER BY`: ordering
    /// columns must be grouped or aggregated.
    fn group_by(&self, order_by: &TransformedOrderBy) -> Vec<Variable>;

    /// The page size.
    fn limit(&self) -> u64;

    /// Turns the input query's page offset into a solution offset.
    fn offset(&self, input_offset: u64, limit: u64) -> u64;
}

/// Moves full-text patterns to the front of the block: they narrow the solution set most and
/// should run first.
pub fn move_lucene_patterns_to_beginning(patterns: Vec<QueryPattern>) -> Vec<QueryPattern> {
    let (mut lucene, rest): (Vec<_>, Vec<_>) = patterns
        .into_iter()
        .partition(|pattern| matches!(pattern, QueryPattern::LuceneQuery(_)));
    lucene.extend(rest);
    lucene
}

/// Moves statements on the is-deleted marker to the end of the block: they filter cheaply and
/// can be deferred.
pub fn move_is_deleted_to_end(patterns: Vec<QueryPattern>) -> Vec<QueryPattern> {
    let (deleted, mut rest): (Vec<_>, Vec<_>) =
        patterns.into_iter().partition(is_deleted_statement);
    rest.extend(deleted);
    rest
}

fn is_deleted_statement(pattern: &QueryPattern) -> bool {
    match pattern {
        QueryPattern::Statement(statement) => statement
            .predicate
            .as_iri()
            .is_some_and(|iri| iri.as_ref() == knora_base::IS_DELETED),
        _ => false,
    }
}

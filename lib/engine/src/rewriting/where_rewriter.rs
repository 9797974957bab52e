use crate::scope::OntologyScope;
use crate::transformer::WhereTransformer;
use crate::TransformResult;
use gravsearch_model::{OrderCriterion, QueryPattern};
use itertools::Itertools;

/// Transforms the patterns of one `WHERE` block.
///
/// The block is first reordered by the strategy's optimizer (single level; nested blocks are
/// optimized when the recursion reaches them), then every pattern is mapped to zero or more
/// output patterns. Outputs keep the block order produced by the optimizer: block order is
/// semantically significant in SPARQL.
pub fn transform_where_patterns(
    patterns: Vec<QueryPattern>,
    input_order_by: &[OrderCriterion],
    transformer: &mut dyn WhereTransformer,
    inference_scope: Option<&OntologyScope>,
) -> TransformResult<Vec<QueryPattern>> {
    transformer
        .optimise_query_patterns(patterns)
        .into_iter()
        .map(|pattern| transform_pattern(pattern, input_order_by, transformer, inference_scope))
        .flatten_ok()
        .collect()
}

fn transform_pattern(
    pattern: QueryPattern,
    input_order_by: &[OrderCriterion],
    transformer: &mut dyn WhereTransformer,
    inference_scope: Option<&OntologyScope>,
) -> TransformResult<Vec<QueryPattern>> {
    match pattern {
        QueryPattern::Statement(statement) => {
            transformer.transform_statement_in_where(&statement, input_order_by, inference_scope)
        }
        QueryPattern::Filter(filter) => transformer.transform_filter(&filter),
        QueryPattern::LuceneQuery(lucene) => transformer.transform_lucene_query_pattern(&lucene),
        QueryPattern::Optional(patterns) => Ok(vec![QueryPattern::Optional(
            transform_where_patterns(patterns, input_order_by, transformer, inference_scope)?,
        )]),
        QueryPattern::Minus(patterns) => Ok(vec![QueryPattern::Minus(transform_where_patterns(
            patterns,
            input_order_by,
            transformer,
            inference_scope,
        )?)]),
        QueryPattern::FilterNotExists(patterns) => Ok(vec![QueryPattern::FilterNotExists(
            transform_where_patterns(patterns, input_order_by, transformer, inference_scope)?,
        )]),
        QueryPattern::Union(blocks) => {
            let mut transformed_blocks = Vec::with_capacity(blocks.len());
            for block in blocks {
                transformer.entering_union_block();
                let transformed =
                    transform_where_patterns(block, input_order_by, transformer, inference_scope);
                transformer.leaving_union_block();
                transformed_blocks.push(transformed?);
            }
            Ok(vec![QueryPattern::Union(transformed_blocks)])
        }
        pattern @ (QueryPattern::Values(_) | QueryPattern::Bind(_)) => Ok(vec![pattern]),
    }
}

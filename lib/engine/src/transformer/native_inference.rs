use crate::scope::OntologyScope;
use crate::transformer::{
    ConstructToConstructTransformer, SelectToSelectTransformer, WhereTransformer,
};
use crate::TransformResult;
use gravsearch_model::vocab::{knora_base, ontotext};
use gravsearch_model::{
    FromClause, Literal, LuceneQueryPattern, OrderCriterion, QueryPattern, StatementPattern,
};

/// Strategy for a triplestore with a built-in reasoner.
///
/// Entailment is left to the backend; the only rewriting needed is mapping the backend-agnostic
/// explicit-data graph marker and the full-text pattern to the backend's own vocabulary.
#[derive(Clone, Copy, Debug, Default)]
pub struct NativeInferenceTransformer;

impl NativeInferenceTransformer {
    pub fn new() -> Self {
        Self {}
    }
}

impl WhereTransformer for NativeInferenceTransformer {
    fn transform_statement_in_where(
        &mut self,
        statement: &StatementPattern,
        _input_order_by: &[OrderCriterion],
        _inference_scope: Option<&OntologyScope>,
    ) -> TransformResult<Vec<QueryPattern>> {
        if statement
            .named_graph
            .as_ref()
            .is_some_and(|graph| graph.as_ref() == knora_base::EXPLICIT_NAMED_GRAPH)
        {
            let mut rewritten = statement.clone();
            rewritten.named_graph = Some(ontotext::EXPLICIT_GRAPH.into_owned());
            return Ok(vec![rewritten.into()]);
        }
        Ok(vec![statement.clone().into()])
    }

    fn transform_lucene_query_pattern(
        &mut self,
        pattern: &LuceneQueryPattern,
    ) -> TransformResult<Vec<QueryPattern>> {
        let mut patterns = vec![StatementPattern::new(
            pattern.subject.clone(),
            ontotext::FULL_TEXT_SEARCH_INDEX,
            Literal::new_simple_literal(&pattern.query_string),
        )
        .into()];
        if let Some(literal_statement) = &pattern.literal_statement {
            patterns.push(literal_statement.clone().into());
        }
        Ok(patterns)
    }
}

impl ConstructToConstructTransformer for NativeInferenceTransformer {
    fn transform_statement_in_construct(
        &mut self,
        statement: &StatementPattern,
    ) -> TransformResult<Vec<StatementPattern>> {
        Ok(vec![statement.clone()])
    }
}

impl SelectToSelectTransformer for NativeInferenceTransformer {
    fn from_clause(&self) -> Option<FromClause> {
        Some(FromClause {
            default_graph: ontotext::EXPLICIT_GRAPH.into_owned(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gravsearch_model::Entity;
    use oxrdf::vocab::rdf;

    #[test]
    fn explicit_graph_marker_is_rewritten_to_the_backend_graph() {
        let statement = StatementPattern::new(
            Entity::variable("s"),
            rdf::TYPE,
            Entity::variable("class"),
        )
        .in_graph(knora_base::EXPLICIT_NAMED_GRAPH.into_owned());
        let transformed = NativeInferenceTransformer::new()
            .transform_statement_in_where(&statement, &[], None)
            .unwrap();
        let expected = StatementPattern::new(
            Entity::variable("s"),
            rdf::TYPE,
            Entity::variable("class"),
        )
        .in_graph(ontotext::EXPLICIT_GRAPH.into_owned());
        assert_eq!(transformed, vec![expected.into()]);
    }

    #[test]
    fn other_statements_pass_through_unchanged() {
        let statement = StatementPattern::new(
            Entity::variable("s"),
            rdf::TYPE,
            Entity::variable("class"),
        );
        let transformed = NativeInferenceTransformer::new()
            .transform_statement_in_where(&statement, &[], None)
            .unwrap();
        assert_eq!(transformed, vec![statement.into()]);
    }
}

use crate::error::TransformError;
use crate::naming;
use crate::scope::OntologyScope;
use crate::transformer::{
    ConstructToConstructTransformer, SelectToSelectTransformer, WhereTransformer,
};
use crate::TransformResult;
use gravsearch_model::vocab::{jena_text, knora_base};
use gravsearch_model::{
    Entity, FromClause, IriRef, Literal, LuceneQueryPattern, OrderCriterion, PathOperator,
    QueryPattern, StatementPattern,
};
use oxrdf::vocab::{rdf, rdfs};

/// Strategy for a triplestore without a reasoner.
///
/// Simulates `rdfs:subClassOf` / `rdfs:subPropertyOf` entailment by expanding every statement
/// that is not scoped to the explicit-data graph into a transitive property-path join. The
/// path operator is rendered by the serializer; nothing is unrolled.
#[derive(Clone, Copy, Debug, Default)]
pub struct SimulatedInferenceTransformer;

impl SimulatedInferenceTransformer {
    pub fn new() -> Self {
        Self {}
    }
}

impl WhereTransformer for SimulatedInferenceTransformer {
    fn transform_statement_in_where(
        &mut self,
        statement: &StatementPattern,
        _input_order_by: &[OrderCriterion],
        _inference_scope: Option<&OntologyScope>,
    ) -> TransformResult<Vec<QueryPattern>> {
        // Asserted data only: no entailment to simulate, so just drop the marker.
        if statement
            .named_graph
            .as_ref()
            .is_some_and(|graph| graph.as_ref() == knora_base::EXPLICIT_NAMED_GRAPH)
        {
            let mut stripped = statement.clone();
            stripped.named_graph = None;
            return Ok(vec![stripped.into()]);
        }

        let Some(predicate) = statement.predicate.as_iri() else {
            // A variable predicate matches asserted triples directly.
            return Ok(vec![statement.clone().into()]);
        };

        if predicate.as_ref() == knora_base::STANDOFF_TAG_HAS_START_ANCESTOR {
            // The ancestor predicate denotes the closure of direct parentage; the path
            // operator over the parent predicate obtains it without variable joins.
            return Ok(vec![StatementPattern {
                subject: statement.subject.clone(),
                predicate: Entity::Iri(IriRef::with_path_operator(
                    knora_base::STANDOFF_TAG_HAS_START_PARENT.into_owned(),
                    PathOperator::ZeroOrMore,
                )),
                object: statement.object.clone(),
                named_graph: statement.named_graph.clone(),
            }
            .into()]);
        }

        if predicate.as_ref() == rdf::TYPE {
            let Some(class) = statement.object.as_iri() else {
                return Err(TransformError::MalformedQueryShape(
                    "the object of rdf:type must be an IRI".to_owned(),
                ));
            };
            let type_variable =
                naming::fresh_variable_for_type_expansion(&statement.subject, class.as_ref())?;
            Ok(vec![
                StatementPattern::new(
                    type_variable.clone(),
                    IriRef::with_path_operator(
                        rdfs::SUB_CLASS_OF.into_owned(),
                        PathOperator::ZeroOrMore,
                    ),
                    statement.object.clone(),
                )
                .into(),
                StatementPattern {
                    subject: statement.subject.clone(),
                    predicate: rdf::TYPE.into(),
                    object: type_variable.into(),
                    named_graph: statement.named_graph.clone(),
                }
                .into(),
            ])
        } else {
            let property_variable =
                naming::fresh_variable_for_property(&statement.subject, predicate.as_ref())?;
            Ok(vec![
                StatementPattern::new(
                    property_variable.clone(),
                    IriRef::with_path_operator(
                        rdfs::SUB_PROPERTY_OF.into_owned(),
                        PathOperator::ZeroOrMore,
                    ),
                    predicate.clone(),
                )
                .into(),
                StatementPattern {
                    subject: statement.subject.clone(),
                    predicate: property_variable.into(),
                    object: statement.object.clone(),
                    named_graph: statement.named_graph.clone(),
                }
                .into(),
            ])
        }
    }

    fn transform_lucene_query_pattern(
        &mut self,
        pattern: &LuceneQueryPattern,
    ) -> TransformResult<Vec<QueryPattern>> {
        let mut patterns = vec![StatementPattern::new(
            pattern.subject.clone(),
            jena_text::QUERY,
            Literal::new_simple_literal(&pattern.query_string),
        )
        .into()];
        if let Some(literal_statement) = &pattern.literal_statement {
            patterns.push(literal_statement.clone().into());
        }
        Ok(patterns)
    }
}

impl ConstructToConstructTransformer for SimulatedInferenceTransformer {
    fn transform_statement_in_construct(
        &mut self,
        statement: &StatementPattern,
    ) -> TransformResult<Vec<StatementPattern>> {
        Ok(vec![statement.clone()])
    }
}

impl SelectToSelectTransformer for SimulatedInferenceTransformer {
    fn from_clause(&self) -> Option<FromClause> {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gravsearch_model::NamedNode;

    fn transform(statement: StatementPattern) -> TransformResult<Vec<QueryPattern>> {
        SimulatedInferenceTransformer::new().transform_statement_in_where(&statement, &[], None)
    }

    fn statements(patterns: Vec<QueryPattern>) -> Vec<StatementPattern> {
        patterns
            .into_iter()
            .map(|pattern| match pattern {
                QueryPattern::Statement(statement) => statement,
                other => panic!("expected a statement, got {other:?}"),
            })
            .collect()
    }

    #[test]
    fn type_statement_expands_to_subclass_path() {
        let class = NamedNode::new_unchecked("http://example.org/ontology#Thing");
        let expanded = statements(
            transform(StatementPattern::new(
                Entity::variable("s"),
                rdf::TYPE,
                class.clone(),
            ))
            .unwrap(),
        );

        let type_variable =
            naming::fresh_variable_for_type_expansion(&Entity::variable("s"), class.as_ref())
                .unwrap();
        assert_eq!(
            expanded,
            vec![
                StatementPattern::new(
                    type_variable.clone(),
                    IriRef::with_path_operator(
                        rdfs::SUB_CLASS_OF.into_owned(),
                        PathOperator::ZeroOrMore
                    ),
                    class,
                ),
                StatementPattern::new(Entity::variable("s"), rdf::TYPE, type_variable),
            ]
        );
    }

    #[test]
    fn property_statement_expands_to_subproperty_path() {
        let property = NamedNode::new_unchecked("http://example.org/ontology#hasAuthor");
        let expanded = statements(
            transform(StatementPattern::new(
                Entity::variable("book"),
                property.clone(),
                Entity::variable("author"),
            ))
            .unwrap(),
        );

        assert_eq!(expanded.len(), 2);
        assert_eq!(
            expanded[0].predicate,
            Entity::Iri(IriRef::with_path_operator(
                rdfs::SUB_PROPERTY_OF.into_owned(),
                PathOperator::ZeroOrMore
            ))
        );
        assert_eq!(expanded[0].object, Entity::iri(property));
        assert_eq!(expanded[1].subject, Entity::variable("book"));
        assert_eq!(expanded[1].predicate, expanded[0].subject);
        assert_eq!(expanded[1].object, Entity::variable("author"));
    }

    #[test]
    fn explicit_graph_statement_passes_through_without_marker() {
        let statement = StatementPattern::new(
            Entity::variable("s"),
            rdf::TYPE,
            Entity::variable("class"),
        )
        .in_graph(knora_base::EXPLICIT_NAMED_GRAPH.into_owned());
        let transformed = statements(transform(statement).unwrap());
        assert_eq!(
            transformed,
            vec![StatementPattern::new(
                Entity::variable("s"),
                rdf::TYPE,
                Entity::variable("class"),
            )]
        );
    }

    #[test]
    fn variable_predicate_passes_through() {
        let statement = StatementPattern::new(
            Entity::variable("s"),
            Entity::variable("p"),
            Entity::variable("o"),
        );
        let transformed = transform(statement.clone()).unwrap();
        assert_eq!(transformed, vec![statement.into()]);
    }

    #[test]
    fn standoff_ancestor_uses_the_parent_path() {
        let statement = StatementPattern::new(
            Entity::variable("tag"),
            knora_base::STANDOFF_TAG_HAS_START_ANCESTOR,
            Entity::variable("ancestor"),
        );
        let transformed = statements(transform(statement).unwrap());
        assert_eq!(
            transformed,
            vec![StatementPattern::new(
                Entity::variable("tag"),
                IriRef::with_path_operator(
                    knora_base::STANDOFF_TAG_HAS_START_PARENT.into_owned(),
                    PathOperator::ZeroOrMore
                ),
                Entity::variable("ancestor"),
            )]
        );
    }

    #[test]
    fn every_iri_predicate_expands_to_exactly_two_statements() {
        let predicates = [
            "http://www.w3.org/1999/02/22-rdf-syntax-ns#type",
            "http://www.knora.org/ontology/knora-base#hasValue",
            "http://www.knora.org/ontology/0801/beol#hasAuthor",
            "http://example.org/no/fragment",
        ];
        for predicate in predicates {
            let expanded = statements(
                transform(StatementPattern::new(
                    Entity::variable("s"),
                    NamedNode::new_unchecked(predicate),
                    NamedNode::new_unchecked("http://example.org/ontology#o"),
                ))
                .unwrap(),
            );
            assert_eq!(expanded.len(), 2, "predicate {predicate}");
            let closure = if predicate.ends_with("#type") {
                rdfs::SUB_CLASS_OF
            } else {
                rdfs::SUB_PROPERTY_OF
            };
            assert_eq!(
                expanded[0].predicate,
                Entity::Iri(IriRef::with_path_operator(
                    closure.into_owned(),
                    PathOperator::ZeroOrMore
                )),
                "predicate {predicate}"
            );
        }
    }

    #[test]
    fn type_statement_with_literal_object_is_rejected() {
        let statement = StatementPattern::new(
            Entity::variable("s"),
            rdf::TYPE,
            Literal::new_simple_literal("not a class"),
        );
        let err = transform(statement).unwrap_err();
        assert!(matches!(err, TransformError::MalformedQueryShape(_)));
    }

    #[test]
    fn lucene_pattern_uses_the_text_index_predicate() {
        let transformed = SimulatedInferenceTransformer::new()
            .transform_lucene_query_pattern(&LuceneQueryPattern {
                subject: gravsearch_model::Variable::new_unchecked("thing"),
                object: gravsearch_model::Variable::new_unchecked("text"),
                query_string: "Zeitgl\u{f6}cklein".to_owned(),
                literal_statement: None,
            })
            .unwrap();
        assert_eq!(
            transformed,
            vec![StatementPattern::new(
                Entity::variable("thing"),
                jena_text::QUERY,
                Literal::new_simple_literal("Zeitgl\u{f6}cklein"),
            )
            .into()]
        );
    }
}

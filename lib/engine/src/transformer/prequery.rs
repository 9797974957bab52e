use crate::naming;
use crate::scope::OntologyScope;
use crate::transformer::{ConstructToSelectTransformer, WhereTransformer};
use crate::TransformResult;
use gravsearch_model::vocab::knora_base;
use gravsearch_model::{
    Entity, OrderCriterion, QueryPattern, SelectColumn, StatementPattern, TransformedOrderBy,
    Variable,
};
use rustc_hash::FxHashSet;

/// The separator used when concatenating the bindings of a dependent variable.
const CONCAT_SEPARATOR: char = '\u{1F}';

/// The suffix of a concatenated column's name.
const CONCAT_SUFFIX: &str = "__Concat";

/// Backend-agnostic CONSTRUCT-to-SELECT strategy: generates the prequery that pages over
/// matching main resources before the main query fetches their contents.
///
/// The prequery selects the main variable, aggregates every other variable bound in object
/// position with `GROUP_CONCAT`, and pages deterministically by always ordering on the main
/// variable last. Runs before any backend-specific transformation.
#[derive(Clone, Debug)]
pub struct PrequeryTransformer {
    main_variable: Variable,
    page_size: u64,
    /// Registration scopes for dependent variables, innermost last. A scope is pushed per
    /// UNION branch and merged into its parent when the branch is left, keeping the
    /// traversal reentrant.
    dependent_scopes: Vec<Vec<Variable>>,
    registered: FxHashSet<Variable>,
}

impl PrequeryTransformer {
    pub fn new(main_variable: Variable, page_size: u64) -> Self {
        Self {
            main_variable,
            page_size,
            dependent_scopes: vec![Vec::new()],
            registered: FxHashSet::default(),
        }
    }

    /// The dependent variables registered so far, in registration order.
    fn dependent_variables(&self) -> impl Iterator<Item = &Variable> {
        self.dependent_scopes.iter().flatten()
    }

    fn register_dependent(&mut self, variable: &Variable) {
        if *variable == self.main_variable || self.registered.contains(variable) {
            return;
        }
        self.registered.insert(variable.clone());
        if let Some(scope) = self.dependent_scopes.last_mut() {
            scope.push(variable.clone());
        }
    }
}

impl WhereTransformer for PrequeryTransformer {
    fn transform_statement_in_where(
        &mut self,
        statement: &StatementPattern,
        _input_order_by: &[OrderCriterion],
        _inference_scope: Option<&OntologyScope>,
    ) -> TransformResult<Vec<QueryPattern>> {
        if let Entity::Variable(object) = &statement.object {
            self.register_dependent(object);
        }
        Ok(vec![statement.clone().into()])
    }

    fn entering_union_block(&mut self) {
        self.dependent_scopes.push(Vec::new());
    }

    fn leaving_union_block(&mut self) {
        if let Some(scope) = self.dependent_scopes.pop() {
            if let Some(parent) = self.dependent_scopes.last_mut() {
                parent.extend(scope);
            }
        }
    }
}

impl ConstructToSelectTransformer for PrequeryTransformer {
    fn select_columns(&self) -> TransformResult<Vec<SelectColumn>> {
        let mut columns = vec![SelectColumn::Variable(self.main_variable.clone())];
        columns.extend(self.dependent_variables().map(|variable| {
            SelectColumn::GroupConcat {
                input: variable.clone(),
                separator: CONCAT_SEPARATOR,
                output_name: format!("{}{CONCAT_SUFFIX}", variable.as_str()),
            }
        }));
        Ok(columns)
    }

    fn order_by(&self, input_order_by: &[OrderCriterion]) -> TransformResult<TransformedOrderBy> {
        let mut transformed = TransformedOrderBy::default();
        for criterion in input_order_by {
            let literal_variable = naming::fresh_variable_for_property(
                &Entity::Variable(criterion.variable.clone()),
                knora_base::VALUE_HAS_STRING,
            )?;
            transformed.statement_patterns.push(StatementPattern::new(
                criterion.variable.clone(),
                knora_base::VALUE_HAS_STRING,
                literal_variable.clone(),
            ));
            transformed.order_by.push(OrderCriterion {
                variable: literal_variable,
                ascending: criterion.ascending,
            });
        }
        // Pages must be stable across requests even when the requested ordering is not total.
        transformed
            .order_by
            .push(OrderCriterion::ascending(self.main_variable.clone()));
        Ok(transformed)
    }

    fn group_by(&self, order_by: &TransformedOrderBy) -> Vec<Variable> {
        let mut group_by = vec![self.main_variable.clone()];
        for criterion in &order_by.order_by {
            if !group_by.contains(&criterion.variable) {
                group_by.push(criterion.variable.clone());
            }
        }
        group_by
    }

    fn limit(&self) -> u64 {
        self.page_size
    }

    fn offset(&self, input_offset: u64, limit: u64) -> u64 {
        input_offset * limit
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn statement(subject: &str, object: &str) -> StatementPattern {
        StatementPattern::new(
            Entity::variable(subject),
            Entity::iri(gravsearch_model::NamedNode::new_unchecked(
                "http://www.knora.org/ontology/0801/beol#hasText",
            )),
            Entity::variable(object),
        )
    }

    #[test]
    fn object_variables_become_group_concat_columns() {
        let mut transformer = PrequeryTransformer::new(Variable::new_unchecked("letter"), 25);
        transformer
            .transform_statement_in_where(&statement("letter", "text"), &[], None)
            .unwrap();
        transformer
            .transform_statement_in_where(&statement("letter", "text"), &[], None)
            .unwrap();

        let columns = transformer.select_columns().unwrap();
        assert_eq!(
            columns,
            vec![
                SelectColumn::Variable(Variable::new_unchecked("letter")),
                SelectColumn::GroupConcat {
                    input: Variable::new_unchecked("text"),
                    separator: CONCAT_SEPARATOR,
                    output_name: "text__Concat".to_owned(),
                },
            ]
        );
    }

    #[test]
    fn the_main_variable_is_never_aggregated() {
        let mut transformer = PrequeryTransformer::new(Variable::new_unchecked("letter"), 25);
        transformer
            .transform_statement_in_where(&statement("other", "letter"), &[], None)
            .unwrap();
        let columns = transformer.select_columns().unwrap();
        assert_eq!(
            columns,
            vec![SelectColumn::Variable(Variable::new_unchecked("letter"))]
        );
    }

    #[test]
    fn ordering_is_supported_by_value_string_statements() {
        let transformer = PrequeryTransformer::new(Variable::new_unchecked("letter"), 25);
        let transformed = transformer
            .order_by(&[OrderCriterion::descending(Variable::new_unchecked("date"))])
            .unwrap();

        assert_eq!(
            transformed.statement_patterns,
            vec![StatementPattern::new(
                Variable::new_unchecked("date"),
                knora_base::VALUE_HAS_STRING,
                Variable::new_unchecked("date__valueHasString"),
            )]
        );
        assert_eq!(
            transformed.order_by,
            vec![
                OrderCriterion::descending(Variable::new_unchecked("date__valueHasString")),
                OrderCriterion::ascending(Variable::new_unchecked("letter")),
            ]
        );
    }

    #[test]
    fn group_by_covers_every_ordering_column() {
        let transformer = PrequeryTransformer::new(Variable::new_unchecked("letter"), 25);
        let transformed = transformer
            .order_by(&[OrderCriterion::ascending(Variable::new_unchecked("date"))])
            .unwrap();
        assert_eq!(
            transformer.group_by(&transformed),
            vec![
                Variable::new_unchecked("letter"),
                Variable::new_unchecked("date__valueHasString"),
            ]
        );
    }

    #[test]
    fn offset_is_page_based() {
        let transformer = PrequeryTransformer::new(Variable::new_unchecked("letter"), 25);
        assert_eq!(transformer.offset(0, 25), 0);
        assert_eq!(transformer.offset(2, 25), 50);
    }

    #[test]
    fn union_scopes_keep_branch_registrations() {
        let mut transformer = PrequeryTransformer::new(Variable::new_unchecked("letter"), 25);
        transformer.entering_union_block();
        transformer
            .transform_statement_in_where(&statement("letter", "title"), &[], None)
            .unwrap();
        transformer.leaving_union_block();
        transformer.entering_union_block();
        transformer
            .transform_statement_in_where(&statement("letter", "comment"), &[], None)
            .unwrap();
        transformer.leaving_union_block();

        let names: Vec<_> = transformer
            .dependent_variables()
            .map(|variable| variable.as_str().to_owned())
            .collect();
        assert_eq!(names, vec!["title", "comment"]);
    }
}

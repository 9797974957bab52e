use crate::{Entity, Expression};
use oxrdf::{NamedNode, Variable};
use std::fmt;

/// A triple pattern in a `WHERE` or `CONSTRUCT` clause, optionally scoped to a named graph.
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub struct StatementPattern {
    pub subject: Entity,
    pub predicate: Entity,
    pub object: Entity,
    pub named_graph: Option<NamedNode>,
}

impl StatementPattern {
    pub fn new(
        subject: impl Into<Entity>,
        predicate: impl Into<Entity>,
        object: impl Into<Entity>,
    ) -> Self {
        Self {
            subject: subject.into(),
            predicate: predicate.into(),
            object: object.into(),
            named_graph: None,
        }
    }

    pub fn in_graph(mut self, graph: NamedNode) -> Self {
        self.named_graph = Some(graph);
        self
    }
}

impl fmt::Display for StatementPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.named_graph {
            Some(graph) => write!(
                f,
                "GRAPH {graph} {{ {} {} {} . }}",
                self.subject, self.predicate, self.object
            ),
            None => write!(f, "{} {} {} .", self.subject, self.predicate, self.object),
        }
    }
}

/// A `FILTER` over an expression.
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub struct FilterPattern {
    pub expression: Expression,
}

impl FilterPattern {
    pub fn new(expression: Expression) -> Self {
        Self { expression }
    }
}

/// A full-text search pattern, backend-agnostic until a transformer rewrites it to the
/// deployed triplestore's full-text predicate.
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub struct LuceneQueryPattern {
    /// The variable bound to the matching resource.
    pub subject: Variable,
    /// The variable bound to the matching value.
    pub object: Variable,
    /// The Lucene query string.
    pub query_string: String,
    /// An optional statement binding the matched literal, appended after the rewritten pattern.
    pub literal_statement: Option<StatementPattern>,
}

/// A `VALUES` block binding one variable to a fixed set of entities.
///
/// The entities are kept in insertion order so that serialization is deterministic; callers are
/// expected to provide them deduplicated.
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub struct ValuesPattern {
    pub variable: Variable,
    pub values: Vec<Entity>,
}

/// A `BIND` assigning an expression to a fresh variable.
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub struct BindPattern {
    pub variable: Variable,
    pub expression: Expression,
}

/// One pattern of a `WHERE` clause.
///
/// Every variable referenced in an expression position must be bound by a preceding or
/// enclosing statement, values or bind pattern; transformers may assume this and the traverser
/// does not enforce it.
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub enum QueryPattern {
    Statement(StatementPattern),
    Filter(FilterPattern),
    /// An n-ary `UNION` over ordered blocks of patterns.
    Union(Vec<Vec<QueryPattern>>),
    Optional(Vec<QueryPattern>),
    Minus(Vec<QueryPattern>),
    FilterNotExists(Vec<QueryPattern>),
    LuceneQuery(LuceneQueryPattern),
    Values(ValuesPattern),
    Bind(BindPattern),
}

impl From<StatementPattern> for QueryPattern {
    fn from(statement: StatementPattern) -> Self {
        QueryPattern::Statement(statement)
    }
}

fn fmt_block(f: &mut fmt::Formatter<'_>, patterns: &[QueryPattern], indent: usize) -> fmt::Result {
    for pattern in patterns {
        pattern.fmt_indented(f, indent)?;
    }
    Ok(())
}

impl QueryPattern {
    pub(crate) fn fmt_indented(&self, f: &mut fmt::Formatter<'_>, indent: usize) -> fmt::Result {
        let pad = "    ".repeat(indent);
        match self {
            QueryPattern::Statement(statement) => writeln!(f, "{pad}{statement}"),
            QueryPattern::Filter(filter) => writeln!(f, "{pad}FILTER {}", filter.expression),
            QueryPattern::Union(blocks) => {
                for (i, block) in blocks.iter().enumerate() {
                    if i > 0 {
                        writeln!(f, "{pad}UNION")?;
                    }
                    writeln!(f, "{pad}{{")?;
                    fmt_block(f, block, indent + 1)?;
                    writeln!(f, "{pad}}}")?;
                }
                Ok(())
            }
            QueryPattern::Optional(patterns) => {
                writeln!(f, "{pad}OPTIONAL {{")?;
                fmt_block(f, patterns, indent + 1)?;
                writeln!(f, "{pad}}}")
            }
            QueryPattern::Minus(patterns) => {
                writeln!(f, "{pad}MINUS {{")?;
                fmt_block(f, patterns, indent + 1)?;
                writeln!(f, "{pad}}}")
            }
            QueryPattern::FilterNotExists(patterns) => {
                writeln!(f, "{pad}FILTER NOT EXISTS {{")?;
                fmt_block(f, patterns, indent + 1)?;
                writeln!(f, "{pad}}}")
            }
            QueryPattern::LuceneQuery(lucene) => {
                // Not executable as-is; a transformer replaces this with the backend's
                // full-text predicate before serialization.
                writeln!(
                    f,
                    "{pad}# full-text: {} {} \"{}\"",
                    lucene.subject, lucene.object, lucene.query_string
                )
            }
            QueryPattern::Values(values) => {
                write!(f, "{pad}VALUES {} {{", values.variable)?;
                for value in &values.values {
                    write!(f, " {value}")?;
                }
                writeln!(f, " }}")
            }
            QueryPattern::Bind(bind) => {
                writeln!(f, "{pad}BIND({} AS {})", bind.expression, bind.variable)
            }
        }
    }
}

impl fmt::Display for QueryPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.fmt_indented(f, 0)
    }
}

/// The ordered patterns of a `WHERE` clause. Order is SPARQL block order and is semantically
/// significant.
#[derive(Clone, PartialEq, Eq, Hash, Debug, Default)]
pub struct WhereClause {
    pub patterns: Vec<QueryPattern>,
}

impl WhereClause {
    pub fn new(patterns: Vec<QueryPattern>) -> Self {
        Self { patterns }
    }
}

impl fmt::Display for WhereClause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "WHERE {{")?;
        fmt_block(f, &self.patterns, 1)?;
        write!(f, "}}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vocab::knora_base;
    use insta::assert_snapshot;
    use oxrdf::vocab::rdf;

    #[test]
    fn renders_nested_blocks() {
        let clause = WhereClause::new(vec![
            QueryPattern::Statement(StatementPattern::new(
                Entity::variable("letter"),
                Entity::from(rdf::TYPE),
                Entity::iri(NamedNode::new_unchecked(
                    "http://www.knora.org/ontology/0801/beol#letter",
                )),
            )),
            QueryPattern::Optional(vec![QueryPattern::Statement(StatementPattern::new(
                Entity::variable("letter"),
                Entity::from(knora_base::IS_DELETED),
                Entity::Literal(oxrdf::Literal::from(false)),
            ))]),
        ]);
        assert_snapshot!(clause, @r#"
        WHERE {
            ?letter <http://www.w3.org/1999/02/22-rdf-syntax-ns#type> <http://www.knora.org/ontology/0801/beol#letter> .
            OPTIONAL {
                ?letter <http://www.knora.org/ontology/knora-base#isDeleted> "false"^^<http://www.w3.org/2001/XMLSchema#boolean> .
            }
        }
        "#);
    }
}

use crate::{StatementPattern, WhereClause};
use oxrdf::{NamedNode, Variable};
use std::fmt;

/// One column of a `SELECT` clause.
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub enum SelectColumn {
    Variable(Variable),
    /// An aggregated column concatenating all bindings of `input` per group.
    GroupConcat {
        input: Variable,
        separator: char,
        output_name: String,
    },
}

impl fmt::Display for SelectColumn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SelectColumn::Variable(variable) => write!(f, "{variable}"),
            SelectColumn::GroupConcat {
                input,
                separator,
                output_name,
            } => {
                write!(f, "(GROUP_CONCAT(DISTINCT {input}; SEPARATOR=\"")?;
                if separator.is_control() {
                    write!(f, "\\u{:04X}", u32::from(*separator))?;
                } else {
                    write!(f, "{separator}")?;
                }
                write!(f, "\") AS ?{output_name})")
            }
        }
    }
}

/// One `ORDER BY` criterion.
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub struct OrderCriterion {
    pub variable: Variable,
    pub ascending: bool,
}

impl OrderCriterion {
    pub fn ascending(variable: Variable) -> Self {
        Self {
            variable,
            ascending: true,
        }
    }

    pub fn descending(variable: Variable) -> Self {
        Self {
            variable,
            ascending: false,
        }
    }
}

impl fmt::Display for OrderCriterion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.ascending {
            write!(f, "ASC({})", self.variable)
        } else {
            write!(f, "DESC({})", self.variable)
        }
    }
}

/// The result of resolving a query's `ORDER BY`: the criteria to use plus any statements that
/// must be added to the `WHERE` clause to bind the ordering variables. Produced once per query,
/// not per pattern.
#[derive(Clone, PartialEq, Eq, Debug, Default)]
pub struct TransformedOrderBy {
    pub statement_patterns: Vec<StatementPattern>,
    pub order_by: Vec<OrderCriterion>,
}

/// A `FROM` clause restricting a `SELECT` query to one default graph.
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub struct FromClause {
    pub default_graph: NamedNode,
}

/// A CONSTRUCT query: a template of statements built from the bindings of the `WHERE` clause.
///
/// `offset` counts pages, not solutions; a transformer turns it into a solution offset using
/// its page size.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct ConstructQuery {
    pub construct_clause: Vec<StatementPattern>,
    pub where_clause: WhereClause,
    pub order_by: Vec<OrderCriterion>,
    pub offset: u64,
}

impl fmt::Display for ConstructQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "CONSTRUCT {{")?;
        for statement in &self.construct_clause {
            writeln!(f, "    {statement}")?;
        }
        writeln!(f, "}}")?;
        write!(f, "{}", self.where_clause)?;
        if !self.order_by.is_empty() {
            write!(f, "\nORDER BY")?;
            for criterion in &self.order_by {
                write!(f, " {criterion}")?;
            }
        }
        if self.offset > 0 {
            write!(f, "\nOFFSET {}", self.offset)?;
        }
        Ok(())
    }
}

/// A SELECT query.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct SelectQuery {
    pub variables: Vec<SelectColumn>,
    pub use_distinct: bool,
    pub from_clause: Option<FromClause>,
    pub where_clause: WhereClause,
    pub group_by: Vec<Variable>,
    pub order_by: Vec<OrderCriterion>,
    pub limit: Option<u64>,
    pub offset: u64,
}

impl fmt::Display for SelectQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SELECT")?;
        if self.use_distinct {
            f.write_str(" DISTINCT")?;
        }
        for column in &self.variables {
            write!(f, " {column}")?;
        }
        writeln!(f)?;
        if let Some(from) = &self.from_clause {
            writeln!(f, "FROM {}", from.default_graph)?;
        }
        write!(f, "{}", self.where_clause)?;
        if !self.group_by.is_empty() {
            write!(f, "\nGROUP BY")?;
            for variable in &self.group_by {
                write!(f, " {variable}")?;
            }
        }
        if !self.order_by.is_empty() {
            write!(f, "\nORDER BY")?;
            for criterion in &self.order_by {
                write!(f, " {criterion}")?;
            }
        }
        if let Some(limit) = self.limit {
            write!(f, "\nLIMIT {limit}")?;
        }
        if self.offset > 0 {
            write!(f, "\nOFFSET {}", self.offset)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Entity, QueryPattern};
    use insta::assert_snapshot;
    use oxrdf::vocab::rdf;

    #[test]
    fn renders_select_query() {
        let query = SelectQuery {
            variables: vec![SelectColumn::Variable(Variable::new_unchecked("book"))],
            use_distinct: true,
            from_clause: Some(FromClause {
                default_graph: NamedNode::new_unchecked("http://www.ontotext.com/explicit"),
            }),
            where_clause: WhereClause::new(vec![QueryPattern::Statement(StatementPattern::new(
                Entity::variable("book"),
                Entity::from(rdf::TYPE),
                Entity::iri(NamedNode::new_unchecked(
                    "http://www.knora.org/ontology/0803/incunabula#book",
                )),
            ))]),
            group_by: vec![Variable::new_unchecked("book")],
            order_by: vec![OrderCriterion::ascending(Variable::new_unchecked("book"))],
            limit: Some(25),
            offset: 50,
        };
        assert_snapshot!(query, @r"
        SELECT DISTINCT ?book
        FROM <http://www.ontotext.com/explicit>
        WHERE {
            ?book <http://www.w3.org/1999/02/22-rdf-syntax-ns#type> <http://www.knora.org/ontology/0803/incunabula#book> .
        }
        GROUP BY ?book
        ORDER BY ASC(?book)
        LIMIT 25
        OFFSET 50
        ");
    }
}

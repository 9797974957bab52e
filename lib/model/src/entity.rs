use oxrdf::{Literal, NamedNode, NamedNodeRef, Variable};
use std::fmt;

/// A SPARQL property path modifier attached to a predicate IRI.
///
/// The modifier is rendered as a path operator by the serializer. It is never unrolled into
/// repeated statements.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum PathOperator {
    /// The `*` operator (zero or more steps).
    ZeroOrMore,
    /// The `+` operator (one or more steps).
    OneOrMore,
    /// The `?` operator (zero or one step).
    ZeroOrOne,
}

impl fmt::Display for PathOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathOperator::ZeroOrMore => f.write_str("*"),
            PathOperator::OneOrMore => f.write_str("+"),
            PathOperator::ZeroOrOne => f.write_str("?"),
        }
    }
}

/// An IRI used in a query, optionally carrying a property path modifier.
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub struct IriRef {
    pub iri: NamedNode,
    pub path_operator: Option<PathOperator>,
}

impl IriRef {
    pub fn new(iri: NamedNode) -> Self {
        Self {
            iri,
            path_operator: None,
        }
    }

    /// Attaches a path modifier to this IRI.
    pub fn with_path_operator(iri: NamedNode, operator: PathOperator) -> Self {
        Self {
            iri,
            path_operator: Some(operator),
        }
    }
}

impl From<NamedNode> for IriRef {
    fn from(iri: NamedNode) -> Self {
        Self::new(iri)
    }
}

impl From<NamedNodeRef<'_>> for IriRef {
    fn from(iri: NamedNodeRef<'_>) -> Self {
        Self::new(iri.into_owned())
    }
}

impl fmt::Display for IriRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.iri)?;
        if let Some(operator) = self.path_operator {
            write!(f, "{operator}")?;
        }
        Ok(())
    }
}

/// An entity that can appear in a statement or expression position of a query.
///
/// Entities are immutable. Transformations never mutate an entity in place; they build new ones.
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub enum Entity {
    /// An IRI, optionally with a property path modifier.
    Iri(IriRef),
    /// A query variable.
    Variable(Variable),
    /// An XSD literal with its datatype IRI.
    Literal(Literal),
}

impl Entity {
    /// Creates an IRI entity without a path modifier.
    pub fn iri(iri: impl Into<NamedNode>) -> Self {
        Entity::Iri(IriRef::new(iri.into()))
    }

    /// Creates a variable entity from a raw name.
    ///
    /// The name must be a valid SPARQL variable name; use [Variable::new] directly to handle
    /// invalid names.
    pub fn variable(name: impl Into<String>) -> Self {
        Entity::Variable(Variable::new_unchecked(name))
    }

    /// Returns the inner IRI if this entity is an IRI without regard to its path modifier.
    pub fn as_iri(&self) -> Option<&NamedNode> {
        match self {
            Entity::Iri(iri) => Some(&iri.iri),
            _ => None,
        }
    }

    pub fn as_variable(&self) -> Option<&Variable> {
        match self {
            Entity::Variable(variable) => Some(variable),
            _ => None,
        }
    }
}

impl From<IriRef> for Entity {
    fn from(iri: IriRef) -> Self {
        Entity::Iri(iri)
    }
}

impl From<NamedNode> for Entity {
    fn from(iri: NamedNode) -> Self {
        Entity::Iri(IriRef::new(iri))
    }
}

impl From<NamedNodeRef<'_>> for Entity {
    fn from(iri: NamedNodeRef<'_>) -> Self {
        Entity::Iri(IriRef::new(iri.into_owned()))
    }
}

impl From<Variable> for Entity {
    fn from(variable: Variable) -> Self {
        Entity::Variable(variable)
    }
}

impl From<Literal> for Entity {
    fn from(literal: Literal) -> Self {
        Entity::Literal(literal)
    }
}

impl fmt::Display for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Entity::Iri(iri) => write!(f, "{iri}"),
            Entity::Variable(variable) => write!(f, "{variable}"),
            Entity::Literal(literal) => write!(f, "{literal}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use insta::assert_snapshot;
    use oxrdf::vocab::xsd;

    #[test]
    fn renders_iri_with_path_operator() {
        let entity = Entity::Iri(IriRef::with_path_operator(
            NamedNode::new_unchecked("http://www.w3.org/2000/01/rdf-schema#subClassOf"),
            PathOperator::ZeroOrMore,
        ));
        assert_snapshot!(entity, @"<http://www.w3.org/2000/01/rdf-schema#subClassOf>*");
    }

    #[test]
    fn renders_variable_and_literal() {
        assert_snapshot!(Entity::variable("book"), @"?book");
        let literal = Entity::Literal(Literal::new_typed_literal("42", xsd::INTEGER));
        assert_snapshot!(literal, @r#""42"^^<http://www.w3.org/2001/XMLSchema#integer>"#);
    }
}

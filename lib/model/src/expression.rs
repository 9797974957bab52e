use crate::Entity;
use oxrdf::NamedNode;
use std::fmt;

/// A comparison operator usable in a filter expression.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum CompareOperator {
    Equals,
    NotEquals,
    LessThan,
    LessThanOrEquals,
    GreaterThan,
    GreaterThanOrEquals,
}

impl fmt::Display for CompareOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CompareOperator::Equals => f.write_str("="),
            CompareOperator::NotEquals => f.write_str("!="),
            CompareOperator::LessThan => f.write_str("<"),
            CompareOperator::LessThanOrEquals => f.write_str("<="),
            CompareOperator::GreaterThan => f.write_str(">"),
            CompareOperator::GreaterThanOrEquals => f.write_str(">="),
        }
    }
}

/// An expression usable in `FILTER` and `BIND` patterns.
///
/// Function calls carry their function IRI verbatim; an unrecognized function is not an error
/// and is passed through by all transformers.
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub enum Expression {
    /// An entity leaf (variable, IRI or literal).
    Entity(Entity),
    Compare {
        left: Box<Expression>,
        operator: CompareOperator,
        right: Box<Expression>,
    },
    And(Box<Expression>, Box<Expression>),
    Or(Box<Expression>, Box<Expression>),
    Not(Box<Expression>),
    Regex {
        text: Entity,
        pattern: String,
        flags: Option<String>,
    },
    FunctionCall {
        function: NamedNode,
        args: Vec<Entity>,
    },
}

impl Expression {
    pub fn compare(left: Expression, operator: CompareOperator, right: Expression) -> Self {
        Expression::Compare {
            left: Box::new(left),
            operator,
            right: Box::new(right),
        }
    }

    /// Appends every entity referenced by this expression to `collector`.
    pub fn collect_entities(&self, collector: &mut Vec<Entity>) {
        match self {
            Expression::Entity(entity) => collector.push(entity.clone()),
            Expression::Compare { left, right, .. } => {
                left.collect_entities(collector);
                right.collect_entities(collector);
            }
            Expression::And(left, right) | Expression::Or(left, right) => {
                left.collect_entities(collector);
                right.collect_entities(collector);
            }
            Expression::Not(inner) => inner.collect_entities(collector),
            Expression::Regex { text, .. } => collector.push(text.clone()),
            Expression::FunctionCall { args, .. } => collector.extend(args.iter().cloned()),
        }
    }
}

impl From<Entity> for Expression {
    fn from(entity: Entity) -> Self {
        Expression::Entity(entity)
    }
}

impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expression::Entity(entity) => write!(f, "{entity}"),
            Expression::Compare {
                left,
                operator,
                right,
            } => write!(f, "({left} {operator} {right})"),
            Expression::And(left, right) => write!(f, "({left} && {right})"),
            Expression::Or(left, right) => write!(f, "({left} || {right})"),
            Expression::Not(inner) => write!(f, "!({inner})"),
            Expression::Regex {
                text,
                pattern,
                flags,
            } => {
                write!(f, "regex({text}, \"{pattern}\"")?;
                if let Some(flags) = flags {
                    write!(f, ", \"{flags}\"")?;
                }
                f.write_str(")")
            }
            Expression::FunctionCall { function, args } => {
                write!(f, "{function}(")?;
                for (i, arg) in args.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{arg}")?;
                }
                f.write_str(")")
            }
        }
    }
}

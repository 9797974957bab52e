mod entity;
mod expression;
mod pattern;
mod query;
pub mod vocab;

pub use entity::*;
pub use expression::*;
pub use pattern::*;
pub use query::*;

// Re-export some oxrdf types.
pub use oxiri::Iri;
pub use oxrdf::{
    IriParseError, Literal, LiteralRef, NamedNode, NamedNodeRef, Variable, VariableNameParseError,
    VariableRef,
};

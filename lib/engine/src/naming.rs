//! Deterministic synthesis of fresh variable names from entities.
//!
//! Expansion rewrites one input statement into several statements that must agree on the
//! variables joining them, and the same expansion site can be visited from several places
//! within one compilation. Names are therefore derived purely from the inputs: the same
//! entity and role always yield the same name, and names embed every input so that distinct
//! inputs do not collide.

use crate::error::TransformError;
use gravsearch_model::{Entity, NamedNodeRef, Variable};

const SEPARATOR: &str = "__";

/// The textual slug of an entity: the variable name as-is, the IRI with `:/.#-` and
/// whitespace stripped, or the literal value as-is.
fn entity_slug(entity: &Entity) -> String {
    match entity {
        Entity::Variable(variable) => variable.as_str().to_owned(),
        Entity::Iri(iri) => iri_slug(iri.iri.as_str()),
        Entity::Literal(literal) => literal.value().to_owned(),
    }
}

fn iri_slug(iri: &str) -> String {
    iri.chars()
        .filter(|c| !matches!(c, ':' | '/' | '.' | '#' | '-') && !c.is_whitespace())
        .collect()
}

/// The `#`-delimited local name of a property IRI, falling back to the full slug for IRIs
/// without a fragment so that expansion stays total over IRI predicates.
fn property_local_name(property: NamedNodeRef<'_>) -> String {
    match property.as_str().rsplit_once('#') {
        Some((_, local)) if !local.is_empty() => local.to_owned(),
        _ => iri_slug(property.as_str()),
    }
}

fn make_variable(name: String, base: &Entity) -> Result<Variable, TransformError> {
    Variable::new(name).map_err(|_| TransformError::InvalidEntityForNaming(base.to_string()))
}

/// Synthesizes a variable named after `base` with a role suffix, e.g. `LinkValue`.
pub fn fresh_variable(base: &Entity, suffix: &str) -> Result<Variable, TransformError> {
    make_variable(format!("{}{SEPARATOR}{suffix}", entity_slug(base)), base)
}

/// Synthesizes a variable named after `base` and the local name of `property`.
pub fn fresh_variable_for_property(
    base: &Entity,
    property: NamedNodeRef<'_>,
) -> Result<Variable, TransformError> {
    fresh_variable(base, &property_local_name(property))
}

/// Synthesizes the variable joining a type statement to its subclass closure: named after
/// `base` and the class being expanded.
pub fn fresh_variable_for_type_expansion(
    base: &Entity,
    base_class: NamedNodeRef<'_>,
) -> Result<Variable, TransformError> {
    fresh_variable(
        base,
        &format!("subClassOf{SEPARATOR}{}", iri_slug(base_class.as_str())),
    )
}

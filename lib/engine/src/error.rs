use std::error::Error;

/// An error raised while transforming a query. Fatal to the single compilation; there is no
/// shared state to recover, so the caller simply rejects the query.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum TransformError {
    /// A pattern violates a documented structural precondition (e.g. the object of an
    /// `rdf:type` statement is not an IRI).
    #[error("malformed query shape: {0}")]
    MalformedQueryShape(String),
    /// Variable-name synthesis received an entity it cannot slugify.
    #[error("cannot derive a variable name from {0}")]
    InvalidEntityForNaming(String),
}

/// An error raised while resolving the inference scope of a query.
///
/// The resolver has no fallback value: callers decide whether to fail the whole query or fall
/// back to unrestricted inference.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum ScopeResolutionError {
    /// A project or ontology lookup failed in the external collaborator.
    #[error("{0}")]
    Lookup(#[source] Box<dyn Error + Send + Sync + 'static>),
}

impl ScopeResolutionError {
    /// Wraps a collaborator failure.
    pub fn lookup(error: impl Into<Box<dyn Error + Send + Sync + 'static>>) -> Self {
        Self::Lookup(error.into())
    }
}

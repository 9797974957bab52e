pub mod error;
pub mod naming;
pub mod rewriting;
pub mod scope;
pub mod transformer;

pub use error::{ScopeResolutionError, TransformError};

type TransformResult<T> = Result<T, error::TransformError>;

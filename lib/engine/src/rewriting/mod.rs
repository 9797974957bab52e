//! The recursive query traverser.
//!
//! The traverser owns the walk over a pattern tree and is strategy-agnostic: every per-pattern
//! decision is delegated to the active [crate::transformer::WhereTransformer]. The walk itself
//! is synchronous and side-effect-free.

mod query_rewriter;
mod where_rewriter;

pub use query_rewriter::{
    transform_construct_to_construct, transform_construct_to_select, transform_select_to_select,
};
pub use where_rewriter::transform_where_patterns;

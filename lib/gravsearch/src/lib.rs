#![doc = include_str!("../README.md")]

pub mod model {
    pub use gravsearch_model::*;
}

pub mod transform {
    pub use gravsearch_engine::*;
}

// branchware/src/pipeline/mod.rs

//! Defines the `Pipeline` runner: an ordered list of steps executed sequentially
//! against a working file set, with first-failure-wins semantics.

pub mod definition;
pub mod execution;
pub mod transform;

pub use definition::Pipeline;
pub use transform::Transform;

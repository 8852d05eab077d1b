//! The cluster-tree construction: recursive builder, node identity
//! derivation, partial-membership annotation, and sibling ordering.

pub mod builder;
pub mod identity;
pub mod membership;
pub mod sort;

pub use builder::TreeBuilder;

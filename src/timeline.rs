pub mod builder;
pub mod random;
pub mod reconcile;

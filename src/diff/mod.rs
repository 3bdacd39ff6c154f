//! Set difference and ordering of sync operations

pub mod engine;
pub mod order;

pub use engine::{compare, DiffEngine};
pub use order::order_operations;

//! Row models and query parameter types.

pub mod category;

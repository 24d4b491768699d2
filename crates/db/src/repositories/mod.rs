//! Repository layer.

pub mod category_repo;

pub use category_repo::CategoryRepo;

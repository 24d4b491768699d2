//! Service layer: transaction scope, caching and error translation around
//! the repositories.

pub mod category_cache;
pub mod category_service;

pub use category_cache::CategoryCache;
pub use category_service::CategoryService;

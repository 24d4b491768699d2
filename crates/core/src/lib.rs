//! Domain types shared by the catalog storage and HTTP layers.
//!
//! This crate has no database or HTTP dependencies so it can be reused by
//! both `catalog-db` and `catalog-api`.

pub mod category;
pub mod error;
pub mod pagination;
pub mod types;

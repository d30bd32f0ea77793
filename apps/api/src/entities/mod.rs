//! Generic entity CRUD — the dynamic table registry and its HTTP surface.

pub mod handlers;
pub mod query;
pub mod registry;
pub mod schema;
pub mod store;
pub mod validate;

pub mod analysis;
pub mod config;
pub mod explain;
pub mod inference;
pub mod routes;
pub mod store;

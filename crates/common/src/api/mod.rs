pub mod analyze;
pub mod explain;

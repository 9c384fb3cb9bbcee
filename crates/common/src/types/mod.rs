mod analysis;

pub use analysis::*;

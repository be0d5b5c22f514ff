pub mod analysis;
pub mod filter;

pub use analysis::*;
pub use filter::*;

pub mod filters;
pub mod hierarchy;
pub mod params;
pub mod row;

pub use filters::*;
pub use hierarchy::*;
pub use params::*;
pub use row::*;

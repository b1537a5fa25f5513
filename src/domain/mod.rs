pub mod catalog;
pub mod solution;
pub mod types;

pub use catalog::CoordinateCatalog;
pub use solution::Solution;
pub use types::{Coordinate, ServicePoint};

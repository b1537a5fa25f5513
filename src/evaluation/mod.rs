pub mod cost;

pub use cost::{total_cost, CostModel};

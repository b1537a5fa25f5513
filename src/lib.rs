pub mod config;
pub mod domain;
pub mod error;
pub mod evaluation;
pub mod fixtures;
pub mod setup;
pub mod solver;
pub mod utils;

pub mod data_generator;

pub use data_generator::{generate_catalog, generate_instance, generate_service_points};

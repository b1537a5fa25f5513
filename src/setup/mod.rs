pub mod init;
pub mod init_types;

pub use init::{load_catalog, load_service_points, setup};

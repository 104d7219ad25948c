pub mod csv_loader;
pub mod error;
pub mod measures;

pub mod dashboard;
pub mod layout;
pub mod runner;

pub use runner::run_app;

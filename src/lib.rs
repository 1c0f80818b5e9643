mod app;
pub mod application;
pub mod domain;
pub mod infrastructure;
pub mod interfaces;

pub use app::{init_tracing, run};
pub use application::CsvAugmentor;
pub use domain::error::AppError;

pub mod error;

// CSV augmentation module
pub mod csv;

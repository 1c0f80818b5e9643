pub mod column_derivation;
pub mod csv_augmentor;

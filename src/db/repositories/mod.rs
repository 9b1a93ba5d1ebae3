pub mod location;
pub mod records;

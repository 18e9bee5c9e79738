pub mod date;
pub mod serde;

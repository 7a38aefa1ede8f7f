pub mod coordinate;
pub mod distance;
pub mod error;
pub mod position;

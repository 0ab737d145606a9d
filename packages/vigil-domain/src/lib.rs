pub mod detections;
pub mod like;
pub mod query;

mod error;

pub use error::{Error, Result};

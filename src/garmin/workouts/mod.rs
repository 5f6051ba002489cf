pub mod convert;
pub mod error;
pub mod io;
pub mod model;
pub mod sync;
pub mod units;

pub use error::{Result, WorkoutError};

//! Temporal indexing and circular window queries.

pub mod temporal;
pub mod window;

pub use temporal::{TemporalIndex, TripRole};
pub use window::{CircularWindow, DEFAULT_HALF_WIDTH};

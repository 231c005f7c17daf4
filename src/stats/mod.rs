//! Statistics module

mod histogram;

pub use histogram::{Histogram, mean};

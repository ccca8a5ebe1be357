//! Random number generation for the simulation engine.

mod stream;

pub(crate) use stream::split_mix64;
pub use stream::SimRng;

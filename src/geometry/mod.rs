pub mod point;
pub mod predicates;

pub use point::{Point, Segment, MAX_COORDINATE};
pub use predicates::*;

#[cfg(test)]
mod tests;

pub mod math;
pub mod rotations;

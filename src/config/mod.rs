pub mod bodies;
pub mod scenario;

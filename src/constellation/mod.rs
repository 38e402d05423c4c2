#[allow(clippy::module_inception)]
pub mod constellation;
pub mod walker_delta;

pub use constellation::Constellation;
pub use walker_delta::WalkerDelta;

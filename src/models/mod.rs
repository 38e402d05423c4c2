pub mod central_body;
pub mod history;
pub mod spacecraft;
pub mod state;
pub mod tracking;

pub use central_body::CentralBody;
pub use history::StateHistory;
pub use spacecraft::Spacecraft;
pub use state::{Coe, State};
pub use tracking::{BoundingBox, BoundsViolation, TrackingState};

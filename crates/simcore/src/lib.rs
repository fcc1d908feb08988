pub mod stepper;
pub mod traits;
pub mod units;

pub use stepper::FixedTimestep;
pub use traits::{Model, SimContext, Simulate};

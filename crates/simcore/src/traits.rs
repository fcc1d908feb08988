/// Timing information handed to a model for one step.
#[derive(Debug, Clone, Copy)]
pub struct SimContext {
    /// Step length in seconds.
    pub dt: f64,
    /// Total simulated time in seconds at the start of the step.
    pub t: f64,
}

pub trait Model {
    fn reset(&mut self);
}

/// A model advanced by explicit time steps.
pub trait Simulate: Model {
    fn step(&mut self, ctx: SimContext);
}

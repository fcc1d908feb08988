//! Fixed-timestep driver for variable frame times.

use log::warn;

use crate::{SimContext, Simulate};

/// Wraps a [`Simulate`] model and advances it in fixed-length sub-steps.
///
/// Render loops supply wall-clock frame times; integrating with those
/// directly makes the result frame-rate dependent. The accumulator
/// pattern keeps the model's `dt` constant regardless of how irregular
/// the incoming frame times are.
#[derive(Debug, Clone)]
pub struct FixedTimestep<S: Simulate> {
    pub model: S,
    pub fixed_dt: f64,
    accumulator: f64,
    elapsed: f64,
}

impl<S: Simulate> FixedTimestep<S> {
    pub fn new(model: S, fixed_dt: f64) -> Self {
        FixedTimestep {
            model,
            fixed_dt,
            accumulator: 0.0,
            elapsed: 0.0,
        }
    }

    /// Advances the simulation, running as many fixed sub-steps as fit into
    /// `frame_dt`. Leftover time stays in the accumulator for the next frame.
    /// Returns the number of sub-steps taken.
    pub fn advance(&mut self, frame_dt: f64) -> u32 {
        if !frame_dt.is_finite() || frame_dt <= 0.0 {
            warn!("ignoring non-positive frame time: {frame_dt}");
            return 0;
        }

        self.accumulator += frame_dt;
        let mut steps = 0;
        while self.accumulator >= self.fixed_dt {
            let ctx = SimContext {
                dt: self.fixed_dt,
                t: self.elapsed,
            };
            self.model.step(ctx);
            self.accumulator -= self.fixed_dt;
            self.elapsed += self.fixed_dt;
            steps += 1;
        }
        steps
    }

    /// Total simulated time in seconds.
    pub fn elapsed(&self) -> f64 {
        self.elapsed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Model;

    /// Records every dt it is stepped with.
    #[derive(Default)]
    struct StepRecorder {
        dts: Vec<f64>,
    }

    impl Model for StepRecorder {
        fn reset(&mut self) {
            self.dts.clear();
        }
    }

    impl Simulate for StepRecorder {
        fn step(&mut self, ctx: SimContext) {
            self.dts.push(ctx.dt);
        }
    }

    #[test]
    fn test_accumulator_carries_leftover_time() {
        let mut stepper = FixedTimestep::new(StepRecorder::default(), 0.01);

        // 0.025s fits two full steps, 0.005s stays in the accumulator.
        assert_eq!(stepper.advance(0.025), 2);
        // The next 0.005s frame tops the accumulator up to a third step.
        assert_eq!(stepper.advance(0.005), 1);

        assert_eq!(stepper.model.dts.len(), 3);
        assert!(stepper.model.dts.iter().all(|&dt| dt == 0.01));
        assert!((stepper.elapsed() - 0.03).abs() < 1e-12);
    }

    #[test]
    fn test_short_frame_takes_no_step() {
        let mut stepper = FixedTimestep::new(StepRecorder::default(), 0.01);
        assert_eq!(stepper.advance(0.004), 0);
        assert!(stepper.model.dts.is_empty());
    }

    #[test]
    fn test_invalid_frame_time_is_ignored() {
        let mut stepper = FixedTimestep::new(StepRecorder::default(), 0.01);
        assert_eq!(stepper.advance(-1.0), 0);
        assert_eq!(stepper.advance(f64::NAN), 0);
        assert_eq!(stepper.elapsed(), 0.0);
    }
}

mod animatable;
mod driver;
mod spring;
mod timing;

pub use animatable::Animatable;
pub use driver::{AnimationDriver, CompletionFn, ProgressFn};
pub use spring::{SpringConfig, SpringState};
pub use timing::TimingFunction;

/// Configuration for how a transition should animate
#[derive(Clone, Copy, Debug)]
pub struct Transition {
    /// Duration of the animation in milliseconds
    pub duration_ms: f32,
    /// Timing function controlling the animation curve
    pub timing: TimingFunction,
}

impl Transition {
    /// Create a new transition with the given duration and timing function
    pub fn new(duration_ms: f32, timing: TimingFunction) -> Self {
        Self {
            duration_ms,
            timing,
        }
    }

    /// Create a spring-based transition with the given configuration
    pub fn spring(config: SpringConfig) -> Self {
        Self {
            duration_ms: 1000.0, // Spring duration is dynamic, this is max
            timing: TimingFunction::Spring(config),
        }
    }

    /// Set the duration of the animation
    pub fn duration(mut self, duration_ms: f32) -> Self {
        self.duration_ms = duration_ms;
        self
    }

    /// Set the timing function
    pub fn timing(mut self, timing: TimingFunction) -> Self {
        self.timing = timing;
        self
    }
}

impl Default for Transition {
    /// Default transition matches the stock presentation duration
    fn default() -> Self {
        Self::new(300.0, TimingFunction::EaseInOut)
    }
}

//! Scheduling primitive for transition animations.
//!
//! The driver owns every in-flight animation and is stepped by the host's
//! frame loop through [`AnimationDriver::advance`]. Each animation drives a
//! progress value through a closure and reports completion exactly once.

use std::cell::RefCell;
use std::rc::Rc;

use super::spring::{SpringConfig, SpringState};
use super::timing::TimingFunction;

/// Closure invoked with the eased progress value on every step
pub type ProgressFn = Box<dyn FnMut(f32)>;

/// Closure invoked exactly once when an animation finishes.
/// The flag is true when the animation ran as the reversal of a
/// cancelled interactive transition.
pub type CompletionFn = Box<dyn FnOnce(bool)>;

/// Spring settle threshold for position and velocity
const SETTLE_THRESHOLD: f32 = 0.01;

struct ScheduledAnimation {
    elapsed_ms: f32,
    duration_ms: f32,
    timing: TimingFunction,
    from: f32,
    to: f32,
    spring: Option<SpringState>,
    cancelled: bool,
    apply: ProgressFn,
    on_complete: Option<CompletionFn>,
}

impl ScheduledAnimation {
    /// Returns the current progress value and whether the animation is done
    fn evaluate(&mut self) -> (f32, bool) {
        if let Some(ref mut spring) = self.spring {
            let config = match self.timing {
                TimingFunction::Spring(config) => config,
                // Spring state only exists for spring timing
                _ => SpringConfig::DEFAULT,
            };
            let position = spring.step(self.elapsed_ms / 1000.0, &config);
            if spring.is_settled(SETTLE_THRESHOLD) {
                (self.to, true)
            } else {
                (self.from + (self.to - self.from) * position, false)
            }
        } else {
            let t = if self.duration_ms <= 0.0 {
                1.0
            } else {
                (self.elapsed_ms / self.duration_ms).min(1.0)
            };
            let eased = self.timing.evaluate(t);
            let value = self.from + (self.to - self.from) * eased;
            if t >= 1.0 {
                // Snap to the exact terminal value
                (self.to, true)
            } else {
                (value, false)
            }
        }
    }
}

/// Cloneable handle to the animation scheduler.
///
/// Clones share the same queue, so the coordinator, the interaction
/// controller and the host frame loop can all hold one.
#[derive(Clone, Default)]
pub struct AnimationDriver {
    inner: Rc<RefCell<Vec<ScheduledAnimation>>>,
}

impl AnimationDriver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule a progress animation from 0.0 to 1.0 over `duration_ms`.
    /// `on_complete` fires exactly once, with `cancelled = false`.
    pub fn run(
        &self,
        duration_ms: f32,
        timing: TimingFunction,
        apply: ProgressFn,
        on_complete: CompletionFn,
    ) {
        self.schedule(0.0, 1.0, duration_ms, timing, false, apply, Some(on_complete));
    }

    /// Schedule a spring-driven progress animation from 0.0 to 1.0.
    /// Completes when the spring settles, regardless of any duration.
    pub fn run_spring(&self, config: SpringConfig, apply: ProgressFn, on_complete: CompletionFn) {
        self.schedule(
            0.0,
            1.0,
            0.0,
            TimingFunction::Spring(config),
            false,
            apply,
            Some(on_complete),
        );
    }

    /// Schedule a progress segment between two arbitrary fractions.
    /// Used to run the remainder of an interactive transition after the
    /// gesture ends; `to < from` plays the visuals backwards.
    #[allow(clippy::too_many_arguments)]
    pub(crate) fn run_segment(
        &self,
        from: f32,
        to: f32,
        duration_ms: f32,
        timing: TimingFunction,
        cancelled: bool,
        apply: ProgressFn,
        on_complete: Option<CompletionFn>,
    ) {
        self.schedule(from, to, duration_ms, timing, cancelled, apply, on_complete);
    }

    #[allow(clippy::too_many_arguments)]
    fn schedule(
        &self,
        from: f32,
        to: f32,
        duration_ms: f32,
        timing: TimingFunction,
        cancelled: bool,
        apply: ProgressFn,
        on_complete: Option<CompletionFn>,
    ) {
        let spring = match timing {
            TimingFunction::Spring(_) => Some(SpringState::new()),
            _ => None,
        };
        log::trace!(
            "scheduling animation {:.2} -> {:.2} over {}ms ({:?})",
            from,
            to,
            duration_ms,
            timing
        );
        self.inner.borrow_mut().push(ScheduledAnimation {
            elapsed_ms: 0.0,
            duration_ms,
            timing,
            from,
            to,
            spring,
            cancelled,
            apply,
            on_complete,
        });
    }

    /// Step every in-flight animation by `dt_ms` and fire any completions.
    /// Returns true while animations remain active.
    ///
    /// A zero-duration animation completes on the first call, even with
    /// `dt_ms = 0.0`. Completions run after internal borrows are released,
    /// so a completion handler may schedule new animations.
    pub fn advance(&self, dt_ms: f32) -> bool {
        let running: Vec<ScheduledAnimation> = self.inner.borrow_mut().drain(..).collect();

        let mut remaining = Vec::new();
        let mut completions: Vec<(CompletionFn, bool)> = Vec::new();

        for mut anim in running {
            anim.elapsed_ms += dt_ms;
            let (value, done) = anim.evaluate();
            (anim.apply)(value);
            if done {
                if let Some(callback) = anim.on_complete.take() {
                    completions.push((callback, anim.cancelled));
                }
            } else {
                remaining.push(anim);
            }
        }

        {
            // Animations scheduled from inside an apply closure landed in the
            // queue already; keep the older ones ahead of them.
            let mut inner = self.inner.borrow_mut();
            inner.splice(0..0, remaining);
        }

        for (callback, cancelled) in completions {
            log::debug!("animation complete (cancelled: {})", cancelled);
            callback(cancelled);
        }

        !self.inner.borrow().is_empty()
    }

    /// True when no animation is in flight
    pub fn is_idle(&self) -> bool {
        self.inner.borrow().is_empty()
    }

    /// Number of in-flight animations
    pub fn active_count(&self) -> usize {
        self.inner.borrow().len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn test_timed_animation_completes_once() {
        let driver = AnimationDriver::new();
        let completions = Rc::new(Cell::new(0));
        let progress = Rc::new(Cell::new(0.0f32));

        let p = progress.clone();
        let c = completions.clone();
        driver.run(
            100.0,
            TimingFunction::Linear,
            Box::new(move |v| p.set(v)),
            Box::new(move |_| c.set(c.get() + 1)),
        );

        for _ in 0..20 {
            driver.advance(16.0);
        }

        assert_eq!(completions.get(), 1);
        assert_eq!(progress.get(), 1.0);
        assert!(driver.is_idle());
    }

    #[test]
    fn test_zero_duration_completes_on_first_tick() {
        let driver = AnimationDriver::new();
        let done = Rc::new(Cell::new(false));
        let progress = Rc::new(Cell::new(0.0f32));

        let p = progress.clone();
        let d = done.clone();
        driver.run(
            0.0,
            TimingFunction::EaseInOut,
            Box::new(move |v| p.set(v)),
            Box::new(move |_| d.set(true)),
        );

        driver.advance(0.0);

        assert!(done.get());
        assert_eq!(progress.get(), 1.0);
    }

    #[test]
    fn test_segment_reversal_reports_cancelled() {
        let driver = AnimationDriver::new();
        let outcome = Rc::new(Cell::new(None::<bool>));
        let progress = Rc::new(Cell::new(0.4f32));

        let p = progress.clone();
        let o = outcome.clone();
        driver.run_segment(
            0.4,
            0.0,
            100.0,
            TimingFunction::Linear,
            true,
            Box::new(move |v| p.set(v)),
            Some(Box::new(move |cancelled| o.set(Some(cancelled)))),
        );

        for _ in 0..10 {
            driver.advance(16.0);
        }

        assert_eq!(outcome.get(), Some(true));
        assert_eq!(progress.get(), 0.0);
    }

    #[test]
    fn test_spring_animation_settles_and_completes() {
        let driver = AnimationDriver::new();
        let done = Rc::new(Cell::new(false));
        let progress = Rc::new(Cell::new(0.0f32));

        let p = progress.clone();
        let d = done.clone();
        driver.run_spring(
            SpringConfig::SNAPPY,
            Box::new(move |v| p.set(v)),
            Box::new(move |_| d.set(true)),
        );

        for _ in 0..600 {
            driver.advance(16.0);
        }

        assert!(done.get());
        assert_eq!(progress.get(), 1.0);
        assert!(driver.is_idle());
    }

    #[test]
    fn test_completion_may_schedule_followup() {
        let driver = AnimationDriver::new();
        let followup_done = Rc::new(Cell::new(false));

        let chain = driver.clone();
        let f = followup_done.clone();
        driver.run(
            0.0,
            TimingFunction::Linear,
            Box::new(|_| {}),
            Box::new(move |_| {
                let f = f.clone();
                chain.run(
                    0.0,
                    TimingFunction::Linear,
                    Box::new(|_| {}),
                    Box::new(move |_| f.set(true)),
                );
            }),
        );

        driver.advance(0.0);
        // The completion replaced the finished animation with its follow-up
        assert_eq!(driver.active_count(), 1);
        assert!(!followup_done.get());
        driver.advance(0.0);
        assert!(followup_done.get());
        assert_eq!(driver.active_count(), 0);
    }

    #[test]
    fn test_intermediate_progress_is_monotonic_for_linear() {
        let driver = AnimationDriver::new();
        let seen = Rc::new(RefCell::new(Vec::new()));

        let s = seen.clone();
        driver.run(
            100.0,
            TimingFunction::Linear,
            Box::new(move |v| s.borrow_mut().push(v)),
            Box::new(|_| {}),
        );

        for _ in 0..10 {
            driver.advance(25.0);
        }

        let seen = seen.borrow();
        assert!(seen.windows(2).all(|w| w[0] <= w[1]));
        assert_eq!(*seen.last().unwrap(), 1.0);
    }
}

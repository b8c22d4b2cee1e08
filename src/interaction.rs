//! Gesture-driven interactive transitions.
//!
//! The [`InteractionController`] turns a one-dimensional gesture signal into
//! transition progress and decides the terminal outcome when the gesture
//! ends. It owns at most one interaction session at a time; a session is
//! created by `begin`, scrubbed by `update` and destroyed unconditionally by
//! `end`, whether the transition commits or cancels.
//!
//! The gesture source never sees the controller itself, only an opaque
//! [`InteractionHandle`]. Every operation on the handle returns a typed error
//! instead of panicking when the protocol is violated (update without a
//! session, begin during a session, and so on).

use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

use thiserror::Error;

use crate::animation::{AnimationDriver, CompletionFn, ProgressFn, TimingFunction};
use crate::coordinator::TransitionOutcome;

/// Fraction above which an ended gesture commits the transition.
/// Ending at exactly this value cancels. Deliberately velocity-independent.
pub const COMMIT_THRESHOLD: f32 = 0.5;

/// Protocol violations on the interactive transition surface
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum InteractionError {
    /// `begin` was called while a session is active
    #[error("an interactive session is already active")]
    SessionActive,
    /// `begin` was called while the previous session's commit or cancel
    /// animation is still running
    #[error("the previous session is still settling")]
    StillSettling,
    /// `update` or `end` was called with no active session
    #[error("no interactive session is active")]
    NoActiveSession,
    /// The coordinator owning the controller was dropped
    #[error("the interaction controller is gone")]
    ControllerGone,
}

/// The effect animation a running transition attached to the session
struct AttachedAnimation {
    apply: ProgressFn,
    on_complete: Option<CompletionFn>,
    duration_ms: f32,
    timing: TimingFunction,
}

/// Live state of one gesture cycle. Exists from `begin` to `end`.
struct InteractionSession {
    progress: f32,
    animation: Option<AttachedAnimation>,
}

/// Converts a live gesture stream into a cancellable, resumable
/// percent-complete transition driver. One per coordinator; sessions are
/// per-gesture and recreated on every cycle.
pub struct InteractionController {
    session: Option<InteractionSession>,
    /// Set while a commit/cancel remainder is animating, cleared by its
    /// completion. Guards against a new gesture overwriting a settling one.
    settling: Rc<Cell<bool>>,
    driver: AnimationDriver,
    /// Capability callback asking the host to start the dismissal or pop
    /// that this gesture drives. Non-owning: the host outlives the effect.
    on_begin: Option<Rc<dyn Fn()>>,
}

impl InteractionController {
    pub(crate) fn new(driver: AnimationDriver) -> Self {
        Self {
            session: None,
            settling: Rc::new(Cell::new(false)),
            driver,
            on_begin: None,
        }
    }

    pub(crate) fn set_begin_hook(&mut self, hook: Rc<dyn Fn()>) {
        self.on_begin = Some(hook);
    }

    /// True while a gesture cycle is in flight
    pub fn has_active_session(&self) -> bool {
        self.session.is_some()
    }

    /// Progress of the active session, if any
    pub fn progress(&self) -> Option<f32> {
        self.session.as_ref().map(|s| s.progress)
    }

    /// Create a fresh session at progress 0. The caller is expected to ask
    /// the host for the corresponding dismissal/pop next, which routes back
    /// into the coordinator and attaches the effect animation.
    pub(crate) fn begin_session(&mut self) -> Result<(), InteractionError> {
        if self.session.is_some() {
            log::warn!("interactive begin rejected: session already active");
            return Err(InteractionError::SessionActive);
        }
        if self.settling.get() {
            log::warn!("interactive begin rejected: previous session still settling");
            return Err(InteractionError::StillSettling);
        }
        log::debug!("interactive session started");
        self.session = Some(InteractionSession {
            progress: 0.0,
            animation: None,
        });
        Ok(())
    }

    /// Attach the running transition's effect animation to the session.
    /// When no session is active the closures are handed back so the caller
    /// can run the transition as a plain timed animation instead; the
    /// completion is never dropped.
    pub(crate) fn attach(
        &mut self,
        apply: ProgressFn,
        on_complete: CompletionFn,
        duration_ms: f32,
        timing: TimingFunction,
    ) -> Result<(), (ProgressFn, CompletionFn)> {
        match self.session.as_mut() {
            Some(session) => {
                session.animation = Some(AttachedAnimation {
                    apply,
                    on_complete: Some(on_complete),
                    duration_ms,
                    timing,
                });
                Ok(())
            }
            None => Err((apply, on_complete)),
        }
    }

    /// Scrub the transition to `fraction`. The incoming value is clamped to
    /// [0, 1] before it reaches the visuals; no completion check happens here.
    pub fn update(&mut self, fraction: f32) -> Result<(), InteractionError> {
        let session = self.session.as_mut().ok_or_else(|| {
            log::warn!("interactive update with no active session");
            InteractionError::NoActiveSession
        })?;
        let fraction = fraction.clamp(0.0, 1.0);
        session.progress = fraction;
        if let Some(ref mut animation) = session.animation {
            (animation.apply)(fraction);
        }
        Ok(())
    }

    /// End the gesture. Commits when the clamped final fraction exceeds
    /// [`COMMIT_THRESHOLD`], cancels otherwise, and schedules the remainder
    /// of the animation on the driver. The session is destroyed before the
    /// remainder completes.
    pub fn end(&mut self, final_fraction: f32) -> Result<TransitionOutcome, InteractionError> {
        let mut session = self.session.take().ok_or_else(|| {
            log::warn!("interactive end with no active session");
            InteractionError::NoActiveSession
        })?;

        let fraction = final_fraction.clamp(0.0, 1.0);
        session.progress = fraction;
        let commit = fraction > COMMIT_THRESHOLD;
        let outcome = if commit {
            TransitionOutcome::Completed
        } else {
            TransitionOutcome::Cancelled
        };

        match session.animation.take() {
            Some(mut animation) => {
                let from = session.progress;
                let (target, remaining) = if commit {
                    (1.0, 1.0 - from)
                } else {
                    (0.0, from)
                };
                let remainder_ms = animation.duration_ms * remaining;
                log::debug!(
                    "interactive end at {:.2}: {:?}, settling over {:.0}ms",
                    fraction,
                    outcome,
                    remainder_ms
                );

                self.settling.set(true);
                let settling = self.settling.clone();
                let inner = animation.on_complete.take();
                let on_complete: CompletionFn = Box::new(move |cancelled| {
                    settling.set(false);
                    if let Some(callback) = inner {
                        callback(cancelled);
                    }
                });

                self.driver.run_segment(
                    from,
                    target,
                    remainder_ms,
                    animation.timing,
                    !commit,
                    animation.apply,
                    Some(on_complete),
                );
            }
            None => {
                // begin() was never followed by a transition start, so there
                // is nothing to finish or reverse
                log::warn!("interactive end with no attached transition");
            }
        }

        Ok(outcome)
    }
}

/// Opaque, non-owning handle handed to the gesture source.
///
/// Operations fail with [`InteractionError::ControllerGone`] once the owning
/// coordinator is dropped.
#[derive(Clone)]
pub struct InteractionHandle {
    controller: Weak<RefCell<InteractionController>>,
}

impl InteractionHandle {
    pub(crate) fn new(controller: &Rc<RefCell<InteractionController>>) -> Self {
        Self {
            controller: Rc::downgrade(controller),
        }
    }

    /// Start a gesture cycle, then ask the host to begin the dismissal/pop.
    /// The host callback runs after the controller borrow is released, so it
    /// may synchronously route back into the coordinator.
    pub fn begin(&self) -> Result<(), InteractionError> {
        let controller = self
            .controller
            .upgrade()
            .ok_or(InteractionError::ControllerGone)?;
        let hook = {
            let mut controller = controller.borrow_mut();
            controller.begin_session()?;
            controller.on_begin.clone()
        };
        if let Some(hook) = hook {
            hook();
        }
        Ok(())
    }

    /// Forward a progress update to the active session
    pub fn update(&self, fraction: f32) -> Result<(), InteractionError> {
        let controller = self
            .controller
            .upgrade()
            .ok_or(InteractionError::ControllerGone)?;
        let mut controller = controller.borrow_mut();
        controller.update(fraction)
    }

    /// End the gesture and get the commit/cancel decision
    pub fn end(&self, final_fraction: f32) -> Result<TransitionOutcome, InteractionError> {
        let controller = self
            .controller
            .upgrade()
            .ok_or(InteractionError::ControllerGone)?;
        let mut controller = controller.borrow_mut();
        controller.end(final_fraction)
    }

    /// True while a gesture cycle is in flight
    pub fn is_active(&self) -> bool {
        self.controller
            .upgrade()
            .map(|c| c.borrow().has_active_session())
            .unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn controller_with_driver() -> (InteractionController, AnimationDriver) {
        let driver = AnimationDriver::new();
        (InteractionController::new(driver.clone()), driver)
    }

    fn attach_probe(
        controller: &mut InteractionController,
    ) -> (Rc<Cell<f32>>, Rc<Cell<Option<bool>>>) {
        let progress = Rc::new(Cell::new(0.0f32));
        let outcome = Rc::new(Cell::new(None));
        let p = progress.clone();
        let o = outcome.clone();
        let attached = controller.attach(
            Box::new(move |v| p.set(v)),
            Box::new(move |cancelled| o.set(Some(cancelled))),
            300.0,
            TimingFunction::Linear,
        );
        assert!(attached.is_ok());
        (progress, outcome)
    }

    #[test]
    fn test_update_without_session_is_typed_error() {
        let (mut controller, _driver) = controller_with_driver();
        assert_eq!(controller.update(0.3), Err(InteractionError::NoActiveSession));
    }

    #[test]
    fn test_end_without_session_is_typed_error() {
        let (mut controller, _driver) = controller_with_driver();
        assert_eq!(controller.end(0.7), Err(InteractionError::NoActiveSession));
    }

    #[test]
    fn test_begin_twice_is_rejected() {
        let (mut controller, _driver) = controller_with_driver();
        controller.begin_session().unwrap();
        assert_eq!(
            controller.begin_session(),
            Err(InteractionError::SessionActive)
        );
    }

    #[test]
    fn test_commit_above_threshold() {
        let (mut controller, driver) = controller_with_driver();
        controller.begin_session().unwrap();
        let (progress, outcome) = attach_probe(&mut controller);

        controller.update(0.7).unwrap();
        assert_eq!(progress.get(), 0.7);
        assert_eq!(controller.progress(), Some(0.7));

        let decision = controller.end(0.7).unwrap();
        assert_eq!(decision, TransitionOutcome::Completed);
        assert!(!controller.has_active_session());

        while driver.advance(16.0) {}
        assert_eq!(progress.get(), 1.0);
        assert_eq!(outcome.get(), Some(false));
    }

    #[test]
    fn test_cancel_at_or_below_threshold() {
        let (mut controller, driver) = controller_with_driver();
        controller.begin_session().unwrap();
        let (progress, outcome) = attach_probe(&mut controller);

        controller.update(0.5).unwrap();
        let decision = controller.end(0.5).unwrap();
        assert_eq!(decision, TransitionOutcome::Cancelled);

        while driver.advance(16.0) {}
        assert_eq!(progress.get(), 0.0);
        assert_eq!(outcome.get(), Some(true));
    }

    #[test]
    fn test_session_destroyed_before_remainder_completes() {
        let (mut controller, driver) = controller_with_driver();
        controller.begin_session().unwrap();
        let (_progress, outcome) = attach_probe(&mut controller);

        controller.end(0.9).unwrap();
        // Session is gone even though the remainder has not run yet
        assert!(!controller.has_active_session());
        assert_eq!(outcome.get(), None);

        while driver.advance(16.0) {}
        assert_eq!(outcome.get(), Some(false));
    }

    #[test]
    fn test_begin_rejected_while_settling() {
        let (mut controller, driver) = controller_with_driver();
        controller.begin_session().unwrap();
        let _probe = attach_probe(&mut controller);
        controller.end(0.8).unwrap();

        // Remainder still animating
        assert_eq!(
            controller.begin_session(),
            Err(InteractionError::StillSettling)
        );

        while driver.advance(16.0) {}
        assert!(controller.begin_session().is_ok());
    }

    #[test]
    fn test_update_clamps_out_of_range_fractions() {
        let (mut controller, _driver) = controller_with_driver();
        controller.begin_session().unwrap();
        let (progress, _outcome) = attach_probe(&mut controller);

        controller.update(1.7).unwrap();
        assert_eq!(progress.get(), 1.0);
        controller.update(-0.3).unwrap();
        assert_eq!(progress.get(), 0.0);
    }

    #[test]
    fn test_end_without_attached_transition_still_clears_session() {
        let (mut controller, _driver) = controller_with_driver();
        controller.begin_session().unwrap();
        // No transition was started by the host; end must not panic
        let decision = controller.end(0.2).unwrap();
        assert_eq!(decision, TransitionOutcome::Cancelled);
        assert!(!controller.has_active_session());
        // And a new cycle may begin immediately (nothing to settle)
        assert!(controller.begin_session().is_ok());
    }

    #[test]
    fn test_handle_reports_controller_gone() {
        let (controller, _driver) = controller_with_driver();
        let controller = Rc::new(RefCell::new(controller));
        let handle = InteractionHandle::new(&controller);
        drop(controller);

        assert_eq!(handle.begin(), Err(InteractionError::ControllerGone));
        assert_eq!(handle.update(0.1), Err(InteractionError::ControllerGone));
        assert_eq!(handle.end(0.9), Err(InteractionError::ControllerGone));
        assert!(!handle.is_active());
    }

    #[test]
    fn test_handle_begin_invokes_hook_after_borrow_release() {
        let controller = Rc::new(RefCell::new(InteractionController::new(
            AnimationDriver::new(),
        )));
        let handle = InteractionHandle::new(&controller);

        let observed_active = Rc::new(Cell::new(false));
        let probe = controller.clone();
        let observed = observed_active.clone();
        controller.borrow_mut().set_begin_hook(Rc::new(move || {
            // Re-entrant borrow must succeed: begin released its borrow
            observed.set(probe.borrow().has_active_session());
        }));

        handle.begin().unwrap();
        assert!(observed_active.get());
    }
}

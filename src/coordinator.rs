//! Orchestration of one transition.
//!
//! The [`TransitionCoordinator`] is what the host framework talks to: it asks
//! for an animator when a presentation, dismissal, push or pop starts, and for
//! an interaction driver when a gesture may take over. The coordinator selects
//! the configured [`TransitionEffect`], records the direction for the in-flight
//! transition and reports the outcome back through the completion callback.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use crate::animation::{AnimationDriver, CompletionFn, ProgressFn, TimingFunction, Transition};
use crate::effect::TransitionEffect;
use crate::interaction::{InteractionController, InteractionHandle};
use crate::screen::{ContainerHandle, ScreenHandle};

/// Direction of a transition, fixed for its whole lifetime
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransitionDirection {
    /// Forward: a new screen is being presented or pushed
    Presenting,
    /// Backward: the current screen is being dismissed or popped
    Dismissing,
}

impl TransitionDirection {
    /// True for the dismiss/pop direction
    pub fn is_closing(&self) -> bool {
        matches!(self, TransitionDirection::Dismissing)
    }
}

/// Navigation-stack operation, for hosts that think in push/pop terms
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavOperation {
    Push,
    Pop,
}

impl NavOperation {
    pub fn direction(self) -> TransitionDirection {
        match self {
            NavOperation::Push => TransitionDirection::Presenting,
            NavOperation::Pop => TransitionDirection::Dismissing,
        }
    }
}

/// Coordinator lifecycle state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CoordinatorState {
    #[default]
    Idle,
    Presenting,
    Dismissing,
}

/// How a finished transition ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransitionOutcome {
    /// The destination is fully in place
    Completed,
    /// The visuals were reversed; the source screen is restored
    Cancelled,
}

impl TransitionOutcome {
    pub fn is_cancelled(&self) -> bool {
        matches!(self, TransitionOutcome::Cancelled)
    }
}

/// One transition to run: which screens, on which surface, which way.
/// Created when the host asks for an animator and consumed by it.
pub struct TransitionRequest {
    pub container: ContainerHandle,
    pub source: ScreenHandle,
    pub destination: ScreenHandle,
    pub direction: TransitionDirection,
    /// Duration in milliseconds overriding the coordinator's configuration
    pub duration_override: Option<f32>,
}

/// Orchestrates transitions for one effect. Owns the effect selection and
/// the interaction controller; both live as long as the coordinator.
pub struct TransitionCoordinator {
    effect: TransitionEffect,
    transition: Transition,
    driver: AnimationDriver,
    state: Rc<Cell<CoordinatorState>>,
    controller: Rc<RefCell<InteractionController>>,
}

impl TransitionCoordinator {
    /// Create a coordinator for `effect`, scheduling on `driver`.
    /// Duration defaults to 300 ms with ease-in-out.
    pub fn new(effect: TransitionEffect, driver: AnimationDriver) -> Self {
        let controller = Rc::new(RefCell::new(InteractionController::new(driver.clone())));
        Self {
            effect,
            transition: Transition::default(),
            driver,
            state: Rc::new(Cell::new(CoordinatorState::Idle)),
            controller,
        }
    }

    /// Set the full transition configuration (duration and timing)
    pub fn transition(mut self, transition: Transition) -> Self {
        self.transition = transition;
        self
    }

    /// Set the duration in milliseconds
    pub fn duration(mut self, duration_ms: f32) -> Self {
        self.transition.duration_ms = duration_ms;
        self
    }

    /// Set the timing function
    pub fn timing(mut self, timing: TimingFunction) -> Self {
        self.transition.timing = timing;
        self
    }

    pub fn effect(&self) -> TransitionEffect {
        self.effect
    }

    pub fn state(&self) -> CoordinatorState {
        self.state.get()
    }

    pub fn is_idle(&self) -> bool {
        self.state.get() == CoordinatorState::Idle
    }

    /// Register the host callback invoked when an interactive gesture begins.
    /// This is where the host starts the dismissal or pop the gesture drives.
    pub fn on_interactive_begin<F: Fn() + 'static>(&self, hook: F) {
        self.controller.borrow_mut().set_begin_hook(Rc::new(hook));
    }

    /// Opaque handle for wiring a gesture recognizer to this coordinator
    pub fn interaction_handle(&self) -> InteractionHandle {
        InteractionHandle::new(&self.controller)
    }

    /// The currently active interaction driver, if a gesture is in flight
    /// and the configured effect supports interaction. None means the
    /// transition runs as a plain timed animation.
    pub fn provide_interaction_driver(&self) -> Option<InteractionHandle> {
        if self.effect.supports_interaction() && self.controller.borrow().has_active_session() {
            Some(self.interaction_handle())
        } else {
            None
        }
    }

    /// Build the animator for `request`. Never fails: the request direction
    /// is recorded, the effect performs its initial placement and the
    /// returned animator is ready to run.
    pub fn provide_animator(&mut self, request: TransitionRequest) -> TransitionAnimator {
        if self.state.get() != CoordinatorState::Idle {
            log::warn!(
                "animator requested while a transition is in flight ({:?})",
                self.state.get()
            );
        }
        self.state.set(match request.direction {
            TransitionDirection::Presenting => CoordinatorState::Presenting,
            TransitionDirection::Dismissing => CoordinatorState::Dismissing,
        });

        let duration_ms = request
            .duration_override
            .unwrap_or(self.transition.duration_ms);
        let interactive = self.provide_interaction_driver().is_some();
        let apply = self.effect.build(&request);

        log::debug!(
            "animator for {:?}: {:?}, {:.0}ms, interactive: {}",
            request.direction,
            self.effect,
            duration_ms,
            interactive
        );

        TransitionAnimator {
            apply,
            duration_ms,
            timing: self.transition.timing,
            interactive,
            driver: self.driver.clone(),
            state: self.state.clone(),
            controller: self.controller.clone(),
        }
    }
}

/// A ready-to-run invocation of one effect for one request
pub struct TransitionAnimator {
    apply: ProgressFn,
    duration_ms: f32,
    timing: TimingFunction,
    interactive: bool,
    driver: AnimationDriver,
    state: Rc<Cell<CoordinatorState>>,
    controller: Rc<RefCell<InteractionController>>,
}

impl TransitionAnimator {
    pub fn duration_ms(&self) -> f32 {
        self.duration_ms
    }

    /// Whether this run will be driven by the active gesture session
    pub fn is_interactive(&self) -> bool {
        self.interactive
    }

    /// Start the transition. `on_complete` fires exactly once with the
    /// outcome, after the coordinator has returned to Idle.
    pub fn run<F: FnOnce(TransitionOutcome) + 'static>(self, on_complete: F) {
        let state = self.state;
        let completion: CompletionFn = Box::new(move |cancelled| {
            state.set(CoordinatorState::Idle);
            let outcome = if cancelled {
                TransitionOutcome::Cancelled
            } else {
                TransitionOutcome::Completed
            };
            on_complete(outcome);
        });

        if self.interactive {
            let attach_result = self.controller.borrow_mut().attach(
                self.apply,
                completion,
                self.duration_ms,
                self.timing,
            );
            if let Err((apply, completion)) = attach_result {
                // The gesture ended between animator creation and run;
                // fall back to a plain timed animation
                log::warn!("interactive session vanished before run; running timed");
                self.driver
                    .run(self.duration_ms, self.timing, apply, completion);
            }
        } else {
            self.driver
                .run(self.duration_ms, self.timing, self.apply, completion);
        }
    }
}

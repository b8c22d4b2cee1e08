//! Custom screen-transition toolkit.
//!
//! Replaces a host framework's stock present/dismiss/push/pop animations
//! with a configurable effect (fade, slide, pull, material circle reveal)
//! and supports interactive, gesture-driven transitions that follow a drag
//! and commit or cancel when it ends.
//!
//! The host wires three things together:
//!
//! 1. A [`coordinator::TransitionCoordinator`], built with an effect and a
//!    shared [`animation::AnimationDriver`], queried for an animator whenever
//!    a transition starts.
//! 2. A gesture recognizer feeding a [`gesture::PanDriver`], which holds the
//!    coordinator's opaque interaction handle.
//! 3. A frame loop calling [`animation::AnimationDriver::advance`].

pub mod animation;
pub mod coordinator;
pub mod effect;
pub mod gesture;
pub mod geometry;
pub mod interaction;
pub mod screen;

pub mod prelude {
    pub use crate::animation::{AnimationDriver, SpringConfig, TimingFunction, Transition};
    pub use crate::coordinator::{
        CoordinatorState, NavOperation, TransitionCoordinator, TransitionDirection,
        TransitionOutcome, TransitionRequest,
    };
    pub use crate::effect::TransitionEffect;
    pub use crate::gesture::{GesturePhase, PanAxis, PanDriver, PanEvent};
    pub use crate::geometry::{Point, Rect};
    pub use crate::interaction::{InteractionError, InteractionHandle, COMMIT_THRESHOLD};
    pub use crate::screen::{container, screen, Container, ContainerHandle, Screen, ScreenHandle};
}

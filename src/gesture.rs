//! Pan-gesture input for interactive transitions.
//!
//! The host's gesture recognizer delivers a stream of [`PanEvent`]s; the
//! [`PanDriver`] normalizes the translation against the container extent
//! along its axis and forwards the phases to an [`InteractionHandle`]:
//! Began starts a session, Changed scrubs it, Ended decides commit or cancel.

use crate::coordinator::TransitionOutcome;
use crate::interaction::{InteractionError, InteractionHandle};

/// Lifecycle phase of a pan gesture
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GesturePhase {
    Began,
    Changed,
    Ended,
}

/// One pan gesture sample: phase plus cumulative translation
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PanEvent {
    pub phase: GesturePhase,
    /// Cumulative horizontal translation since the gesture began
    pub dx: f32,
    /// Cumulative vertical translation since the gesture began
    pub dy: f32,
}

impl PanEvent {
    pub fn began() -> Self {
        Self {
            phase: GesturePhase::Began,
            dx: 0.0,
            dy: 0.0,
        }
    }

    pub fn changed(dx: f32, dy: f32) -> Self {
        Self {
            phase: GesturePhase::Changed,
            dx,
            dy,
        }
    }

    pub fn ended(dx: f32, dy: f32) -> Self {
        Self {
            phase: GesturePhase::Ended,
            dx,
            dy,
        }
    }
}

/// Axis along which a pan drives transition progress
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanAxis {
    /// Left-edge pans driving pops
    Horizontal,
    /// Pull-down/pull-up pans driving dismissals
    Vertical,
}

impl PanAxis {
    /// The translation component this axis cares about
    pub fn translation(&self, event: &PanEvent) -> f32 {
        match self {
            PanAxis::Horizontal => event.dx,
            PanAxis::Vertical => event.dy,
        }
    }
}

/// Binds a gesture recognizer to an interaction handle.
///
/// `extent` is the container's size along the axis; progress is
/// `translation / extent`, the same normalization the stock edge-pan and
/// pull gestures use.
pub struct PanDriver {
    handle: InteractionHandle,
    axis: PanAxis,
    extent: f32,
}

impl PanDriver {
    pub fn new(handle: InteractionHandle, axis: PanAxis, extent: f32) -> Self {
        Self {
            handle,
            axis,
            extent,
        }
    }

    /// Progress fraction for a gesture sample
    pub fn fraction(&self, event: &PanEvent) -> f32 {
        if self.extent <= 0.0 {
            return 0.0;
        }
        self.axis.translation(event) / self.extent
    }

    /// Feed one gesture sample through. Returns the commit/cancel decision
    /// for Ended events, None for the others.
    pub fn handle_event(
        &self,
        event: &PanEvent,
    ) -> Result<Option<TransitionOutcome>, InteractionError> {
        match event.phase {
            GesturePhase::Began => {
                self.handle.begin()?;
                Ok(None)
            }
            GesturePhase::Changed => {
                self.handle.update(self.fraction(event))?;
                Ok(None)
            }
            GesturePhase::Ended => {
                let outcome = self.handle.end(self.fraction(event))?;
                Ok(Some(outcome))
            }
        }
    }
}

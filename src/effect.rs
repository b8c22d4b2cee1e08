//! The closed set of transition effects.
//!
//! Each variant describes one visual choreography as a progress closure over
//! the screens named in a [`TransitionRequest`]. Building an effect performs
//! the initial placement (container z-order, starting property values) and
//! returns the closure; the coordinator decides whether time or a gesture
//! drives it.

use crate::animation::{Animatable, ProgressFn};
use crate::coordinator::TransitionRequest;
use crate::geometry::{Point, Rect};
use crate::screen::CircleMask;

/// A transition effect, chosen once when the coordinator is built
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TransitionEffect {
    /// Destination fades in over the source; close fades the source out
    Fade,
    /// Destination slides up from below the source's bottom edge;
    /// close slides the source down to reveal the destination
    SlideDown,
    /// Destination slides in from the right edge; close reverses it,
    /// driven by back-navigation
    SlideLeft,
    /// Same geometry as SlideDown, driven interactively by a pull gesture
    Pull,
    /// A circular mask centered at `origin` grows until it covers the
    /// destination. The reverse direction falls back to the fade-out close.
    MaterialCircleReveal { origin: Point },
}

impl TransitionEffect {
    /// Whether this effect can be driven by a gesture.
    /// Only the gesture-bound variants opt in; the rest always run timed.
    pub fn supports_interaction(&self) -> bool {
        matches!(self, TransitionEffect::Pull | TransitionEffect::SlideLeft)
    }

    /// Perform initial placement for `request` and return the progress
    /// closure. The closure is total over any f32 input: eased values may
    /// overshoot [0, 1] for spring bounce, alpha is clamped.
    pub(crate) fn build(&self, request: &TransitionRequest) -> ProgressFn {
        if request.direction.is_closing() {
            self.build_close(request)
        } else {
            self.build_open(request)
        }
    }

    fn build_open(&self, request: &TransitionRequest) -> ProgressFn {
        let source = request.source.clone();
        let destination = request.destination.clone();

        match self {
            TransitionEffect::Fade => {
                request.container.borrow_mut().add_subview(&destination);
                destination.borrow_mut().alpha = 0.0;
                Box::new(move |p| {
                    destination.borrow_mut().alpha = p.clamp(0.0, 1.0);
                })
            }
            TransitionEffect::SlideDown | TransitionEffect::Pull => {
                request.container.borrow_mut().add_subview(&destination);
                let target = {
                    let mut frame = destination.borrow().frame;
                    frame.set_top(source.borrow().frame.top());
                    frame
                };
                let start = {
                    let mut frame = target;
                    frame.set_top(source.borrow().frame.bottom());
                    frame
                };
                destination.borrow_mut().frame = start;
                Box::new(move |p| {
                    destination.borrow_mut().frame = Rect::lerp(&start, &target, p);
                })
            }
            TransitionEffect::SlideLeft => {
                let container_frame = request.container.borrow().frame();
                request.container.borrow_mut().add_subview(&destination);
                let target = {
                    let mut frame = destination.borrow().frame;
                    frame.set_left(container_frame.left());
                    frame
                };
                let start = {
                    let mut frame = target;
                    frame.set_left(container_frame.right());
                    frame
                };
                destination.borrow_mut().frame = start;
                Box::new(move |p| {
                    destination.borrow_mut().frame = Rect::lerp(&start, &target, p);
                })
            }
            TransitionEffect::MaterialCircleReveal { origin } => {
                request.container.borrow_mut().add_subview(&destination);
                let origin = *origin;
                let max_radius = destination.borrow().frame.corner_distance(origin);
                destination.borrow_mut().mask = Some(CircleMask {
                    center: origin,
                    radius: 0.0,
                });
                Box::new(move |p| {
                    let mut dest = destination.borrow_mut();
                    if p >= 1.0 {
                        // Fully revealed, drop the mask
                        dest.mask = None;
                    } else {
                        dest.mask = Some(CircleMask {
                            center: origin,
                            radius: max_radius * p.max(0.0),
                        });
                    }
                })
            }
        }
    }

    fn build_close(&self, request: &TransitionRequest) -> ProgressFn {
        let source = request.source.clone();
        let destination = request.destination.clone();

        // The destination is already in place below the outgoing screen
        {
            let mut container = request.container.borrow_mut();
            container.add_subview(&destination);
            container.bring_to_front(&source);
        }

        match self {
            TransitionEffect::Fade | TransitionEffect::MaterialCircleReveal { .. } => {
                Box::new(move |p| {
                    source.borrow_mut().alpha = (1.0 - p).clamp(0.0, 1.0);
                })
            }
            TransitionEffect::SlideDown | TransitionEffect::Pull => {
                let start = source.borrow().frame;
                let target = {
                    let mut frame = start;
                    frame.set_top(destination.borrow().frame.bottom());
                    frame
                };
                Box::new(move |p| {
                    source.borrow_mut().frame = Rect::lerp(&start, &target, p);
                })
            }
            TransitionEffect::SlideLeft => {
                let container_frame = request.container.borrow().frame();
                let start = source.borrow().frame;
                let target = {
                    let mut frame = start;
                    frame.set_left(container_frame.right());
                    frame
                };
                Box::new(move |p| {
                    source.borrow_mut().frame = Rect::lerp(&start, &target, p);
                })
            }
        }
    }
}

//! Screens and the container that co-locates them during a transition.
//!
//! A [`Screen`] models the visual state a transition effect mutates: its frame
//! in container coordinates, its alpha, and an optional circular reveal mask.
//! Screens and containers are shared as `Rc<RefCell<..>>` handles because the
//! whole subsystem is single-threaded and callback-driven: gesture delivery,
//! driver steps and completion handlers all run on the host's main loop.

use std::cell::RefCell;
use std::rc::Rc;

use crate::geometry::{Point, Rect};

/// Circular mask used by the material reveal effect
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CircleMask {
    /// Center of the circle in container coordinates
    pub center: Point,
    /// Current radius
    pub radius: f32,
}

/// Visual state of one unit of user-visible content
#[derive(Debug, Clone, PartialEq)]
pub struct Screen {
    /// Frame in container coordinates
    pub frame: Rect,
    /// Opacity, 0.0 (invisible) to 1.0 (opaque)
    pub alpha: f32,
    /// Circular reveal mask; None means the screen is fully unmasked
    pub mask: Option<CircleMask>,
}

impl Screen {
    pub fn new(frame: Rect) -> Self {
        Self {
            frame,
            alpha: 1.0,
            mask: None,
        }
    }
}

/// Shared handle to a screen's visual state
pub type ScreenHandle = Rc<RefCell<Screen>>;

/// Create a screen handle with the given frame
pub fn screen(frame: Rect) -> ScreenHandle {
    Rc::new(RefCell::new(Screen::new(frame)))
}

/// The surface on which outgoing and incoming screens are co-located
/// while a transition runs. Subview order is z-order: last is frontmost.
#[derive(Default)]
pub struct Container {
    frame: Rect,
    subviews: Vec<ScreenHandle>,
}

impl Container {
    pub fn new(frame: Rect) -> Self {
        Self {
            frame,
            subviews: Vec::new(),
        }
    }

    pub fn frame(&self) -> Rect {
        self.frame
    }

    /// Extent along the horizontal axis
    pub fn width(&self) -> f32 {
        self.frame.width
    }

    /// Extent along the vertical axis
    pub fn height(&self) -> f32 {
        self.frame.height
    }

    /// Add a screen on top of the current subviews.
    /// Re-adding an already present screen moves it to the front instead.
    pub fn add_subview(&mut self, screen: &ScreenHandle) {
        self.remove_subview(screen);
        self.subviews.push(screen.clone());
    }

    /// Move an already added screen to the front
    pub fn bring_to_front(&mut self, screen: &ScreenHandle) {
        if let Some(index) = self.index_of(screen) {
            let handle = self.subviews.remove(index);
            self.subviews.push(handle);
        }
    }

    /// Remove a screen once the transition no longer needs it co-located
    pub fn remove_subview(&mut self, screen: &ScreenHandle) {
        if let Some(index) = self.index_of(screen) {
            self.subviews.remove(index);
        }
    }

    /// Z-order position of a screen, 0 is backmost
    pub fn index_of(&self, screen: &ScreenHandle) -> Option<usize> {
        self.subviews.iter().position(|s| Rc::ptr_eq(s, screen))
    }

    pub fn subview_count(&self) -> usize {
        self.subviews.len()
    }
}

/// Shared handle to a container
pub type ContainerHandle = Rc<RefCell<Container>>;

/// Create a container handle with the given frame
pub fn container(frame: Rect) -> ContainerHandle {
    Rc::new(RefCell::new(Container::new(frame)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rect() -> Rect {
        Rect::new(0.0, 0.0, 320.0, 480.0)
    }

    #[test]
    fn test_screen_defaults() {
        let s = Screen::new(rect());
        assert_eq!(s.alpha, 1.0);
        assert!(s.mask.is_none());
    }

    #[test]
    fn test_extent_queries() {
        let c = Container::new(Rect::new(0.0, 0.0, 320.0, 480.0));
        assert_eq!(c.width(), 320.0);
        assert_eq!(c.height(), 480.0);
        assert_eq!(c.frame(), Rect::new(0.0, 0.0, 320.0, 480.0));
    }

    #[test]
    fn test_add_subview_sets_z_order() {
        let mut c = Container::new(rect());
        let a = screen(rect());
        let b = screen(rect());

        c.add_subview(&a);
        c.add_subview(&b);

        assert_eq!(c.index_of(&a), Some(0));
        assert_eq!(c.index_of(&b), Some(1));
    }

    #[test]
    fn test_bring_to_front() {
        let mut c = Container::new(rect());
        let a = screen(rect());
        let b = screen(rect());

        c.add_subview(&a);
        c.add_subview(&b);
        c.bring_to_front(&a);

        assert_eq!(c.index_of(&a), Some(1));
        assert_eq!(c.index_of(&b), Some(0));
    }

    #[test]
    fn test_re_adding_moves_to_front() {
        let mut c = Container::new(rect());
        let a = screen(rect());
        let b = screen(rect());

        c.add_subview(&a);
        c.add_subview(&b);
        c.add_subview(&a);

        assert_eq!(c.subview_count(), 2);
        assert_eq!(c.index_of(&a), Some(1));
    }
}

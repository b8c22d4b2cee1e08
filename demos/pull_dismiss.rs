//! Pull-to-dismiss demo.
//!
//! Simulates the host side of an interactive dismissal: a modal screen is
//! dragged downward, the gesture ends past the halfway mark and the
//! transition commits. Run with `RUST_LOG=debug` to watch the lifecycle.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use passaggio::prelude::*;

fn main() {
    env_logger::init();

    let bounds = Rect::new(0.0, 0.0, 320.0, 480.0);
    let driver = AnimationDriver::new();
    let coordinator = Rc::new(RefCell::new(
        TransitionCoordinator::new(TransitionEffect::Pull, driver.clone()).duration(300.0),
    ));

    let surface = container(bounds);
    let underlying = screen(bounds);
    let modal = screen(bounds);
    let outcome = Rc::new(Cell::new(None));

    // The host starts the dismissal when the gesture begins
    {
        let coordinator = coordinator.clone();
        let surface = surface.clone();
        let underlying = underlying.clone();
        let modal = modal.clone();
        let outcome = outcome.clone();
        coordinator.clone().borrow().on_interactive_begin(move || {
            log::info!("gesture began, starting interactive dismissal");
            let request = TransitionRequest {
                container: surface.clone(),
                source: modal.clone(),
                destination: underlying.clone(),
                direction: TransitionDirection::Dismissing,
                duration_override: None,
            };
            let animator = coordinator.borrow_mut().provide_animator(request);
            let outcome = outcome.clone();
            animator.run(move |result| outcome.set(Some(result)));
        });
    }

    let pan = PanDriver::new(
        coordinator.borrow().interaction_handle(),
        PanAxis::Vertical,
        surface.borrow().height(),
    );

    // Finger drags the modal down past the commit threshold
    let samples = [
        PanEvent::began(),
        PanEvent::changed(0.0, 60.0),
        PanEvent::changed(0.0, 150.0),
        PanEvent::changed(0.0, 260.0),
        PanEvent::ended(0.0, 300.0),
    ];
    for event in &samples {
        match pan.handle_event(event) {
            Ok(Some(decision)) => log::info!("gesture ended: {:?}", decision),
            Ok(None) => log::info!(
                "modal top now at {:.0}",
                modal.borrow().frame.top()
            ),
            Err(err) => log::error!("gesture rejected: {}", err),
        }
    }

    // Host frame loop runs the commit remainder
    while driver.advance(16.0) {}

    println!(
        "transition outcome: {:?}, modal top: {:.0}, coordinator idle: {}",
        outcome.get(),
        modal.borrow().frame.top(),
        coordinator.borrow().is_idle()
    );
}

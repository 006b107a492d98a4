//! Example: Drive a scripted drag session through the controller.
//!
//! Run with: `RUST_LOG=debug cargo run --example drag_session`

use ringlight_core::{GestureError, GestureEvent, IntensityController, Size};
use std::time::{Duration, Instant};

const FRAME: Duration = Duration::from_millis(16);

fn main() -> Result<(), GestureError> {
    // Initialize logging (optional)
    env_logger::init();

    let mut controller = IntensityController::tweened();
    if let Err(e) = controller.set_interaction_width(400.0) {
        eprintln!("Keeping default span: {}", e);
    }

    let start = Instant::now();
    let mut now = start;
    controller.animator_mut().advance(now);

    // Drag right in small steps, then release near full brightness.
    let mut events = vec![GestureEvent::Start];
    events.extend((1..=19).map(|step| GestureEvent::Update {
        dx: step as f32 * 10.0,
    }));
    events.push(GestureEvent::End { dx: 190.0 });

    for event in events {
        controller.handle(event, now)?;
        now += FRAME;
        controller.animator_mut().advance(now);
    }

    let state = controller.state();
    println!(
        "Released: target={}, hide in {:?}",
        state.intensity,
        state.pending_hide.map(|p| p.duration)
    );

    // Run frames until everything has settled and the indicator is gone.
    while controller.needs_frames() {
        now += FRAME;
        controller.animator_mut().advance(now);
        if controller.tick(now) {
            println!("Indicator hidden after {:?}", now - start);
        }
    }

    let glow = controller.glow_layout(Size::new(400.0, 800.0));
    println!(
        "Settled: intensity={}, left band={}px, corner={}px",
        controller.displayed_intensity(),
        glow.edges.left.width,
        glow.corners.top_left.width
    );

    Ok(())
}

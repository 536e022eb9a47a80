//=========================================================================
// Clear Screen Demo
//
// Opens the window, clears it to a colour that drifts over time, logs
// translated input and runs a background worker alongside the frame loop.
//
// Controls:
// - Escape: quit
// - 1-9: switch cursor
// - F: cycle font kind
//
// Run with: RUST_LOG=debug cargo run --example clear_screen
//=========================================================================

use std::sync::Arc;
use std::time::Duration;

use aetheric_platform::core::cursor::CursorKind;
use aetheric_platform::prelude::*;
use log::{info, warn};

//=== Engine ==============================================================

struct ClearScreen {
    input: InputReceiver,
    results: Arc<Mutex<Vec<u64>>>,
    ready: Arc<Semaphore>,
}

impl FrameHandler for ClearScreen {
    fn startup(&mut self, controls: &mut SurfaceControls) -> Result<(), StartupError> {
        controls.set_font_size(14.0)?;
        // SAFETY: called with the GL context current.
        unsafe {
            gl::ClearColor(0.1, 0.1, 0.15, 1.0);
        }
        Ok(())
    }

    fn tick(&mut self, frame: &mut Frame<'_>) {
        for event in self.input.drain() {
            match event {
                InputEvent::KeyDown { key: KeyCode::Escape, .. } => frame.close(),
                InputEvent::KeyDown { key: KeyCode::KeyF, repeat: false, .. } => {
                    let next = match frame.font().kind {
                        FontKind::Small => FontKind::Regular,
                        FontKind::Regular => FontKind::Bold,
                        FontKind::Bold => FontKind::Small,
                    };
                    frame.set_font_type(next);
                    info!("Font now {:?}", frame.font());
                }
                InputEvent::KeyDown { key, repeat: false, .. } => {
                    if let Some(index) = digit_index(key) {
                        if !frame.set_cursor(index) {
                            warn!("No cursor at index {}", index);
                        }
                    }
                }
                other => log::debug!("{:?}", other),
            }
        }

        if self.ready.try_acquire() {
            let results = self.results.lock();
            info!("Worker produced {} values at frame {}", results.len(), frame.number());
        }
    }

    fn paint(&mut self, frame: &mut Frame<'_>) {
        let t = frame.elapsed_ticks() as f32 / 1000.0;
        // SAFETY: paint runs with the GL context current.
        unsafe {
            gl::ClearColor(0.1, 0.1 + 0.05 * t.sin().abs(), 0.15, 1.0);
            gl::Clear(gl::COLOR_BUFFER_BIT);
        }
    }

    fn shutdown(&mut self) {
        info!("Shutting down");
    }
}

fn digit_index(key: KeyCode) -> Option<usize> {
    let digits = [
        KeyCode::Digit1, KeyCode::Digit2, KeyCode::Digit3,
        KeyCode::Digit4, KeyCode::Digit5, KeyCode::Digit6,
        KeyCode::Digit7, KeyCode::Digit8, KeyCode::Digit9,
    ];
    digits.iter().position(|d| *d == key).map(|i| i % CursorKind::COUNT)
}

//=== Main ================================================================

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let (host, input) = HostBuilder::new()
        .with_title("Aetheric - clear screen")
        .with_size(800, 600)
        .with_tick_interval(Duration::from_millis(16))
        .build()?;

    let results = Arc::new(Mutex::new(Vec::new()));
    let ready = Arc::new(Semaphore::new(0));

    let worker = spawn_named(
        "fibonacci",
        |(results, ready): (Arc<Mutex<Vec<u64>>>, Arc<Semaphore>)| {
            let (mut a, mut b) = (0u64, 1u64);
            for _ in 0..50 {
                results.lock().push(a);
                (a, b) = (b, a + b);
                std::thread::sleep(Duration::from_millis(5));
            }
            ready.release();
            0
        },
        (Arc::clone(&results), Arc::clone(&ready)),
    )?;

    let mut engine = ClearScreen { input, results, ready };
    host.run(&mut engine)?;

    let code = worker.join()?;
    info!("Worker exited with {}", code);
    Ok(())
}

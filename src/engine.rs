//=========================================================================
// Aetheric Host
//
// Entry point: configures and runs the platform layer for one engine.
//
// Architecture:
// ```text
//     HostBuilder  ──build()──>  (Host, InputReceiver)
//         │                        │
//         ├─ with_title()          └─ run(&mut handler)
//         ├─ with_size()                 creates window + GL context
//         ├─ with_tick_interval()        ticks / paints the handler
//         ├─ with_vsync()                blocks until close
//         └─ with_gl_version()
// ```
//
// Exactly one host may be live per process: `build()` claims it and the
// claim is released when the `Host` is dropped (after `run` returns).
//
//=========================================================================

//=== External Dependencies ===============================================

use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use log::info;

//=== Internal Dependencies ===============================================

use crate::core::platform_bridge::{input_queue, HostError, InputReceiver, InputSender};
use crate::core::surface::FrameHandler;
use crate::platform::Platform;

//=== HostConfig ==========================================================

/// Settings the platform layer runs with.
#[derive(Debug, Clone, PartialEq)]
pub struct HostConfig {
    title: String,
    size: (u32, u32),
    tick_interval: Duration,
    vsync: bool,
    gl_version: (u8, u8),
}

impl HostConfig {
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Initial window size in physical pixels.
    pub fn size(&self) -> (u32, u32) {
        self.size
    }

    pub fn tick_interval(&self) -> Duration {
        self.tick_interval
    }

    pub fn vsync(&self) -> bool {
        self.vsync
    }

    /// Requested desktop GL version as (major, minor).
    pub fn gl_version(&self) -> (u8, u8) {
        self.gl_version
    }
}

impl Default for HostConfig {
    fn default() -> Self {
        Self {
            title: String::from("Aetheric"),
            size: (1024, 768),
            tick_interval: Duration::from_millis(16),
            vsync: true,
            gl_version: (3, 2),
        }
    }
}

//=== HostBuilder =========================================================

/// Builder for configuring and constructing a [`Host`].
///
/// # Default Values
///
/// - **Title**: "Aetheric"
/// - **Size**: 1024 x 768
/// - **Tick interval**: 16 ms
/// - **VSync**: on
/// - **GL version**: 3.2 (GLES fallback)
///
/// # Examples
///
/// ```no_run
/// use std::time::Duration;
/// use aetheric_platform::{Frame, FrameHandler, HostBuilder};
///
/// struct Game;
///
/// impl FrameHandler for Game {
///     fn tick(&mut self, frame: &mut Frame<'_>) {
///         if frame.elapsed_ticks() > 5_000 {
///             frame.close();
///         }
///     }
/// }
///
/// let (host, _input) = HostBuilder::new()
///     .with_title("Demo")
///     .with_tick_interval(Duration::from_millis(10))
///     .build()?;
///
/// host.run(&mut Game)?;
/// # Ok::<(), aetheric_platform::HostError>(())
/// ```
#[derive(Debug, Clone)]
pub struct HostBuilder {
    config: HostConfig,
}

impl HostBuilder {
    /// Creates a new builder with default settings.
    pub fn new() -> Self {
        Self {
            config: HostConfig::default(),
        }
    }

    /// Sets the window title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.config.title = title.into();
        self
    }

    /// Sets the initial window size in physical pixels.
    ///
    /// # Panics
    ///
    /// Panics if either dimension is zero.
    pub fn with_size(mut self, width: u32, height: u32) -> Self {
        assert!(width > 0 && height > 0, "Window size must be positive, got {}x{}", width, height);
        self.config.size = (width, height);
        self
    }

    /// Sets the fixed interval between ticks.
    ///
    /// Ticks that fall more than one interval behind are dropped rather
    /// than replayed.
    ///
    /// Default: 16 ms
    ///
    /// # Panics
    ///
    /// Panics if `interval` is zero.
    pub fn with_tick_interval(mut self, interval: Duration) -> Self {
        assert!(!interval.is_zero(), "Tick interval must be positive");
        self.config.tick_interval = interval;
        self
    }

    /// Enables or disables waiting for vertical sync on buffer swaps.
    pub fn with_vsync(mut self, vsync: bool) -> Self {
        self.config.vsync = vsync;
        self
    }

    /// Sets the desktop OpenGL version to request.
    ///
    /// # Panics
    ///
    /// Panics if `major` is zero.
    pub fn with_gl_version(mut self, major: u8, minor: u8) -> Self {
        assert!(major > 0, "GL major version must be positive");
        self.config.gl_version = (major, minor);
        self
    }

    pub fn config(&self) -> &HostConfig {
        &self.config
    }

    /// Builds the host and the engine end of its input queue.
    ///
    /// # Errors
    ///
    /// [`HostError::AlreadyRunning`] while another `Host` is alive.
    pub fn build(self) -> Result<(Host, InputReceiver), HostError> {
        let claim = HostClaim::acquire().ok_or(HostError::AlreadyRunning)?;

        info!(
            "Building host ({}x{}, tick {:?}, vsync {})",
            self.config.size.0, self.config.size.1, self.config.tick_interval, self.config.vsync
        );

        let (sender, receiver) = input_queue();
        let host = Host {
            config: self.config,
            input_sender: sender,
            _claim: claim,
        };
        Ok((host, receiver))
    }
}

impl Default for HostBuilder {
    fn default() -> Self {
        Self::new()
    }
}

//=== HostClaim ===========================================================

static HOST_CLAIMED: AtomicBool = AtomicBool::new(false);

/// Process-wide token for the single live host.
#[derive(Debug)]
struct HostClaim(());

impl HostClaim {
    fn acquire() -> Option<Self> {
        HOST_CLAIMED
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| Self(()))
    }
}

impl Drop for HostClaim {
    fn drop(&mut self) {
        HOST_CLAIMED.store(false, Ordering::Release);
    }
}

//=== Host ================================================================

/// The process's platform layer: one window, one GL context, one input
/// queue.
///
/// Create via [`HostBuilder`].
#[derive(Debug)]
pub struct Host {
    config: HostConfig,
    input_sender: InputSender,
    _claim: HostClaim,
}

impl Host {
    pub fn config(&self) -> &HostConfig {
        &self.config
    }

    /// Runs the event loop on the calling thread until the window closes.
    ///
    /// # Lifecycle
    ///
    /// 1. Creates the window and GL context
    /// 2. Calls `handler.startup`; success marks the surface ready
    /// 3. Ticks every interval and paints after each tick
    /// 4. On close (OS or `Frame::close`): `handler.shutdown` (if startup
    ///    succeeded), then returns
    ///
    /// Background threads the engine spawned are still running when this
    /// returns; join them before exiting.
    ///
    /// # Errors
    ///
    /// Any [`HostError`]: event loop failure, GL context creation failure
    /// (fatal, no degraded mode), or a failed `startup`.
    ///
    /// # Panics
    ///
    /// Winit panics if called off the main thread on macOS.
    pub fn run<H: FrameHandler + ?Sized>(self, handler: &mut H) -> Result<(), HostError> {
        info!("Starting host runtime (tick {:?})", self.config.tick_interval);

        let Host { config, input_sender, _claim } = self;
        let result = Platform::new(config, input_sender, handler).run();

        info!("Host shutdown complete");
        result
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

//=========================================================================
// Platform Bridge Interface
//=========================================================================
//
// Host-level error type returned by `Host::run`.
//
// Kept free of windowing types: event loop failures cross this boundary
// boxed, so core code never names the backend crate.
//
//=========================================================================

//=== Internal Dependencies ===============================================

use crate::core::surface::{BackendError, StartupError, SurfaceError};

//=== HostError ===========================================================

/// Host initialization and runtime errors.
///
/// All variants are fatal: the event loop has exited (or never started)
/// when one of these is returned.
#[derive(Debug, thiserror::Error)]
pub enum HostError {
    /// Event loop creation failed (OS-level issue, or not the main thread).
    #[error("event loop creation failed: {0}")]
    EventLoopCreation(#[source] BackendError),

    /// Event loop terminated abnormally.
    #[error("event loop error: {0}")]
    EventLoopExecution(#[source] BackendError),

    /// Window or GL context could not be created or presented.
    #[error(transparent)]
    Surface(#[from] SurfaceError),

    /// The frame handler's `startup` rejected initialization.
    #[error("engine startup failed: {0}")]
    Startup(#[source] StartupError),

    /// A host is already live in this process.
    #[error("a host is already running in this process")]
    AlreadyRunning,
}

//=========================================================================
// Unit Tests
//=========================================================================

//=========================================================================
// Concurrency Primitives
//=========================================================================
//
// Thin ownership-respecting wrappers used by the engine for background
// work: worker threads with an integer result, a non-reentrant mutex and
// a counting semaphore. Nothing here knows about windows or GL.
//
// Suspension points (all blocking, none cancelable):
//   ThreadHandle::join, Mutex::lock (contended), Semaphore::acquire (zero)
//
// Caller precondition violations:
//   - join twice          → does not compile (`join(self)`)
//   - unlock without lock → does not compile (guard-based unlock)
//   - recursive lock      → panics
//   - release overflow    → panics
//
//=========================================================================

//=== Module Declarations =================================================

mod mutex;
mod semaphore;
mod thread;

//=== Public API ==========================================================

pub use mutex::{Mutex, MutexGuard};
pub use semaphore::Semaphore;
pub use thread::{spawn, spawn_named, ThreadHandle};

//=== SyncError ===========================================================

/// Failures reported by the concurrency primitives.
#[derive(Debug, thiserror::Error)]
pub enum SyncError {
    /// The OS could not allocate the thread; nothing was started.
    #[error("failed to spawn thread '{name}': {source}")]
    Spawn {
        name: String,
        #[source]
        source: std::io::Error,
    },

    /// The worker panicked, so it never produced a result.
    #[error("thread '{name}' panicked before returning a result")]
    ThreadPanicked { name: String },
}

//=========================================================================
// Thread Handle
//=========================================================================
//
// Spawns native worker threads that run `f(data)` and yield exactly one
// integer result.
//
// Architecture:
//   spawn(f, data) → ThreadHandle ──join()──> i32
//
// `join` consumes the handle, so a result can be read at most once and a
// second join does not compile. A handle dropped without joining detaches
// the thread (logged, never killed).
//
//=========================================================================

//=== External Dependencies ===============================================

use std::thread::{self, JoinHandle};

use log::{debug, warn};

//=== Internal Dependencies ===============================================

use super::SyncError;

//=== ThreadHandle ========================================================

/// Ownership record for a spawned worker and its eventual result.
///
/// Workers must never touch the render surface; they report back through
/// caller-supplied data guarded by [`Mutex`](super::Mutex) or
/// [`Semaphore`](super::Semaphore).
#[derive(Debug)]
pub struct ThreadHandle {
    inner: JoinHandle<i32>,
    label: DetachWarning,
}

impl ThreadHandle {
    /// Blocks until the worker returns and hands back its result.
    ///
    /// Consuming `self` is what makes the result exactly-once: the
    /// precondition "join at most once" is enforced at compile time.
    ///
    /// # Errors
    ///
    /// [`SyncError::ThreadPanicked`] if the worker panicked instead of
    /// returning.
    pub fn join(self) -> Result<i32, SyncError> {
        let ThreadHandle { inner, label } = self;
        let name = label.disarm();

        match inner.join() {
            Ok(result) => {
                debug!(target: "sync", "Thread '{}' joined with result {}", name, result);
                Ok(result)
            }
            Err(_) => {
                warn!(target: "sync", "Thread '{}' panicked before returning", name);
                Err(SyncError::ThreadPanicked { name })
            }
        }
    }

    /// Name given at spawn time (`"worker"` when spawned unnamed).
    pub fn name(&self) -> &str {
        &self.label.name
    }

    /// Returns `true` once the worker function has returned (or panicked).
    pub fn is_finished(&self) -> bool {
        self.inner.is_finished()
    }
}

/// Thread name that logs a detach warning unless disarmed by `join`.
#[derive(Debug)]
struct DetachWarning {
    name: String,
    armed: bool,
}

impl DetachWarning {
    fn new(name: &str) -> Self {
        Self { name: name.to_owned(), armed: true }
    }

    fn disarm(mut self) -> String {
        self.armed = false;
        std::mem::take(&mut self.name)
    }
}

impl Drop for DetachWarning {
    fn drop(&mut self) {
        if self.armed {
            warn!(
                target: "sync",
                "Thread '{}' handle dropped without join; thread detached",
                self.name
            );
        }
    }
}

//=== Spawning ============================================================

/// Starts a native thread running `f(data)`.
///
/// # Errors
///
/// [`SyncError::Spawn`] if the OS refuses to create the thread. No handle
/// exists in that case.
pub fn spawn<F, T>(f: F, data: T) -> Result<ThreadHandle, SyncError>
where
    F: FnOnce(T) -> i32 + Send + 'static,
    T: Send + 'static,
{
    spawn_named("worker", f, data)
}

/// Like [`spawn`], but names the OS thread (visible in debuggers/panics).
pub fn spawn_named<F, T>(name: &str, f: F, data: T) -> Result<ThreadHandle, SyncError>
where
    F: FnOnce(T) -> i32 + Send + 'static,
    T: Send + 'static,
{
    let inner = thread::Builder::new()
        .name(name.to_owned())
        .spawn(move || f(data))
        .map_err(|source| SyncError::Spawn {
            name: name.to_owned(),
            source,
        })?;

    debug!(target: "sync", "Spawned thread '{}'", name);

    Ok(ThreadHandle {
        inner,
        label: DetachWarning::new(name),
    })
}

//=========================================================================
// Unit Tests
//=========================================================================

//=========================================================================
// Mutex
//=========================================================================
//
// Binary, non-reentrant exclusive lock with RAII guards.
//
// Lock/unlock balance is structural: the only way to unlock is to drop
// (or pass to `Mutex::unlock`) the guard returned by `lock`. Relocking
// from the thread that already holds the lock panics instead of
// deadlocking silently.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::cell::Cell;
use std::ops::{Deref, DerefMut};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{self, PoisonError};

//=== Thread Tokens =======================================================
//
// Every thread gets a non-zero token on first use; zero means "unowned".
//

static NEXT_THREAD_TOKEN: AtomicU64 = AtomicU64::new(1);

thread_local! {
    static THREAD_TOKEN: Cell<u64> = const { Cell::new(0) };
}

fn current_thread_token() -> u64 {
    THREAD_TOKEN.with(|token| {
        if token.get() == 0 {
            token.set(NEXT_THREAD_TOKEN.fetch_add(1, Ordering::Relaxed));
        }
        token.get()
    })
}

//=== Mutex ===============================================================

/// Exclusive lock around `T` (use `Mutex<()>` for a bare critical section).
///
/// # Precondition
///
/// Non-reentrant: calling [`lock`](Self::lock) while the current thread
/// already holds the guard is a caller error and panics.
#[derive(Debug, Default)]
pub struct Mutex<T = ()> {
    inner: sync::Mutex<T>,
    owner: AtomicU64,
}

impl<T> Mutex<T> {
    pub fn new(value: T) -> Self {
        Self {
            inner: sync::Mutex::new(value),
            owner: AtomicU64::new(0),
        }
    }

    /// Blocks until the lock is acquired.
    ///
    /// # Panics
    ///
    /// If the calling thread already holds this mutex.
    pub fn lock(&self) -> MutexGuard<'_, T> {
        let me = current_thread_token();
        assert!(
            self.owner.load(Ordering::Acquire) != me,
            "Mutex::lock called recursively from the thread holding it"
        );

        // A panicking holder does not invalidate the data for our callers.
        let guard = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
        self.owner.store(me, Ordering::Release);
        MutexGuard { owner: &self.owner, guard }
    }

    /// Acquires the lock only if it is free right now.
    pub fn try_lock(&self) -> Option<MutexGuard<'_, T>> {
        let guard = match self.inner.try_lock() {
            Ok(guard) => guard,
            Err(sync::TryLockError::Poisoned(poisoned)) => poisoned.into_inner(),
            Err(sync::TryLockError::WouldBlock) => return None,
        };
        self.owner.store(current_thread_token(), Ordering::Release);
        Some(MutexGuard { owner: &self.owner, guard })
    }

    /// Releases the lock held by `guard`. Same as dropping it.
    pub fn unlock(guard: MutexGuard<'_, T>) {
        drop(guard);
    }

    pub fn into_inner(self) -> T {
        self.inner.into_inner().unwrap_or_else(PoisonError::into_inner)
    }
}

//=== MutexGuard ==========================================================

/// Proof of exclusive access; the lock is released when this drops.
pub struct MutexGuard<'a, T> {
    owner: &'a AtomicU64,
    guard: sync::MutexGuard<'a, T>,
}

impl<T> Deref for MutexGuard<'_, T> {
    type Target = T;

    fn deref(&self) -> &T {
        &self.guard
    }
}

impl<T> DerefMut for MutexGuard<'_, T> {
    fn deref_mut(&mut self) -> &mut T {
        &mut self.guard
    }
}

impl<T> Drop for MutexGuard<'_, T> {
    fn drop(&mut self) {
        // Cleared before the inner guard releases the lock.
        self.owner.store(0, Ordering::Release);
    }
}

impl<T: std::fmt::Debug> std::fmt::Debug for MutexGuard<'_, T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("MutexGuard").field(&*self.guard).finish()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

//=========================================================================
// Semaphore
//=========================================================================
//
// Counting semaphore: `acquire` takes one unit (blocking while the count
// is zero), `release` returns one unit and wakes at most one waiter.
//
// No timeout: callers that need one check their deadline before blocking.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::sync::{Condvar, Mutex, PoisonError};

//=== Semaphore ===========================================================

#[derive(Debug, Default)]
pub struct Semaphore {
    count: Mutex<usize>,
    available: Condvar,
}

impl Semaphore {
    /// Creates a semaphore holding `initial` units.
    pub fn new(initial: usize) -> Self {
        Self {
            count: Mutex::new(initial),
            available: Condvar::new(),
        }
    }

    /// Takes one unit, blocking while none are available.
    pub fn acquire(&self) {
        let count = self.count.lock().unwrap_or_else(PoisonError::into_inner);
        let mut count = self
            .available
            .wait_while(count, |c| *c == 0)
            .unwrap_or_else(PoisonError::into_inner);
        *count -= 1;
    }

    /// Takes one unit if available; never blocks.
    pub fn try_acquire(&self) -> bool {
        let mut count = self.count.lock().unwrap_or_else(PoisonError::into_inner);
        if *count == 0 {
            return false;
        }
        *count -= 1;
        true
    }

    /// Returns one unit and wakes at most one blocked acquirer.
    ///
    /// # Panics
    ///
    /// If the count would overflow `usize` (release without bound).
    pub fn release(&self) {
        let mut count = self.count.lock().unwrap_or_else(PoisonError::into_inner);
        *count = count
            .checked_add(1)
            .unwrap_or_else(|| panic!("Semaphore::release overflowed the unit count"));
        drop(count);
        self.available.notify_one();
    }

    /// Units currently available (a snapshot; may change immediately).
    pub fn available(&self) -> usize {
        *self.count.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::sync::spawn;
    use crossbeam_channel::bounded;
    use std::sync::Arc;
    use std::time::Duration;

    #[test]
    fn initial_value_is_available() {
        let sem = Semaphore::new(2);
        assert_eq!(sem.available(), 2);
        assert!(sem.try_acquire());
        assert!(sem.try_acquire());
        assert!(!sem.try_acquire());
    }

    #[test]
    fn three_releases_allow_three_acquires() {
        let sem = Semaphore::new(0);
        for _ in 0..3 {
            sem.release();
        }

        for _ in 0..3 {
            sem.acquire();
        }
        assert_eq!(sem.available(), 0);
        assert!(!sem.try_acquire(), "a fourth acquire must not succeed without a release");
    }

    #[test]
    fn fourth_acquire_blocks_until_release() {
        let sem = Arc::new(Semaphore::new(0));
        for _ in 0..3 {
            sem.release();
        }
        for _ in 0..3 {
            sem.acquire();
        }

        let (tx, rx) = bounded(1);
        let shared = Arc::clone(&sem);
        let waiter = spawn(
            move |s: Arc<Semaphore>| {
                s.acquire();
                tx.send(()).unwrap();
                0
            },
            shared,
        )
        .unwrap();

        assert!(
            rx.recv_timeout(Duration::from_millis(50)).is_err(),
            "acquire on an empty semaphore returned without a release"
        );

        sem.release();
        assert!(rx.recv_timeout(Duration::from_secs(5)).is_ok());
        assert_eq!(waiter.join().unwrap(), 0);
    }

    #[test]
    fn release_wakes_one_waiter_per_unit() {
        let sem = Arc::new(Semaphore::new(0));
        let (tx, rx) = bounded(2);

        let waiters: Vec<_> = (0..2)
            .map(|_| {
                let tx = tx.clone();
                spawn(
                    move |s: Arc<Semaphore>| {
                        s.acquire();
                        tx.send(()).unwrap();
                        0
                    },
                    Arc::clone(&sem),
                )
                .unwrap()
            })
            .collect();

        sem.release();
        assert!(rx.recv_timeout(Duration::from_secs(5)).is_ok());
        assert!(
            rx.recv_timeout(Duration::from_millis(50)).is_err(),
            "one release woke two waiters"
        );

        sem.release();
        assert!(rx.recv_timeout(Duration::from_secs(5)).is_ok());

        for waiter in waiters {
            assert_eq!(waiter.join().unwrap(), 0);
        }
    }
}

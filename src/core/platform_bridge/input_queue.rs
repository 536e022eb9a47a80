//=========================================================================
// Input Queue
//=========================================================================
//
// Ordered channel carrying translated input from the platform to the
// engine.
//
// Architecture:
//   InputTranslator → InputBuffer → InputSender ──▶ InputReceiver → engine
//
// The channel is unbounded. A bounded queue would have to drop events
// when the engine stalls, and dropping a key-up leaves that key stuck.
// Order is exactly the OS delivery order.
//
//=========================================================================

//=== External Dependencies ===============================================

use crossbeam_channel::{unbounded, Receiver, RecvTimeoutError, Sender, TryRecvError};
use log::{trace, warn};
use std::time::Duration;

//=== Internal Dependencies ===============================================

use crate::core::input::InputEvent;

//=== Construction ========================================================

/// Creates a connected sender/receiver pair.
pub(crate) fn input_queue() -> (InputSender, InputReceiver) {
    let (tx, rx) = unbounded();
    (
        InputSender { tx, disconnected: false },
        InputReceiver { rx },
    )
}

//=== InputSender =========================================================

/// Platform-side end of the queue.
#[derive(Debug)]
pub(crate) struct InputSender {
    tx: Sender<InputEvent>,
    disconnected: bool,
}

impl InputSender {
    /// Sends `events` in order. Returns how many were delivered.
    ///
    /// If the receiver is gone, the events are dropped and a warning is
    /// logged once; the platform keeps running so the window can close.
    pub(crate) fn send_all<I>(&mut self, events: I) -> usize
    where
        I: IntoIterator<Item = InputEvent>,
    {
        let mut sent = 0;
        let mut dropped = 0;

        for event in events {
            if self.disconnected {
                dropped += 1;
                continue;
            }
            match self.tx.send(event) {
                Ok(()) => sent += 1,
                Err(_) => {
                    self.disconnected = true;
                    dropped += 1;
                }
            }
        }

        if dropped > 0 {
            warn!(
                target: "platform::input",
                "Input receiver dropped, discarding {} events",
                dropped
            );
        } else if sent > 0 {
            trace!(target: "platform::input", "Queued {} input events", sent);
        }
        sent
    }

    #[cfg(test)]
    pub(crate) fn is_disconnected(&self) -> bool {
        self.disconnected
    }
}

//=== InputReceiver =======================================================

/// Engine-side end of the queue.
///
/// `Send`, so the engine may consume input on any thread. Dropping it is
/// allowed; later input is discarded.
#[derive(Debug, Clone)]
pub struct InputReceiver {
    rx: Receiver<InputEvent>,
}

impl InputReceiver {
    /// Next event if one is queued.
    pub fn try_recv(&self) -> Option<InputEvent> {
        match self.rx.try_recv() {
            Ok(event) => Some(event),
            Err(TryRecvError::Empty | TryRecvError::Disconnected) => None,
        }
    }

    /// Waits up to `timeout` for the next event. `None` on timeout or once
    /// the host has shut down and the queue is empty.
    pub fn recv_timeout(&self, timeout: Duration) -> Option<InputEvent> {
        match self.rx.recv_timeout(timeout) {
            Ok(event) => Some(event),
            Err(RecvTimeoutError::Timeout | RecvTimeoutError::Disconnected) => None,
        }
    }

    /// Iterates over everything queued right now, in delivery order.
    pub fn drain(&self) -> impl Iterator<Item = InputEvent> + '_ {
        self.rx.try_iter()
    }

    pub fn len(&self) -> usize {
        self.rx.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rx.is_empty()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

//! # Retriggerable Timer
//!
//! A single countdown owned by the scheduler. Each arming runs on its own
//! background task that delivers a tick into a one-slot channel; stopping
//! aborts that task. A firing can race a stop, so two guards apply:
//!
//! - `cancel()` drains an already-delivered tick whenever `stop()` reports
//!   that nothing was pending anymore.
//! - Every tick carries the generation of the arming that produced it, and
//!   `expired()` drops ticks from superseded armings.
//!
//! All mutation goes through `&mut self`, so the owning task is the only one
//! that can stop or reset it.
//!
//! - **Version**: 1.0.0
//! - **Since**: 0.1.0

use log::debug;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::sleep;

/// Expiry signal for one arming
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Tick {
    generation: u64,
}

pub struct RetriggerTimer {
    tx: mpsc::Sender<Tick>,
    rx: mpsc::Receiver<Tick>,
    handle: Option<JoinHandle<()>>,
    generation: u64,
    period: Option<Duration>,
}

impl RetriggerTimer {
    /// Create an unarmed timer
    pub fn new() -> Self {
        let (tx, rx) = mpsc::channel(1);
        RetriggerTimer {
            tx,
            rx,
            handle: None,
            generation: 0,
            period: None,
        }
    }

    /// Whether a firing is currently scheduled or undelivered
    #[cfg(test)]
    pub(crate) fn is_armed(&self) -> bool {
        self.handle.is_some()
    }

    /// Duration of the most recent arming
    #[cfg(test)]
    pub(crate) fn period(&self) -> Option<Duration> {
        self.period
    }

    /// Number of armings so far
    #[cfg(test)]
    pub(crate) fn generation(&self) -> u64 {
        self.generation
    }

    /// Deliver a tick for the current arming, as if it fired while stopped
    #[cfg(test)]
    pub(crate) fn fire_now(&self) {
        let _ = self.tx.try_send(Tick {
            generation: self.generation,
        });
    }

    /// Cancel any pending firing and arm for `period`.
    ///
    /// Must be called from within a tokio runtime.
    pub fn reset(&mut self, period: Duration) {
        self.cancel();

        self.generation += 1;
        self.period = Some(period);

        let tx = self.tx.clone();
        let tick = Tick {
            generation: self.generation,
        };
        self.handle = Some(tokio::spawn(async move {
            sleep(period).await;
            // Only fails once the timer itself is dropped
            let _ = tx.send(tick).await;
        }));
    }

    /// Abort the pending firing.
    ///
    /// Returns `true` if the firing was still pending, `false` if the timer
    /// was not armed or had already fired.
    pub fn stop(&mut self) -> bool {
        match self.handle.take() {
            Some(handle) => {
                let pending = !handle.is_finished();
                handle.abort();
                debug!("Timer stopped ({:?} arming, pending: {})", self.period, pending);
                pending
            }
            None => false,
        }
    }

    /// Stop, then discard a tick that was delivered before the stop took effect
    pub fn cancel(&mut self) {
        if !self.stop() {
            let drained = self.drain();
            if drained > 0 {
                debug!("Discarded {} stale timer tick(s)", drained);
            }
        }
    }

    fn drain(&mut self) -> usize {
        let mut drained = 0;
        while self.rx.try_recv().is_ok() {
            drained += 1;
        }
        drained
    }

    /// Wait for the current arming to fire.
    ///
    /// Never completes while the timer is stopped. Cancel-safe, so it can sit
    /// in a `tokio::select!` branch.
    pub async fn expired(&mut self) {
        loop {
            match self.rx.recv().await {
                Some(tick) if tick.generation == self.generation => {
                    self.handle = None;
                    return;
                }
                Some(tick) => {
                    debug!(
                        "Ignoring tick from superseded arming {} (current {})",
                        tick.generation, self.generation
                    );
                }
                // `self.tx` keeps the channel open
                None => std::future::pending::<()>().await,
            }
        }
    }
}

impl Default for RetriggerTimer {
    fn default() -> Self {
        RetriggerTimer::new()
    }
}

impl Drop for RetriggerTimer {
    fn drop(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.abort();
        }
    }
}

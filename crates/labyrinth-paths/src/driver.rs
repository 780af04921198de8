//! Runs a trace on a worker thread and paces its steps over a channel.

use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender, SyncSender, TryRecvError};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use labyrinth_core::{Cell, OccupancyGrid};

use crate::Algorithm;
use crate::trace::SolveStep;

/// Settings for a [`TraceDriver`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DriverConfig {
    /// Delay before forwarding each step.
    pub interval: Duration,
    /// Bound of the step channel.
    pub capacity: usize,
}

impl Default for DriverConfig {
    fn default() -> Self {
        Self {
            interval: Duration::from_millis(100),
            capacity: 64,
        }
    }
}

impl DriverConfig {
    /// Map a 0–100 speed slider onto a 10–1000 ms interval.
    pub fn interval_from_slider(percent: u32) -> Duration {
        let percent = u64::from(percent.min(100));
        Duration::from_millis(percent * 990 / 100 + 10)
    }
}

/// Message sent from the worker to the consumer.
#[derive(Debug, Clone, PartialEq)]
pub enum DriverEvent {
    Step(SolveStep),
    /// The trace ran to completion. `path` is empty if the target was
    /// unreachable.
    Finished { path: Vec<Cell> },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Control {
    Skip,
    Cancel,
}

/// Owns a worker thread that pulls a [`Trace`](crate::Trace) and forwards
/// each step.
///
/// The worker searches its own copy of the grid. Dropping the driver, or
/// calling [`cancel`](Self::cancel), makes the worker stop at the next step
/// boundary; no `Finished` event is sent in that case.
pub struct TraceDriver {
    rx: Receiver<DriverEvent>,
    ctrl: Sender<Control>,
    handle: JoinHandle<()>,
}

impl TraceDriver {
    /// Start tracing `algorithm` from `source` to `target` over `grid`.
    pub fn spawn(
        algorithm: Algorithm,
        grid: OccupancyGrid,
        source: Cell,
        target: Cell,
        config: DriverConfig,
    ) -> Self {
        let (tx, rx) = mpsc::sync_channel(config.capacity.max(1));
        let (ctrl, ctrl_rx) = mpsc::channel();
        let handle = thread::spawn(move || {
            run_worker(algorithm, &grid, source, target, config.interval, &tx, &ctrl_rx);
        });
        log::debug!("trace driver started: {algorithm} {source} -> {target}");
        Self { rx, ctrl, handle }
    }

    /// Forward the remaining steps without delay.
    pub fn skip(&self) {
        let _ = self.ctrl.send(Control::Skip);
    }

    /// Stop the worker at the next step boundary.
    pub fn cancel(&self) {
        let _ = self.ctrl.send(Control::Cancel);
    }

    /// Block for the next event. `None` once the worker has exited and the
    /// channel is drained.
    pub fn recv(&self) -> Option<DriverEvent> {
        self.rx.recv().ok()
    }

    /// The next event if one is ready.
    pub fn try_recv(&self) -> Option<DriverEvent> {
        match self.rx.try_recv() {
            Ok(ev) => Some(ev),
            Err(TryRecvError::Empty | TryRecvError::Disconnected) => None,
        }
    }

    /// Blocking iterator over the remaining events.
    pub fn iter(&self) -> impl Iterator<Item = DriverEvent> + '_ {
        self.rx.iter()
    }

    /// Stop the worker and wait for it to exit. Undelivered events are
    /// discarded.
    pub fn join(self) {
        let Self { rx, ctrl, handle } = self;
        let _ = ctrl.send(Control::Cancel);
        drop(rx);
        drop(ctrl);
        if handle.join().is_err() {
            log::warn!("trace driver worker panicked");
        }
    }
}

fn run_worker(
    algorithm: Algorithm,
    grid: &OccupancyGrid,
    source: Cell,
    target: Cell,
    interval: Duration,
    tx: &SyncSender<DriverEvent>,
    ctrl: &Receiver<Control>,
) {
    let mut skipping = false;
    let mut trace = algorithm.traced_solve(grid, source, target);
    while let Some(step) = trace.next() {
        if !pace(ctrl, interval, &mut skipping) {
            log::debug!("trace driver stopped after {} steps", trace.steps());
            return;
        }
        log::trace!(
            "step {} -> {} relaxed={}",
            step.current,
            step.selected,
            step.relaxed
        );
        if tx.send(DriverEvent::Step(step)).is_err() {
            return;
        }
    }
    let path = trace.path();
    log::debug!(
        "trace driver finished: {} steps, path length {}",
        trace.steps(),
        path.len()
    );
    let _ = tx.send(DriverEvent::Finished { path });
}

/// Wait out one step interval while watching for control messages.
///
/// Returns `false` when the worker should stop.
fn pace(ctrl: &Receiver<Control>, interval: Duration, skipping: &mut bool) -> bool {
    loop {
        let msg = if *skipping || interval.is_zero() {
            match ctrl.try_recv() {
                Ok(m) => m,
                Err(TryRecvError::Empty) => return true,
                Err(TryRecvError::Disconnected) => return false,
            }
        } else {
            match ctrl.recv_timeout(interval) {
                Ok(m) => m,
                Err(RecvTimeoutError::Timeout) => return true,
                Err(RecvTimeoutError::Disconnected) => return false,
            }
        };
        match msg {
            Control::Skip => *skipping = true,
            Control::Cancel => return false,
        }
    }
}

//! Recurring extraction scheduler
//!
//! Dynamic pages are polled on a fixed period: each tick runs one scrape
//! through the control service. The first scrape fires one full period
//! after start. A tick that lands while the previous extraction is still
//! running is skipped, and missed ticks are delayed rather than bursted,
//! so at most one extraction is in flight at any time. Stop is observed
//! between ticks; a started run always completes.

use crate::control::ControlService;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{interval, MissedTickBehavior};
use tracing::{debug, info, instrument, warn};

/// Handle for stopping a running scheduler.
#[derive(Debug)]
pub struct SchedulerHandle {
    stop: watch::Sender<bool>,
    task: JoinHandle<()>,
}

impl SchedulerHandle {
    /// Signal the loop to stop and wait for it to wind down.
    pub async fn shutdown(self) {
        let _ = self.stop.send(true);
        let _ = self.task.await;
    }

    /// Whether the loop is still running.
    pub fn is_running(&self) -> bool {
        !self.task.is_finished()
    }
}

/// Spawn the polling loop with the given period.
pub fn spawn(service: Arc<ControlService>, period: Duration) -> SchedulerHandle {
    let (stop_tx, stop_rx) = watch::channel(false);
    let task = tokio::spawn(run_loop(service, period, stop_rx));
    SchedulerHandle {
        stop: stop_tx,
        task,
    }
}

#[instrument(skip_all, fields(period_ms = period.as_millis() as u64))]
async fn run_loop(
    service: Arc<ControlService>,
    period: Duration,
    mut stop: watch::Receiver<bool>,
) {
    let mut ticker = interval(period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    // The first interval tick completes immediately; consume it so the
    // first scrape waits one full period.
    ticker.tick().await;

    info!("scheduler started");

    loop {
        tokio::select! {
            changed = stop.changed() => {
                if changed.is_err() || *stop.borrow() {
                    break;
                }
            }
            _ = ticker.tick() => {
                if service.is_busy() {
                    debug!("previous extraction still running, tick skipped");
                    continue;
                }
                let reply = service.scrape().await;
                if !reply.success {
                    warn!(
                        error = reply.error.as_deref().unwrap_or("unknown"),
                        "scheduled scrape failed"
                    );
                }
            }
        }
    }

    info!("scheduler stopped");
}

//! Container readiness polling.
//!
//! The loop is a small state machine:
//!
//! ```text
//! polling --FINISHED--> Finished
//!    |  \--ERROR-----> Errored
//!    |---deadline----> TimedOut
//!    \---cancel------> Cancelled
//! ```
//!
//! Only an explicit `ERROR` status is a failure. Transport errors, non-2xx
//! responses, undecodable bodies and unknown statuses keep the loop in
//! polling until the deadline.

use std::time::{Duration, Instant};

use meta_model::ContainerStatus;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, instrument, warn};

use crate::{
    client::GraphClient,
    config::PollPolicy,
    error::{MetaError, Result},
};

/// Terminal state of the poll loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PollState {
    Finished,
    Errored,
    TimedOut,
    Cancelled,
}

impl PollState {
    /// Transition taken on one status observation.
    ///
    /// `None` keeps the loop polling. A failed read (`Err`) is treated as
    /// "not ready yet".
    pub fn observe(observation: &Result<ContainerStatus>) -> Option<Self> {
        match observation {
            Ok(status) if status.is_publishable() => Some(PollState::Finished),
            Ok(status) if status.is_terminal() => Some(PollState::Errored),
            Ok(_) | Err(_) => None,
        }
    }
}

/// Fetch the current `status_code` of a container.
pub async fn container_status(
    client: &GraphClient,
    container_id: &str,
) -> Result<ContainerStatus> {
    let response = client
        .get(container_id, &[("fields", "status_code".to_string())])
        .await?
        .ensure_success()?;
    let json = response.json()?;

    let raw = json
        .get("status_code")
        .and_then(|v| v.as_str())
        .unwrap_or_default();
    Ok(ContainerStatus::parse(raw))
}

/// Wait until `container_id` reports `FINISHED`.
///
/// Sleeps `initial_delay` before the first check and `interval` between checks.
/// Fails with `ProcessingFailed` on `ERROR`, `ProcessingTimeout` once
/// `max_wait` has elapsed and `Cancelled` when `cancel` fires. An in-flight
/// status request is dropped on cancellation.
#[instrument(level = "debug", skip(client, policy, cancel))]
pub async fn await_ready(
    client: &GraphClient,
    container_id: &str,
    policy: &PollPolicy,
    cancel: &CancellationToken,
) -> Result<()> {
    let started = Instant::now();
    let max_wait = policy.max_wait();
    let mut delay = policy.initial_delay();
    let mut attempt: u32 = 0;

    info!(container_id, "waiting for media processing");

    loop {
        let remaining = max_wait.saturating_sub(started.elapsed());
        let wait = delay.min(remaining);

        tokio::select! {
            _ = cancel.cancelled() => return finish(PollState::Cancelled, container_id, started),
            _ = tokio::time::sleep(wait) => {}
        }
        if wait < delay || started.elapsed() >= max_wait {
            return finish(PollState::TimedOut, container_id, started);
        }

        attempt += 1;
        let budget = max_wait.saturating_sub(started.elapsed());
        let observation = tokio::select! {
            _ = cancel.cancelled() => return finish(PollState::Cancelled, container_id, started),
            res = tokio::time::timeout(budget, container_status(client, container_id)) => {
                res.unwrap_or_else(|_| {
                    Err(MetaError::Transport("status request exceeded poll deadline".into()))
                })
            }
        };

        match &observation {
            Ok(status) => debug!(container_id, attempt, %status, "container status"),
            Err(e) => warn!(container_id, attempt, error = %e, "status check failed; will retry"),
        }

        if let Some(terminal) = PollState::observe(&observation) {
            return finish(terminal, container_id, started);
        }

        delay = policy.interval();
    }
}

fn finish(state: PollState, container_id: &str, started: Instant) -> Result<()> {
    let elapsed_ms = elapsed_ms(started.elapsed());
    match state {
        PollState::Finished => {
            info!(container_id, elapsed_ms, "media processing completed");
            Ok(())
        }
        PollState::Errored => {
            warn!(container_id, "provider reported ERROR status");
            Err(MetaError::ProcessingFailed {
                container_id: container_id.to_string(),
            })
        }
        PollState::TimedOut => {
            warn!(container_id, elapsed_ms, "media processing timed out");
            Err(MetaError::ProcessingTimeout {
                container_id: container_id.to_string(),
                elapsed_ms,
            })
        }
        PollState::Cancelled => {
            debug!(container_id, "poll cancelled");
            Err(MetaError::Cancelled)
        }
    }
}

fn elapsed_ms(d: Duration) -> u64 {
    u64::try_from(d.as_millis()).unwrap_or(u64::MAX)
}

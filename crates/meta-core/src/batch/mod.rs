//! Sequential batch execution with per-item failure isolation.

use std::future::Future;

use meta_model::{BatchOutcome, ItemOutcome};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::error::{MetaError, Result};

/// Run `op` once per id, in input order, collecting every outcome.
///
/// A failing item is recorded as [`ItemOutcome::Failed`] and the batch moves on.
/// Only cancellation aborts the batch: either `cancel` fires between items or
/// `op` itself returns [`MetaError::Cancelled`].
pub async fn process_batch<T, F, Fut>(
    ids: &[String],
    cancel: &CancellationToken,
    mut op: F,
) -> Result<BatchOutcome<T>>
where
    F: FnMut(String) -> Fut,
    Fut: Future<Output = Result<T>>,
{
    let mut outcome = BatchOutcome::new();

    for id in ids {
        if cancel.is_cancelled() {
            debug!(processed = outcome.len(), "batch cancelled");
            return Err(MetaError::Cancelled);
        }

        let result = tokio::select! {
            _ = cancel.cancelled() => return Err(MetaError::Cancelled),
            res = op(id.clone()) => res,
        };

        match result {
            Ok(value) => {
                debug!(item = %id, "batch item succeeded");
                outcome.push(id.clone(), ItemOutcome::Succeeded(value));
            }
            Err(MetaError::Cancelled) => return Err(MetaError::Cancelled),
            Err(e) => {
                warn!(item = %id, error = %e, "batch item failed");
                outcome.push(id.clone(), ItemOutcome::Failed { reason: e.to_string() });
            }
        }
    }

    info!(
        succeeded = outcome.total_succeeded(),
        failed = outcome.total_failed(),
        "batch completed"
    );
    Ok(outcome)
}

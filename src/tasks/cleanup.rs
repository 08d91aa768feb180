//! TTL Cleanup Task
//!
//! Background task that periodically drops expired cache entries.

use std::sync::Weak;
use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::cache::Sweep;

/// Spawns a task that sweeps `target` every `interval`.
///
/// The task holds only a weak reference: once the last strong reference to
/// the target is dropped the loop ends on its next tick. Abort the returned
/// handle to stop it earlier (e.g. at shutdown).
///
/// Reads already skip expired entries, so the sweep only reclaims memory.
///
/// # Example
/// ```ignore
/// let caches = Arc::new(CacheRegistry::new());
/// let handle = spawn_cleanup_task(Arc::downgrade(&caches), CLEANUP_INTERVAL);
/// // Later, during shutdown:
/// handle.abort();
/// ```
pub fn spawn_cleanup_task<S>(target: Weak<S>, interval: Duration) -> JoinHandle<()>
where
    S: Sweep + 'static,
{
    tokio::spawn(async move {
        info!(
            "Starting TTL cleanup task with interval of {} seconds",
            interval.as_secs_f64()
        );

        loop {
            tokio::time::sleep(interval).await;

            let Some(target) = target.upgrade() else {
                debug!("Cleanup target dropped, stopping task");
                break;
            };

            let removed = target.sweep();
            if removed > 0 {
                info!("TTL cleanup ({}): removed {} expired entries", target.label(), removed);
            } else {
                debug!("TTL cleanup ({}): no expired entries found", target.label());
            }
        }
    })
}

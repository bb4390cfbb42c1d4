use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

use haulboard_db::Database;

/// Background task that purges messages past the retention window.
///
/// The first sweep fires one full period after start — there is no persisted
/// checkpoint, so a restart always waits out a fresh interval. A failed
/// sweep is not retried until the next tick.
pub struct RetentionSweeper {
    token: CancellationToken,
    handle: JoinHandle<()>,
}

impl RetentionSweeper {
    pub fn start(db: Arc<Database>, period: Duration, retention_days: u32) -> Self {
        let token = CancellationToken::new();
        let task_token = token.clone();
        let handle = tokio::spawn(run_sweep_loop(db, period, retention_days, task_token));
        Self { token, handle }
    }

    /// Cancel the loop and wait for it to wind down.
    pub async fn stop(self) {
        self.token.cancel();
        self.handle.await.ok();
    }
}

async fn run_sweep_loop(
    db: Arc<Database>,
    period: Duration,
    retention_days: u32,
    token: CancellationToken,
) {
    let first_tick = tokio::time::Instant::now() + period;
    let mut interval = tokio::time::interval_at(first_tick, period);

    loop {
        tokio::select! {
            _ = token.cancelled() => {
                info!("Retention sweeper stopped");
                return;
            }
            _ = interval.tick() => {}
        }

        match sweep(&db, retention_days).await {
            Ok(count) => {
                if count > 0 {
                    info!("Retention sweep: purged {} expired messages", count);
                }
            }
            Err(e) => {
                warn!("Retention sweep error: {}", e);
            }
        }
    }
}

async fn sweep(db: &Arc<Database>, retention_days: u32) -> Result<usize> {
    let db = db.clone();
    tokio::task::spawn_blocking(move || db.purge_expired_messages(retention_days)).await?
}

// Snapshot poller - periodic refresh and wholesale publication
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{watch, Notify};
use tokio::time::MissedTickBehavior;

use crate::application::dashboard_service::DashboardService;
use crate::domain::dashboard::DashboardSnapshot;

/// Handle to the background refresh task. Snapshots are published through
/// a watch channel: subscribers always observe the latest complete
/// snapshot and never a partial update.
#[derive(Clone)]
pub struct SnapshotPoller {
    receiver: watch::Receiver<Option<Arc<DashboardSnapshot>>>,
    refresh: Arc<Notify>,
}

impl SnapshotPoller {
    /// Spawn the polling loop. The first refresh runs immediately, then
    /// one per `interval`; missed ticks are skipped so at most one refresh
    /// cycle is ever in flight. The task exits once every receiver is
    /// dropped, so an inactive dashboard stops generating backend load.
    pub fn spawn(service: DashboardService, interval: Duration) -> Self {
        let (sender, receiver) = watch::channel(None);
        let refresh = Arc::new(Notify::new());
        let trigger = refresh.clone();

        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
            loop {
                tokio::select! {
                    _ = ticker.tick() => {}
                    _ = trigger.notified() => {}
                }
                match service.build_snapshot().await {
                    Ok(snapshot) => {
                        if sender.send(Some(Arc::new(snapshot))).is_err() {
                            tracing::debug!("all snapshot receivers dropped, stopping poller");
                            break;
                        }
                    }
                    Err(e) => {
                        // Leave the previous snapshot in place rather than
                        // clearing the view: stale-but-present.
                        tracing::warn!(error = %e, "dashboard refresh failed, keeping last snapshot");
                    }
                }
            }
        });

        Self { receiver, refresh }
    }

    /// The latest snapshot, `None` until the first successful refresh.
    pub fn latest(&self) -> Option<Arc<DashboardSnapshot>> {
        self.receiver.borrow().clone()
    }

    /// Subscribe to snapshot replacements.
    pub fn subscribe(&self) -> watch::Receiver<Option<Arc<DashboardSnapshot>>> {
        self.receiver.clone()
    }

    /// Request an out-of-band refresh, used right after a limit update so
    /// the displayed numbers catch up without waiting a full interval.
    pub fn refresh_now(&self) {
        self.refresh.notify_one();
    }
}

// Application state for HTTP handlers
use crate::application::dashboard_service::DashboardService;
use crate::application::poller::SnapshotPoller;

#[derive(Clone)]
pub struct AppState {
    pub dashboard_service: DashboardService,
    pub poller: SnapshotPoller,
}

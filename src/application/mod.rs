// Application layer - use cases over the backend port
pub mod backend;
pub mod dashboard_service;
pub mod poller;

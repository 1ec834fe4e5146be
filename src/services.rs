pub mod auth;
pub mod complaint_service;
pub mod content_service;
pub mod dashboard_service;

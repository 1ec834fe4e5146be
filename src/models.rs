pub mod auth;
pub mod complaint;
pub mod content;
pub mod dashboard;

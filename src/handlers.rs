pub mod auth;
pub mod complaints;
pub mod content;
pub mod dashboard;
pub mod health;

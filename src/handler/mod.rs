pub mod analytics;
pub mod error;
pub mod health;
pub mod logs;
pub mod params;

pub mod config;
pub mod content;
pub mod error;
pub mod model;
pub mod telemetry;
pub mod timers;
pub mod views;

pub use config::PortfolioConfig;
pub use error::{ConfigError, ContactFormError};
pub use timers::{FiredTimer, Scheduler, TimerGuard, TimerId};
